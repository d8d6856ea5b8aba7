//! Typed build settings.
//!
//! A build configuration's `buildSettings` record maps setting names to either
//! a single string or a list of strings (preprocessor definitions, search
//! paths). The shape is decided once, when the record is parsed, and kept in
//! [`SettingValue`].

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// One build setting value.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SettingValue {
    Scalar(String),
    List(Vec<String>),
}

impl SettingValue {
    /// The scalar string, or `None` for a list.
    pub fn as_scalar(&self) -> Option<&str> {
        match self {
            Self::Scalar(s) => Some(s),
            Self::List(_) => None,
        }
    }

    /// The list items, or `None` for a scalar.
    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            Self::Scalar(_) => None,
            Self::List(items) => Some(items),
        }
    }

    /// The value as it reads when substituted into another setting:
    /// scalars verbatim, lists joined by single spaces.
    pub fn joined(&self) -> Cow<'_, str> {
        match self {
            Self::Scalar(s) => Cow::Borrowed(s),
            Self::List(items) => Cow::Owned(items.join(" ")),
        }
    }
}

/// Renders the way the project file's string form reads: scalars quoted,
/// lists parenthesized.
impl fmt::Display for SettingValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scalar(s) => write!(f, "{s:?}"),
            Self::List(items) => {
                f.write_str("(")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item:?}")?;
                }
                f.write_str(")")
            }
        }
    }
}

impl From<&str> for SettingValue {
    fn from(value: &str) -> Self {
        Self::Scalar(value.to_string())
    }
}

impl From<String> for SettingValue {
    fn from(value: String) -> Self {
        Self::Scalar(value)
    }
}

impl From<Vec<String>> for SettingValue {
    fn from(items: Vec<String>) -> Self {
        Self::List(items)
    }
}

/// The settings table of one build configuration.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BuildSettings(BTreeMap<String, SettingValue>);

impl BuildSettings {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a setting.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<SettingValue>) {
        self.0.insert(key.into(), value.into());
    }

    /// Look up a setting.
    pub fn get(&self, key: &str) -> Option<&SettingValue> {
        self.0.get(key)
    }

    /// Look up a scalar setting. Lists yield `None`.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(SettingValue::as_scalar)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Setting names in sorted order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &SettingValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The longest setting name that `text` starts with.
    ///
    /// Used for undelimited `$NAME` references, which have no closing
    /// delimiter to mark where the name ends.
    pub fn longest_key_prefix(&self, text: &str) -> Option<&str> {
        self.0
            .keys()
            .filter(|key| !key.is_empty() && text.starts_with(key.as_str()))
            .max_by_key(|key| key.len())
            .map(String::as_str)
    }
}

impl FromIterator<(String, SettingValue)> for BuildSettings {
    fn from_iter<I: IntoIterator<Item = (String, SettingValue)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a BuildSettings {
    type Item = (&'a String, &'a SettingValue);
    type IntoIter = std::collections::btree_map::Iter<'a, String, SettingValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
