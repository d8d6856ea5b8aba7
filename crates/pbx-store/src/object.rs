use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{StoreError, StoreResult};

/// A decoded property-list value.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    String(String),
    Bool(bool),
    Array(Vec<Value>),
    Dict(Record),
}

impl Value {
    /// The shape name used in type mismatch errors.
    pub fn shape(&self) -> &'static str {
        match self {
            Self::String(_) => "a string",
            Self::Bool(_) => "a boolean",
            Self::Array(_) => "an array",
            Self::Dict(_) => "a dictionary",
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Self::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_record(&self) -> Option<&Record> {
        match self {
            Self::Dict(record) => Some(record),
            _ => None,
        }
    }

    /// Convert a decoded JSON value.
    ///
    /// Numbers become strings, the way an ASCII property list stores them.
    /// `null` has no property-list counterpart and yields `None`; nulls inside
    /// arrays and dictionaries are dropped.
    pub fn from_json(json: serde_json::Value) -> Option<Self> {
        match json {
            serde_json::Value::Null => None,
            serde_json::Value::Bool(b) => Some(Self::Bool(b)),
            serde_json::Value::Number(n) => Some(Self::String(n.to_string())),
            serde_json::Value::String(s) => Some(Self::String(s)),
            serde_json::Value::Array(items) => Some(Self::Array(
                items.into_iter().filter_map(Self::from_json).collect(),
            )),
            serde_json::Value::Object(map) => Some(Self::Dict(Record::from_json_map(map))),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String(s) => write!(f, "{s:?}"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Array(items) => {
                f.write_str("(")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str(")")
            }
            Self::Dict(record) => write!(f, "{record}"),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

/// A record: one entry of the `objects` mapping, or any nested dictionary.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record {
    fields: BTreeMap<String, Value>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a record from field/value pairs.
    pub fn from_fields<K, I>(fields: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Value)>,
    {
        Self {
            fields: fields.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }

    /// Convert a decoded JSON object, dropping `null` fields.
    pub fn from_json_map(map: serde_json::Map<String, serde_json::Value>) -> Self {
        Self {
            fields: map
                .into_iter()
                .filter_map(|(k, v)| Value::from_json(v).map(|v| (k, v)))
                .collect(),
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    // -----------------------------------------------------------------------
    // Typed projections
    // -----------------------------------------------------------------------

    /// The raw value of a required field.
    pub fn value(&self, key: &str) -> StoreResult<&Value> {
        self.fields.get(key).ok_or_else(|| StoreError::KeyNotFound {
            key: key.to_string(),
        })
    }

    /// A required string field.
    pub fn string(&self, key: &str) -> StoreResult<&str> {
        let value = self.value(key)?;
        value.as_str().ok_or_else(|| mismatch(key, value, "a string"))
    }

    /// A required array-of-strings field.
    pub fn string_list(&self, key: &str) -> StoreResult<Vec<&str>> {
        let value = self.value(key)?;
        let items = value
            .as_array()
            .ok_or_else(|| mismatch(key, value, "an array of strings"))?;
        items
            .iter()
            .map(|item| item.as_str().ok_or_else(|| mismatch(key, value, "an array of strings")))
            .collect()
    }

    /// A required dictionary field.
    pub fn record(&self, key: &str) -> StoreResult<&Record> {
        let value = self.value(key)?;
        value
            .as_record()
            .ok_or_else(|| mismatch(key, value, "a dictionary"))
    }

    /// A required array-of-dictionaries field.
    pub fn record_list(&self, key: &str) -> StoreResult<Vec<&Record>> {
        let value = self.value(key)?;
        let items = value
            .as_array()
            .ok_or_else(|| mismatch(key, value, "an array of dictionaries"))?;
        items
            .iter()
            .map(|item| {
                item.as_record()
                    .ok_or_else(|| mismatch(key, value, "an array of dictionaries"))
            })
            .collect()
    }

    /// The record's `isa` discriminator.
    pub fn isa(&self) -> StoreResult<&str> {
        self.string("isa")
    }

    // -----------------------------------------------------------------------
    // Optional projections: absence is `None`, a wrong shape is still an error.
    // -----------------------------------------------------------------------

    pub fn optional_string(&self, key: &str) -> StoreResult<Option<&str>> {
        optional(self.string(key))
    }

    pub fn optional_string_list(&self, key: &str) -> StoreResult<Option<Vec<&str>>> {
        optional(self.string_list(key))
    }

    pub fn optional_record(&self, key: &str) -> StoreResult<Option<&Record>> {
        optional(self.record(key))
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (key, value) in &self.fields {
            write!(f, "{key} = {value}; ")?;
        }
        f.write_str("}")
    }
}

fn mismatch(key: &str, actual: &Value, expected: &'static str) -> StoreError {
    StoreError::TypeMismatch {
        key: key.to_string(),
        actual: actual.to_string(),
        expected,
    }
}

fn optional<T>(result: StoreResult<T>) -> StoreResult<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(StoreError::KeyNotFound { .. }) => Ok(None),
        Err(e) => Err(e),
    }
}
