use std::fmt;

use serde::{Deserialize, Serialize};

/// How a group or file reference's `path` combines with its parent's path.
///
/// Unrecognized classifiers (`BUILT_PRODUCTS_DIR`, `SDKROOT`, ...) are kept
/// verbatim in [`SourceTree::Other`] so callers decide how to fail.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SourceTree {
    /// `<group>`: relative to the enclosing group.
    Group,
    /// `<absolute>`: the path stands on its own.
    Absolute,
    /// Empty or missing: contributes nothing.
    Undefined,
    Other(String),
}

impl SourceTree {
    /// Classify a raw `sourceTree` value.
    pub fn from_raw(raw: &str) -> Self {
        match raw {
            "<group>" => Self::Group,
            "<absolute>" => Self::Absolute,
            "" => Self::Undefined,
            other => Self::Other(other.to_string()),
        }
    }

    /// The raw value as written in the project file.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Group => "<group>",
            Self::Absolute => "<absolute>",
            Self::Undefined => "",
            Self::Other(raw) => raw,
        }
    }

    /// Returns `true` if path resolution knows how to apply this classifier.
    pub fn is_supported(&self) -> bool {
        !matches!(self, Self::Other(_))
    }
}

impl Default for SourceTree {
    fn default() -> Self {
        Self::Undefined
    }
}

impl fmt::Display for SourceTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_known_values() {
        assert_eq!(SourceTree::from_raw("<group>"), SourceTree::Group);
        assert_eq!(SourceTree::from_raw("<absolute>"), SourceTree::Absolute);
        assert_eq!(SourceTree::from_raw(""), SourceTree::Undefined);
    }

    #[test]
    fn unknown_values_are_kept_verbatim() {
        let tree = SourceTree::from_raw("BUILT_PRODUCTS_DIR");
        assert_eq!(tree, SourceTree::Other("BUILT_PRODUCTS_DIR".into()));
        assert!(!tree.is_supported());
        assert_eq!(tree.as_str(), "BUILT_PRODUCTS_DIR");
    }

    #[test]
    fn raw_value_round_trips() {
        for raw in ["<group>", "<absolute>", "", "SOURCE_ROOT"] {
            assert_eq!(SourceTree::from_raw(raw).as_str(), raw);
        }
    }
}
