//! Error types for settings resolution.

use std::path::PathBuf;

use pbx_graph::GraphError;

/// Errors that can occur while resolving settings or expanding variables.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    /// The typed graph could not answer a lookup.
    #[error(transparent)]
    Graph(#[from] GraphError),

    /// No build configuration with the requested name exists.
    #[error("build configuration ({name}) not found for {owner}")]
    ConfigurationNotFound {
        /// The requested configuration name.
        name: String,
        /// The project or target whose list was searched.
        owner: String,
    },

    /// A variable reference names a setting that is not defined.
    #[error("undefined build setting variable: {0}")]
    UndefinedVariable(String),

    /// Expansion produced a string it had already produced.
    #[error("failed to expand ({value}): reference cycle found")]
    ReferenceCycle {
        /// The string expansion started from.
        value: String,
    },

    /// A `$` does not start a well-formed reference.
    #[error("malformed variable reference at byte {position} in ({value})")]
    MalformedReference { value: String, position: usize },

    /// A configuration value is out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// A setting or property exists with the wrong shape.
    #[error("value ({actual}) for key ({key}) is not {expected}")]
    TypeMismatch {
        key: String,
        actual: String,
        expected: &'static str,
    },

    /// Neither the settings nor the Info.plist name a bundle identifier.
    #[error("no PRODUCT_BUNDLE_IDENTIFIER build setting nor CFBundleIdentifier information property found for {target}")]
    MissingBundleIdentifier { target: String },

    /// The Info.plist file could not be read.
    #[error("failed to read information property list {path}: {source}")]
    InfoPlistRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The Info.plist file could not be decoded.
    #[error("failed to decode information property list {path}: {source}")]
    InfoPlistDecode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl SettingsError {
    /// True for the cycle error, whichever bound caught it.
    pub fn is_reference_cycle(&self) -> bool {
        matches!(self, Self::ReferenceCycle { .. })
    }
}

/// Convenience alias for settings results.
pub type SettingsResult<T> = Result<T, SettingsError>;
