//! SDK configuration, loadable from TOML.
//!
//! ```toml
//! [expansion]
//! max_steps = 64
//! info_plist_fallback = false
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use pbx_settings::ExpansionConfig;

use crate::error::{SdkError, SdkResult};

/// Configuration for an opened project.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SdkConfig {
    /// Variable expansion and bundle identifier behaviour.
    pub expansion: ExpansionConfig,
}

impl SdkConfig {
    /// Parse a TOML document. Missing tables and keys take defaults.
    pub fn from_toml_str(text: &str) -> SdkResult<Self> {
        let config: Self = toml::from_str(text)?;
        config.expansion.validate()?;
        Ok(config)
    }

    /// Read and parse a TOML config file.
    pub fn load(path: impl AsRef<Path>) -> SdkResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| SdkError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), "loaded config");
        Self::from_toml_str(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_is_default() {
        assert_eq!(SdkConfig::from_toml_str("").unwrap(), SdkConfig::default());
    }

    #[test]
    fn partial_expansion_table() {
        let config = SdkConfig::from_toml_str("[expansion]\nmax_steps = 64\n").unwrap();
        assert_eq!(config.expansion.max_steps, 64);
        assert!(config.expansion.info_plist_fallback);
    }

    #[test]
    fn invalid_toml_is_config_error() {
        assert!(matches!(
            SdkConfig::from_toml_str("[expansion]\nmax_steps = \"many\"\n"),
            Err(SdkError::Config(_))
        ));
    }

    #[test]
    fn zero_step_bound_is_rejected_on_load() {
        match SdkConfig::from_toml_str("[expansion]\nmax_steps = 0\n") {
            Err(SdkError::Settings(pbx_settings::SettingsError::InvalidConfig(msg))) => {
                assert!(msg.contains("max_steps"));
            }
            other => panic!("expected InvalidConfig, got {other:?}"),
        }
    }

    #[test]
    fn load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pbx.toml");
        std::fs::write(&path, "[expansion]\ninfo_plist_fallback = false\n").unwrap();
        let config = SdkConfig::load(&path).unwrap();
        assert!(!config.expansion.info_plist_fallback);
        assert_eq!(config.expansion.max_steps, 256);

        assert!(matches!(
            SdkConfig::load(dir.path().join("missing.toml")),
            Err(SdkError::Io { .. })
        ));
    }
}
