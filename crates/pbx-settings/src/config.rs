use serde::{Deserialize, Serialize};

use crate::error::{SettingsError, SettingsResult};

/// Tuning for variable expansion and bundle identifier resolution.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExpansionConfig {
    /// Upper bound on substitution steps for one expansion. Reaching it is
    /// reported as a reference cycle. Must be at least 1; see
    /// [`ExpansionConfig::validate`].
    pub max_steps: usize,
    /// Whether a missing `PRODUCT_BUNDLE_IDENTIFIER` falls back to the
    /// target's Info.plist.
    pub info_plist_fallback: bool,
}

impl Default for ExpansionConfig {
    fn default() -> Self {
        Self {
            max_steps: 256,
            info_plist_fallback: true,
        }
    }
}

impl ExpansionConfig {
    /// Settings-only resolution: never touch the filesystem.
    pub fn without_fallback() -> Self {
        Self {
            info_plist_fallback: false,
            ..Default::default()
        }
    }

    /// Reject values that would make every expansion fail.
    pub fn validate(&self) -> SettingsResult<()> {
        if self.max_steps == 0 {
            return Err(SettingsError::InvalidConfig(
                "expansion.max_steps must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
