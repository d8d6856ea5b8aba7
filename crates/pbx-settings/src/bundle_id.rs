//! Bundle identifier resolution.
//!
//! The identifier comes from the `PRODUCT_BUNDLE_IDENTIFIER` setting of the
//! requested configuration. Older projects leave that setting out and keep
//! `CFBundleIdentifier` in the target's Info.plist instead; the plist is read
//! through an [`InfoPlistSource`] so callers decide how, and whether, the
//! filesystem is touched. Either way the raw value is expanded against the
//! same settings table.

use std::path::{Path, PathBuf};

use tracing::debug;

use pbx_graph::{ProjectGraph, Target};
use pbx_types::{BuildSettings, SettingValue};

use crate::config::ExpansionConfig;
use crate::error::{SettingsError, SettingsResult};
use crate::expand::Expander;
use crate::resolver::build_settings;

pub const PRODUCT_BUNDLE_IDENTIFIER: &str = "PRODUCT_BUNDLE_IDENTIFIER";
pub const INFOPLIST_FILE: &str = "INFOPLIST_FILE";
pub const CF_BUNDLE_IDENTIFIER: &str = "CFBundleIdentifier";

/// Reads `CFBundleIdentifier` out of an Info.plist.
pub trait InfoPlistSource {
    /// The raw `CFBundleIdentifier` of the plist named by an
    /// `INFOPLIST_FILE` setting, or `None` when the plist has none.
    fn bundle_identifier(&self, info_plist_file: &str) -> SettingsResult<Option<String>>;
}

/// Reads Info.plist files from disk, in the JSON form produced by
/// `plutil -convert json`. Relative paths are joined onto `base_dir`.
#[derive(Clone, Debug)]
pub struct FsInfoPlistSource {
    base_dir: PathBuf,
}

impl FsInfoPlistSource {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    /// Where `info_plist_file` lives on disk.
    pub fn path_of(&self, info_plist_file: &str) -> PathBuf {
        let path = Path::new(info_plist_file);
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.base_dir.join(path)
        }
    }
}

impl InfoPlistSource for FsInfoPlistSource {
    fn bundle_identifier(&self, info_plist_file: &str) -> SettingsResult<Option<String>> {
        let path = self.path_of(info_plist_file);
        let bytes = std::fs::read(&path).map_err(|source| SettingsError::InfoPlistRead {
            path: path.clone(),
            source,
        })?;
        let plist: serde_json::Value =
            serde_json::from_slice(&bytes).map_err(|source| SettingsError::InfoPlistDecode {
                path: path.clone(),
                source,
            })?;
        debug!(path = %path.display(), "read information property list");

        match plist.get(CF_BUNDLE_IDENTIFIER) {
            None | Some(serde_json::Value::Null) => Ok(None),
            Some(serde_json::Value::String(id)) => Ok(Some(id.clone())),
            Some(other) => Err(SettingsError::TypeMismatch {
                key: CF_BUNDLE_IDENTIFIER.to_string(),
                actual: other.to_string(),
                expected: "a string",
            }),
        }
    }
}

/// An [`InfoPlistSource`] that never finds anything.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoInfoPlist;

impl InfoPlistSource for NoInfoPlist {
    fn bundle_identifier(&self, _info_plist_file: &str) -> SettingsResult<Option<String>> {
        Ok(None)
    }
}

/// Resolve the bundle identifier of `target` under `configuration`.
pub fn bundle_identifier(
    graph: &ProjectGraph,
    target: &Target,
    configuration: &str,
    config: &ExpansionConfig,
    info_plist: &dyn InfoPlistSource,
) -> SettingsResult<String> {
    let settings = build_settings(graph, target, configuration)?;
    let raw = match raw_from_settings(settings)? {
        Some(raw) => raw.to_string(),
        None => raw_from_info_plist(target, settings, config, info_plist)?,
    };

    let resolved = Expander::with_config(settings, config).expand(&raw)?;
    debug!(target_name = %target.name, configuration, raw = %raw, resolved = %resolved, "resolved bundle identifier");
    Ok(resolved)
}

/// A non-empty scalar `PRODUCT_BUNDLE_IDENTIFIER`, if set.
fn raw_from_settings(settings: &BuildSettings) -> SettingsResult<Option<&str>> {
    match settings.get(PRODUCT_BUNDLE_IDENTIFIER) {
        None => Ok(None),
        Some(SettingValue::Scalar(raw)) if raw.is_empty() => Ok(None),
        Some(SettingValue::Scalar(raw)) => Ok(Some(raw.as_str())),
        Some(value @ SettingValue::List(_)) => Err(SettingsError::TypeMismatch {
            key: PRODUCT_BUNDLE_IDENTIFIER.to_string(),
            actual: value.to_string(),
            expected: "a string",
        }),
    }
}

fn raw_from_info_plist(
    target: &Target,
    settings: &BuildSettings,
    config: &ExpansionConfig,
    info_plist: &dyn InfoPlistSource,
) -> SettingsResult<String> {
    let missing = || SettingsError::MissingBundleIdentifier {
        target: target.name.clone(),
    };
    if !config.info_plist_fallback {
        return Err(missing());
    }
    let Some(info_plist_file) = settings.get_str(INFOPLIST_FILE).filter(|p| !p.is_empty()) else {
        return Err(missing());
    };

    debug!(target_name = %target.name, info_plist_file, "falling back to Info.plist");
    match info_plist.bundle_identifier(info_plist_file)? {
        Some(raw) if !raw.is_empty() => Ok(raw),
        _ => Err(missing()),
    }
}
