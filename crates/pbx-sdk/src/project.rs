use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use tracing::debug;

use pbx_deps::DependencyWalk;
use pbx_graph::{ProjectGraph, Target};
use pbx_paths::AssetCatalog;
use pbx_settings::{Expander, FsInfoPlistSource, NoInfoPlist, INFOPLIST_FILE};
use pbx_store::{InMemoryObjectStore, PbxDocument};
use pbx_types::{BuildSettings, ObjectId, SettingValue};

use crate::config::SdkConfig;
use crate::error::{SdkError, SdkResult};

/// Extension of an Xcode project bundle.
pub const XCODEPROJ_EXTENSION: &str = "xcodeproj";
/// Name of the project file inside the bundle.
pub const PBXPROJ_FILE_NAME: &str = "project.pbxproj";
/// Setting naming a target's entitlements file.
pub const CODE_SIGN_ENTITLEMENTS: &str = "CODE_SIGN_ENTITLEMENTS";

/// Returns `true` if `path` names an `.xcodeproj` bundle.
pub fn is_xcodeproj(path: impl AsRef<Path>) -> bool {
    path.as_ref()
        .extension()
        .is_some_and(|ext| ext == XCODEPROJ_EXTENSION)
}

/// An opened Xcode project.
pub struct XcodeProj {
    name: String,
    path: PathBuf,
    document: PbxDocument,
    graph: ProjectGraph,
    config: SdkConfig,
}

impl XcodeProj {
    /// Open an `.xcodeproj` bundle with the default configuration.
    pub fn open(path: impl AsRef<Path>) -> SdkResult<Self> {
        Self::open_with_config(path, SdkConfig::default())
    }

    /// Open an `.xcodeproj` bundle.
    ///
    /// The bundle's `project.pbxproj` must already be in JSON form.
    pub fn open_with_config(path: impl AsRef<Path>, config: SdkConfig) -> SdkResult<Self> {
        let path = path.as_ref();
        if !is_xcodeproj(path) {
            return Err(SdkError::NotAProjectBundle(path.to_path_buf()));
        }

        let pbxproj = path.join(PBXPROJ_FILE_NAME);
        let bytes = std::fs::read(&pbxproj).map_err(|source| SdkError::Io {
            path: pbxproj.clone(),
            source,
        })?;
        let document = PbxDocument::from_json_slice(&bytes)?;

        let name = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self::from_document(name, path, document, config)
    }

    /// Wrap an already-decoded document. `path` is where the bundle lives;
    /// relative setting paths resolve against its parent directory.
    pub fn from_document(
        name: impl Into<String>,
        path: impl Into<PathBuf>,
        document: PbxDocument,
        config: SdkConfig,
    ) -> SdkResult<Self> {
        let graph = match &document.root_object {
            Some(root) => pbx_graph::parse_project(&document.objects, root)?,
            None => pbx_graph::parse_discovered(&document.objects)?,
        };
        let project = Self {
            name: name.into(),
            path: path.into(),
            document,
            graph,
            config,
        };
        debug!(
            name = %project.name,
            targets = project.graph.targets().len(),
            "opened project"
        );
        Ok(project)
    }

    // ---- Accessors ----

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Path of the `.xcodeproj` bundle.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The directory containing the bundle.
    pub fn dir(&self) -> &Path {
        self.path.parent().unwrap_or_else(|| Path::new(""))
    }

    pub fn graph(&self) -> &ProjectGraph {
        &self.graph
    }

    pub fn store(&self) -> &InMemoryObjectStore {
        &self.document.objects
    }

    pub fn document(&self) -> &PbxDocument {
        &self.document
    }

    pub fn config(&self) -> &SdkConfig {
        &self.config
    }

    // ---- Targets ----

    /// Project targets in declaration order.
    pub fn targets(&self) -> Vec<&Target> {
        self.graph.targets()
    }

    pub fn target(&self, name: &str) -> SdkResult<&Target> {
        self.graph
            .target_by_name(name)
            .ok_or_else(|| SdkError::TargetNotFound(name.to_string()))
    }

    /// The target's default configuration name; empty when unset.
    pub fn default_configuration_name(&self, target: &str) -> SdkResult<&str> {
        let target = self.target(target)?;
        Ok(pbx_settings::default_configuration_name(&self.graph, target)?)
    }

    /// The project's own default configuration name; empty when unset.
    pub fn project_default_configuration_name(&self) -> SdkResult<&str> {
        Ok(pbx_settings::default_configuration_name(
            &self.graph,
            self.graph.project(),
        )?)
    }

    /// Transitive dependencies of `target`, parent first.
    pub fn dependent_targets(&self, target: &str) -> SdkResult<Vec<&Target>> {
        let target = self.target(target)?;
        Ok(pbx_deps::dependent_targets(&self.graph, target)?)
    }

    /// Transitive dependencies of `target` including cross-project ones.
    pub fn dependency_walk(&self, target: &str) -> SdkResult<DependencyWalk<'_>> {
        let target = self.target(target)?;
        Ok(pbx_deps::walk(&self.graph, target)?)
    }

    // ---- Settings ----

    pub fn target_build_settings(&self, target: &str, configuration: &str) -> SdkResult<&BuildSettings> {
        let target = self.target(target)?;
        Ok(pbx_settings::build_settings(&self.graph, target, configuration)?)
    }

    pub fn project_build_settings(&self, configuration: &str) -> SdkResult<&BuildSettings> {
        Ok(pbx_settings::build_settings(
            &self.graph,
            self.graph.project(),
            configuration,
        )?)
    }

    /// The target's bundle identifier with all variables expanded.
    pub fn target_bundle_id(&self, target: &str, configuration: &str) -> SdkResult<String> {
        let target = self.target(target)?;
        let expansion = &self.config.expansion;
        let resolved = if expansion.info_plist_fallback {
            let source = FsInfoPlistSource::new(self.dir());
            pbx_settings::bundle_identifier(&self.graph, target, configuration, expansion, &source)?
        } else {
            pbx_settings::bundle_identifier(&self.graph, target, configuration, expansion, &NoInfoPlist)?
        };
        Ok(resolved)
    }

    /// One setting of `settings` with its references expanded under this
    /// project's limits. List values expand to their space-joined form.
    pub fn expand_setting(&self, settings: &BuildSettings, key: &str) -> SdkResult<Option<String>> {
        let Some(value) = settings.get(key) else {
            return Ok(None);
        };
        let expander = Expander::with_config(settings, &self.config.expansion);
        Ok(Some(expander.expand(&value.joined())?))
    }

    /// Where the target's `INFOPLIST_FILE` lives.
    pub fn target_info_plist_path(&self, target: &str, configuration: &str) -> SdkResult<PathBuf> {
        self.settings_file_path(target, configuration, INFOPLIST_FILE)
    }

    /// Where the target's `CODE_SIGN_ENTITLEMENTS` file lives.
    pub fn target_code_sign_entitlements_path(
        &self,
        target: &str,
        configuration: &str,
    ) -> SdkResult<PathBuf> {
        self.settings_file_path(target, configuration, CODE_SIGN_ENTITLEMENTS)
    }

    /// A path-valued setting, joined onto the bundle's directory when relative.
    fn settings_file_path(&self, target: &str, configuration: &str, key: &str) -> SdkResult<PathBuf> {
        let settings = self.target_build_settings(target, configuration)?;
        let raw = match settings.get(key) {
            Some(SettingValue::Scalar(raw)) if !raw.is_empty() => raw,
            Some(value @ SettingValue::List(_)) => {
                return Err(pbx_settings::SettingsError::TypeMismatch {
                    key: key.to_string(),
                    actual: value.to_string(),
                    expected: "a string",
                }
                .into())
            }
            _ => {
                return Err(SdkError::MissingSetting {
                    key: key.to_string(),
                    target: target.to_string(),
                    configuration: configuration.to_string(),
                })
            }
        };

        let path = Path::new(raw);
        if path.is_absolute() {
            Ok(path.to_path_buf())
        } else {
            Ok(self.dir().join(path))
        }
    }

    // ---- Paths ----

    /// Resolve a file or group reference through the group tree.
    pub fn resolve_path(&self, file_ref: &ObjectId) -> SdkResult<Option<PathBuf>> {
        Ok(pbx_paths::resolve_in_project(
            self.store(),
            self.graph.project(),
            file_ref,
        )?)
    }

    /// Asset catalogs per target, keyed by target name.
    pub fn asset_catalogs(&self, resolve: bool) -> SdkResult<BTreeMap<String, Vec<AssetCatalog>>> {
        let by_id = pbx_paths::targets_to_asset_catalogs(self.store(), &self.graph, resolve)?;
        let mut by_name = BTreeMap::new();
        for (id, catalogs) in by_id {
            let target = self.graph.require_target(&id)?;
            by_name.insert(target.name.clone(), catalogs);
        }
        Ok(by_name)
    }
}

impl std::fmt::Debug for XcodeProj {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("XcodeProj")
            .field("name", &self.name)
            .field("path", &self.path)
            .field("targets", &self.graph.target_count())
            .finish()
    }
}
