use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use pbx_types::ObjectId;

use crate::configuration::ConfigurationOwner;

/// The root `PBXProject` record.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: ObjectId,
    pub build_configuration_list: ObjectId,
    /// Target identifiers in the order the project lists them.
    pub targets: Vec<ObjectId>,
    /// Root of the logical file tree.
    pub main_group: ObjectId,
    pub product_ref_group: Option<ObjectId>,
    /// Empty when absent.
    pub project_dir_path: String,
    /// Empty when absent.
    pub project_root: String,
    pub development_region: Option<String>,
    pub known_regions: Vec<String>,
    pub compatibility_version: Option<String>,
    pub attributes: ProjectAttributes,
}

impl Project {
    /// The base all group-relative paths start from: `projectDirPath`
    /// joined with `projectRoot`.
    pub fn root_path(&self) -> std::path::PathBuf {
        let mut path = std::path::PathBuf::from(&self.project_dir_path);
        if !self.project_root.is_empty() {
            path.push(&self.project_root);
        }
        path
    }
}

impl ConfigurationOwner for Project {
    fn configuration_list_id(&self) -> &ObjectId {
        &self.build_configuration_list
    }

    fn owner_name(&self) -> &str {
        "project"
    }
}

/// The project's `attributes` dictionary.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectAttributes {
    pub last_upgrade_check: Option<String>,
    pub organization_name: Option<String>,
    /// Per-target attributes keyed by target identifier.
    pub target_attributes: BTreeMap<ObjectId, TargetAttributes>,
}

/// Per-target entries of `attributes.TargetAttributes`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetAttributes {
    pub created_on_tools_version: Option<String>,
    pub last_swift_migration: Option<String>,
    pub development_team: Option<String>,
    /// `Automatic` or `Manual`.
    pub provisioning_style: Option<String>,
    /// Set on test targets.
    pub test_target_id: Option<ObjectId>,
}
