//! Configuration lists and build configurations.

use serde::{Deserialize, Serialize};

use pbx_types::{BuildSettings, ObjectId};

/// One named build configuration (e.g. `Debug`) with its settings table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildConfiguration {
    pub id: ObjectId,
    pub name: String,
    /// Settings copied verbatim from the record; list values stay lists.
    pub build_settings: BuildSettings,
    /// The `.xcconfig` file reference the configuration is based on, if any.
    pub base_configuration_reference: Option<ObjectId>,
}

/// The ordered set of build configurations attached to a project or target.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigurationList {
    pub id: ObjectId,
    /// Empty when the record does not name a default.
    pub default_configuration_name: String,
    pub build_configurations: Vec<BuildConfiguration>,
}

impl ConfigurationList {
    /// Linear scan for the configuration called `name`.
    pub fn configuration(&self, name: &str) -> Option<&BuildConfiguration> {
        self.build_configurations.iter().find(|c| c.name == name)
    }

    /// The configuration named by `defaultConfigurationName`, if present.
    pub fn default_configuration(&self) -> Option<&BuildConfiguration> {
        if self.default_configuration_name.is_empty() {
            return None;
        }
        self.configuration(&self.default_configuration_name)
    }

    /// Configuration names in declaration order.
    pub fn names(&self) -> Vec<&str> {
        self.build_configurations
            .iter()
            .map(|c| c.name.as_str())
            .collect()
    }
}

/// An entity that owns a configuration list: the project or a target.
pub trait ConfigurationOwner {
    /// Identifier of the owner's `XCConfigurationList`.
    fn configuration_list_id(&self) -> &ObjectId;

    /// Human-readable owner name for diagnostics.
    fn owner_name(&self) -> &str;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn configuration(name: &str) -> BuildConfiguration {
        BuildConfiguration {
            id: ObjectId::from(format!("CFG-{name}")),
            name: name.to_string(),
            build_settings: BuildSettings::new(),
            base_configuration_reference: None,
        }
    }

    #[test]
    fn lookup_by_name() {
        let list = ConfigurationList {
            id: ObjectId::from("L"),
            default_configuration_name: "Release".into(),
            build_configurations: vec![configuration("Debug"), configuration("Release")],
        };
        assert_eq!(list.configuration("Debug").unwrap().id.as_str(), "CFG-Debug");
        assert!(list.configuration("Profile").is_none());
        assert_eq!(list.default_configuration().unwrap().name, "Release");
        assert_eq!(list.names(), vec!["Debug", "Release"]);
    }

    #[test]
    fn empty_default_has_no_default_configuration() {
        let list = ConfigurationList {
            id: ObjectId::from("L"),
            default_configuration_name: String::new(),
            build_configurations: vec![configuration("Debug")],
        };
        assert!(list.default_configuration().is_none());
    }
}
