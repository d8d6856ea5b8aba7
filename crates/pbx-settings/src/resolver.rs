//! Per-owner, per-configuration settings lookup.

use tracing::debug;

use pbx_graph::{BuildConfiguration, ConfigurationOwner, ProjectGraph};
use pbx_types::BuildSettings;

use crate::error::{SettingsError, SettingsResult};

/// The build configuration called `name` in the owner's configuration list.
pub fn build_configuration<'g, O: ConfigurationOwner + ?Sized>(
    graph: &'g ProjectGraph,
    owner: &O,
    name: &str,
) -> SettingsResult<&'g BuildConfiguration> {
    let list = graph.configuration_list_of(owner)?;
    list.configuration(name)
        .ok_or_else(|| SettingsError::ConfigurationNotFound {
            name: name.to_string(),
            owner: owner.owner_name().to_string(),
        })
}

/// The settings table of the owner's configuration called `name`.
///
/// Fails with [`SettingsError::ConfigurationNotFound`] rather than yielding
/// an empty table.
pub fn build_settings<'g, O: ConfigurationOwner + ?Sized>(
    graph: &'g ProjectGraph,
    owner: &O,
    name: &str,
) -> SettingsResult<&'g BuildSettings> {
    let configuration = build_configuration(graph, owner, name)?;
    debug!(
        owner = owner.owner_name(),
        configuration = name,
        settings = configuration.build_settings.len(),
        "resolved build settings"
    );
    Ok(&configuration.build_settings)
}

/// The owner's `defaultConfigurationName`; empty when the list names none.
pub fn default_configuration_name<'g, O: ConfigurationOwner + ?Sized>(
    graph: &'g ProjectGraph,
    owner: &O,
) -> SettingsResult<&'g str> {
    Ok(graph
        .configuration_list_of(owner)?
        .default_configuration_name
        .as_str())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pbx_graph::parse_discovered;
    use pbx_store::InMemoryObjectStore;
    use serde_json::json;

    fn graph() -> ProjectGraph {
        let store = InMemoryObjectStore::from_objects_json(json!({
            "P": {"isa": "PBXProject", "buildConfigurationList": "PL", "targets": ["T"], "mainGroup": "G"},
            "PL": {"isa": "XCConfigurationList", "buildConfigurations": ["PD", "PR"], "defaultConfigurationName": "Release"},
            "PD": {"isa": "XCBuildConfiguration", "name": "Debug", "buildSettings": {"ONLY_ACTIVE_ARCH": "YES"}},
            "PR": {"isa": "XCBuildConfiguration", "name": "Release", "buildSettings": {"ONLY_ACTIVE_ARCH": "NO"}},
            "T": {"isa": "PBXNativeTarget", "name": "App", "buildConfigurationList": "TL", "dependencies": []},
            "TL": {"isa": "XCConfigurationList", "buildConfigurations": ["TD"]},
            "TD": {"isa": "XCBuildConfiguration", "name": "Debug", "buildSettings": {"PRODUCT_NAME": "App"}}
        }))
        .unwrap();
        parse_discovered(&store).unwrap()
    }

    #[test]
    fn target_settings_by_name() {
        let graph = graph();
        let app = graph.target_by_name("App").unwrap();
        let settings = build_settings(&graph, app, "Debug").unwrap();
        assert_eq!(settings.get_str("PRODUCT_NAME"), Some("App"));
    }

    #[test]
    fn project_settings_by_name() {
        let graph = graph();
        let settings = build_settings(&graph, graph.project(), "Release").unwrap();
        assert_eq!(settings.get_str("ONLY_ACTIVE_ARCH"), Some("NO"));
    }

    #[test]
    fn missing_configuration_is_an_error() {
        let graph = graph();
        let app = graph.target_by_name("App").unwrap();
        match build_settings(&graph, app, "Release") {
            Err(SettingsError::ConfigurationNotFound { name, owner }) => {
                assert_eq!(name, "Release");
                assert_eq!(owner, "App");
            }
            other => panic!("expected ConfigurationNotFound, got {other:?}"),
        }
    }

    #[test]
    fn default_names() {
        let graph = graph();
        let app = graph.target_by_name("App").unwrap();
        assert_eq!(default_configuration_name(&graph, graph.project()).unwrap(), "Release");
        assert_eq!(default_configuration_name(&graph, app).unwrap(), "");
    }
}
