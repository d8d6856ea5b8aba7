//! Record-to-entity parsing.
//!
//! [`parse_project`] walks from the `PBXProject` record through its targets,
//! their configuration lists and build configurations, and their dependency
//! edges. Every parsed entity is memoized in a [`ParseCache`] that lives for
//! exactly one parse and then becomes the arena of the returned
//! [`ProjectGraph`].
//!
//! The cache only ever holds finished entities. A target that is still being
//! parsed is tracked separately in the cache's in-progress set; a dependency
//! that points back at such a target records the identifier and stops, which
//! is what terminates a target dependency cycle. Detecting that cycle is left
//! to the dependency walker.

use std::collections::{BTreeMap, HashMap, HashSet};

use tracing::{debug, trace};

use pbx_store::{ObjectStore, Record, StoreError, Value};
use pbx_types::{BuildSettings, Isa, ObjectId, SettingValue};

use crate::configuration::{BuildConfiguration, ConfigurationList};
use crate::error::{GraphError, GraphResult};
use crate::graph::ProjectGraph;
use crate::project::{Project, ProjectAttributes, TargetAttributes};
use crate::target::{
    ContainerItemProxy, DependencyTarget, LegacyTarget, NativeTarget, Target, TargetDependency,
    TargetKind,
};

/// Parse-scoped memoization of finished entities.
#[derive(Debug, Default)]
pub struct ParseCache {
    targets: HashMap<ObjectId, Target>,
    configuration_lists: HashMap<ObjectId, ConfigurationList>,
    build_configurations: HashMap<ObjectId, BuildConfiguration>,
    dependencies: HashMap<ObjectId, TargetDependency>,
    in_progress: HashSet<ObjectId>,
}

impl ParseCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of finished entities of every kind.
    pub fn len(&self) -> usize {
        self.targets.len()
            + self.configuration_lists.len()
            + self.build_configurations.len()
            + self.dependencies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn into_graph(self, project: Project) -> ProjectGraph {
        ProjectGraph {
            project,
            targets: self.targets,
            configuration_lists: self.configuration_lists,
            dependencies: self.dependencies,
        }
    }
}

/// Find the identifier of the unique `PBXProject` record.
pub fn discover_project_id<S: ObjectStore + ?Sized>(store: &S) -> GraphResult<ObjectId> {
    let mut projects = store.ids_with_isa(Isa::Project)?;
    match projects.len() {
        0 => Err(GraphError::ProjectNotFound),
        1 => Ok(projects.remove(0).clone()),
        _ => Err(GraphError::MultipleProjects(
            projects.into_iter().cloned().collect(),
        )),
    }
}

/// Parse the project whose record id is `root_id`.
pub fn parse_project<S: ObjectStore + ?Sized>(
    store: &S,
    root_id: &ObjectId,
) -> GraphResult<ProjectGraph> {
    let mut parser = Parser {
        store,
        cache: ParseCache::new(),
    };
    let project = parser.project(root_id)?;
    debug!(
        project = %root_id,
        targets = parser.cache.targets.len(),
        configuration_lists = parser.cache.configuration_lists.len(),
        "parsed project graph"
    );
    Ok(parser.cache.into_graph(project))
}

/// Discover the project record and parse it.
pub fn parse_discovered<S: ObjectStore + ?Sized>(store: &S) -> GraphResult<ProjectGraph> {
    let root_id = discover_project_id(store)?;
    parse_project(store, &root_id)
}

struct Parser<'s, S: ?Sized> {
    store: &'s S,
    cache: ParseCache,
}

impl<'s, S: ObjectStore + ?Sized> Parser<'s, S> {
    /// Fetch a record and check its `isa` against `accepted`.
    fn record_of_kind(
        &self,
        id: &ObjectId,
        expected: &'static str,
        accepted: &[Isa],
    ) -> GraphResult<(&'s Record, Isa)> {
        let store: &'s S = self.store;
        let (record, tag) = store.get_with_isa(id)?;
        match tag.parse::<Isa>() {
            Ok(isa) if accepted.contains(&isa) => Ok((record, isa)),
            _ => Err(GraphError::UnknownKind {
                id: id.clone(),
                isa: tag.to_string(),
                expected,
            }),
        }
    }

    // ---------------------------------------------------------------
    // Project
    // ---------------------------------------------------------------

    fn project(&mut self, id: &ObjectId) -> GraphResult<Project> {
        let (record, _) = self.record_of_kind(id, "project", &[Isa::Project])?;

        let build_configuration_list = ObjectId::from(record.string("buildConfigurationList")?);
        let targets = ids(record.string_list("targets")?);
        let main_group = ObjectId::from(record.string("mainGroup")?);
        let product_ref_group = record.optional_string("productRefGroup")?.map(ObjectId::from);
        let project_dir_path = record
            .optional_string("projectDirPath")?
            .unwrap_or_default()
            .to_string();
        let project_root = record
            .optional_string("projectRoot")?
            .unwrap_or_default()
            .to_string();
        let development_region = record
            .optional_string("developmentRegion")?
            .map(str::to_string);
        let known_regions = record
            .optional_string_list("knownRegions")?
            .unwrap_or_default()
            .into_iter()
            .map(str::to_string)
            .collect();
        let compatibility_version = record
            .optional_string("compatibilityVersion")?
            .map(str::to_string);
        let attributes = match record.optional_record("attributes")? {
            Some(raw) => project_attributes(raw)?,
            None => ProjectAttributes::default(),
        };

        self.configuration_list(&build_configuration_list)?;
        for target_id in &targets {
            self.target(target_id)?;
        }

        Ok(Project {
            id: id.clone(),
            build_configuration_list,
            targets,
            main_group,
            product_ref_group,
            project_dir_path,
            project_root,
            development_region,
            known_regions,
            compatibility_version,
            attributes,
        })
    }

    // ---------------------------------------------------------------
    // Targets
    // ---------------------------------------------------------------

    fn target(&mut self, id: &ObjectId) -> GraphResult<()> {
        if self.cache.targets.contains_key(id) {
            trace!(target_id = %id, "target cached");
            return Ok(());
        }
        if self.cache.in_progress.contains(id) {
            debug!(target_id = %id, "target already on the parse path");
            return Ok(());
        }

        let (record, isa) = self.record_of_kind(
            id,
            "target",
            &[Isa::NativeTarget, Isa::AggregateTarget, Isa::LegacyTarget],
        )?;

        let name = record.string("name")?.to_string();
        let build_configuration_list = ObjectId::from(record.string("buildConfigurationList")?);
        let dependencies = ids(record.string_list("dependencies")?);
        let kind = match isa {
            Isa::NativeTarget => TargetKind::Native(NativeTarget {
                build_phases: ids(record.optional_string_list("buildPhases")?.unwrap_or_default()),
                product_name: record.optional_string("productName")?.map(str::to_string),
                product_type: record.optional_string("productType")?.map(str::to_string),
                product_reference: record
                    .optional_string("productReference")?
                    .map(ObjectId::from),
            }),
            Isa::AggregateTarget => TargetKind::Aggregate,
            _ => TargetKind::Legacy(LegacyTarget {
                build_tool_path: record.optional_string("buildToolPath")?.map(str::to_string),
                build_arguments_string: record
                    .optional_string("buildArgumentsString")?
                    .map(str::to_string),
            }),
        };

        self.cache.in_progress.insert(id.clone());
        self.configuration_list(&build_configuration_list)?;
        for dependency_id in &dependencies {
            self.target_dependency(dependency_id)?;
        }
        self.cache.in_progress.remove(id);

        debug!(target_id = %id, name = %name, kind = %kind, "parsed target");
        self.cache.targets.insert(
            id.clone(),
            Target {
                id: id.clone(),
                name,
                build_configuration_list,
                dependencies,
                kind,
            },
        );
        Ok(())
    }

    fn target_dependency(&mut self, id: &ObjectId) -> GraphResult<()> {
        if self.cache.dependencies.contains_key(id) {
            return Ok(());
        }

        let (record, _) =
            self.record_of_kind(id, "target dependency", &[Isa::TargetDependency])?;
        let local = record.optional_string("target")?.map(ObjectId::from);
        let proxy = record.optional_string("targetProxy")?.map(ObjectId::from);

        let target = match (local, proxy) {
            (Some(target_id), _) => {
                self.target(&target_id)?;
                DependencyTarget::Local(target_id)
            }
            (None, Some(proxy_id)) => DependencyTarget::Remote(self.container_item_proxy(&proxy_id)?),
            (None, None) => {
                return Err(GraphError::Store(StoreError::KeyNotFound {
                    key: "target".into(),
                }))
            }
        };

        self.cache.dependencies.insert(
            id.clone(),
            TargetDependency {
                id: id.clone(),
                target,
            },
        );
        Ok(())
    }

    fn container_item_proxy(&self, id: &ObjectId) -> GraphResult<ContainerItemProxy> {
        let (record, _) =
            self.record_of_kind(id, "container item proxy", &[Isa::ContainerItemProxy])?;
        Ok(ContainerItemProxy {
            id: id.clone(),
            container_portal: ObjectId::from(record.string("containerPortal")?),
            proxy_type: record.string("proxyType")?.to_string(),
            remote_global_id: ObjectId::from(record.string("remoteGlobalIDString")?),
            remote_info: record.optional_string("remoteInfo")?.map(str::to_string),
        })
    }

    // ---------------------------------------------------------------
    // Configurations
    // ---------------------------------------------------------------

    fn configuration_list(&mut self, id: &ObjectId) -> GraphResult<()> {
        if self.cache.configuration_lists.contains_key(id) {
            trace!(list = %id, "configuration list cached");
            return Ok(());
        }

        let (record, _) =
            self.record_of_kind(id, "configuration list", &[Isa::ConfigurationList])?;
        let configuration_ids = ids(record.string_list("buildConfigurations")?);
        let default_configuration_name = record
            .optional_string("defaultConfigurationName")?
            .unwrap_or_default()
            .to_string();

        let mut build_configurations = Vec::with_capacity(configuration_ids.len());
        for configuration_id in &configuration_ids {
            build_configurations.push(self.build_configuration(configuration_id)?);
        }

        debug!(list = %id, configurations = build_configurations.len(), "parsed configuration list");
        self.cache.configuration_lists.insert(
            id.clone(),
            ConfigurationList {
                id: id.clone(),
                default_configuration_name,
                build_configurations,
            },
        );
        Ok(())
    }

    fn build_configuration(&mut self, id: &ObjectId) -> GraphResult<BuildConfiguration> {
        if let Some(cached) = self.cache.build_configurations.get(id) {
            return Ok(cached.clone());
        }

        let (record, _) =
            self.record_of_kind(id, "build configuration", &[Isa::BuildConfiguration])?;
        let configuration = BuildConfiguration {
            id: id.clone(),
            name: record.string("name")?.to_string(),
            build_settings: build_settings(record.record("buildSettings")?)?,
            base_configuration_reference: record
                .optional_string("baseConfigurationReference")?
                .map(ObjectId::from),
        };

        self.cache
            .build_configurations
            .insert(id.clone(), configuration.clone());
        Ok(configuration)
    }
}

fn ids(raw: Vec<&str>) -> Vec<ObjectId> {
    raw.into_iter().map(ObjectId::from).collect()
}

/// Decide each setting's shape once: strings stay scalars, arrays of
/// strings stay lists. Booleans are written the way Xcode spells them.
fn build_settings(raw: &Record) -> GraphResult<BuildSettings> {
    raw.iter()
        .map(|(key, value)| -> GraphResult<(String, SettingValue)> {
            let setting = match value {
                Value::String(s) => SettingValue::Scalar(s.clone()),
                Value::Bool(b) => SettingValue::Scalar(if *b { "YES" } else { "NO" }.to_string()),
                Value::Array(_) => SettingValue::List(
                    raw.string_list(key)?.into_iter().map(str::to_string).collect(),
                ),
                Value::Dict(_) => {
                    return Err(GraphError::Store(StoreError::TypeMismatch {
                        key: key.to_string(),
                        actual: value.to_string(),
                        expected: "a string or an array of strings",
                    }))
                }
            };
            Ok((key.to_string(), setting))
        })
        .collect()
}

fn project_attributes(raw: &Record) -> GraphResult<ProjectAttributes> {
    let mut target_attributes = BTreeMap::new();
    if let Some(per_target) = raw.optional_record("TargetAttributes")? {
        for target_id in per_target.keys() {
            let entry = per_target.record(target_id)?;
            target_attributes.insert(
                ObjectId::from(target_id),
                TargetAttributes {
                    created_on_tools_version: entry
                        .optional_string("CreatedOnToolsVersion")?
                        .map(str::to_string),
                    last_swift_migration: entry
                        .optional_string("LastSwiftMigration")?
                        .map(str::to_string),
                    development_team: entry
                        .optional_string("DevelopmentTeam")?
                        .map(str::to_string),
                    provisioning_style: entry
                        .optional_string("ProvisioningStyle")?
                        .map(str::to_string),
                    test_target_id: entry.optional_string("TestTargetID")?.map(ObjectId::from),
                },
            );
        }
    }

    Ok(ProjectAttributes {
        last_upgrade_check: raw.optional_string("LastUpgradeCheck")?.map(str::to_string),
        organization_name: raw.optional_string("ORGANIZATIONNAME")?.map(str::to_string),
        target_attributes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::configuration::ConfigurationOwner;
    use pbx_store::InMemoryObjectStore;
    use serde_json::json;

    fn oid(id: &str) -> ObjectId {
        ObjectId::from(id)
    }

    /// App depends on Ext and Kit; Ext depends on Kit. App and Ext share a
    /// configuration list.
    fn sample_store() -> InMemoryObjectStore {
        InMemoryObjectStore::from_objects_json(json!({
            "PROJECT": {
                "isa": "PBXProject",
                "buildConfigurationList": "PROJECT_LIST",
                "targets": ["APP", "EXT", "KIT"],
                "mainGroup": "MAIN_GROUP",
                "productRefGroup": "PRODUCTS",
                "projectDirPath": "",
                "projectRoot": "",
                "developmentRegion": "en",
                "knownRegions": ["en", "Base"],
                "compatibilityVersion": "Xcode 9.3",
                "attributes": {
                    "LastUpgradeCheck": "1000",
                    "ORGANIZATIONNAME": "Bitrise",
                    "TargetAttributes": {
                        "APP": {
                            "CreatedOnToolsVersion": "9.2",
                            "DevelopmentTeam": "72SA8V3WYL",
                            "ProvisioningStyle": "Automatic"
                        }
                    }
                }
            },
            "PROJECT_LIST": {
                "isa": "XCConfigurationList",
                "buildConfigurations": ["PROJECT_DEBUG"],
                "defaultConfigurationIsVisible": 0
            },
            "PROJECT_DEBUG": {
                "isa": "XCBuildConfiguration",
                "name": "Debug",
                "buildSettings": {"SDKROOT": "iphoneos"}
            },
            "SHARED_LIST": {
                "isa": "XCConfigurationList",
                "buildConfigurations": ["SHARED_DEBUG", "SHARED_RELEASE"],
                "defaultConfigurationName": "Release"
            },
            "SHARED_DEBUG": {
                "isa": "XCBuildConfiguration",
                "name": "Debug",
                "buildSettings": {
                    "PRODUCT_NAME": "$(TARGET_NAME)",
                    "GCC_PREPROCESSOR_DEFINITIONS": ["DEBUG=1", "$(inherited)"],
                    "ENABLE_TESTABILITY": true
                }
            },
            "SHARED_RELEASE": {
                "isa": "XCBuildConfiguration",
                "name": "Release",
                "buildSettings": {"PRODUCT_NAME": "$(TARGET_NAME)"}
            },
            "KIT_LIST": {
                "isa": "XCConfigurationList",
                "buildConfigurations": ["SHARED_DEBUG"]
            },
            "APP": {
                "isa": "PBXNativeTarget",
                "name": "App",
                "productName": "App",
                "productType": "com.apple.product-type.application",
                "productReference": "APP_PRODUCT",
                "buildConfigurationList": "SHARED_LIST",
                "buildPhases": ["APP_SOURCES", "APP_RESOURCES"],
                "dependencies": ["DEP_APP_EXT", "DEP_APP_KIT"]
            },
            "EXT": {
                "isa": "PBXNativeTarget",
                "name": "Ext",
                "buildConfigurationList": "SHARED_LIST",
                "buildPhases": [],
                "dependencies": ["DEP_EXT_KIT"]
            },
            "KIT": {
                "isa": "PBXAggregateTarget",
                "name": "Kit",
                "buildConfigurationList": "KIT_LIST",
                "buildPhases": [],
                "dependencies": []
            },
            "DEP_APP_EXT": {"isa": "PBXTargetDependency", "target": "EXT", "targetProxy": "PROXY_EXT"},
            "DEP_APP_KIT": {"isa": "PBXTargetDependency", "target": "KIT"},
            "DEP_EXT_KIT": {"isa": "PBXTargetDependency", "target": "KIT"}
        }))
        .unwrap()
    }

    // ---------------------------------------------------------------
    // Project
    // ---------------------------------------------------------------

    #[test]
    fn parses_project_fields() {
        let store = sample_store();
        let graph = parse_project(&store, &oid("PROJECT")).unwrap();
        let project = graph.project();

        assert_eq!(project.targets, vec![oid("APP"), oid("EXT"), oid("KIT")]);
        assert_eq!(project.main_group, oid("MAIN_GROUP"));
        assert_eq!(project.product_ref_group, Some(oid("PRODUCTS")));
        assert_eq!(project.development_region.as_deref(), Some("en"));
        assert_eq!(project.known_regions, vec!["en", "Base"]);
        assert_eq!(project.compatibility_version.as_deref(), Some("Xcode 9.3"));
    }

    #[test]
    fn parses_project_attributes() {
        let store = sample_store();
        let graph = parse_project(&store, &oid("PROJECT")).unwrap();
        let attributes = &graph.project().attributes;

        assert_eq!(attributes.last_upgrade_check.as_deref(), Some("1000"));
        assert_eq!(attributes.organization_name.as_deref(), Some("Bitrise"));
        let app = &attributes.target_attributes[&oid("APP")];
        assert_eq!(app.development_team.as_deref(), Some("72SA8V3WYL"));
        assert_eq!(app.provisioning_style.as_deref(), Some("Automatic"));
        assert_eq!(app.last_swift_migration, None);
    }

    #[test]
    fn root_must_be_a_project() {
        let store = sample_store();
        match parse_project(&store, &oid("APP")) {
            Err(GraphError::UnknownKind { id, isa, expected }) => {
                assert_eq!(id, oid("APP"));
                assert_eq!(isa, "PBXNativeTarget");
                assert_eq!(expected, "project");
            }
            other => panic!("expected UnknownKind, got {other:?}"),
        }
    }

    #[test]
    fn missing_root_is_not_found() {
        let store = sample_store();
        assert!(matches!(
            parse_project(&store, &oid("NOPE")),
            Err(GraphError::Store(StoreError::NotFound(_)))
        ));
    }

    // ---------------------------------------------------------------
    // Discovery
    // ---------------------------------------------------------------

    #[test]
    fn discovers_unique_project() {
        let store = sample_store();
        assert_eq!(discover_project_id(&store).unwrap(), oid("PROJECT"));
        let graph = parse_discovered(&store).unwrap();
        assert_eq!(graph.project().id, oid("PROJECT"));
    }

    #[test]
    fn discovery_without_project_fails() {
        let store = InMemoryObjectStore::from_objects_json(json!({
            "G": {"isa": "PBXGroup", "children": []}
        }))
        .unwrap();
        assert!(matches!(
            discover_project_id(&store),
            Err(GraphError::ProjectNotFound)
        ));
    }

    #[test]
    fn discovery_ignores_untagged_records() {
        let store = InMemoryObjectStore::from_objects_json(json!({
            "A": {"name": "stray"},
            "P1": {"isa": "PBXProject"}
        }))
        .unwrap();
        assert_eq!(discover_project_id(&store).unwrap(), oid("P1"));
    }

    #[test]
    fn discovery_with_two_projects_fails() {
        let store = InMemoryObjectStore::from_objects_json(json!({
            "P1": {"isa": "PBXProject"},
            "P2": {"isa": "PBXProject"}
        }))
        .unwrap();
        match discover_project_id(&store) {
            Err(GraphError::MultipleProjects(ids)) => assert_eq!(ids, vec![oid("P1"), oid("P2")]),
            other => panic!("expected MultipleProjects, got {other:?}"),
        }
    }

    // ---------------------------------------------------------------
    // Targets
    // ---------------------------------------------------------------

    #[test]
    fn parses_target_kinds() {
        let store = sample_store();
        let graph = parse_project(&store, &oid("PROJECT")).unwrap();

        let app = graph.target_by_name("App").unwrap();
        assert_eq!(app.isa(), Isa::NativeTarget);
        assert_eq!(app.build_phases(), &[oid("APP_SOURCES"), oid("APP_RESOURCES")]);
        match &app.kind {
            TargetKind::Native(native) => {
                assert_eq!(
                    native.product_type.as_deref(),
                    Some("com.apple.product-type.application")
                );
                assert_eq!(native.product_reference, Some(oid("APP_PRODUCT")));
            }
            other => panic!("expected native target, got {other:?}"),
        }

        let kit = graph.target_by_name("Kit").unwrap();
        assert_eq!(kit.isa(), Isa::AggregateTarget);
        assert!(kit.build_phases().is_empty());
    }

    #[test]
    fn targets_keep_declaration_order() {
        let store = sample_store();
        let graph = parse_project(&store, &oid("PROJECT")).unwrap();
        let names: Vec<&str> = graph.targets().iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["App", "Ext", "Kit"]);
    }

    #[test]
    fn isa_round_trips_for_every_target_kind() {
        let store = InMemoryObjectStore::from_objects_json(json!({
            "P": {"isa": "PBXProject", "buildConfigurationList": "L", "targets": ["N", "A", "G"], "mainGroup": "M"},
            "L": {"isa": "XCConfigurationList", "buildConfigurations": []},
            "N": {"isa": "PBXNativeTarget", "name": "n", "buildConfigurationList": "L", "dependencies": []},
            "A": {"isa": "PBXAggregateTarget", "name": "a", "buildConfigurationList": "L", "dependencies": []},
            "G": {"isa": "PBXLegacyTarget", "name": "g", "buildConfigurationList": "L", "dependencies": [],
                  "buildToolPath": "/usr/bin/make", "buildArgumentsString": "$(ACTION)"}
        }))
        .unwrap();
        let graph = parse_project(&store, &oid("P")).unwrap();

        for id in ["N", "A", "G"] {
            let raw_isa = store.get(&oid(id)).unwrap().isa().unwrap();
            assert_eq!(graph.target(&oid(id)).unwrap().isa().as_str(), raw_isa);
        }
        match &graph.target(&oid("G")).unwrap().kind {
            TargetKind::Legacy(legacy) => {
                assert_eq!(legacy.build_tool_path.as_deref(), Some("/usr/bin/make"));
            }
            other => panic!("expected legacy target, got {other:?}"),
        }
    }

    #[test]
    fn unknown_target_isa_is_named() {
        let store = InMemoryObjectStore::from_objects_json(json!({
            "P": {"isa": "PBXProject", "buildConfigurationList": "L", "targets": ["X"], "mainGroup": "M"},
            "L": {"isa": "XCConfigurationList", "buildConfigurations": []},
            "X": {"isa": "PBXShinyTarget", "name": "x", "buildConfigurationList": "L", "dependencies": []}
        }))
        .unwrap();
        match parse_project(&store, &oid("P")) {
            Err(GraphError::UnknownKind { isa, expected, .. }) => {
                assert_eq!(isa, "PBXShinyTarget");
                assert_eq!(expected, "target");
            }
            other => panic!("expected UnknownKind, got {other:?}"),
        }
    }

    #[test]
    fn missing_target_name_propagates() {
        let store = InMemoryObjectStore::from_objects_json(json!({
            "P": {"isa": "PBXProject", "buildConfigurationList": "L", "targets": ["X"], "mainGroup": "M"},
            "L": {"isa": "XCConfigurationList", "buildConfigurations": []},
            "X": {"isa": "PBXNativeTarget", "buildConfigurationList": "L", "dependencies": []}
        }))
        .unwrap();
        match parse_project(&store, &oid("P")) {
            Err(GraphError::Store(StoreError::KeyNotFound { key })) => assert_eq!(key, "name"),
            other => panic!("expected KeyNotFound, got {other:?}"),
        }
    }

    // ---------------------------------------------------------------
    // Configurations
    // ---------------------------------------------------------------

    #[test]
    fn settings_keep_scalar_and_list_shapes() {
        let store = sample_store();
        let graph = parse_project(&store, &oid("PROJECT")).unwrap();
        let app = graph.target_by_name("App").unwrap();
        let list = graph.configuration_list_of(app).unwrap();
        let debug = list.configuration("Debug").unwrap();

        assert_eq!(
            debug.build_settings.get("PRODUCT_NAME"),
            Some(&SettingValue::Scalar("$(TARGET_NAME)".into()))
        );
        assert_eq!(
            debug.build_settings.get("GCC_PREPROCESSOR_DEFINITIONS"),
            Some(&SettingValue::List(vec!["DEBUG=1".into(), "$(inherited)".into()]))
        );
        assert_eq!(debug.build_settings.get_str("ENABLE_TESTABILITY"), Some("YES"));
    }

    #[test]
    fn default_configuration_name_defaults_to_empty() {
        let store = sample_store();
        let graph = parse_project(&store, &oid("PROJECT")).unwrap();
        let project_list = graph.configuration_list_of(graph.project()).unwrap();
        assert_eq!(project_list.default_configuration_name, "");

        let app = graph.target_by_name("App").unwrap();
        assert_eq!(
            graph
                .configuration_list_of(app)
                .unwrap()
                .default_configuration_name,
            "Release"
        );
    }

    #[test]
    fn shared_configuration_list_is_parsed_once() {
        let store = sample_store();
        let graph = parse_project(&store, &oid("PROJECT")).unwrap();

        // PROJECT_LIST, SHARED_LIST, KIT_LIST
        assert_eq!(graph.configuration_list_count(), 3);
        let app = graph.target_by_name("App").unwrap();
        let ext = graph.target_by_name("Ext").unwrap();
        assert_eq!(app.configuration_list_id(), ext.configuration_list_id());
    }

    #[test]
    fn dictionary_setting_is_type_mismatch() {
        let store = InMemoryObjectStore::from_objects_json(json!({
            "P": {"isa": "PBXProject", "buildConfigurationList": "L", "targets": [], "mainGroup": "M"},
            "L": {"isa": "XCConfigurationList", "buildConfigurations": ["C"]},
            "C": {"isa": "XCBuildConfiguration", "name": "Debug", "buildSettings": {"BAD": {"x": "y"}}}
        }))
        .unwrap();
        match parse_project(&store, &oid("P")) {
            Err(GraphError::Store(StoreError::TypeMismatch { key, .. })) => assert_eq!(key, "BAD"),
            other => panic!("expected TypeMismatch, got {other:?}"),
        }
    }

    #[test]
    fn configuration_list_kind_is_checked() {
        let store = InMemoryObjectStore::from_objects_json(json!({
            "P": {"isa": "PBXProject", "buildConfigurationList": "C", "targets": [], "mainGroup": "M"},
            "C": {"isa": "XCBuildConfiguration", "name": "Debug", "buildSettings": {}}
        }))
        .unwrap();
        assert!(matches!(
            parse_project(&store, &oid("P")),
            Err(GraphError::UnknownKind { expected: "configuration list", .. })
        ));
    }

    // ---------------------------------------------------------------
    // Dependencies
    // ---------------------------------------------------------------

    #[test]
    fn dependencies_resolve_to_local_targets() {
        let store = sample_store();
        let graph = parse_project(&store, &oid("PROJECT")).unwrap();
        let app = graph.target_by_name("App").unwrap();

        let targets: Vec<&ObjectId> = graph
            .dependencies_of(app)
            .unwrap()
            .into_iter()
            .filter_map(TargetDependency::local_target)
            .collect();
        assert_eq!(targets, vec![&oid("EXT"), &oid("KIT")]);
    }

    #[test]
    fn dependency_cycle_parses_without_recursing_forever() {
        let store = InMemoryObjectStore::from_objects_json(json!({
            "P": {"isa": "PBXProject", "buildConfigurationList": "L", "targets": ["A", "B"], "mainGroup": "M"},
            "L": {"isa": "XCConfigurationList", "buildConfigurations": []},
            "A": {"isa": "PBXNativeTarget", "name": "A", "buildConfigurationList": "L", "dependencies": ["DA"]},
            "B": {"isa": "PBXNativeTarget", "name": "B", "buildConfigurationList": "L", "dependencies": ["DB"]},
            "DA": {"isa": "PBXTargetDependency", "target": "B"},
            "DB": {"isa": "PBXTargetDependency", "target": "A"}
        }))
        .unwrap();
        let graph = parse_project(&store, &oid("P")).unwrap();

        assert_eq!(graph.target_count(), 2);
        assert_eq!(
            graph.dependency(&oid("DB")).unwrap().local_target(),
            Some(&oid("A"))
        );
    }

    #[test]
    fn remote_dependency_keeps_proxy() {
        let store = InMemoryObjectStore::from_objects_json(json!({
            "P": {"isa": "PBXProject", "buildConfigurationList": "L", "targets": ["A"], "mainGroup": "M"},
            "L": {"isa": "XCConfigurationList", "buildConfigurations": []},
            "A": {"isa": "PBXNativeTarget", "name": "A", "buildConfigurationList": "L", "dependencies": ["D"]},
            "D": {"isa": "PBXTargetDependency", "name": "Lib", "targetProxy": "X"},
            "X": {
                "isa": "PBXContainerItemProxy",
                "containerPortal": "LIB_PROJECT_REF",
                "proxyType": 1,
                "remoteGlobalIDString": "REMOTE_TARGET",
                "remoteInfo": "Lib"
            }
        }))
        .unwrap();
        let graph = parse_project(&store, &oid("P")).unwrap();

        match &graph.dependency(&oid("D")).unwrap().target {
            DependencyTarget::Remote(proxy) => {
                assert_eq!(proxy.container_portal, oid("LIB_PROJECT_REF"));
                assert_eq!(proxy.proxy_type, "1");
                assert_eq!(proxy.remote_global_id, oid("REMOTE_TARGET"));
                assert_eq!(proxy.remote_info.as_deref(), Some("Lib"));
            }
            other => panic!("expected remote dependency, got {other:?}"),
        }
    }

    #[test]
    fn dependency_without_target_or_proxy_fails() {
        let store = InMemoryObjectStore::from_objects_json(json!({
            "P": {"isa": "PBXProject", "buildConfigurationList": "L", "targets": ["A"], "mainGroup": "M"},
            "L": {"isa": "XCConfigurationList", "buildConfigurations": []},
            "A": {"isa": "PBXNativeTarget", "name": "A", "buildConfigurationList": "L", "dependencies": ["D"]},
            "D": {"isa": "PBXTargetDependency"}
        }))
        .unwrap();
        assert!(matches!(
            parse_project(&store, &oid("P")),
            Err(GraphError::Store(StoreError::KeyNotFound { .. }))
        ));
    }

    #[test]
    fn dangling_dependency_target_is_not_found() {
        let store = InMemoryObjectStore::from_objects_json(json!({
            "P": {"isa": "PBXProject", "buildConfigurationList": "L", "targets": ["A"], "mainGroup": "M"},
            "L": {"isa": "XCConfigurationList", "buildConfigurations": []},
            "A": {"isa": "PBXNativeTarget", "name": "A", "buildConfigurationList": "L", "dependencies": ["D"]},
            "D": {"isa": "PBXTargetDependency", "target": "GONE"}
        }))
        .unwrap();
        match parse_project(&store, &oid("P")) {
            Err(GraphError::Store(StoreError::NotFound(id))) => assert_eq!(id, oid("GONE")),
            other => panic!("expected NotFound, got {other:?}"),
        }
    }

    #[test]
    fn cache_counts_finished_entities() {
        let mut cache = ParseCache::new();
        assert!(cache.is_empty());
        cache.in_progress.insert(oid("A"));
        assert_eq!(cache.len(), 0);
    }
}
