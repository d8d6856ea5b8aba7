//! Typed project graph for pbxgraph.
//!
//! Parses the untyped records of an [`ObjectStore`](pbx_store::ObjectStore)
//! into a [`ProjectGraph`]: the project, its targets, their configuration
//! lists and build configurations, and the dependency edges between targets.
//!
//! # Parsing
//!
//! - [`parse_project`] -- parse from a known `PBXProject` identifier
//! - [`parse_discovered`] -- find the unique `PBXProject` record and parse it
//!
//! Parsing is memoized per call: an entity referenced from several places
//! (a configuration list shared by two targets, a target depended on twice)
//! is parsed once and stored once. Target dependency cycles parse
//! successfully and are reported by the dependency walker instead.
//!
//! # Design Rules
//!
//! 1. Entities refer to each other by [`ObjectId`](pbx_types::ObjectId) only.
//! 2. A setting's scalar or list shape is decided once, at parse time.
//! 3. The graph is immutable after parsing.

pub mod configuration;
pub mod error;
pub mod graph;
pub mod parser;
pub mod project;
pub mod target;

pub use configuration::{BuildConfiguration, ConfigurationList, ConfigurationOwner};
pub use error::{GraphError, GraphResult};
pub use graph::ProjectGraph;
pub use parser::{discover_project_id, parse_discovered, parse_project, ParseCache};
pub use project::{Project, ProjectAttributes, TargetAttributes};
pub use target::{
    ContainerItemProxy, DependencyTarget, LegacyTarget, NativeTarget, Target, TargetDependency,
    TargetKind,
};
