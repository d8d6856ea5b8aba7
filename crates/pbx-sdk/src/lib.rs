//! High-level SDK for pbxgraph.
//!
//! [`XcodeProj`] opens an `.xcodeproj` bundle and answers questions about it
//! by target name, tying the store, graph, settings, dependency, and path
//! crates together. This is the main entry point for tools embedding
//! pbxgraph.

pub mod config;
pub mod error;
pub mod project;

pub use config::SdkConfig;
pub use error::{SdkError, SdkResult};
pub use project::{
    is_xcodeproj, XcodeProj, CODE_SIGN_ENTITLEMENTS, PBXPROJ_FILE_NAME, XCODEPROJ_EXTENSION,
};

// Re-export key types
pub use pbx_deps::DependencyWalk;
pub use pbx_graph::{ConfigurationList, Project, ProjectGraph, Target, TargetKind};
pub use pbx_paths::{AssetCatalog, FileReference};
pub use pbx_settings::ExpansionConfig;
pub use pbx_types::{BuildSettings, ObjectId, SettingValue};
