//! Filesystem paths and resources for pbxgraph.
//!
//! Works directly on the [`ObjectStore`](pbx_store::ObjectStore), since the
//! group tree and build phases are not part of the typed project graph.
//!
//! - [`resolve_absolute_path`] -- where a file reference lives, by walking
//!   the group tree from the main group
//! - [`asset_catalogs`] -- `.xcassets` bundles copied by a target's
//!   resources build phase
//!
//! A file that is not under the main group resolves to `Ok(None)`; cyclic
//! group trees fail with [`PathError::GroupCycle`].

pub mod error;
pub mod file_ref;
pub mod resolver;
pub mod resources;

pub use error::{PathError, PathResult};
pub use file_ref::FileReference;
pub use resolver::{resolve_absolute_path, resolve_in_project, resolve_under};
pub use resources::{
    asset_catalogs, resource_files, resources_build_phase, targets_to_asset_catalogs,
    AssetCatalog, BuildFile, ResourcesBuildPhase, XCASSETS_EXTENSION,
};
