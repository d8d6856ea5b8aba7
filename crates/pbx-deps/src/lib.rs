//! Target dependency traversal for pbxgraph.
//!
//! [`dependent_targets`] lists everything a target transitively depends on,
//! in the order Xcode would list it: each dependency before its own
//! dependencies, siblings in declaration order. Dependency cycles, which
//! the parser accepts, are reported here as
//! [`DepsError::DependencyCycle`].

pub mod error;
pub mod walker;

pub use error::{DepsError, DepsResult};
pub use walker::{dependent_targets, walk, DependencyWalk};
