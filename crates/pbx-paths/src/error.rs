//! Error types for path resolution and resource discovery.

use pbx_store::StoreError;
use pbx_types::ObjectId;

/// Errors that can occur while walking the group tree or build phases.
#[derive(Debug, thiserror::Error)]
pub enum PathError {
    /// A lookup or field projection on the object store failed.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// A node's `sourceTree` is not `<group>`, `<absolute>`, or empty.
    #[error("failed to resolve path of {id}, unsupported source tree: {source_tree}")]
    UnsupportedSourceTree { id: ObjectId, source_tree: String },

    /// A group was reached again while still being descended into.
    #[error("group cycle at {id}")]
    GroupCycle {
        /// The group that was revisited.
        id: ObjectId,
        /// Group identifiers from the main group to the revisit.
        path: Vec<ObjectId>,
    },

    /// A record's `isa` is not what the referencing context requires.
    #[error("{id} is a {isa}, expected {expected}")]
    UnexpectedKind {
        id: ObjectId,
        isa: String,
        expected: &'static str,
    },
}

/// Convenience alias for path results.
pub type PathResult<T> = Result<T, PathError>;
