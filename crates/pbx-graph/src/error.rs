//! Error types for graph parsing.

use pbx_store::StoreError;
use pbx_types::ObjectId;

/// Errors that can occur while parsing or querying the typed graph.
#[derive(Debug, thiserror::Error)]
pub enum GraphError {
    /// A lookup or field projection on the object store failed.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// A record's `isa` is not a kind accepted where it was referenced.
    #[error("unknown {expected} kind for {id}: {isa}")]
    UnknownKind {
        /// The record carrying the tag.
        id: ObjectId,
        /// The tag that was found.
        isa: String,
        /// What the referencing context expected (e.g. "target").
        expected: &'static str,
    },

    /// No `PBXProject` record exists in the store.
    #[error("object not found with isa: PBXProject")]
    ProjectNotFound,

    /// More than one `PBXProject` record exists and no root id was given.
    #[error("multiple PBXProject records: {0:?}")]
    MultipleProjects(Vec<ObjectId>),

    /// An identifier was expected in the parsed graph but is not there.
    #[error("{kind} not found in graph: {id}")]
    MissingEntity {
        /// The identifier that did not resolve.
        id: ObjectId,
        /// The kind of entity that was expected.
        kind: &'static str,
    },
}

/// Convenience alias for graph results.
pub type GraphResult<T> = Result<T, GraphError>;
