//! Error types for dependency traversal.

use pbx_graph::GraphError;
use pbx_types::ObjectId;

/// Errors that can occur while walking target dependencies.
#[derive(Debug, thiserror::Error)]
pub enum DepsError {
    /// A target or dependency identifier did not resolve in the graph.
    #[error(transparent)]
    Graph(#[from] GraphError),

    /// A target was reached again while still on the active path.
    #[error("target dependency cycle: {}", format_path(.path))]
    DependencyCycle {
        /// The target that was revisited.
        target: ObjectId,
        /// Target identifiers from the walk's start to the revisit.
        path: Vec<ObjectId>,
    },
}

fn format_path(path: &[ObjectId]) -> String {
    path.iter()
        .map(ObjectId::as_str)
        .collect::<Vec<_>>()
        .join(" -> ")
}

/// Convenience alias for dependency results.
pub type DepsResult<T> = Result<T, DepsError>;
