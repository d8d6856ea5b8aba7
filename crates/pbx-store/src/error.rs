use pbx_types::ObjectId;

/// Errors from object store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The identifier does not resolve to any record.
    #[error("object not found: {0}")]
    NotFound(ObjectId),

    /// A record lacks a required field.
    #[error("key ({key}) not found")]
    KeyNotFound { key: String },

    /// A field exists but has the wrong shape.
    #[error("value ({actual}) for key ({key}) is not {expected}")]
    TypeMismatch {
        key: String,
        actual: String,
        expected: &'static str,
    },

    /// The decoded document does not have the layout of a project file.
    #[error("invalid project document: {0}")]
    InvalidDocument(String),

    /// JSON decoding failure.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error while reading a document from disk.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl StoreError {
    /// Returns `true` for a missing field, the one error callers commonly
    /// treat as "use a default".
    pub fn is_key_not_found(&self) -> bool {
        matches!(self, Self::KeyNotFound { .. })
    }
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
