use thiserror::Error;

/// Errors produced by type operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("unknown isa: {0}")]
    UnknownIsa(String),

    #[error("empty object identifier")]
    EmptyObjectId,
}
