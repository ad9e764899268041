//! Error types for the document subsystem.

use thiserror::Error;

/// Result type for document operations
pub type DocumentResult<T> = Result<T, DocumentError>;

/// Document mapping errors
#[derive(Debug, Error)]
pub enum DocumentError {
    /// Self-described storage path failed validation
    #[error(
        "{type_name} generated invalid storage path {path:?}: \
         must be at least two characters long and end with '/'"
    )]
    InvalidSelfPath {
        type_name: &'static str,
        path: String,
    },

    /// Type identity yields no usable path segment
    #[error("cannot derive a storage path for unnamed type {type_name:?}")]
    UnnamedType { type_name: &'static str },

    /// Found document carried no source payload
    #[error("document {key:?} was found but carried no source payload")]
    MissingSource { key: String },

    /// Source payload does not map onto the destination type's fields
    #[error("document decode failed: {0}")]
    Decode(#[from] serde_json::Error),
}
