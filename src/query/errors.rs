//! Error types for query construction.

use thiserror::Error;

/// Result type for query serialization
pub type QueryResult<T> = Result<T, QueryError>;

/// Query construction and serialization errors
#[derive(Debug, Error)]
pub enum QueryError {
    /// Strict serialization refused because warnings were recorded
    #[error("refusing to serialize a query built with warnings: {}", .0.join("; "))]
    Warnings(Vec<String>),

    /// Structural marshal failure
    #[error("query marshal failed: {0}")]
    Marshal(#[from] serde_json::Error),
}
