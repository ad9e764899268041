//! Error types for engine operations.

use thiserror::Error;

use crate::document::DocumentError;
use crate::query::QueryError;

/// Result type for engine operations
pub type EngineResult<T> = Result<T, EngineError>;

/// Errors surfaced by engine operations
#[derive(Debug, Error)]
pub enum EngineError {
    // ==================
    // Resolution / validation
    // ==================
    /// Server URL does not name a host
    #[error("server URL has no host: {url:?}")]
    InvalidServerUrl { url: String },

    /// Server URL failed to parse
    #[error("invalid server URL: {0}")]
    UrlParse(#[from] url::ParseError),

    /// Bulk insert called with an empty batch
    #[error("nothing to bulk insert: empty batch")]
    EmptyBulk,

    // ==================
    // Document / query
    // ==================
    /// Storage path resolution or document decode failure
    #[error(transparent)]
    Document(#[from] DocumentError),

    /// Query construction or serialization failure
    #[error(transparent)]
    Query(#[from] QueryError),

    // ==================
    // Serialization
    // ==================
    /// Structural marshal failure
    #[error("marshal failed: {0}")]
    Marshal(#[from] serde_json::Error),

    /// A response body did not decode into the expected shape
    #[error("{context} response decode failed: {source}")]
    Decode {
        context: &'static str,
        #[source]
        source: serde_json::Error,
    },

    // ==================
    // Transport
    // ==================
    /// The request never completed
    #[error("transport failure: {0}")]
    Transport(#[from] reqwest::Error),

    /// The engine answered outside the 2xx range
    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },
}
