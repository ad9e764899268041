//! Typed document subsystem
//!
//! Application types become storable by implementing [`Document`]. The
//! trait supplies the storage key; the storage path either comes from the
//! type itself or is derived from its identity. The wire codec for
//! single-document reads lives here as well.
//!
//! # Invariants
//!
//! - Two objects of the same type always resolve to the same storage path
//! - A storage path always ends in `/` and is at least two characters long
//! - The same `(path, key)` pair always identifies the same logical document

mod codec;
mod errors;
mod path;

pub use codec::FetchEnvelope;
pub use errors::{DocumentError, DocumentResult};
pub use path::resolve_path;

use serde::de::DeserializeOwned;
use serde::Serialize;

/// A typed object that can be stored in the search engine.
///
/// The key must be unique within the type's storage path; the engine makes
/// no implicit existence check on insert.
pub trait Document: Serialize + DeserializeOwned {
    /// Unique storage key for this object within its storage path.
    fn key(&self) -> String;

    /// Self-described storage path override.
    ///
    /// When this returns `Some`, the value must be at least two characters
    /// long and end with `/`, or path resolution fails naming the type.
    /// The default derives the path from the type's identity instead.
    fn storage_path(&self) -> Option<String> {
        None
    }
}
