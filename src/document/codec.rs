//! Wire codec for single-document reads.
//!
//! Writes are a plain structural marshal of the object. Reads arrive
//! wrapped in a found/not-found envelope with the document under
//! `_source`; not-found is a normal outcome, never an error.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

use super::errors::{DocumentError, DocumentResult};

/// Single-document fetch envelope.
#[derive(Debug, Deserialize)]
pub struct FetchEnvelope {
    #[serde(rename = "_index", default)]
    pub index: String,
    #[serde(rename = "_type", default)]
    pub doc_type: String,
    #[serde(rename = "_id", default)]
    pub id: String,
    #[serde(rename = "_version", default)]
    pub version: u64,
    #[serde(default)]
    pub found: bool,
    #[serde(rename = "_source", default)]
    pub source: Option<Value>,
}

impl FetchEnvelope {
    /// Overwrites `target`'s fields from the envelope's source payload.
    ///
    /// Returns `Ok(false)` without touching `target` when the envelope
    /// reports not-found. A found envelope without a source payload is an
    /// error: the store answered a match it cannot back.
    pub fn decode_into<T: DeserializeOwned>(self, target: &mut T) -> DocumentResult<bool> {
        if !self.found {
            return Ok(false);
        }
        let source = self
            .source
            .ok_or(DocumentError::MissingSource { key: self.id })?;
        *target = serde_json::from_value(source)?;
        Ok(true)
    }
}
