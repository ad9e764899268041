//! Document CRUD operations.
//!
//! Every operation resolves the object's storage path, builds the target
//! URL under the handle's index, and round-trips through the gated
//! transport. Errors propagate to the caller untouched; "not found" on a
//! fetch is a boolean outcome, not an error.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::document::{resolve_path, Document, FetchEnvelope};
use crate::query::QueryBuilder;

use super::errors::{EngineError, EngineResult};
use super::transport::Method;
use super::{Engine, ACTION_BULK, ACTION_COUNT, ACTION_QUERY, ACTION_UPDATE};

/// Bulk action header line: `{"index": {"_id": ...}}`.
#[derive(Serialize)]
struct BulkAction<'a> {
    index: BulkIndex<'a>,
}

#[derive(Serialize)]
struct BulkIndex<'a> {
    #[serde(rename = "_id")]
    id: &'a str,
}

/// Partial-update envelope: `{"doc": ...}`.
#[derive(Serialize)]
struct PartialUpdate<'a, T: Serialize> {
    doc: &'a T,
}

/// Scalar count response: `{"count": N, ...}`.
#[derive(Deserialize)]
struct CountResponse {
    count: u64,
}

/// Per-shard deletion summary for one index.
#[derive(Debug, Clone, Deserialize)]
pub struct DeletedIndex {
    #[serde(rename = "_shards")]
    pub shards: ShardSummary,
}

/// Shard tally inside a deletion summary.
#[derive(Debug, Clone, Deserialize)]
pub struct ShardSummary {
    pub total: u64,
    pub successful: u64,
    pub failed: u64,
}

/// Delete-by-query response envelope, keyed by index name.
#[derive(Deserialize)]
struct DeleteByQueryResponse {
    #[serde(rename = "_indices", default)]
    indices: BTreeMap<String, Value>,
}

impl Engine {
    /// Adds a document under its type's storage path.
    ///
    /// The caller must guarantee the key is unique within the path; no
    /// existence check is made and an existing document is replaced.
    pub fn insert<T: Document>(&self, object: &T) -> EngineResult<()> {
        let path = resolve_path(object)?;
        let body = serde_json::to_string(object)?;
        let url = self.url_for(&format!("{}{}", path, object.key()));
        self.send(Method::Put, &url, Some(body))?;
        Ok(())
    }

    /// Indexes several documents in one request through the bulk endpoint.
    ///
    /// The batch must be non-empty and homogeneous; the storage path is
    /// resolved from the first element. Fails before any request is issued
    /// when the batch is empty.
    pub fn bulk_insert<T: Document>(&self, objects: &[T]) -> EngineResult<()> {
        let first = objects.first().ok_or(EngineError::EmptyBulk)?;
        let path = resolve_path(first)?;
        let mut batch = String::new();
        for object in objects {
            let key = object.key();
            batch.push_str(&serde_json::to_string(&BulkAction {
                index: BulkIndex { id: &key },
            })?);
            batch.push('\n');
            batch.push_str(&serde_json::to_string(object)?);
            // the bulk endpoint requires every line newline-terminated
            batch.push('\n');
        }
        let url = self.url_for(&format!("{}{}", path, ACTION_BULK));
        self.send(Method::Post, &url, Some(batch))?;
        Ok(())
    }

    /// Applies a partial update to the document identified by the object's
    /// type and key.
    pub fn update<T: Document>(&self, object: &T) -> EngineResult<()> {
        let path = resolve_path(object)?;
        let body = serde_json::to_string(&PartialUpdate { doc: object })?;
        let url = self.url_for(&format!("{}{}/{}", path, object.key(), ACTION_UPDATE));
        self.send(Method::Post, &url, Some(body))?;
        Ok(())
    }

    /// Fetches the document identified by the object's type and key and,
    /// on a hit, overwrites the object in place from the stored source.
    ///
    /// Returns `Ok(false)` when the document does not exist; the store
    /// answers missing documents with either a not-found envelope or a
    /// plain 404, and both mean the same thing here.
    pub fn get<T: Document>(&self, object: &mut T) -> EngineResult<bool> {
        let path = resolve_path(object)?;
        let url = self.url_for(&format!("{}{}", path, object.key()));
        let response = match self.send(Method::Get, &url, None) {
            Ok(response) => response,
            Err(EngineError::Http { status: 404, .. }) => return Ok(false),
            Err(err) => return Err(err),
        };
        let envelope: FetchEnvelope = serde_json::from_str(&response.body)
            .map_err(|source| EngineError::Decode {
                context: "fetch",
                source,
            })?;
        Ok(envelope.decode_into(object)?)
    }

    /// Removes the document identified by the object's type and key.
    pub fn delete<T: Document>(&self, object: &T) -> EngineResult<()> {
        let path = resolve_path(object)?;
        let url = self.url_for(&format!("{}{}", path, object.key()));
        self.send(Method::Delete, &url, None)?;
        Ok(())
    }

    /// Deletes every document of the object's type matching `query`.
    ///
    /// The serialized query carries no pagination: the engine rejects
    /// `from`/`size` on this endpoint. The response summarizes deletions
    /// per index; the first per-index summary that parses is returned and
    /// the rest are ignored, `None` when none parse.
    pub fn delete_by_query<T: Document>(
        &self,
        object: &T,
        query: &QueryBuilder,
    ) -> EngineResult<Option<DeletedIndex>> {
        let path = resolve_path(object)?;
        let body = query.to_json_unpaginated()?;
        let url = self.url_for(&format!("{}{}", path, ACTION_QUERY));
        let response = self.send(Method::Delete, &url, Some(body))?;
        let summary: DeleteByQueryResponse = serde_json::from_str(&response.body)
            .map_err(|source| EngineError::Decode {
                context: "delete-by-query",
                source,
            })?;
        for index in summary.indices.into_values() {
            if let Ok(deleted) = serde_json::from_value::<DeletedIndex>(index) {
                return Ok(Some(deleted));
            }
        }
        Ok(None)
    }

    /// Counts all documents under the object's storage path.
    pub fn count<T: Document>(&self, object: &T) -> EngineResult<u64> {
        let path = resolve_path(object)?;
        let url = self.url_for(&format!("{}{}", path, ACTION_COUNT));
        let response = self.send(Method::Get, &url, None)?;
        let count: CountResponse = serde_json::from_str(&response.body)
            .map_err(|source| EngineError::Decode {
                context: "count",
                source,
            })?;
        Ok(count.count)
    }
}
