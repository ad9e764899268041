//! Search execution and result rehydration.
//!
//! A built query runs against the object's storage path; each matched
//! document is decoded into a new instance of the object's type and
//! attached to its hit record. One hit failing to decode fails the whole
//! result set.

use std::collections::HashMap;

use serde::Deserialize;
use serde_json::Value;

use crate::document::{resolve_path, Document};
use crate::query::{FacetResult, QueryBuilder};

use super::errors::{EngineError, EngineResult};
use super::transport::Method;
use super::{Engine, ACTION_SEARCH};

/// Search flavor appended to the search URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SearchKind {
    /// Full hits with sources
    Matches,
    /// Hit metadata only
    CountOnly,
}

impl SearchKind {
    fn url_suffix(&self) -> &'static str {
        match self {
            SearchKind::Matches => "",
            SearchKind::CountOnly => "?search_type=count",
        }
    }
}

/// Wire shape of a search response.
#[derive(Deserialize)]
struct RawResultSet {
    #[serde(default)]
    took: u64,
    #[serde(default)]
    hits: RawHits,
    #[serde(default)]
    facets: HashMap<String, FacetResult>,
}

#[derive(Deserialize, Default)]
struct RawHits {
    #[serde(default)]
    total: u64,
    #[serde(default)]
    hits: Vec<RawHit>,
}

#[derive(Deserialize)]
struct RawHit {
    #[serde(rename = "_id")]
    id: String,
    #[serde(rename = "_source", default)]
    source: Value,
}

/// One matched document: storage key, raw source, rehydrated object.
#[derive(Debug)]
pub struct Hit<T> {
    pub id: String,
    pub source: Value,
    pub object: T,
}

/// A decoded search response.
#[derive(Debug)]
pub struct ResultSet<T> {
    /// Server-side execution time, milliseconds
    pub took: u64,
    /// Total matching documents, independent of pagination
    pub total: u64,
    /// Matched documents in result order, rehydrated
    pub hits: Vec<Hit<T>>,
    /// Facet summaries keyed by the name they were registered under
    pub facets: HashMap<String, FacetResult>,
}

impl Engine {
    /// Searches the object's storage path.
    ///
    /// `query` may be `None`, in which case everything indexed under the
    /// path matches.
    pub fn search<T: Document>(
        &self,
        object: &T,
        query: Option<&QueryBuilder>,
    ) -> EngineResult<ResultSet<T>> {
        self.search_kind(object, query, SearchKind::Matches)
    }

    /// Searches for hit metadata only: total count and facets, no sources.
    pub fn search_count<T: Document>(
        &self,
        object: &T,
        query: Option<&QueryBuilder>,
    ) -> EngineResult<ResultSet<T>> {
        self.search_kind(object, query, SearchKind::CountOnly)
    }

    /// Searches with a prebuilt JSON body, sent as-is.
    ///
    /// Escape hatch for queries the builder cannot express; prefer
    /// [`Engine::search`], which cannot produce a body the engine rejects.
    pub fn search_raw_json<T: Document>(&self, object: &T, body: &str) -> EngineResult<ResultSet<T>> {
        self.search_raw_kind(object, body.to_owned(), SearchKind::Matches)
    }

    fn search_kind<T: Document>(
        &self,
        object: &T,
        query: Option<&QueryBuilder>,
        kind: SearchKind,
    ) -> EngineResult<ResultSet<T>> {
        let body = match query {
            Some(builder) => builder.to_json()?,
            // no body matches everything
            None => String::new(),
        };
        self.search_raw_kind(object, body, kind)
    }

    fn search_raw_kind<T: Document>(
        &self,
        object: &T,
        body: String,
        kind: SearchKind,
    ) -> EngineResult<ResultSet<T>> {
        let path = resolve_path(object)?;
        let url = self.url_for(&format!("{}{}{}", path, ACTION_SEARCH, kind.url_suffix()));
        let body = if body.is_empty() { None } else { Some(body) };
        let response = self.send(Method::Get, &url, body)?;
        let raw: RawResultSet = serde_json::from_str(&response.body)
            .map_err(|source| EngineError::Decode {
                context: "search",
                source,
            })?;

        let mut hits = Vec::with_capacity(raw.hits.hits.len());
        for hit in raw.hits.hits {
            let decoded: T = serde_json::from_value(hit.source.clone())
                .map_err(|source| EngineError::Decode {
                    context: "search hit",
                    source,
                })?;
            hits.push(Hit {
                id: hit.id,
                source: hit.source,
                object: decoded,
            });
        }
        tracing::debug!(total = raw.hits.total, returned = hits.len(), "search decoded");
        Ok(ResultSet {
            took: raw.took,
            total: raw.hits.total,
            hits,
            facets: raw.facets,
        })
    }
}
