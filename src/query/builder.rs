//! Fluent query builder.
//!
//! Constraints accumulate into a boolean must/should model with at most
//! one geographic filter, plus sort directives, facets and pagination.
//! The canonical serialized form is produced structurally: absent clauses
//! are absent from the output, and a boolean query that never received a
//! clause collapses to `match_all`.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::{json, Map, Value};
use sha2::{Digest, Sha256};

use super::errors::{QueryError, QueryResult};
use super::facet::Facet;
use super::geo::{BoundingBox, DistanceUnit, GeoFilter, Location};
use super::sort::{SortMode, SortOrder, SortSpec};

/// The engine's default result-count limit.
const DEFAULT_SIZE: u64 = 10;

/// Relevance boost for the exact-phrase half of a fuzzy search.
const PHRASE_BOOST: &str = "5";
/// Relevance boost for the fuzzy half of a fuzzy search.
const FUZZY_BOOST: &str = "1";

/// Chainable builder for search requests.
///
/// Every constraint method consumes and returns the builder. The builder
/// is serialized terminally with [`QueryBuilder::to_json`] (or checksummed)
/// and is never mutated by serialization.
///
/// ```
/// use typesearch::QueryBuilder;
///
/// let json = QueryBuilder::new().set_term("name", "montre").to_json().unwrap();
/// assert_eq!(
///     json,
///     r#"{"from":0,"size":10,"query":{"filtered":{"query":{"bool":{"must":[{"term":{"name":"montre"}}]}}}}}"#
/// );
/// ```
#[derive(Debug, Clone)]
pub struct QueryBuilder {
    from: u64,
    size: u64,
    must: Vec<Value>,
    should: Vec<Value>,
    geo: Option<GeoFilter>,
    sort: Vec<BTreeMap<String, SortSpec>>,
    facets: BTreeMap<String, Facet>,
    warnings: Vec<String>,
}

impl Default for QueryBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Wraps `body` as `{field: body}`.
fn named(field: &str, body: Value) -> Value {
    let mut wrapper = Map::new();
    wrapper.insert(field.to_owned(), body);
    Value::Object(wrapper)
}

/// Wraps `body` as `{op: {field: body}}`, the shape shared by term, range
/// and match clauses.
fn clause(op: &str, field: &str, body: Value) -> Value {
    named(op, named(field, body))
}

impl QueryBuilder {
    /// Returns a builder with default pagination and no constraints.
    pub fn new() -> Self {
        QueryBuilder {
            from: 0,
            size: DEFAULT_SIZE,
            must: Vec::new(),
            should: Vec::new(),
            geo: None,
            sort: Vec::new(),
            facets: BTreeMap::new(),
            warnings: Vec::new(),
        }
    }

    /// Appends an exact-term clause to the must list.
    pub fn set_term(mut self, field: &str, value: &str) -> Self {
        self.must
            .push(clause("term", field, Value::String(value.to_owned())));
        self
    }

    /// Appends a free-text clause to the must list, matching `text`
    /// against `field`.
    pub fn add_query_string(mut self, field: &str, text: &str) -> Self {
        self.must.push(named(
            "query_string",
            json!({"default_field": field, "query": text}),
        ));
        self
    }

    /// Appends two should clauses favoring exact matches of `text` while
    /// tolerating near-matches: a strongly boosted phrase match on `field`
    /// and a weakly boosted match on its fuzzy variant.
    pub fn add_fuzzy_search(mut self, field: &str, text: &str) -> Self {
        self.should.push(clause(
            "match",
            field,
            json!({"boost": PHRASE_BOOST, "query": text, "type": "phrase"}),
        ));
        self.should.push(clause(
            "match",
            &format!("{}.fuzzy", field),
            json!({"boost": FUZZY_BOOST, "query": text}),
        ));
        self
    }

    /// Appends an inclusive integer range clause (`from`/`to` selectors)
    /// to the must list.
    pub fn add_range(mut self, field: &str, from: i64, to: i64) -> Self {
        self.must
            .push(clause("range", field, json!({"from": from, "to": to})));
        self
    }

    /// Appends both halves of an inclusive floating range: a lower bound
    /// and an upper bound clause.
    pub fn add_float_range(self, field: &str, from: f64, to: f64) -> Self {
        self.add_greater_than_range(field, from)
            .add_lesser_than_range(field, to)
    }

    /// Appends an inclusive lower-bound clause (`gte`) to the must list.
    pub fn add_greater_than_range(mut self, field: &str, from: f64) -> Self {
        self.must.push(clause("range", field, json!({"gte": from})));
        self
    }

    /// Appends an inclusive upper-bound clause (`lte`) to the must list.
    pub fn add_lesser_than_range(mut self, field: &str, to: f64) -> Self {
        self.must.push(clause("range", field, json!({"lte": to})));
        self
    }

    /// Makes distance-from-point the active geographic filter, clearing
    /// any bounding box or polygon set before.
    pub fn add_geo_distance(
        mut self,
        field: &str,
        point: Location,
        distance: u32,
        unit: DistanceUnit,
    ) -> Self {
        let mut body = Map::new();
        body.insert(
            "distance".to_owned(),
            Value::String(format!("{}{}", distance, unit.as_str())),
        );
        body.insert(field.to_owned(), json!(point));
        self.geo = Some(GeoFilter::Distance(Value::Object(body)));
        self
    }

    /// Makes a bounding box the active geographic filter, clearing any
    /// distance or polygon filter set before.
    ///
    /// An inverted box (top-left latitude below bottom-right latitude, or
    /// top-left longitude below bottom-right longitude) records a warning
    /// per violated corner instead of failing; [`QueryBuilder::to_json`]
    /// then refuses to serialize while [`QueryBuilder::force_to_json`]
    /// still does.
    pub fn add_geo_bounding_box(
        mut self,
        field: &str,
        top_left: Location,
        bottom_right: Location,
    ) -> Self {
        if top_left.lat < bottom_right.lat {
            self.warnings.push(format!(
                "invalid bounding box: top-left latitude ({}) is lower than bottom-right latitude ({})",
                top_left.lat, bottom_right.lat
            ));
        }
        if top_left.long < bottom_right.long {
            self.warnings.push(format!(
                "invalid bounding box: top-left longitude ({}) is lower than bottom-right longitude ({})",
                top_left.long, bottom_right.long
            ));
        }
        let box_ = BoundingBox {
            top_left,
            bottom_right,
        };
        self.geo = Some(GeoFilter::BoundingBox(named(field, json!(box_))));
        self
    }

    /// Makes polygon containment the active geographic filter, clearing
    /// any distance or bounding-box filter set before.
    pub fn add_geo_polygon(mut self, field: &str, points: &[Location]) -> Self {
        self.geo = Some(GeoFilter::Polygon(named(field, json!({"points": points}))));
        self
    }

    /// Appends a sort directive. [`SortMode::Default`] leaves the mode to
    /// the engine and is omitted from the serialized directive.
    pub fn add_sort(mut self, field: &str, order: SortOrder, mode: SortMode) -> Self {
        let mode = match mode {
            SortMode::Default => None,
            other => Some(other),
        };
        let mut directive = BTreeMap::new();
        directive.insert(field.to_owned(), SortSpec { order, mode });
        self.sort.push(directive);
        self
    }

    /// Registers a named terms facet over `field` returning `size`
    /// entries. Extra directives are merged into the facet body.
    /// Re-registering a name overwrites the previous facet.
    pub fn set_term_facet(
        mut self,
        name: &str,
        field: &str,
        size: u64,
        extra: Option<Map<String, Value>>,
    ) -> Self {
        self.facets
            .insert(name.to_owned(), Facet::terms(field, size, extra));
        self
    }

    /// Sets the result offset.
    pub fn offset(mut self, from: u64) -> Self {
        self.from = from;
        self
    }

    /// Sets the result-count limit.
    pub fn limit(mut self, size: u64) -> Self {
        self.size = size;
        self
    }

    /// Warnings recorded while building, in recording order.
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    /// Serializes the canonical query if and only if no warnings were
    /// recorded while building.
    ///
    /// A query built with warnings usually will not fail on the engine,
    /// but the reply is unlikely to be the expected one; callers that
    /// accept that trade use [`QueryBuilder::force_to_json`].
    pub fn to_json(&self) -> QueryResult<String> {
        if !self.warnings.is_empty() {
            return Err(QueryError::Warnings(self.warnings.clone()));
        }
        self.force_to_json()
    }

    /// Serializes the canonical query unconditionally, ignoring any
    /// recorded warnings.
    pub fn force_to_json(&self) -> QueryResult<String> {
        let request = SearchRequest {
            from: self.from,
            size: self.size,
            query: self.top_level(),
            sort: &self.sort,
            facets: &self.facets,
        };
        Ok(serde_json::to_string(&request)?)
    }

    /// Serialized form without pagination, for operations the engine
    /// rejects `from`/`size` on.
    pub(crate) fn to_json_unpaginated(&self) -> QueryResult<String> {
        if !self.warnings.is_empty() {
            return Err(QueryError::Warnings(self.warnings.clone()));
        }
        let request = UnpaginatedRequest {
            query: self.top_level(),
            sort: &self.sort,
            facets: &self.facets,
        };
        Ok(serde_json::to_string(&request)?)
    }

    /// Content hash of the canonical serialized form.
    ///
    /// Builders with identical effective query content hash identically,
    /// so the digest can key a query-result cache. Clause order is
    /// significant.
    pub fn checksum(&self) -> QueryResult<String> {
        let json = self.to_json()?;
        let mut hasher = Sha256::new();
        hasher.update(json.as_bytes());
        Ok(format!("{:x}", hasher.finalize()))
    }

    fn top_level(&self) -> TopLevelQuery<'_> {
        TopLevelQuery {
            filtered: FilteredQuery {
                query: self.bool_query(),
                filter: self.geo.as_ref(),
            },
        }
    }

    fn bool_query(&self) -> BoolQuery<'_> {
        if self.must.is_empty() && self.should.is_empty() {
            BoolQuery::MatchAll(EmptyClause {})
        } else {
            BoolQuery::Bool {
                must: &self.must,
                should: &self.should,
            }
        }
    }
}

// =====================================================================
// Canonical wire form. Field order is serialization order and is
// checksum-significant.
// =====================================================================

fn slice_is_empty<T>(slice: &&[T]) -> bool {
    slice.is_empty()
}

fn map_is_empty<K, V>(map: &&BTreeMap<K, V>) -> bool {
    map.is_empty()
}

#[derive(Serialize)]
struct SearchRequest<'a> {
    from: u64,
    size: u64,
    query: TopLevelQuery<'a>,
    #[serde(skip_serializing_if = "slice_is_empty")]
    sort: &'a [BTreeMap<String, SortSpec>],
    #[serde(skip_serializing_if = "map_is_empty")]
    facets: &'a BTreeMap<String, Facet>,
}

#[derive(Serialize)]
struct UnpaginatedRequest<'a> {
    query: TopLevelQuery<'a>,
    #[serde(skip_serializing_if = "slice_is_empty")]
    sort: &'a [BTreeMap<String, SortSpec>],
    #[serde(skip_serializing_if = "map_is_empty")]
    facets: &'a BTreeMap<String, Facet>,
}

#[derive(Serialize)]
struct TopLevelQuery<'a> {
    filtered: FilteredQuery<'a>,
}

#[derive(Serialize)]
struct FilteredQuery<'a> {
    query: BoolQuery<'a>,
    #[serde(skip_serializing_if = "Option::is_none")]
    filter: Option<&'a GeoFilter>,
}

#[derive(Serialize)]
enum BoolQuery<'a> {
    #[serde(rename = "bool")]
    Bool {
        #[serde(skip_serializing_if = "slice_is_empty")]
        must: &'a [Value],
        #[serde(skip_serializing_if = "slice_is_empty")]
        should: &'a [Value],
    },
    #[serde(rename = "match_all")]
    MatchAll(EmptyClause),
}

/// Serializes as `{}`.
#[derive(Serialize)]
struct EmptyClause {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unpaginated_form_carries_no_pagination() {
        let json = QueryBuilder::new()
            .set_term("name", "montre")
            .to_json_unpaginated()
            .unwrap();
        assert_eq!(
            json,
            r#"{"query":{"filtered":{"query":{"bool":{"must":[{"term":{"name":"montre"}}]}}}}}"#
        );
    }

    #[test]
    fn unpaginated_form_still_refuses_warnings() {
        let builder = QueryBuilder::new().add_geo_bounding_box(
            "location",
            Location { lat: 0.0, long: 0.0 },
            Location { lat: 1.0, long: 1.0 },
        );
        assert!(builder.to_json_unpaginated().is_err());
    }

    #[test]
    fn serialization_does_not_mutate_the_builder() {
        let builder = QueryBuilder::new().set_term("name", "montre");
        let first = builder.to_json().unwrap();
        let second = builder.to_json().unwrap();
        assert_eq!(first, second);
    }
}
