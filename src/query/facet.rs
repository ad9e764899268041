//! Facet (aggregation) definitions and results.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A named summary computation requested alongside a search.
///
/// Only the terms facet is modeled; other facet families can be added the
/// same way.
#[derive(Debug, Clone, Serialize)]
pub struct Facet {
    pub terms: Value,
}

impl Facet {
    /// Builds a terms facet over `field` returning `size` entries, merged
    /// with any extra directives the caller supplies.
    pub(crate) fn terms(field: &str, size: u64, extra: Option<Map<String, Value>>) -> Self {
        let mut terms = extra.unwrap_or_default();
        terms.insert("field".to_string(), Value::String(field.to_string()));
        terms.insert("size".to_string(), Value::from(size));
        Facet {
            terms: Value::Object(terms),
        }
    }
}

/// Per-facet summary returned with a result set.
#[derive(Debug, Clone, Deserialize)]
pub struct FacetResult {
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub terms: Vec<Value>,
}
