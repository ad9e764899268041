//! Geographic filter primitives.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Distance units understood by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DistanceUnit {
    Meters,
    Kilometers,
}

impl DistanceUnit {
    /// Wire suffix for the unit
    pub fn as_str(&self) -> &'static str {
        match self {
            DistanceUnit::Meters => "m",
            DistanceUnit::Kilometers => "km",
        }
    }
}

/// A geographic point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub lat: f64,
    #[serde(rename = "lon")]
    pub long: f64,
}

/// A box spanned by its top-left and bottom-right corners.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub top_left: Location,
    pub bottom_right: Location,
}

/// The single active geographic filter of a query.
///
/// The engine rejects a query carrying more than one geo filter, so the
/// builder holds at most one of these; setting a new one replaces the
/// previous.
#[derive(Debug, Clone, Serialize)]
pub(crate) enum GeoFilter {
    #[serde(rename = "geo_distance")]
    Distance(Value),
    #[serde(rename = "geo_bounding_box")]
    BoundingBox(Value),
    #[serde(rename = "geo_polygon")]
    Polygon(Value),
}
