//! Query construction subsystem
//!
//! [`QueryBuilder`] accumulates constraints into a nested boolean/filter
//! model and serializes it canonically. Optional clauses are modeled as
//! absent rather than empty, so the serialized form never contains the
//! empty shapes the engine rejects as malformed.
//!
//! # Invariants
//!
//! - At most one geographic filter is active; setting one clears the rest
//! - Serialization never mutates the builder
//! - An empty boolean query serializes as `match_all`

mod builder;
mod errors;
mod facet;
mod geo;
mod sort;

pub use builder::QueryBuilder;
pub use errors::{QueryError, QueryResult};
pub use facet::{Facet, FacetResult};
pub use geo::{BoundingBox, DistanceUnit, Location};
pub use sort::{SortMode, SortOrder};
