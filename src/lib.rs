//! typesearch - typed document mapping and query building for
//! JSON-over-HTTP search engines
//!
//! Application types become storable by implementing [`Document`]: a unique
//! storage key plus an optional self-described storage path. An [`Engine`]
//! handle owns the connection to one remote index and exposes document
//! CRUD, search, mapping and index lifecycle operations. [`QueryBuilder`]
//! assembles the engine's nested boolean/filter query DSL from chainable
//! constraint calls and serializes it canonically.
//!
//! ```no_run
//! use serde::{Deserialize, Serialize};
//! use typesearch::{Document, Engine, Location, QueryBuilder, SortMode, SortOrder};
//!
//! #[derive(Serialize, Deserialize)]
//! struct Headquarters {
//!     company: String,
//!     country: u64,
//!     location: Location,
//! }
//!
//! impl Document for Headquarters {
//!     fn key(&self) -> String {
//!         format!("{}_{}", self.company, self.country)
//!     }
//! }
//!
//! fn main() -> Result<(), typesearch::EngineError> {
//!     let engine = Engine::connect("http://localhost:9200/companies")?;
//!
//!     let hq = Headquarters {
//!         company: "Acme".to_string(),
//!         country: 33,
//!         location: Location { lat: 48.865618, long: 2.370985 },
//!     };
//!     engine.insert(&hq)?;
//!
//!     let query = QueryBuilder::new()
//!         .set_term("country", "33")
//!         .add_sort("company", SortOrder::Asc, SortMode::Default);
//!     let results = engine.search(&hq, Some(&query))?;
//!     for hit in &results.hits {
//!         println!("{} scored a match", hit.object.company);
//!     }
//!     Ok(())
//! }
//! ```

pub mod document;
pub mod engine;
pub mod mapping;
pub mod query;

pub use document::{Document, DocumentError, DocumentResult, FetchEnvelope};
pub use engine::{
    DeletedIndex, Engine, EngineError, EngineResult, Hit, HttpTransport, Method, ResultSet,
    ShardSummary, Transport, TransportResponse,
};
pub use mapping::{FieldType, MappingBuilder};
pub use query::{
    BoundingBox, DistanceUnit, Facet, FacetResult, Location, QueryBuilder, QueryError,
    QueryResult, SortMode, SortOrder,
};
