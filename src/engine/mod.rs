//! Search engine client subsystem
//!
//! [`Engine`] is a caller-owned handle on one remote index: the server
//! URL, the index base path, a transport and a one-slot admission gate.
//! Document CRUD, search, mapping and index lifecycle operations all hang
//! off the handle.
//!
//! # Concurrency
//!
//! At most one request is in flight per handle. Every operation acquires
//! the gate, blocks until the response arrives or fails, and releases the
//! gate on every exit path. The gate is non-reentrant: calling back into
//! the same handle from code that handles one of its responses deadlocks.
//! There is no retry, timeout or caching layer; a failed request surfaces
//! immediately and every read re-fetches from the store.

mod crud;
mod errors;
mod index;
mod search;
mod transport;

pub use crud::{DeletedIndex, ShardSummary};
pub use errors::{EngineError, EngineResult};
pub use search::{Hit, ResultSet};
pub use transport::{HttpTransport, Method, Transport, TransportResponse};

use std::sync::{Mutex, PoisonError};

use url::Url;

// Request target suffixes understood by the engine.
pub(crate) const ACTION_SEARCH: &str = "_search";
pub(crate) const ACTION_UPDATE: &str = "_update";
pub(crate) const ACTION_BULK: &str = "_bulk";
pub(crate) const ACTION_COUNT: &str = "_count";
pub(crate) const ACTION_QUERY: &str = "_query";
pub(crate) const ACTION_MAPPING: &str = "_mapping";
pub(crate) const ACTION_OPEN: &str = "_open";
pub(crate) const ACTION_CLOSE: &str = "_close";
pub(crate) const ACTION_STATS: &str = "_stats";

/// Client handle on one remote index.
pub struct Engine {
    /// `scheme://host[:port]`, no trailing slash
    server_url: String,
    /// Index path, `/`-led and `/`-terminated
    base_path: String,
    transport: Box<dyn Transport>,
    /// One-slot admission gate; guards no data, only request admission
    gate: Mutex<()>,
}

impl Engine {
    /// Creates a handle on `scheme://host[:port]/{index}` without touching
    /// the network.
    pub fn new(server_url: &str) -> EngineResult<Self> {
        Self::with_transport(server_url, Box::new(HttpTransport::new()?))
    }

    /// Creates a handle and ensures the index exists.
    pub fn connect(server_url: &str) -> EngineResult<Self> {
        let engine = Self::new(server_url)?;
        engine.create_index_if_needed()?;
        Ok(engine)
    }

    /// Creates a handle sending through a caller-supplied transport.
    pub fn with_transport(server_url: &str, transport: Box<dyn Transport>) -> EngineResult<Self> {
        let parsed = Url::parse(server_url)?;
        let host = parsed.host_str().ok_or_else(|| EngineError::InvalidServerUrl {
            url: server_url.to_owned(),
        })?;
        let mut server = format!("{}://{}", parsed.scheme(), host);
        if let Some(port) = parsed.port() {
            server.push_str(&format!(":{}", port));
        }
        Ok(Engine {
            server_url: server,
            base_path: normalize_base_path(parsed.path()),
            transport,
            gate: Mutex::new(()),
        })
    }

    /// Absolute URL of the index root.
    pub(crate) fn index_url(&self) -> String {
        format!("{}{}", self.server_url, self.base_path)
    }

    /// Absolute URL of a target under the index root.
    pub(crate) fn url_for(&self, suffix: &str) -> String {
        format!("{}{}{}", self.server_url, self.base_path, suffix)
    }

    /// Sends one request through the admission gate.
    pub(crate) fn send(
        &self,
        method: Method,
        url: &str,
        body: Option<String>,
    ) -> EngineResult<TransportResponse> {
        // A poisoned gate is a free slot: it guards nothing but admission.
        let _slot = self.gate.lock().unwrap_or_else(PoisonError::into_inner);
        tracing::debug!(%method, url, "dispatching request");
        self.transport.send(method, url, body)
    }
}

/// Collapses any run of trailing slashes into the single terminating one.
fn normalize_base_path(path: &str) -> String {
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() {
        "/".to_owned()
    } else {
        format!("{}/", trimmed)
    }
}
