//! HTTP transport
//!
//! The engine's only outward capability: send one request, get back the
//! status and the retained body text. A non-2xx status is an error
//! carrying both, not a response.

use std::fmt;

use super::errors::{EngineError, EngineResult};

/// HTTP verbs used against the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Put,
    Post,
    Delete,
}

impl Method {
    /// Returns the verb's wire form
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Put => "PUT",
            Method::Post => "POST",
            Method::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A completed response: status code and retained body text.
#[derive(Debug, Clone)]
pub struct TransportResponse {
    pub status: u16,
    pub body: String,
}

/// The outward "send request, get response" capability.
///
/// Implementations are synchronous: `send` returns only once the response
/// is complete or the request has failed.
pub trait Transport: Send + Sync {
    fn send(&self, method: Method, url: &str, body: Option<String>)
        -> EngineResult<TransportResponse>;
}

/// Default transport over a blocking HTTP client.
pub struct HttpTransport {
    client: reqwest::blocking::Client,
}

impl HttpTransport {
    /// Builds the default transport.
    pub fn new() -> EngineResult<Self> {
        let client = reqwest::blocking::Client::builder().build()?;
        Ok(HttpTransport { client })
    }
}

impl Transport for HttpTransport {
    fn send(
        &self,
        method: Method,
        url: &str,
        body: Option<String>,
    ) -> EngineResult<TransportResponse> {
        let method = match method {
            Method::Get => reqwest::Method::GET,
            Method::Put => reqwest::Method::PUT,
            Method::Post => reqwest::Method::POST,
            Method::Delete => reqwest::Method::DELETE,
        };
        let mut request = self.client.request(method, url);
        if let Some(body) = body {
            request = request
                .header(reqwest::header::CONTENT_TYPE, "application/json")
                .body(body);
        }
        let response = request.send()?;
        let status = response.status().as_u16();
        let body = response.text()?;
        if !(200..300).contains(&status) {
            return Err(EngineError::Http { status, body });
        }
        Ok(TransportResponse { status, body })
    }
}
