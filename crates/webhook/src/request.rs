//! Inbound request value
//!
//! The front end converts each HTTP request into this server-agnostic
//! value before handing it to the pipeline.

use std::collections::HashMap;

use bytes::Bytes;
use http::HeaderMap;

/// An inbound webhook request
///
/// Decoupled from the HTTP server so receivers (and their tests) never
/// depend on axum types.
#[derive(Debug, Clone, Default)]
pub struct InboundRequest {
    /// Request path, used as the pipeline table key
    pub path: String,

    /// Parsed query parameters
    pub query: HashMap<String, String>,

    /// Request headers
    pub headers: HeaderMap,

    /// Raw request body
    pub body: Bytes,
}

impl InboundRequest {
    /// Create a request with just a path and body (mainly for tests)
    pub fn new(path: impl Into<String>, body: impl Into<Bytes>) -> Self {
        Self {
            path: path.into(),
            body: body.into(),
            ..Default::default()
        }
    }

    /// Look up a header value as a string
    ///
    /// Returns `None` for missing headers and for values that are not
    /// valid UTF-8.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// Look up a query parameter by name
    pub fn query_param(&self, name: &str) -> Option<&str> {
        self.query.get(name).map(String::as_str)
    }
}
