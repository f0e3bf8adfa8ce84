//! The seam between tools and the DQ REST API.

use async_trait::async_trait;
use reqwest::Method;
use serde_json::Value;

use super::DqError;

/// A single request against the DQ API, relative to the configured base URL.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    /// HTTP method.
    pub method: Method,
    /// Unencoded path segments, e.g. `["v3", "rules", "my.dataset"]`.
    pub segments: Vec<String>,
    /// Query parameters in insertion order.
    pub query: Vec<(String, String)>,
    /// Optional JSON body.
    pub body: Option<Value>,
}

impl ApiRequest {
    /// Create a request for `endpoint` (e.g. `/v2/gethoot`).
    pub fn new(method: Method, endpoint: &str) -> Self {
        Self {
            method,
            segments: endpoint
                .split('/')
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect(),
            query: Vec::new(),
            body: None,
        }
    }

    pub fn get(endpoint: &str) -> Self {
        Self::new(Method::GET, endpoint)
    }

    pub fn post(endpoint: &str) -> Self {
        Self::new(Method::POST, endpoint)
    }

    pub fn put(endpoint: &str) -> Self {
        Self::new(Method::PUT, endpoint)
    }

    /// Append one path segment; it is percent-encoded when the URL is built.
    pub fn segment(mut self, segment: impl Into<String>) -> Self {
        self.segments.push(segment.into());
        self
    }

    /// Append a query parameter.
    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// Attach a JSON body.
    pub fn json(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Slash-joined path, unencoded. Used for logging and matching.
    pub fn path(&self) -> String {
        format!("/{}", self.segments.join("/"))
    }

    /// Value of the first query parameter named `key`.
    pub fn query_value(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// Access to the DQ service.
///
/// Implementations are shared across concurrent tool calls.
#[async_trait]
pub trait DqApi: Send + Sync {
    /// Execute `request` and return the decoded JSON body.
    ///
    /// Non-success statuses and transport failures are errors; an empty
    /// success body decodes to `Value::Null`.
    async fn send(&self, request: ApiRequest) -> Result<Value, DqError>;

    /// Name of the configured DQ connection (cxn).
    fn connection(&self) -> &str;
}
