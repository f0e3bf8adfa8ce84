//! Recording test double for [`DqApi`].

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::{Value, json};

use super::{ApiRequest, DqApi, DqError};

/// Records every request and answers from canned responses keyed by path.
///
/// Paths without a canned response answer `{}`.
pub(crate) struct MockApi {
    connection: String,
    responses: Mutex<HashMap<String, Result<Value, DqError>>>,
    calls: Mutex<Vec<ApiRequest>>,
}

impl MockApi {
    pub fn new() -> Self {
        Self {
            connection: "BIGQUERY".to_string(),
            responses: Mutex::new(HashMap::new()),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Answer requests to `path` with `response`.
    pub fn respond(self, path: &str, response: Result<Value, DqError>) -> Self {
        self.responses
            .lock()
            .unwrap()
            .insert(path.to_string(), response);
        self
    }

    /// Answer requests to `path` with the given JSON body.
    pub fn ok(self, path: &str, body: Value) -> Self {
        self.respond(path, Ok(body))
    }

    /// Answer requests to `path` with an upstream HTTP 500.
    pub fn server_error(self, path: &str) -> Self {
        self.respond(path, Err(DqError::http(500, "Internal Server Error")))
    }

    /// Every request sent so far, in order.
    pub fn calls(&self) -> Vec<ApiRequest> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl DqApi for MockApi {
    async fn send(&self, request: ApiRequest) -> Result<Value, DqError> {
        let path = request.path();
        self.calls.lock().unwrap().push(request);
        self.responses
            .lock()
            .unwrap()
            .get(&path)
            .cloned()
            .unwrap_or_else(|| Ok(json!({})))
    }

    fn connection(&self) -> &str {
        &self.connection
    }
}
