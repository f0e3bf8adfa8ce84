//! HTTP transport implementation.
//!
//! JSON-RPC over POST with `Mcp-Session-Id` sessions. `initialize` opens a
//! session and returns its id in the response header; every later request
//! must carry it, and `DELETE` closes it.

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use chrono::{DateTime, Utc};
use http::{HeaderMap, HeaderName, HeaderValue, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::{error, info, instrument, warn};
use uuid::Uuid;

use super::{TransportError, TransportResult, config::HttpConfig};
use crate::core::McpServer;
use crate::core::server::SERVER_INSTRUCTIONS;

/// Header carrying the session id.
pub const MCP_SESSION_ID: HeaderName = HeaderName::from_static("mcp-session-id");

/// Protocol versions this server speaks, newest first.
pub const SUPPORTED_PROTOCOL_VERSIONS: &[&str] = &["2025-06-18", "2025-03-26", "2024-11-05"];

/// JSON-RPC error codes.
pub mod codes {
    pub const PARSE_ERROR: i32 = -32700;
    pub const INVALID_REQUEST: i32 = -32600;
    pub const METHOD_NOT_FOUND: i32 = -32601;
    pub const INVALID_PARAMS: i32 = -32602;
    pub const INTERNAL_ERROR: i32 = -32603;
    pub const SESSION_NOT_FOUND: i32 = -32001;
}

/// HTTP transport handler.
pub struct HttpTransport {
    config: HttpConfig,
}

/// JSON-RPC request structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcRequest {
    pub jsonrpc: String,
    #[serde(default)]
    pub id: Option<Value>,
    pub method: String,
    #[serde(default)]
    pub params: Option<Value>,
}

/// JSON-RPC response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcResponse {
    pub jsonrpc: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonRpcError>,
}

/// JSON-RPC error structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcError {
    pub code: i32,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl JsonRpcResponse {
    /// Create a success response.
    pub fn success(id: Option<Value>, result: Value) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id,
            result: Some(result),
            error: None,
        }
    }

    /// Create an error response.
    pub fn error(id: Option<Value>, code: i32, message: impl Into<String>) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id,
            result: None,
            error: Some(JsonRpcError {
                code,
                message: message.into(),
                data: None,
            }),
        }
    }

    /// Method not found error.
    pub fn method_not_found(id: Option<Value>) -> Self {
        Self::error(id, codes::METHOD_NOT_FOUND, "Method not found")
    }

    /// Invalid request error.
    pub fn invalid_request(id: Option<Value>) -> Self {
        Self::error(id, codes::INVALID_REQUEST, "Invalid Request")
    }

    /// Invalid params error.
    pub fn invalid_params(id: Option<Value>, msg: impl Into<String>) -> Self {
        Self::error(id, codes::INVALID_PARAMS, msg)
    }

    /// Internal error.
    pub fn internal_error(id: Option<Value>, msg: impl Into<String>) -> Self {
        Self::error(id, codes::INTERNAL_ERROR, msg)
    }

    /// Body could not be parsed as a JSON-RPC request.
    pub fn parse_error(msg: impl Into<String>) -> Self {
        Self::error(None, codes::PARSE_ERROR, msg)
    }

    /// Request without a session id.
    pub fn missing_session() -> Self {
        Self::error(
            Some(json!("server-error")),
            codes::INVALID_REQUEST,
            "Bad Request: Missing session ID",
        )
    }

    /// Request with a session id this server does not know.
    pub fn session_not_found(id: Option<Value>) -> Self {
        Self::error(id, codes::SESSION_NOT_FOUND, "Session not found")
    }
}

/// Application state shared across HTTP handlers.
#[derive(Clone)]
pub struct AppState {
    /// The MCP server instance.
    server: McpServer,
    /// Open sessions by id.
    sessions: Arc<RwLock<HashMap<String, SessionState>>>,
    /// Path the JSON-RPC endpoint is mounted on.
    rpc_path: Arc<str>,
    /// Sessions unused for longer than this are dropped.
    session_idle: Duration,
    /// Upper bound on open sessions.
    max_sessions: usize,
}

/// State kept for one client session.
#[derive(Debug, Clone)]
struct SessionState {
    initialized: bool,
    protocol_version: String,
    created_at: DateTime<Utc>,
    last_seen: Instant,
}

impl AppState {
    /// Mark a session as used. Returns `false` for unknown or expired sessions.
    async fn touch_session(&self, id: &str) -> bool {
        let now = Instant::now();
        let mut sessions = self.sessions.write().await;
        match sessions.get_mut(id) {
            None => return false,
            Some(session) if now.duration_since(session.last_seen) <= self.session_idle => {
                session.last_seen = now;
                return true;
            }
            Some(_) => {}
        }
        sessions.remove(id);
        info!("Session {} expired", id);
        false
    }

    /// Register a new session, dropping expired ones and, when full, the
    /// least recently used one.
    async fn open_session(&self, id: String, protocol_version: &str) {
        let now = Instant::now();
        let mut sessions = self.sessions.write().await;

        let before = sessions.len();
        sessions.retain(|_, s| now.duration_since(s.last_seen) <= self.session_idle);
        if sessions.len() < before {
            info!("Dropped {} expired session(s)", before - sessions.len());
        }

        while sessions.len() >= self.max_sessions.max(1) {
            let oldest = sessions
                .iter()
                .min_by_key(|(_, s)| s.last_seen)
                .map(|(id, _)| id.clone());
            match oldest {
                Some(oldest) => {
                    warn!("Session limit reached, closing {}", oldest);
                    sessions.remove(&oldest);
                }
                None => break,
            }
        }

        sessions.insert(
            id,
            SessionState {
                initialized: false,
                protocol_version: protocol_version.to_string(),
                created_at: Utc::now(),
                last_seen: now,
            },
        );
    }
}

/// Pick the client's protocol version when supported, otherwise the newest.
pub fn negotiate_protocol_version(requested: Option<&str>) -> &'static str {
    requested
        .and_then(|r| SUPPORTED_PROTOCOL_VERSIONS.iter().find(|v| **v == r))
        .copied()
        .unwrap_or(SUPPORTED_PROTOCOL_VERSIONS[0])
}

impl HttpTransport {
    /// Create a new HTTP transport with the given config.
    pub fn new(config: HttpConfig) -> Self {
        Self { config }
    }

    /// Get the bind address.
    pub fn address(&self) -> String {
        format!("{}:{}", self.config.host, self.config.port)
    }

    /// Build the axum router serving `server`.
    pub fn router(&self, server: McpServer) -> Router {
        let state = AppState {
            server,
            sessions: Arc::new(RwLock::new(HashMap::new())),
            rpc_path: Arc::from(self.config.rpc_path.as_str()),
            session_idle: Duration::from_secs(self.config.session_idle_secs),
            max_sessions: self.config.max_sessions,
        };

        let mut app = Router::new()
            .route(
                &self.config.rpc_path,
                post(handle_rpc).delete(handle_delete_session),
            )
            .route("/health", get(health_check))
            .route("/", get(root_handler))
            .with_state(state);

        if self.config.enable_cors {
            let cors = CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any)
                .expose_headers([MCP_SESSION_ID]);
            app = app.layer(cors);
        }

        app.layer(TraceLayer::new_for_http())
    }

    /// Run the HTTP transport.
    pub async fn run(self, server: McpServer) -> TransportResult<()> {
        let addr = self.address();
        let app = self.router(server);

        let listener = tokio::net::TcpListener::bind(&addr)
            .await
            .map_err(|e| TransportError::bind(&addr, e))?;

        let cors_status = if self.config.enable_cors {
            "enabled"
        } else {
            "disabled"
        };
        info!(
            "Ready - listening on {} (JSON-RPC over HTTP, CORS {})",
            addr, cors_status
        );
        info!("  → JSON-RPC: POST {}", self.config.rpc_path);
        info!("  → Health:   GET /health");

        axum::serve(listener, app)
            .await
            .map_err(|e| TransportError::http(e.to_string()))?;

        Ok(())
    }
}

/// Root handler - provides API info.
async fn root_handler(State(state): State<AppState>) -> impl IntoResponse {
    Json(json!({
        "name": state.server.name(),
        "version": state.server.version(),
        "transport": "HTTP",
        "connection": state.server.connection(),
        "endpoints": {
            "rpc": state.rpc_path.as_ref(),
            "health": "/health"
        },
        "protocol": "JSON-RPC 2.0",
        "documentation": format!(
            "Send POST requests to {} with JSON-RPC messages, starting with initialize",
            state.rpc_path
        )
    }))
}

/// Health check endpoint.
async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "healthy",
        "timestamp": Utc::now().to_rfc3339()
    }))
}

fn session_id(headers: &HeaderMap) -> Option<String> {
    headers
        .get(&MCP_SESSION_ID)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

fn reply(status: StatusCode, response: JsonRpcResponse) -> Response {
    (status, Json(response)).into_response()
}

/// Handle JSON-RPC requests.
#[instrument(skip_all, fields(method))]
async fn handle_rpc(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<JsonRpcRequest>, JsonRejection>,
) -> Response {
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => {
            warn!("Rejected JSON-RPC body: {}", rejection.body_text());
            return reply(
                StatusCode::BAD_REQUEST,
                JsonRpcResponse::parse_error(format!("Parse error: {}", rejection.body_text())),
            );
        }
    };

    tracing::Span::current().record("method", request.method.as_str());
    info!("Received JSON-RPC request: {}", request.method);

    if request.jsonrpc != "2.0" {
        return reply(StatusCode::OK, JsonRpcResponse::invalid_request(request.id));
    }

    if request.method == "initialize" {
        return handle_initialize(&state, request).await;
    }

    let Some(session_id) = session_id(&headers) else {
        warn!("{} without session id", request.method);
        return reply(StatusCode::BAD_REQUEST, JsonRpcResponse::missing_session());
    };
    if !state.touch_session(&session_id).await {
        warn!("Unknown session: {}", session_id);
        return reply(
            StatusCode::NOT_FOUND,
            JsonRpcResponse::session_not_found(request.id),
        );
    }

    if request.method.starts_with("notifications/") {
        handle_notification(&state, &session_id, &request).await;
        return StatusCode::ACCEPTED.into_response();
    }

    let response = process_request(&state, request).await;
    reply(StatusCode::OK, response)
}

/// Process a JSON-RPC request inside an open session.
async fn process_request(state: &AppState, request: JsonRpcRequest) -> JsonRpcResponse {
    match request.method.as_str() {
        "ping" => JsonRpcResponse::success(request.id, json!({})),

        // List available tools
        "tools/list" => handle_tools_list(state, request).await,

        // Call a tool
        "tools/call" => handle_tools_call(state, request).await,

        // Unknown method
        _ => {
            warn!("Unknown method: {}", request.method);
            JsonRpcResponse::method_not_found(request.id)
        }
    }
}

/// Handle initialize request: open a session and return its id in the header.
async fn handle_initialize(state: &AppState, request: JsonRpcRequest) -> Response {
    let requested = request
        .params
        .as_ref()
        .and_then(|p| p.get("protocolVersion"))
        .and_then(Value::as_str);
    let protocol_version = negotiate_protocol_version(requested);

    let id = Uuid::new_v4().to_string();
    let header = match HeaderValue::from_str(&id) {
        Ok(header) => header,
        Err(e) => {
            error!("Failed to build session header: {}", e);
            return reply(
                StatusCode::INTERNAL_SERVER_ERROR,
                JsonRpcResponse::internal_error(request.id, "Failed to create session"),
            );
        }
    };

    state.open_session(id.clone(), protocol_version).await;
    info!("Session {} opened (protocol {})", id, protocol_version);

    let result = json!({
        "protocolVersion": protocol_version,
        "capabilities": {
            "tools": {}
        },
        "serverInfo": {
            "name": state.server.name(),
            "version": state.server.version()
        },
        "instructions": SERVER_INSTRUCTIONS
    });

    (
        StatusCode::OK,
        [(MCP_SESSION_ID, header)],
        Json(JsonRpcResponse::success(request.id, result)),
    )
        .into_response()
}

/// Handle tools/list request.
async fn handle_tools_list(state: &AppState, request: JsonRpcRequest) -> JsonRpcResponse {
    info!("Processing tools/list request");

    let tools = state.server.list_tools();
    JsonRpcResponse::success(request.id, json!({ "tools": tools }))
}

/// Handle tools/call request.
async fn handle_tools_call(state: &AppState, request: JsonRpcRequest) -> JsonRpcResponse {
    let params = match request.params {
        Some(p) => p,
        None => return JsonRpcResponse::invalid_params(request.id.clone(), "Missing params"),
    };

    let name = match params.get("name").and_then(|v| v.as_str()) {
        Some(n) => n.to_string(),
        None => return JsonRpcResponse::invalid_params(request.id.clone(), "Missing tool name"),
    };

    let arguments = params.get("arguments").cloned().unwrap_or(json!({}));

    match state.server.call_tool(&name, arguments).await {
        Ok(result) => match serde_json::to_value(&result) {
            Ok(value) => JsonRpcResponse::success(request.id, value),
            Err(e) => {
                error!("Failed to serialize result of {}: {}", name, e);
                JsonRpcResponse::internal_error(request.id, e.to_string())
            }
        },
        Err(e) => JsonRpcResponse::invalid_params(request.id, e.to_string()),
    }
}

/// Handle notifications (no response body).
async fn handle_notification(state: &AppState, session_id: &str, request: &JsonRpcRequest) {
    match request.method.as_str() {
        "notifications/initialized" => {
            let mut sessions = state.sessions.write().await;
            if let Some(session) = sessions.get_mut(session_id) {
                session.initialized = true;
                info!(
                    "Session {} initialized (protocol {}, opened {})",
                    session_id,
                    session.protocol_version,
                    session.created_at.to_rfc3339()
                );
            }
        }
        _ => {
            info!("Received notification: {}", request.method);
        }
    }
}

/// Handle DELETE: close the session named in the header.
async fn handle_delete_session(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let Some(session_id) = session_id(&headers) else {
        return reply(StatusCode::BAD_REQUEST, JsonRpcResponse::missing_session());
    };

    match state.sessions.write().await.remove(&session_id) {
        Some(session) => {
            info!(
                "Session {} closed (initialized: {})",
                session_id, session.initialized
            );
            StatusCode::NO_CONTENT.into_response()
        }
        None => reply(
            StatusCode::NOT_FOUND,
            JsonRpcResponse::session_not_found(None),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Config;
    use crate::domains::dq::mock::MockApi;
    use axum::body::Body;
    use http::Request;
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    fn test_router(api: MockApi) -> Router {
        let server = McpServer::with_api(Config::default(), Arc::new(api));
        HttpTransport::new(HttpConfig::default()).router(server)
    }

    async fn post_rpc(
        app: &Router,
        session: Option<&str>,
        body: Value,
    ) -> (StatusCode, HeaderMap, Value) {
        let mut builder = Request::builder()
            .method("POST")
            .uri("/mcp")
            .header("content-type", "application/json");
        if let Some(id) = session {
            builder = builder.header("mcp-session-id", id);
        }
        let request = builder.body(Body::from(body.to_string())).unwrap();
        let response = app.clone().oneshot(request).await.unwrap();

        let status = response.status();
        let headers = response.headers().clone();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, headers, json)
    }

    async fn open_session(app: &Router) -> String {
        let (status, headers, _) = post_rpc(
            app,
            None,
            json!({ "jsonrpc": "2.0", "id": 1, "method": "initialize", "params": {} }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        headers
            .get("mcp-session-id")
            .unwrap()
            .to_str()
            .unwrap()
            .to_string()
    }

    fn call(id: i64, name: &str, arguments: Value) -> Value {
        json!({
            "jsonrpc": "2.0",
            "id": id,
            "method": "tools/call",
            "params": { "name": name, "arguments": arguments }
        })
    }

    #[test]
    fn test_negotiate_protocol_version() {
        assert_eq!(negotiate_protocol_version(Some("2024-11-05")), "2024-11-05");
        assert_eq!(negotiate_protocol_version(Some("1999-01-01")), "2025-06-18");
        assert_eq!(negotiate_protocol_version(None), "2025-06-18");
    }

    #[tokio::test]
    async fn test_initialize_returns_session_header() {
        let app = test_router(MockApi::new());
        let (status, headers, body) = post_rpc(
            &app,
            None,
            json!({
                "jsonrpc": "2.0",
                "id": 1,
                "method": "initialize",
                "params": { "protocolVersion": "2025-03-26" }
            }),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        let id = headers.get("mcp-session-id").unwrap().to_str().unwrap();
        assert!(Uuid::parse_str(id).is_ok());
        assert_eq!(body["result"]["protocolVersion"], "2025-03-26");
        assert!(body["result"]["capabilities"]["tools"].is_object());
    }

    #[tokio::test]
    async fn test_missing_session_is_bad_request() {
        let app = test_router(MockApi::new());
        let (status, _, body) = post_rpc(
            &app,
            None,
            json!({ "jsonrpc": "2.0", "id": 2, "method": "tools/list" }),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            body,
            json!({
                "jsonrpc": "2.0",
                "id": "server-error",
                "error": { "code": -32600, "message": "Bad Request: Missing session ID" }
            })
        );
    }

    #[tokio::test]
    async fn test_unknown_session_is_not_found() {
        let app = test_router(MockApi::new());
        let (status, _, body) = post_rpc(
            &app,
            Some("no-such-session"),
            json!({ "jsonrpc": "2.0", "id": 3, "method": "tools/list" }),
        )
        .await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["code"], -32001);
    }

    #[tokio::test]
    async fn test_tools_list_and_call() {
        let app = test_router(MockApi::new());
        let session = open_session(&app).await;

        let (_, _, listed) = post_rpc(
            &app,
            Some(&session),
            json!({ "jsonrpc": "2.0", "id": 2, "method": "tools/list" }),
        )
        .await;
        assert_eq!(listed["result"]["tools"].as_array().unwrap().len(), 12);

        let (status, _, called) =
            post_rpc(&app, Some(&session), call(3, "get_todays_date", json!({}))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(called["result"]["isError"], false);
        assert_eq!(called["result"]["structuredContent"]["success"], true);
    }

    #[tokio::test]
    async fn test_upstream_failure_keeps_session_alive() {
        let app = test_router(MockApi::new().server_error("/v2/getrecentruns"));
        let session = open_session(&app).await;

        let (status, _, failed) =
            post_rpc(&app, Some(&session), call(2, "get_recent_runs", json!({}))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(failed["result"]["isError"], true);
        assert_eq!(failed["result"]["structuredContent"]["kind"], "upstream");

        let (status, _, pong) = post_rpc(
            &app,
            Some(&session),
            json!({ "jsonrpc": "2.0", "id": 3, "method": "ping" }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(pong["result"], json!({}));
    }

    #[tokio::test]
    async fn test_unknown_tool_and_method() {
        let app = test_router(MockApi::new());
        let session = open_session(&app).await;

        let (_, _, unknown_tool) =
            post_rpc(&app, Some(&session), call(2, "drop_tables", json!({}))).await;
        assert_eq!(unknown_tool["error"]["code"], -32602);

        let (_, _, unknown_method) = post_rpc(
            &app,
            Some(&session),
            json!({ "jsonrpc": "2.0", "id": 3, "method": "resources/list" }),
        )
        .await;
        assert_eq!(unknown_method["error"]["code"], -32601);
    }

    #[tokio::test]
    async fn test_protocol_errors() {
        let app = test_router(MockApi::new());

        let (_, _, old_version) = post_rpc(
            &app,
            None,
            json!({ "jsonrpc": "1.0", "id": 1, "method": "initialize" }),
        )
        .await;
        assert_eq!(old_version["error"]["code"], -32600);

        let request = Request::builder()
            .method("POST")
            .uri("/mcp")
            .header("content-type", "application/json")
            .body(Body::from("{not json"))
            .unwrap();
        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["error"]["code"], -32700);
    }

    #[tokio::test]
    async fn test_notification_accepted_without_body() {
        let app = test_router(MockApi::new());
        let session = open_session(&app).await;

        let (status, _, body) = post_rpc(
            &app,
            Some(&session),
            json!({ "jsonrpc": "2.0", "method": "notifications/initialized" }),
        )
        .await;
        assert_eq!(status, StatusCode::ACCEPTED);
        assert_eq!(body, Value::Null);
    }

    #[tokio::test]
    async fn test_delete_closes_session() {
        let app = test_router(MockApi::new());
        let session = open_session(&app).await;

        let delete = |id: &str| {
            Request::builder()
                .method("DELETE")
                .uri("/mcp")
                .header("mcp-session-id", id)
                .body(Body::empty())
                .unwrap()
        };

        let response = app.clone().oneshot(delete(&session)).await.unwrap();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
        let response = app.clone().oneshot(delete(&session)).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let (status, _, _) = post_rpc(
            &app,
            Some(&session),
            json!({ "jsonrpc": "2.0", "id": 4, "method": "ping" }),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_session_limit_closes_least_recent() {
        let server = McpServer::with_api(Config::default(), Arc::new(MockApi::new()));
        let config = HttpConfig {
            max_sessions: 1,
            ..HttpConfig::default()
        };
        let app = HttpTransport::new(config).router(server);

        let first = open_session(&app).await;
        let second = open_session(&app).await;
        let ping = json!({ "jsonrpc": "2.0", "id": 2, "method": "ping" });

        let (status, _, _) = post_rpc(&app, Some(&first), ping.clone()).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        let (status, _, _) = post_rpc(&app, Some(&second), ping).await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_idle_sessions_expire() {
        let state = AppState {
            server: McpServer::with_api(Config::default(), Arc::new(MockApi::new())),
            sessions: Arc::new(RwLock::new(HashMap::new())),
            rpc_path: Arc::from("/mcp"),
            session_idle: Duration::from_secs(60),
            max_sessions: 10,
        };
        state.open_session("idle".to_string(), "2025-06-18").await;
        state.open_session("active".to_string(), "2025-06-18").await;
        state.sessions.write().await.get_mut("idle").unwrap().last_seen =
            Instant::now().checked_sub(Duration::from_secs(120)).unwrap();

        assert!(state.touch_session("active").await);
        assert!(!state.touch_session("idle").await);
        assert!(!state.sessions.read().await.contains_key("idle"));
        assert!(!state.touch_session("never-opened").await);
    }

    #[tokio::test]
    async fn test_health() {
        let app = test_router(MockApi::new());
        let request = Request::builder()
            .uri("/health")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["status"], "healthy");
    }
}
