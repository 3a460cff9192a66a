//! HTTP transport implementation.
//!
//! Serves JSON-RPC 2.0 over POST for MCP clients, plus plain REST search
//! routes for browsers and scripts:
//!
//! - `GET /search/all/{query}?limit=N` (default 5)
//! - `GET /search/spotify/{query}?limit=N` (default 10)
//! - `GET /search/youtube/{query}?max_results=N` (default 10)
//! - `GET /search/lastfm/{query}?limit=N` (default 10)

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, instrument, warn};

use super::{TransportError, TransportResult, config::HttpConfig};
use crate::core::McpServer;
use crate::domains::aggregator::DEFAULT_SEARCH_LIMIT;
use crate::domains::platforms::{Platform, PlatformError};
use crate::domains::tools::ToolError;

/// MCP protocol version reported by `initialize`.
const PROTOCOL_VERSION: &str = "2024-11-05";

/// Default page size of the single-platform REST routes.
const DEFAULT_REST_LIMIT: u32 = 10;

/// HTTP transport handler.
pub struct HttpTransport {
    config: HttpConfig,
}

/// JSON-RPC request structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcRequest {
    pub jsonrpc: String,
    #[serde(default)]
    pub id: Option<serde_json::Value>,
    pub method: String,
    #[serde(default)]
    pub params: Option<serde_json::Value>,
}

/// JSON-RPC response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcResponse {
    pub jsonrpc: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonRpcError>,
}

/// JSON-RPC error structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcError {
    pub code: i32,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

impl JsonRpcResponse {
    /// Create a success response.
    pub fn success(id: Option<serde_json::Value>, result: serde_json::Value) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id,
            result: Some(result),
            error: None,
        }
    }

    /// Create an error response.
    pub fn error(id: Option<serde_json::Value>, code: i32, message: impl Into<String>) -> Self {
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

    pub fn method_not_found(id: Option<serde_json::Value>) -> Self {
        Self::error(id, -32601, "Method not found")
    }

    pub fn invalid_request(id: Option<serde_json::Value>) -> Self {
        Self::error(id, -32600, "Invalid Request")
    }

    pub fn invalid_params(id: Option<serde_json::Value>, msg: impl Into<String>) -> Self {
        Self::error(id, -32602, msg)
    }
}

/// Query string of the REST search routes.
#[derive(Debug, Default, Deserialize)]
pub struct SearchQuery {
    pub limit: Option<u32>,
    pub max_results: Option<u32>,
}

/// Body of every REST search response.
#[derive(Debug, Serialize)]
pub struct SearchResponse<T> {
    pub query: String,
    pub results: T,
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

    /// Run the HTTP transport.
    pub async fn run(self, server: McpServer) -> TransportResult<()> {
        let addr = self.address();
        let app = build_router(server, &self.config);

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
        info!("  → Search:   GET /search/{{all,spotify,youtube,lastfm}}/{{query}}");
        info!("  → Health:   GET /health");

        axum::serve(listener, app)
            .await
            .map_err(|e| TransportError::http(e.to_string()))?;

        Ok(())
    }
}

/// Build the axum router for the given server.
pub fn build_router(server: McpServer, config: &HttpConfig) -> Router {
    let rpc_path = config.rpc_path.clone();
    let mut app = Router::new()
        .route(&config.rpc_path, post(handle_rpc))
        .route("/health", get(health_check))
        .route(
            "/",
            get(move |state: State<McpServer>| root_handler(state, rpc_path.clone())),
        )
        .route("/search/all/{query}", get(search_all))
        .route("/search/spotify/{query}", get(search_spotify))
        .route("/search/youtube/{query}", get(search_youtube))
        .route("/search/lastfm/{query}", get(search_lastfm))
        .layer(TraceLayer::new_for_http())
        .with_state(server);

    if config.enable_cors {
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
        app = app.layer(cors);
    }

    app
}

/// Root handler - provides API info.
async fn root_handler(State(server): State<McpServer>, rpc_path: String) -> impl IntoResponse {
    Json(serde_json::json!({
        "name": server.name(),
        "version": server.version(),
        "transport": "HTTP",
        "endpoints": {
            "rpc": rpc_path,
            "health": "/health",
            "search": [
                "/search/all/{query}?limit=N",
                "/search/spotify/{query}?limit=N",
                "/search/youtube/{query}?max_results=N",
                "/search/lastfm/{query}?limit=N"
            ]
        },
        "protocol": "JSON-RPC 2.0"
    }))
}

/// Health check endpoint.
async fn health_check(State(server): State<McpServer>) -> impl IntoResponse {
    let available: Vec<_> = server
        .services()
        .availability()
        .available_platforms()
        .into_iter()
        .map(|p| p.as_str())
        .collect();

    Json(serde_json::json!({
        "status": "healthy",
        "services": available,
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

// ============================================================================
// REST search routes
// ============================================================================

fn unavailable(query: String, platform: Platform) -> Response {
    (
        StatusCode::SERVICE_UNAVAILABLE,
        Json(serde_json::json!({
            "query": query,
            "error": PlatformError::NotConfigured(platform).to_string()
        })),
    )
        .into_response()
}

fn records_or_empty<T: Serialize>(
    query: String,
    platform: Platform,
    outcome: Result<Vec<T>, PlatformError>,
) -> Response {
    let results = outcome.unwrap_or_else(|e| {
        warn!(platform = platform.as_str(), "REST search failed: {}", e);
        Vec::new()
    });
    Json(SearchResponse { query, results }).into_response()
}

#[instrument(skip(server))]
async fn search_all(
    State(server): State<McpServer>,
    Path(query): Path<String>,
    Query(params): Query<SearchQuery>,
) -> Response {
    let limit = params.limit.unwrap_or(DEFAULT_SEARCH_LIMIT);
    let results = server.aggregator().search_all(&query, limit).await;
    let status = if results.is_error() {
        StatusCode::BAD_REQUEST
    } else {
        StatusCode::OK
    };
    (status, Json(SearchResponse { query, results })).into_response()
}

#[instrument(skip(server))]
async fn search_spotify(
    State(server): State<McpServer>,
    Path(query): Path<String>,
    Query(params): Query<SearchQuery>,
) -> Response {
    let Some(client) = server.services().spotify() else {
        return unavailable(query, Platform::Spotify);
    };
    let limit = params.limit.unwrap_or(DEFAULT_REST_LIMIT).clamp(1, 50);
    let outcome = client.search_tracks(&query, limit).await;
    records_or_empty(query, Platform::Spotify, outcome)
}

#[instrument(skip(server))]
async fn search_youtube(
    State(server): State<McpServer>,
    Path(query): Path<String>,
    Query(params): Query<SearchQuery>,
) -> Response {
    let Some(client) = server.services().youtube() else {
        return unavailable(query, Platform::YouTube);
    };
    let limit = params
        .max_results
        .or(params.limit)
        .unwrap_or(DEFAULT_REST_LIMIT)
        .clamp(1, 50);
    let outcome = client.search_videos(&query, limit).await;
    records_or_empty(query, Platform::YouTube, outcome)
}

#[instrument(skip(server))]
async fn search_lastfm(
    State(server): State<McpServer>,
    Path(query): Path<String>,
    Query(params): Query<SearchQuery>,
) -> Response {
    let Some(client) = server.services().lastfm() else {
        return unavailable(query, Platform::Lastfm);
    };
    let limit = params.limit.unwrap_or(DEFAULT_REST_LIMIT).clamp(1, 50);
    let outcome = client.search_tracks(&query, limit).await;
    records_or_empty(query, Platform::Lastfm, outcome)
}

// ============================================================================
// JSON-RPC
// ============================================================================

/// Handle JSON-RPC requests.
#[instrument(skip_all, fields(method))]
async fn handle_rpc(
    State(server): State<McpServer>,
    Json(request): Json<JsonRpcRequest>,
) -> impl IntoResponse {
    tracing::Span::current().record("method", &request.method);
    info!("Received JSON-RPC request: {}", request.method);

    let response = process_request(&server, request).await;

    (StatusCode::OK, Json(response))
}

/// Process a JSON-RPC request and return the response.
async fn process_request(server: &McpServer, request: JsonRpcRequest) -> JsonRpcResponse {
    if request.jsonrpc != "2.0" {
        return JsonRpcResponse::invalid_request(request.id);
    }

    match request.method.as_str() {
        "initialize" => handle_initialize(server, request),
        "tools/list" => handle_tools_list(server, request),
        "tools/call" => handle_tools_call(server, request).await,
        method if method.starts_with("notifications/") => {
            info!("Received notification: {}", method);
            JsonRpcResponse::success(request.id, serde_json::json!(null))
        }
        _ => {
            warn!("Unknown method: {}", request.method);
            JsonRpcResponse::method_not_found(request.id)
        }
    }
}

fn handle_initialize(server: &McpServer, request: JsonRpcRequest) -> JsonRpcResponse {
    use rmcp::ServerHandler;

    let info = server.get_info();
    let result = serde_json::json!({
        "protocolVersion": PROTOCOL_VERSION,
        "capabilities": {
            "tools": {}
        },
        "serverInfo": {
            "name": server.name(),
            "version": server.version()
        },
        "instructions": info.instructions
    });

    JsonRpcResponse::success(request.id, result)
}

fn handle_tools_list(server: &McpServer, request: JsonRpcRequest) -> JsonRpcResponse {
    let tools = server.list_tools();
    JsonRpcResponse::success(request.id, serde_json::json!({ "tools": tools }))
}

async fn handle_tools_call(server: &McpServer, request: JsonRpcRequest) -> JsonRpcResponse {
    let params = match request.params {
        Some(p) => p,
        None => return JsonRpcResponse::invalid_params(request.id.clone(), "Missing params"),
    };

    let name = match params.get("name").and_then(|v| v.as_str()) {
        Some(n) => n.to_string(),
        None => return JsonRpcResponse::invalid_params(request.id.clone(), "Missing tool name"),
    };

    let arguments = params
        .get("arguments")
        .cloned()
        .unwrap_or(serde_json::json!({}));

    match server.call_tool(&name, arguments).await {
        Ok(result) => JsonRpcResponse::success(request.id, result),
        Err(ToolError::NotFound(_)) => JsonRpcResponse::method_not_found(request.id),
        Err(e) => JsonRpcResponse::invalid_params(request.id, e.to_string()),
    }
}
