// crates/podium-mcp/src/server.rs
// ============================================================================
// Module: MCP Server
// Description: JSON-RPC 2.0 server over stdio and HTTP transports.
// Purpose: Expose the presentation tools to MCP clients.
// Dependencies: podium-config, podium-contract, podium-core, axum, tokio
// ============================================================================

//! ## Overview
//! The server speaks JSON-RPC 2.0 over two transports. Stdio frames messages
//! with `Content-Length` headers and serves one client for the life of the
//! process; HTTP accepts the same payloads as POST bodies on `/rpc`. Both
//! paths funnel through [`parse_request`], which dispatches `initialize`,
//! `tools/list`, and `tools/call` to the [`ToolRouter`] and records exactly
//! one audit event and one metric sample per request.
//!
//! Security posture: request bodies are untrusted and size-capped before they
//! are parsed. Malformed envelopes are answered with JSON-RPC errors rather
//! than dropped connections, and tool failures stay inside the tool result so
//! the protocol layer never leaks interpreter internals.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::io::BufRead;
use std::io::BufReader;
use std::io::Read;
use std::io::Write;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use std::time::Instant;

use axum::Router;
use axum::body::Bytes;
use axum::extract::ConnectInfo;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::routing::post;
use podium_config::PodiumConfig;
use podium_config::ServerTransport;
use podium_contract::ToolDefinition;
use podium_core::OsascriptInvoker;
use podium_core::ScriptCatalog;
use podium_core::ToolName;
use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use crate::audit::McpAuditEvent;
use crate::audit::McpAuditEventParams;
use crate::audit::McpAuditSink;
use crate::audit::build_audit_sink;
use crate::response::ToolCallResult;
use crate::telemetry::McpMethod;
use crate::telemetry::McpMetricEvent;
use crate::telemetry::McpMetrics;
use crate::telemetry::McpOutcome;
use crate::telemetry::NoopMetrics;
use crate::tools::ToolCallReply;
use crate::tools::ToolRouter;
use crate::tools::ToolRouterConfig;

// ============================================================================
// SECTION: Protocol Constants
// ============================================================================

/// Protocol revision advertised during `initialize`.
pub const MCP_PROTOCOL_VERSION: &str = "2024-11-05";

// ============================================================================
// SECTION: MCP Server
// ============================================================================

/// MCP server instance.
pub struct McpServer {
    /// Adapter configuration.
    config: PodiumConfig,
    /// Tool router for request dispatch.
    router: ToolRouter,
    /// Audit sink receiving one event per request.
    audit: Arc<dyn McpAuditSink>,
    /// Metrics sink receiving request counters and latencies.
    metrics: Arc<dyn McpMetrics>,
}

impl McpServer {
    /// Builds a new MCP server from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`McpServerError`] when validation or initialization fails.
    pub fn from_config(config: PodiumConfig) -> Result<Self, McpServerError> {
        config.validate().map_err(|err| McpServerError::Config(err.to_string()))?;
        let catalog = ScriptCatalog::open(config.automation.script_dir_path())
            .map_err(|err| McpServerError::Init(err.to_string()))?;
        let invoker = Arc::new(OsascriptInvoker::new(&config.automation.osascript_path));
        let router = ToolRouter::new(ToolRouterConfig {
            invoker,
            catalog,
        });
        let audit =
            build_audit_sink(&config.audit).map_err(|err| McpServerError::Init(err.to_string()))?;
        Ok(Self {
            config,
            router,
            audit,
            metrics: Arc::new(NoopMetrics),
        })
    }

    /// Replaces the metrics sink, for embedders that aggregate counters.
    #[must_use]
    pub fn with_metrics(mut self, metrics: Arc<dyn McpMetrics>) -> Self {
        self.metrics = metrics;
        self
    }

    /// Serves requests using the configured transport.
    ///
    /// # Errors
    ///
    /// Returns [`McpServerError`] when the server fails.
    pub async fn serve(self) -> Result<(), McpServerError> {
        let transport = self.config.server.transport;
        let state = Arc::new(ServerState {
            router: self.router,
            audit: self.audit,
            metrics: self.metrics,
            max_body_bytes: self.config.server.max_body_bytes,
        });
        match transport {
            ServerTransport::Stdio => serve_stdio(&state),
            ServerTransport::Http => serve_http(self.config, state).await,
        }
    }
}

/// Shared handler state for both transports.
struct ServerState {
    /// Tool router for request dispatch.
    router: ToolRouter,
    /// Audit sink receiving one event per request.
    audit: Arc<dyn McpAuditSink>,
    /// Metrics sink receiving request counters and latencies.
    metrics: Arc<dyn McpMetrics>,
    /// Maximum allowed request body size.
    max_body_bytes: usize,
}

/// Transport context attached to audit records.
#[derive(Debug, Clone)]
struct RequestContext {
    /// Transport carrying the request.
    transport: ServerTransport,
    /// Peer address for network transports.
    peer_ip: Option<String>,
}

impl RequestContext {
    /// Context for the stdio transport.
    const fn stdio() -> Self {
        Self {
            transport: ServerTransport::Stdio,
            peer_ip: None,
        }
    }

    /// Context for an HTTP request from `peer`.
    fn http(peer: SocketAddr) -> Self {
        Self {
            transport: ServerTransport::Http,
            peer_ip: Some(peer.ip().to_string()),
        }
    }
}

// ============================================================================
// SECTION: Stdio Transport
// ============================================================================

/// Serves JSON-RPC requests over stdin/stdout until the client disconnects.
fn serve_stdio(state: &ServerState) -> Result<(), McpServerError> {
    let mut reader = BufReader::new(std::io::stdin());
    let mut writer = std::io::stdout();
    let context = RequestContext::stdio();
    loop {
        let Some(bytes) = read_framed(&mut reader, state.max_body_bytes)? else {
            return Ok(());
        };
        let handled = parse_request(state, &context, &bytes);
        let Some(response) = handled.response else {
            continue;
        };
        let payload = serde_json::to_vec(&response)
            .map_err(|_| McpServerError::Transport("json-rpc serialization failed".to_string()))?;
        write_framed(&mut writer, &payload)?;
    }
}

// ============================================================================
// SECTION: HTTP Transport
// ============================================================================

/// Serves JSON-RPC requests over HTTP POST `/rpc`.
async fn serve_http(config: PodiumConfig, state: Arc<ServerState>) -> Result<(), McpServerError> {
    let bind = config
        .server
        .bind
        .as_ref()
        .ok_or_else(|| McpServerError::Config("bind address required".to_string()))?;
    let addr: SocketAddr =
        bind.parse().map_err(|_| McpServerError::Config("invalid bind address".to_string()))?;
    let app = Router::new().route("/rpc", post(handle_http)).with_state(state);
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|_| McpServerError::Transport("http bind failed".to_string()))?;
    axum::serve(listener, app.into_make_service_with_connect_info::<SocketAddr>())
        .await
        .map_err(|_| McpServerError::Transport("http server failed".to_string()))
}

/// Handles one HTTP JSON-RPC request.
async fn handle_http(
    State(state): State<Arc<ServerState>>,
    ConnectInfo(peer): ConnectInfo<SocketAddr>,
    bytes: Bytes,
) -> Response {
    let context = RequestContext::http(peer);
    let handled = parse_request(&state, &context, &bytes);
    match handled.response {
        Some(body) => (handled.status, axum::Json(body)).into_response(),
        None => handled.status.into_response(),
    }
}

// ============================================================================
// SECTION: JSON-RPC Envelopes
// ============================================================================

/// Incoming JSON-RPC request payload.
#[derive(Debug, Deserialize)]
struct JsonRpcRequest {
    /// JSON-RPC protocol version.
    jsonrpc: String,
    /// Request identifier; null or absent for notifications.
    #[serde(default)]
    id: Value,
    /// Method name.
    method: String,
    /// Optional parameters payload.
    params: Option<Value>,
}

/// JSON-RPC response envelope.
#[derive(Debug, Serialize)]
struct JsonRpcResponse {
    /// JSON-RPC protocol version.
    jsonrpc: &'static str,
    /// Request identifier.
    id: Value,
    /// Successful result payload.
    #[serde(skip_serializing_if = "Option::is_none")]
    result: Option<Value>,
    /// Error payload when the request fails.
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<JsonRpcError>,
}

/// JSON-RPC error payload.
#[derive(Debug, Serialize)]
struct JsonRpcError {
    /// Error code.
    code: i64,
    /// Human-readable error message.
    message: String,
}

/// Tool call parameters for `tools/call` requests.
#[derive(Debug, Deserialize)]
struct ToolCallParams {
    /// Tool name.
    name: String,
    /// Raw JSON arguments.
    #[serde(default)]
    arguments: Value,
}

/// Tool list response payload.
#[derive(Debug, Serialize)]
struct ToolListResult {
    /// Registered tool definitions.
    tools: Vec<ToolDefinition>,
}

/// `initialize` response payload.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct InitializeResult {
    /// Protocol revision the server implements.
    protocol_version: &'static str,
    /// Capability set advertised to the client.
    capabilities: ServerCapabilities,
    /// Server identity surfaced in client UIs.
    server_info: ServerInfo,
}

/// Capability set advertised during `initialize`.
#[derive(Debug, Serialize)]
struct ServerCapabilities {
    /// Tool capability marker; presence signals `tools/*` support.
    tools: ToolsCapability,
}

/// Marker object for tool support.
#[derive(Debug, Serialize)]
struct ToolsCapability {}

/// Server identity block.
#[derive(Debug, Serialize)]
struct ServerInfo {
    /// Server name.
    name: &'static str,
    /// Crate version.
    version: &'static str,
}

// ============================================================================
// SECTION: JSON-RPC Handling
// ============================================================================

/// Outcome of one dispatched request, carrying observation metadata.
struct HandledRequest {
    /// HTTP status for network transports.
    status: StatusCode,
    /// Response body; `None` for notifications.
    response: Option<JsonRpcResponse>,
    /// Classified method label.
    method: McpMethod,
    /// Tool named by a `tools/call` request.
    tool: Option<ToolName>,
    /// Request outcome label.
    outcome: McpOutcome,
    /// Error kind label when the request failed.
    error_kind: Option<&'static str>,
}

impl HandledRequest {
    /// Builds a JSON-RPC error outcome.
    fn error(
        status: StatusCode,
        id: Value,
        code: i64,
        message: &str,
        method: McpMethod,
        kind: &'static str,
    ) -> Self {
        Self {
            status,
            response: Some(JsonRpcResponse {
                jsonrpc: "2.0",
                id,
                result: None,
                error: Some(JsonRpcError {
                    code,
                    message: message.to_string(),
                }),
            }),
            method,
            tool: None,
            outcome: McpOutcome::Error,
            error_kind: Some(kind),
        }
    }

    /// Builds a successful JSON-RPC result outcome.
    fn result(id: Value, value: Value, method: McpMethod) -> Self {
        Self {
            status: StatusCode::OK,
            response: Some(JsonRpcResponse {
                jsonrpc: "2.0",
                id,
                result: Some(value),
                error: None,
            }),
            method,
            tool: None,
            outcome: McpOutcome::Ok,
            error_kind: None,
        }
    }
}

/// Parses, dispatches, and observes one request payload.
///
/// Both transports funnel through here so every request produces exactly one
/// audit event and one metric sample.
fn parse_request(state: &ServerState, context: &RequestContext, bytes: &[u8]) -> HandledRequest {
    let started = Instant::now();
    let handled = dispatch_payload(state, bytes);
    observe_request(state, context, &handled, bytes.len(), started.elapsed());
    handled
}

/// Validates size and shape, then dispatches to the method handlers.
fn dispatch_payload(state: &ServerState, bytes: &[u8]) -> HandledRequest {
    if bytes.len() > state.max_body_bytes {
        return HandledRequest::error(
            StatusCode::PAYLOAD_TOO_LARGE,
            Value::Null,
            -32070,
            "request body too large",
            McpMethod::Invalid,
            "body_too_large",
        );
    }
    match serde_json::from_slice::<JsonRpcRequest>(bytes) {
        Ok(request) => handle_request(&state.router, request),
        Err(_) => HandledRequest::error(
            StatusCode::BAD_REQUEST,
            Value::Null,
            -32600,
            "invalid json-rpc request",
            McpMethod::Invalid,
            "invalid_request",
        ),
    }
}

/// Dispatches a parsed JSON-RPC request to the method handlers.
fn handle_request(router: &ToolRouter, request: JsonRpcRequest) -> HandledRequest {
    let method = McpMethod::classify(&request.method);
    if request.jsonrpc != "2.0" {
        return HandledRequest::error(
            StatusCode::BAD_REQUEST,
            request.id,
            -32600,
            "invalid json-rpc version",
            method,
            "invalid_version",
        );
    }
    if request.method.starts_with("notifications/") {
        return HandledRequest {
            status: StatusCode::ACCEPTED,
            response: None,
            method,
            tool: None,
            outcome: McpOutcome::Ok,
            error_kind: None,
        };
    }
    match request.method.as_str() {
        "initialize" => handle_initialize(request.id),
        "tools/list" => handle_tools_list(router, request.id),
        "tools/call" => handle_tools_call(router, request.id, request.params),
        _ => HandledRequest::error(
            StatusCode::BAD_REQUEST,
            request.id,
            -32601,
            "method not found",
            method,
            "method_not_found",
        ),
    }
}

/// Answers `initialize` with the protocol revision and server identity.
fn handle_initialize(id: Value) -> HandledRequest {
    let result = InitializeResult {
        protocol_version: MCP_PROTOCOL_VERSION,
        capabilities: ServerCapabilities {
            tools: ToolsCapability {},
        },
        server_info: ServerInfo {
            name: "podium",
            version: env!("CARGO_PKG_VERSION"),
        },
    };
    match serde_json::to_value(&result) {
        Ok(value) => HandledRequest::result(id, value, McpMethod::Initialize),
        Err(_) => serialization_error(id, McpMethod::Initialize),
    }
}

/// Answers `tools/list` with the full tool catalog.
fn handle_tools_list(router: &ToolRouter, id: Value) -> HandledRequest {
    let result = ToolListResult {
        tools: router.list_tools(),
    };
    match serde_json::to_value(&result) {
        Ok(value) => HandledRequest::result(id, value, McpMethod::ToolsList),
        Err(_) => serialization_error(id, McpMethod::ToolsList),
    }
}

/// Answers `tools/call` by routing to the named tool.
///
/// Tool-level failures stay inside the result content; only malformed params
/// or serialization failures become JSON-RPC errors.
fn handle_tools_call(router: &ToolRouter, id: Value, params: Option<Value>) -> HandledRequest {
    let params = params.unwrap_or(Value::Null);
    let Ok(call) = serde_json::from_value::<ToolCallParams>(params) else {
        return HandledRequest::error(
            StatusCode::BAD_REQUEST,
            id,
            -32602,
            "invalid tool params",
            McpMethod::ToolsCall,
            "invalid_params",
        );
    };
    let reply = call_tool_blocking(router, &call.name, call.arguments);
    let outcome = if reply.is_error() {
        McpOutcome::Error
    } else {
        McpOutcome::Ok
    };
    let result = ToolCallResult {
        content: reply.content,
    };
    match serde_json::to_value(&result) {
        Ok(value) => HandledRequest {
            status: StatusCode::OK,
            response: Some(JsonRpcResponse {
                jsonrpc: "2.0",
                id,
                result: Some(value),
                error: None,
            }),
            method: McpMethod::ToolsCall,
            tool: reply.tool,
            outcome,
            error_kind: reply.error_kind,
        },
        Err(_) => serialization_error(id, McpMethod::ToolsCall),
    }
}

/// Builds the `-32060` serialization failure outcome.
fn serialization_error(id: Value, method: McpMethod) -> HandledRequest {
    HandledRequest::error(
        StatusCode::OK,
        id,
        -32060,
        "serialization failed",
        method,
        "serialization",
    )
}

/// Executes a tool call, shifting to a blocking context when available.
fn call_tool_blocking(router: &ToolRouter, name: &str, arguments: Value) -> ToolCallReply {
    match tokio::runtime::Handle::try_current() {
        Ok(handle) if handle.runtime_flavor() == tokio::runtime::RuntimeFlavor::MultiThread => {
            tokio::task::block_in_place(|| router.handle_tool_call(name, arguments))
        }
        _ => router.handle_tool_call(name, arguments),
    }
}

// ============================================================================
// SECTION: Observation
// ============================================================================

/// Records one audit event and one metric sample for a handled request.
fn observe_request(
    state: &ServerState,
    context: &RequestContext,
    handled: &HandledRequest,
    request_bytes: usize,
    latency: Duration,
) {
    let response_bytes = handled
        .response
        .as_ref()
        .and_then(|response| serde_json::to_vec(response).ok())
        .map_or(0, |payload| payload.len());
    let event = McpMetricEvent {
        transport: context.transport,
        method: handled.method,
        tool: handled.tool,
        outcome: handled.outcome,
        error_kind: handled.error_kind,
        request_bytes,
        response_bytes,
    };
    state.metrics.record_request(event);
    state.metrics.record_latency(event, latency);
    let audit_event = McpAuditEvent::new(McpAuditEventParams {
        transport: context.transport,
        peer_ip: context.peer_ip.clone(),
        method: handled.method,
        tool: handled.tool,
        outcome: handled.outcome,
        error_kind: handled.error_kind,
        request_bytes,
        response_bytes,
    });
    state.audit.record(&audit_event);
}

// ============================================================================
// SECTION: Framing Helpers
// ============================================================================

/// Reads one framed stdio payload using MCP `Content-Length` headers.
///
/// Returns `Ok(None)` when the stream ends cleanly between frames.
fn read_framed(
    reader: &mut BufReader<impl Read>,
    max_body_bytes: usize,
) -> Result<Option<Vec<u8>>, McpServerError> {
    let mut content_length: Option<usize> = None;
    let mut line = String::new();
    let mut started = false;
    loop {
        line.clear();
        let bytes = reader
            .read_line(&mut line)
            .map_err(|_| McpServerError::Transport("stdio read failed".to_string()))?;
        if bytes == 0 {
            if started {
                return Err(McpServerError::Transport("stdio closed mid-frame".to_string()));
            }
            return Ok(None);
        }
        started = true;
        if line.trim().is_empty() {
            break;
        }
        if let Some(value) = line.strip_prefix("Content-Length:") {
            let parsed = value
                .trim()
                .parse::<usize>()
                .map_err(|_| McpServerError::Transport("invalid content length".to_string()))?;
            content_length = Some(parsed);
        }
    }
    let len = content_length
        .ok_or_else(|| McpServerError::Transport("missing content length".to_string()))?;
    if len > max_body_bytes {
        return Err(McpServerError::Transport("payload too large".to_string()));
    }
    let mut buf = vec![0u8; len];
    reader
        .read_exact(&mut buf)
        .map_err(|_| McpServerError::Transport("stdio read failed".to_string()))?;
    Ok(Some(buf))
}

/// Writes a framed stdio payload using MCP `Content-Length` headers.
fn write_framed(writer: &mut impl Write, payload: &[u8]) -> Result<(), McpServerError> {
    let header = format!("Content-Length: {}\r\n\r\n", payload.len());
    writer
        .write_all(header.as_bytes())
        .map_err(|_| McpServerError::Transport("stdio write failed".to_string()))?;
    writer
        .write_all(payload)
        .map_err(|_| McpServerError::Transport("stdio write failed".to_string()))?;
    writer.flush().map_err(|_| McpServerError::Transport("stdio write failed".to_string()))
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// MCP server errors.
#[derive(Debug, Error)]
pub enum McpServerError {
    /// Configuration errors.
    #[error("config error: {0}")]
    Config(String),
    /// Initialization errors.
    #[error("init error: {0}")]
    Init(String),
    /// Transport errors.
    #[error("transport error: {0}")]
    Transport(String),
}

// ============================================================================
// SECTION: Tests
// ============================================================================
