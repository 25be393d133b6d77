// crates/podium-mcp/src/audit.rs
// ============================================================================
// Module: MCP Audit Logging
// Description: Structured audit events for MCP request handling.
// Purpose: Record one JSON line per request for operational review.
// Dependencies: podium-config, podium-core, serde, serde_json
// ============================================================================

//! ## Overview
//! Every JSON-RPC request the server handles produces one [`McpAuditEvent`].
//! Events serialize as single JSON lines and flow through an [`McpAuditSink`]
//! selected from [`AuditConfig`]: a file sink when a path is configured, the
//! stderr sink otherwise, and the no-op sink when auditing is disabled.
//! Sink failures are swallowed; audit output never fails a request.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs::File;
use std::fs::OpenOptions;
use std::io;
use std::io::Write as _;
use std::path::Path;
use std::sync::Arc;
use std::sync::Mutex;
use std::time::SystemTime;
use std::time::UNIX_EPOCH;

use podium_config::AuditConfig;
use podium_config::ServerTransport;
use podium_core::ToolName;
use serde::Serialize;

use crate::telemetry::McpMethod;
use crate::telemetry::McpOutcome;

// ============================================================================
// SECTION: Audit Events
// ============================================================================

/// One audited MCP request, serialized as a JSON line.
#[derive(Debug, Clone, Serialize)]
pub struct McpAuditEvent {
    /// Stable event label.
    pub event: &'static str,
    /// Milliseconds since the Unix epoch when the event was built.
    pub timestamp_ms: u128,
    /// Transport the request arrived on.
    pub transport: ServerTransport,
    /// Peer address for HTTP requests.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub peer_ip: Option<String>,
    /// Classified JSON-RPC method.
    pub method: McpMethod,
    /// Tool named by a `tools/call` request.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool: Option<ToolName>,
    /// Request outcome.
    pub outcome: McpOutcome,
    /// Failure category label when the outcome is an error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_kind: Option<&'static str>,
    /// Raw request payload size in bytes.
    pub request_bytes: usize,
    /// Serialized response payload size in bytes.
    pub response_bytes: usize,
}

/// Inputs for building an [`McpAuditEvent`].
#[derive(Debug, Clone)]
pub struct McpAuditEventParams {
    /// Transport the request arrived on.
    pub transport: ServerTransport,
    /// Peer address for HTTP requests.
    pub peer_ip: Option<String>,
    /// Classified JSON-RPC method.
    pub method: McpMethod,
    /// Tool named by a `tools/call` request.
    pub tool: Option<ToolName>,
    /// Request outcome.
    pub outcome: McpOutcome,
    /// Failure category label when the outcome is an error.
    pub error_kind: Option<&'static str>,
    /// Raw request payload size in bytes.
    pub request_bytes: usize,
    /// Serialized response payload size in bytes.
    pub response_bytes: usize,
}

impl McpAuditEvent {
    /// Builds a request event stamped with the current wall-clock time.
    #[must_use]
    pub fn new(params: McpAuditEventParams) -> Self {
        let timestamp_ms = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis();
        Self {
            event: "mcp_request",
            timestamp_ms,
            transport: params.transport,
            peer_ip: params.peer_ip,
            method: params.method,
            tool: params.tool,
            outcome: params.outcome,
            error_kind: params.error_kind,
            request_bytes: params.request_bytes,
            response_bytes: params.response_bytes,
        }
    }
}

// ============================================================================
// SECTION: Audit Sinks
// ============================================================================

/// Destination for audit events.
pub trait McpAuditSink: Send + Sync {
    /// Records one audit event.
    fn record(&self, event: &McpAuditEvent);
}

/// Audit sink that writes JSON lines to stderr.
#[derive(Debug, Clone, Copy, Default)]
pub struct McpStderrAuditSink;

impl McpAuditSink for McpStderrAuditSink {
    fn record(&self, event: &McpAuditEvent) {
        if let Ok(payload) = serde_json::to_string(event) {
            let _ = writeln!(io::stderr(), "{payload}");
        }
    }
}

/// Audit sink that appends JSON lines to a file.
#[derive(Debug)]
pub struct McpFileAuditSink {
    /// Open append-mode log file.
    file: Mutex<File>,
}

impl McpFileAuditSink {
    /// Opens the audit log file in append mode, creating it if absent.
    ///
    /// # Errors
    ///
    /// Returns an error when the file cannot be opened.
    pub fn new(path: impl AsRef<Path>) -> io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            file: Mutex::new(file),
        })
    }
}

impl McpAuditSink for McpFileAuditSink {
    fn record(&self, event: &McpAuditEvent) {
        if let Ok(mut file) = self.file.lock()
            && let Ok(payload) = serde_json::to_string(event)
        {
            let _ = writeln!(file, "{payload}");
            let _ = file.flush();
        }
    }
}

/// Audit sink that discards all events.
#[derive(Debug, Clone, Copy, Default)]
pub struct McpNoopAuditSink;

impl McpAuditSink for McpNoopAuditSink {
    fn record(&self, _event: &McpAuditEvent) {}
}

// ============================================================================
// SECTION: Sink Selection
// ============================================================================

/// Builds the audit sink selected by configuration.
///
/// # Errors
///
/// Returns an error when a configured audit file cannot be opened.
pub fn build_audit_sink(config: &AuditConfig) -> io::Result<Arc<dyn McpAuditSink>> {
    if !config.enabled {
        return Ok(Arc::new(McpNoopAuditSink));
    }
    match &config.path {
        Some(path) => Ok(Arc::new(McpFileAuditSink::new(path)?)),
        None => Ok(Arc::new(McpStderrAuditSink)),
    }
}
