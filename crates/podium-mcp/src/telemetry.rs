// crates/podium-mcp/src/telemetry.rs
// ============================================================================
// Module: MCP Telemetry
// Description: Metric hooks for MCP request handling.
// Purpose: Expose request and latency recording without binding a backend.
// Dependencies: podium-config, podium-core, serde
// ============================================================================

//! ## Overview
//! The server records one [`McpMetricEvent`] per JSON-RPC request and reports
//! request latency against [`MCP_LATENCY_BUCKETS_MS`]. The [`McpMetrics`]
//! trait keeps the backend pluggable; the bundled [`NoopMetrics`] discards
//! everything, and embedding callers supply their own sink when they want
//! counters. Latencies are dominated by interpreter round trips, so the
//! bucket ladder extends well past typical HTTP service ranges.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::time::Duration;

use podium_config::ServerTransport;
use podium_core::ToolName;
use serde::Serialize;

// ============================================================================
// SECTION: Latency Buckets
// ============================================================================

/// Histogram bucket upper bounds, in milliseconds, for request latency.
pub const MCP_LATENCY_BUCKETS_MS: &[u64] =
    &[1, 2, 5, 10, 25, 50, 100, 250, 500, 1_000, 2_500, 5_000, 10_000, 30_000];

// ============================================================================
// SECTION: Labels
// ============================================================================

/// JSON-RPC method label for metric and audit events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum McpMethod {
    /// The `initialize` handshake.
    #[serde(rename = "initialize")]
    Initialize,
    /// The `tools/list` request.
    #[serde(rename = "tools/list")]
    ToolsList,
    /// The `tools/call` request.
    #[serde(rename = "tools/call")]
    ToolsCall,
    /// A payload that failed to parse as a JSON-RPC request.
    #[serde(rename = "invalid")]
    Invalid,
    /// Any other method name.
    #[serde(rename = "other")]
    Other,
}

impl McpMethod {
    /// Returns the stable label for the method.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Initialize => "initialize",
            Self::ToolsList => "tools/list",
            Self::ToolsCall => "tools/call",
            Self::Invalid => "invalid",
            Self::Other => "other",
        }
    }

    /// Classifies a raw JSON-RPC method name.
    #[must_use]
    pub fn classify(method: &str) -> Self {
        match method {
            "initialize" => Self::Initialize,
            "tools/list" => Self::ToolsList,
            "tools/call" => Self::ToolsCall,
            _ => Self::Other,
        }
    }
}

/// Request outcome label for metric and audit events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum McpOutcome {
    /// The request produced a successful result.
    Ok,
    /// The request produced an error or failure content.
    Error,
}

impl McpOutcome {
    /// Returns the stable label for the outcome.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ok => "ok",
            Self::Error => "error",
        }
    }
}

// ============================================================================
// SECTION: Metric Events
// ============================================================================

/// One recorded MCP request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct McpMetricEvent {
    /// Transport the request arrived on.
    pub transport: ServerTransport,
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

// ============================================================================
// SECTION: Metrics Trait
// ============================================================================

/// Metric recording hooks for MCP request handling.
pub trait McpMetrics: Send + Sync {
    /// Records one completed request.
    fn record_request(&self, event: McpMetricEvent);

    /// Records the latency of one completed request.
    fn record_latency(&self, event: McpMetricEvent, latency: Duration);
}

/// Metrics sink that discards all events.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopMetrics;

impl McpMetrics for NoopMetrics {
    fn record_request(&self, _event: McpMetricEvent) {}

    fn record_latency(&self, _event: McpMetricEvent, _latency: Duration) {}
}
