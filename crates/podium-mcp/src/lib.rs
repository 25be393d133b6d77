// crates/podium-mcp/src/lib.rs
// ============================================================================
// Module: Podium MCP
// Description: MCP server, tool router, and observation sinks for Podium.
// Purpose: Expose Keynote automation as MCP tools over stdio and HTTP.
// Dependencies: podium-config, podium-contract, podium-core, axum, tokio
// ============================================================================

//! ## Overview
//! Podium MCP exposes the presentation-automation adapter through MCP tools.
//! The [`tools::ToolRouter`] turns each call into generated AppleScript via
//! [`podium_core`], and [`server::McpServer`] carries the JSON-RPC 2.0
//! surface over stdio framing or HTTP POST. Audit and metric sinks observe
//! every request without sitting in the dispatch path.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod audit;
pub mod response;
pub mod server;
pub mod telemetry;
pub mod tools;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use audit::McpAuditEvent;
pub use audit::McpAuditEventParams;
pub use audit::McpAuditSink;
pub use audit::McpFileAuditSink;
pub use audit::McpNoopAuditSink;
pub use audit::McpStderrAuditSink;
pub use audit::build_audit_sink;
pub use response::ToolCallResult;
pub use response::ToolContent;
pub use response::render_error;
pub use server::MCP_PROTOCOL_VERSION;
pub use server::McpServer;
pub use server::McpServerError;
pub use telemetry::MCP_LATENCY_BUCKETS_MS;
pub use telemetry::McpMethod;
pub use telemetry::McpMetricEvent;
pub use telemetry::McpMetrics;
pub use telemetry::McpOutcome;
pub use telemetry::NoopMetrics;
pub use tools::ToolCallReply;
pub use tools::ToolRouter;
pub use tools::ToolRouterConfig;
