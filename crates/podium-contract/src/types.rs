// crates/podium-contract/src/types.rs
// ============================================================================
// Module: Contract Types
// Description: Shared data models for Podium tool contracts.
// Purpose: Provide canonical shapes for tool listings, docs, and examples.
// Dependencies: podium-core, serde, serde_json
// ============================================================================

//! ## Overview
//! Typed contract shapes serialized into MCP tool listings and generated
//! documentation. Tool inputs described by these schemas are untrusted;
//! the router validates and escapes them before any script text is built.

// ============================================================================
// SECTION: Re-Exports
// ============================================================================
/// Canonical MCP tool names for Podium.
pub use podium_core::ToolName;
use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;

// ============================================================================
// SECTION: Tooling Contracts
// ============================================================================

/// Tool definition used by MCP tool listing.
///
/// # Invariants
/// - `name` is a stable MCP tool identifier.
/// - `input_schema` is a JSON Schema payload for the tool input shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolDefinition {
    /// MCP tool name.
    pub name: ToolName,
    /// Tool description for clients.
    pub description: String,
    /// JSON schema for tool input.
    pub input_schema: Value,
}

/// Tool contract with input schema, usage notes, and examples.
///
/// Responses are prefixed human-readable text blocks rather than structured
/// payloads, so contracts document response behavior in `notes` instead of
/// carrying an output schema.
///
/// # Invariants
/// - `input_schema` is a JSON Schema payload.
/// - `examples` validate against `input_schema` when emitted by this crate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolContract {
    /// Tool name.
    pub name: ToolName,
    /// Tool description.
    pub description: String,
    /// JSON schema for tool input payload.
    pub input_schema: Value,
    /// Example payloads for documentation.
    pub examples: Vec<ToolExample>,
    /// Notes describing tool behavior, defaults, and failure modes.
    pub notes: Vec<String>,
}

/// Tool example with an input payload and a sample response text.
///
/// # Invariants
/// - `input` aligns with the tool input schema when emitted by this crate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolExample {
    /// Short example description.
    pub description: String,
    /// Example input payload.
    pub input: Value,
    /// Sample response text.
    pub output: Value,
}
