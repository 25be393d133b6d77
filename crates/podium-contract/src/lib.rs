// crates/podium-contract/src/lib.rs
// ============================================================================
// Module: Podium Contract Library
// Description: Canonical tool contracts and schemas for Podium MCP.
// Purpose: Single source for tool listings, docs, and input validation shapes.
// Dependencies: podium-core, serde, serde_json
// ============================================================================

//! ## Overview
//! `podium-contract` declares the external tool surface: every operation's
//! name, description, JSON input schema, usage notes, and examples. The MCP
//! router lists tools from these contracts and the CLI renders them as JSON or
//! markdown. Contracts are defined once at process start and never mutated.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod tooling;
pub mod types;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use tooling::tool_contracts;
pub use tooling::tool_definitions;
pub use tooling::tooling_markdown;
pub use types::ToolContract;
pub use types::ToolDefinition;
pub use types::ToolExample;
pub use types::ToolName;
