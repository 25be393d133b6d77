// crates/podium-core/src/lib.rs
// ============================================================================
// Module: Podium Core Library
// Description: Adapter primitives for scripted presentation automation.
// Purpose: Format, assemble, invoke, and decode AppleScript automation calls.
// Dependencies: serde, serde_json, thiserror
// ============================================================================

//! ## Overview
//! `podium-core` implements the command-adapter primitives shared by every
//! Podium tool: typed argument formatting, script assembly, synchronous
//! `osascript` invocation, output decoding, and input validation. The crate is
//! transport-agnostic; the MCP layer composes these pieces per operation.
//! Security posture: tool arguments are untrusted and are escaped before they
//! are embedded in generated script text.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod decode;
pub mod error;
pub mod format;
pub mod invoke;
pub mod script;
pub mod tooling;
pub mod validate;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use decode::DecodeMode;
pub use decode::Decoded;
pub use decode::decode_output;
pub use error::AdapterError;
pub use error::ScriptErrorKind;
pub use format::ScriptArg;
pub use format::escape_text;
pub use format::format_real;
pub use invoke::OsascriptInvoker;
pub use invoke::ScriptInvoker;
pub use script::AssembledScript;
pub use script::RoutineCall;
pub use script::ScriptCatalog;
pub use tooling::ToolName;
pub use validate::validate_coordinates;
pub use validate::validate_file_path;
pub use validate::validate_non_empty_text;
pub use validate::validate_slide_number;
