// crates/podium-mcp/src/response.rs
// ============================================================================
// Module: Response Content
// Description: MCP content blocks and terminal response rendering.
// Purpose: One place where tool outcomes become client-visible content.
// Dependencies: podium-core, base64, serde
// ============================================================================

//! ## Overview
//! Every tool call terminates in a [`ToolCallResult`] whose content blocks
//! carry human-readable text. Success texts open with a `✅` (or a topical
//! glyph such as `📊` for informational reads) and failure texts open with
//! `❌` followed by the error category, so a client can render the block
//! without consulting an error envelope. Failures never surface as JSON-RPC
//! errors; they are rendered here and returned as ordinary content.
//!
//! Binary payloads travel as base64 [`ToolContent::Image`] blocks. The
//! current tool set reports export destinations as text and leaves image
//! blocks to clients that read the exported files, but the block type is part
//! of the wire contract and stays available to embedding callers.

// ============================================================================
// SECTION: Imports
// ============================================================================

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use podium_core::AdapterError;
use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: Content Blocks
// ============================================================================

/// One MCP content block inside a tool-call result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ToolContent {
    /// Human-readable text content.
    Text {
        /// Text payload.
        text: String,
    },
    /// Base64-encoded image content.
    Image {
        /// Base64 payload.
        data: String,
        /// MIME type of the decoded payload.
        #[serde(rename = "mimeType")]
        mime_type: String,
    },
}

impl ToolContent {
    /// Builds a text content block.
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text {
            text: text.into(),
        }
    }

    /// Builds an image content block from raw bytes.
    #[must_use]
    pub fn image(bytes: &[u8], mime_type: impl Into<String>) -> Self {
        Self::Image {
            data: BASE64_STANDARD.encode(bytes),
            mime_type: mime_type.into(),
        }
    }
}

/// Result payload for a `tools/call` request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolCallResult {
    /// Ordered content blocks returned to the client.
    pub content: Vec<ToolContent>,
}

impl ToolCallResult {
    /// Builds a result holding a single text block.
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            content: vec![ToolContent::text(text)],
        }
    }
}

// ============================================================================
// SECTION: Error Rendering
// ============================================================================

/// Renders an adapter error as terminal response text.
#[must_use]
pub fn render_error(error: &AdapterError) -> String {
    match error {
        AdapterError::Parameter(message) => format!("❌ Parameter error: {message}"),
        AdapterError::Script {
            message,
            ..
        } => format!("❌ AppleScript error: {message}"),
        AdapterError::FileOperation(message) => format!("❌ File operation error: {message}"),
        AdapterError::Unexpected(message) => format!("❌ Unexpected error: {message}"),
    }
}

/// Returns the stable telemetry label for an adapter error.
#[must_use]
pub fn error_kind_label(error: &AdapterError) -> &'static str {
    match error {
        AdapterError::Parameter(_) => "parameter",
        AdapterError::Script {
            ..
        } => "script",
        AdapterError::FileOperation(_) => "file_operation",
        AdapterError::Unexpected(_) => "unexpected",
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================
