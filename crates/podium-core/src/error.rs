// crates/podium-core/src/error.rs
// ============================================================================
// Module: Adapter Errors
// Description: Typed error taxonomy for the automation adapter.
// Purpose: Classify validation, script, and file failures for uniform replies.
// Dependencies: thiserror
// ============================================================================

//! ## Overview
//! Every adapter component raises [`AdapterError`] and propagates it unchanged;
//! only the tool router converts errors into response content. Script failures
//! carry a [`ScriptErrorKind`] derived from the interpreter's stderr text, the
//! only signal the external application exposes.

// ============================================================================
// SECTION: Imports
// ============================================================================

use thiserror::Error;

// ============================================================================
// SECTION: Script Error Kinds
// ============================================================================

/// Failure categories recovered from `osascript` stderr text.
///
/// # Invariants
/// - Variants are stable labels; classification is substring-based because the
///   interpreter reports errors as free text only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScriptErrorKind {
    /// The script referenced an object the application could not resolve.
    ObjectNotFound,
    /// Automation was blocked by a permissions or consent gate.
    PermissionDenied,
    /// The generated script failed to compile.
    Syntax,
    /// Unclassified interpreter failure.
    Unknown,
}

impl ScriptErrorKind {
    /// Classifies interpreter stderr text into an error kind.
    #[must_use]
    pub fn classify(stderr: &str) -> Self {
        let lowered = stderr.to_lowercase();
        if stderr.contains("Can't get") || lowered.contains("can't get") {
            Self::ObjectNotFound
        } else if lowered.contains("not allowed") || lowered.contains("permission") {
            Self::PermissionDenied
        } else if lowered.contains("syntax error") {
            Self::Syntax
        } else {
            Self::Unknown
        }
    }

    /// Returns a stable label for the kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ObjectNotFound => "object_not_found",
            Self::PermissionDenied => "permission_denied",
            Self::Syntax => "syntax",
            Self::Unknown => "unknown",
        }
    }
}

// ============================================================================
// SECTION: Adapter Error
// ============================================================================

/// Typed failures raised by adapter components.
#[derive(Debug, Clone, Error)]
pub enum AdapterError {
    /// Caller-supplied argument failed validation.
    #[error("{0}")]
    Parameter(String),
    /// The external interpreter exited non-zero.
    #[error("AppleScript execution failed: {message}")]
    Script {
        /// Classified failure category.
        kind: ScriptErrorKind,
        /// Trimmed interpreter stderr text.
        message: String,
    },
    /// Local filesystem operation failed.
    #[error("{0}")]
    FileOperation(String),
    /// Catch-all for failures outside the taxonomy.
    #[error("{0}")]
    Unexpected(String),
}

impl AdapterError {
    /// Builds a script error with the kind classified from stderr text.
    #[must_use]
    pub fn from_stderr(stderr: &str) -> Self {
        let message = stderr.trim().to_string();
        Self::Script {
            kind: ScriptErrorKind::classify(&message),
            message,
        }
    }

    /// Returns the script error kind when the error is a script failure.
    #[must_use]
    pub const fn script_kind(&self) -> Option<ScriptErrorKind> {
        match self {
            Self::Script {
                kind,
                ..
            } => Some(*kind),
            _ => None,
        }
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================
