// crates/podium-core/src/format.rs
// ============================================================================
// Module: Argument Formatter
// Description: Typed argument rendering for generated AppleScript.
// Purpose: Convert tool arguments into script literals and argv tokens.
// Dependencies: serde_json
// ============================================================================

//! ## Overview
//! Tool arguments cross the process boundary in two shapes: as literals
//! embedded in generated script text, and as raw positional argv tokens for
//! compiled scripts. [`ScriptArg`] carries the typed value and renders both.
//! Absent optionals follow two coexisting conventions: the `missing value`
//! literal for positional routine arguments, and an empty string literal for
//! scripts that test `if "..." is ""`. Callers pick the convention per
//! operation; [`ScriptArg::Missing`] covers the former and an empty
//! [`ScriptArg::Text`] the latter.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde_json::Value;

// ============================================================================
// SECTION: Script Arguments
// ============================================================================

/// One typed argument destined for generated script text.
#[derive(Debug, Clone, PartialEq)]
pub enum ScriptArg {
    /// Text payload, quoted and escaped when rendered as a literal.
    Text(String),
    /// Integer payload rendered as a decimal literal.
    Integer(i64),
    /// Floating-point payload; integral values keep a trailing `.0`.
    Real(f64),
    /// Boolean payload rendered as `true` / `false`.
    Bool(bool),
    /// Structured payload serialized to a JSON string literal.
    Json(Value),
    /// Absent optional rendered as the `missing value` literal.
    Missing,
}

impl ScriptArg {
    /// Renders the argument as an AppleScript source literal.
    #[must_use]
    pub fn literal(&self) -> String {
        match self {
            Self::Text(text) => format!("\"{}\"", escape_text(text)),
            Self::Integer(value) => value.to_string(),
            Self::Real(value) => format_real(*value),
            Self::Bool(value) => {
                if *value {
                    "true".to_string()
                } else {
                    "false".to_string()
                }
            }
            Self::Json(value) => {
                format!("\"{}\"", escape_text(&value.to_string()))
            }
            Self::Missing => "missing value".to_string(),
        }
    }

    /// Renders the argument as a raw argv token for compiled scripts.
    ///
    /// Compiled `.scpt` invocations receive arguments as separate process
    /// arguments, so text is passed unquoted and unescaped.
    #[must_use]
    pub fn argv(&self) -> String {
        match self {
            Self::Text(text) => text.clone(),
            Self::Integer(value) => value.to_string(),
            Self::Real(value) => format_real(*value),
            Self::Bool(value) => {
                if *value {
                    "true".to_string()
                } else {
                    "false".to_string()
                }
            }
            Self::Json(value) => value.to_string(),
            Self::Missing => "missing value".to_string(),
        }
    }
}

// ============================================================================
// SECTION: Rendering Helpers
// ============================================================================

/// Escapes text for embedding inside a double-quoted script literal.
///
/// Embedded quotes become `\"` and newlines become the two-character `\n`
/// sequence. Other characters pass through unchanged.
#[must_use]
pub fn escape_text(text: &str) -> String {
    text.replace('"', "\\\"").replace('\n', "\\n")
}

/// Formats a float, keeping a trailing `.0` for integral values.
///
/// Script text and response text share this rendering so the coordinates a
/// caller sees match the literals that were submitted to the interpreter.
#[must_use]
pub fn format_real(value: f64) -> String {
    if value.is_finite() && value.fract().abs() < f64::EPSILON {
        format!("{value:.1}")
    } else {
        value.to_string()
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================
