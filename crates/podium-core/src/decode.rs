// crates/podium-core/src/decode.rs
// ============================================================================
// Module: Result Decoder
// Description: Interpretation of raw interpreter stdout into typed values.
// Purpose: Confine ad hoc output formats to one closed set of strategies.
// Dependencies: None (standard library only)
// ============================================================================

//! ## Overview
//! Automation routines report results as free text in a handful of ad hoc
//! shapes: a bare scalar, a delimited list (sometimes wrapped in `{}` list
//! brackets, with elements the interpreter may have re-quoted), or a pair of
//! cooperating values joined by a fixed delimiter such as `|`. Every
//! operation declares exactly one [`DecodeMode`] and all string surgery lives
//! here rather than at call sites.
//!
//! Empty output after trimming decodes to [`Decoded::Empty`] in every mode.
//! Callers distinguish "the routine reported nothing" from "the routine
//! reported an empty list", so `Empty` is not folded into `List(vec![])`.

// ============================================================================
// SECTION: Decode Mode
// ============================================================================

/// Declared output-interpretation strategy for one operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodeMode {
    /// Trimmed stdout is the value.
    Scalar,
    /// Split on a declared delimiter into an ordered element list.
    DelimitedList {
        /// Separator between elements, e.g. `", "` or `"|||"`.
        delimiter: &'static str,
        /// Strip one leading `{` and one trailing `}` before splitting.
        strip_brackets: bool,
    },
    /// Split once on a fixed delimiter into exactly two cooperating values.
    StructuredPair {
        /// Separator between the two values, e.g. `"|"`.
        delimiter: &'static str,
        /// Second value to substitute when the delimiter is absent.
        default_second: &'static str,
    },
}

// ============================================================================
// SECTION: Decoded Value
// ============================================================================

/// Typed result of decoding one invocation's stdout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decoded {
    /// Stdout was empty after trimming; the routine reported nothing.
    Empty,
    /// A single scalar value.
    Scalar(String),
    /// An ordered list of elements with empties dropped.
    List(Vec<String>),
    /// Two cooperating values, e.g. an identifier and a status tag.
    Pair {
        /// Text before the pair delimiter.
        first: String,
        /// Text after the pair delimiter, or the declared default.
        second: String,
    },
}

impl Decoded {
    /// Returns the scalar payload when this value is a scalar.
    #[must_use]
    pub fn as_scalar(&self) -> Option<&str> {
        match self {
            Self::Scalar(value) => Some(value),
            _ => None,
        }
    }

    /// Returns the element list when this value is a list.
    #[must_use]
    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }
}

// ============================================================================
// SECTION: Decoding
// ============================================================================

/// Decodes raw stdout under the operation's declared mode.
#[must_use]
pub fn decode_output(stdout: &str, mode: &DecodeMode) -> Decoded {
    let trimmed = stdout.trim();
    if trimmed.is_empty() {
        return Decoded::Empty;
    }
    match mode {
        DecodeMode::Scalar => Decoded::Scalar(trimmed.to_string()),
        DecodeMode::DelimitedList {
            delimiter,
            strip_brackets,
        } => {
            let body = if *strip_brackets {
                strip_list_brackets(trimmed)
            } else {
                trimmed
            };
            let items = body
                .split(delimiter)
                .map(|item| trim_quotes(item.trim()).to_string())
                .filter(|item| !item.is_empty())
                .collect();
            Decoded::List(items)
        }
        DecodeMode::StructuredPair {
            delimiter,
            default_second,
        } => match trimmed.split_once(delimiter) {
            Some((first, second)) => Decoded::Pair {
                first: first.trim().to_string(),
                second: second.trim().to_string(),
            },
            None => Decoded::Pair {
                first: trimmed.to_string(),
                second: (*default_second).to_string(),
            },
        },
    }
}

/// Removes one matching pair of `{`/`}` list brackets if both are present.
fn strip_list_brackets(text: &str) -> &str {
    text.strip_prefix('{')
        .and_then(|inner| inner.strip_suffix('}'))
        .map_or(text, str::trim)
}

/// Removes one matching pair of surrounding double quotes if both are present.
fn trim_quotes(text: &str) -> &str {
    text.strip_prefix('"').and_then(|inner| inner.strip_suffix('"')).unwrap_or(text)
}

// ============================================================================
// SECTION: Tests
// ============================================================================
