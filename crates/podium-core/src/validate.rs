// crates/podium-core/src/validate.rs
// ============================================================================
// Module: Argument Validation
// Description: Range and shape checks applied before script assembly.
// Purpose: Reject bad arguments without starting an interpreter process.
// Dependencies: podium-core::error
// ============================================================================

//! ## Overview
//! Validation failures short-circuit an operation to a parameter error before
//! any script text is assembled, so an invalid call never launches a process.
//! Helpers return the normalized value so call sites use exactly what was
//! checked.

use crate::error::AdapterError;

// ============================================================================
// SECTION: Numeric Checks
// ============================================================================

/// Checks that a slide index refers to a positionable slide.
///
/// # Errors
///
/// Returns [`AdapterError::Parameter`] when `value` is zero or negative.
pub fn validate_slide_number(field: &str, value: i64) -> Result<i64, AdapterError> {
    if value >= 1 {
        Ok(value)
    } else {
        Err(AdapterError::Parameter(format!(
            "{field} must be 1 or greater (got {value})"
        )))
    }
}

/// Resolves an optional coordinate pair against an operation's default spot.
///
/// Absent coordinates, and the zero pair callers use to mean "place it for
/// me", substitute the default. A partially supplied pair fills the missing
/// axis with zero before the substitution check, so supplying only one axis
/// also selects explicit placement.
///
/// # Errors
///
/// Returns [`AdapterError::Parameter`] when either coordinate is negative.
pub fn validate_coordinates(
    x: Option<f64>,
    y: Option<f64>,
    default: (f64, f64),
) -> Result<(f64, f64), AdapterError> {
    let x = x.unwrap_or(0.0);
    let y = y.unwrap_or(0.0);
    if x < 0.0 || y < 0.0 {
        return Err(AdapterError::Parameter(format!(
            "coordinates must be 0 or greater (got ({x}, {y}))"
        )));
    }
    if x.abs() < f64::EPSILON && y.abs() < f64::EPSILON {
        Ok(default)
    } else {
        Ok((x, y))
    }
}

// ============================================================================
// SECTION: Text Checks
// ============================================================================

/// Checks that a filesystem path argument is present and non-blank.
///
/// # Errors
///
/// Returns [`AdapterError::Parameter`] when the trimmed path is empty.
pub fn validate_file_path(field: &str, value: &str) -> Result<String, AdapterError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(AdapterError::Parameter(format!("{field} must be a non-empty path")))
    } else {
        Ok(trimmed.to_string())
    }
}

/// Checks that a text argument carries visible content.
///
/// # Errors
///
/// Returns [`AdapterError::Parameter`] when the trimmed text is empty.
pub fn validate_non_empty_text(field: &str, value: &str) -> Result<String, AdapterError> {
    if value.trim().is_empty() {
        Err(AdapterError::Parameter(format!("{field} cannot be empty")))
    } else {
        Ok(value.to_string())
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests;
