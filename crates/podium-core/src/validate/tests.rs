// crates/podium-core/src/validate/tests.rs
// ============================================================================
// Module: Argument Validation Tests
// Description: Unit tests for pre-assembly argument checks.
// Purpose: Verify range rejection and default-coordinate substitution.
// Dependencies: podium-core::validate
// ============================================================================

#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    reason = "test code fails loudly on setup errors"
)]

use crate::error::AdapterError;
use crate::validate::validate_coordinates;
use crate::validate::validate_file_path;
use crate::validate::validate_non_empty_text;
use crate::validate::validate_slide_number;

#[test]
fn slide_numbers_from_one_upward_pass() {
    for value in [1, 2, 99] {
        assert_eq!(validate_slide_number("slide_number", value).unwrap(), value);
    }
}

#[test]
fn zero_and_negative_slide_numbers_are_rejected() {
    for value in [0, -1, -99] {
        let error = validate_slide_number("slide_number", value).unwrap_err();
        match error {
            AdapterError::Parameter(message) => {
                assert!(message.contains("slide_number"));
                assert!(message.contains("1 or greater"));
            }
            other => panic!("expected parameter error, got {other:?}"),
        }
    }
}

#[test]
fn absent_coordinates_substitute_the_default() {
    let resolved = validate_coordinates(None, None, (100.0, 200.0)).unwrap();
    assert!((resolved.0 - 100.0).abs() < f64::EPSILON);
    assert!((resolved.1 - 200.0).abs() < f64::EPSILON);
}

#[test]
fn zero_coordinates_also_substitute_the_default() {
    let resolved = validate_coordinates(Some(0.0), Some(0.0), (300.0, 200.0)).unwrap();
    assert!((resolved.0 - 300.0).abs() < f64::EPSILON);
}

#[test]
fn explicit_coordinates_are_kept() {
    let resolved = validate_coordinates(Some(12.5), Some(40.0), (100.0, 200.0)).unwrap();
    assert!((resolved.0 - 12.5).abs() < f64::EPSILON);
    assert!((resolved.1 - 40.0).abs() < f64::EPSILON);
}

#[test]
fn negative_coordinates_are_rejected() {
    let error = validate_coordinates(Some(-1.0), Some(5.0), (100.0, 200.0)).unwrap_err();
    assert!(matches!(error, AdapterError::Parameter(_)));
}

#[test]
fn blank_paths_are_rejected_and_real_paths_trimmed() {
    assert!(validate_file_path("output_path", "   ").is_err());
    assert_eq!(
        validate_file_path("output_path", " /tmp/deck.png ").unwrap(),
        "/tmp/deck.png"
    );
}

#[test]
fn text_content_must_be_visible() {
    assert!(validate_non_empty_text("text", "\n\t ").is_err());
    assert_eq!(validate_non_empty_text("text", "Hello").unwrap(), "Hello");
}
