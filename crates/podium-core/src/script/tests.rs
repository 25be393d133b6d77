// crates/podium-core/src/script/tests.rs
// ============================================================================
// Module: Script Assembler Unit Tests
// Description: Unit tests for catalog resolution and call assembly.
// Purpose: Validate resolution order, determinism, and failure paths.
// Dependencies: podium-core, tempfile
// ============================================================================

//! ## Overview
//! Uses throwaway catalog directories to exercise stem resolution, the
//! `.scpt` / `.applescript` preference order, call-expression rendering, and
//! the resource-not-found path.

// ============================================================================
// SECTION: Lint Configuration
// ============================================================================

#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    reason = "Test-only assertions use unwrap/expect for clarity."
)]

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs;

use tempfile::TempDir;

use super::AssembledScript;
use super::RoutineCall;
use super::ScriptCatalog;
use crate::error::AdapterError;
use crate::format::ScriptArg;

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Opens a catalog rooted in a fresh temporary directory.
fn temp_catalog() -> (TempDir, ScriptCatalog) {
    let dir = TempDir::new().expect("temp dir");
    let catalog = ScriptCatalog::open(dir.path()).expect("catalog open");
    (dir, catalog)
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[test]
fn open_creates_missing_directories() {
    let dir = TempDir::new().expect("temp dir");
    let nested = dir.path().join("resources").join("scripts");
    let catalog = ScriptCatalog::open(&nested).expect("catalog open");
    assert!(catalog.dir().is_dir());
}

#[test]
fn resolve_prefers_compiled_over_source() {
    let (dir, catalog) = temp_catalog();
    fs::write(dir.path().join("deck.scpt"), b"compiled").expect("write scpt");
    fs::write(dir.path().join("deck.applescript"), "on run\nend run").expect("write source");
    let path = catalog.resolve("deck").expect("resolve");
    assert_eq!(path.extension().and_then(|ext| ext.to_str()), Some("scpt"));
}

#[test]
fn resolve_falls_back_to_source() {
    let (dir, catalog) = temp_catalog();
    fs::write(dir.path().join("deck.applescript"), "on run\nend run").expect("write source");
    let path = catalog.resolve("deck").expect("resolve");
    assert_eq!(path.extension().and_then(|ext| ext.to_str()), Some("applescript"));
}

#[test]
fn resolve_reports_both_tried_extensions() {
    let (_dir, catalog) = temp_catalog();
    let error = catalog.resolve("ghost").expect_err("missing stem");
    match error {
        AdapterError::FileOperation(message) => {
            assert_eq!(message, "Script file not found: ghost (tried .scpt and .applescript)");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn resolve_rejects_path_traversal_stems() {
    let (_dir, catalog) = temp_catalog();
    assert!(catalog.resolve("../etc/passwd").is_err());
    assert!(catalog.resolve("a/b").is_err());
    assert!(catalog.resolve("").is_err());
    assert!(catalog.resolve("deck.scpt").is_err());
}

#[test]
fn call_expression_joins_formatted_arguments() {
    let call = RoutineCall::new(
        "text_content",
        "addTextBox",
        vec![
            ScriptArg::Text(String::new()),
            ScriptArg::Integer(1),
            ScriptArg::Text("Hello".to_string()),
            ScriptArg::Real(100.0),
            ScriptArg::Real(200.0),
        ],
    );
    assert_eq!(call.call_expression(), "addTextBox(\"\", 1, \"Hello\", 100.0, 200.0)");
}

#[test]
fn assembly_is_deterministic() {
    let call = RoutineCall::new(
        "deck",
        "routineA",
        vec![ScriptArg::Integer(1), ScriptArg::Text("x".to_string()), ScriptArg::Bool(true)],
    );
    let source = "on routineA(a, b, c)\n    return a\nend routineA\n";
    let first = call.assemble_with_source(source);
    let second = call.assemble_with_source(source);
    assert_eq!(first, second);
    assert_eq!(
        first,
        "on routineA(a, b, c)\n    return a\nend routineA\n\nroutineA(1, \"x\", true)\n"
    );
}

#[test]
fn assemble_appends_call_to_source_resources() {
    let (dir, catalog) = temp_catalog();
    fs::write(dir.path().join("deck.applescript"), "on greet(name)\nend greet\n")
        .expect("write source");
    let call = RoutineCall::new("deck", "greet", vec![ScriptArg::Text("world".to_string())]);
    let assembled = catalog.assemble(&call).expect("assemble");
    match assembled {
        AssembledScript::Inline {
            source,
        } => {
            assert_eq!(source, "on greet(name)\nend greet\n\ngreet(\"world\")\n");
        }
        AssembledScript::Compiled {
            ..
        } => panic!("expected inline assembly"),
    }
}

#[test]
fn assemble_routes_compiled_resources_to_argv() {
    let (dir, catalog) = temp_catalog();
    fs::write(dir.path().join("deck.scpt"), b"\x00binary").expect("write scpt");
    let call = RoutineCall::new(
        "deck",
        "greet",
        vec![ScriptArg::Text("world".to_string()), ScriptArg::Missing],
    );
    let assembled = catalog.assemble(&call).expect("assemble");
    match assembled {
        AssembledScript::Compiled {
            path,
            routine,
            argv,
        } => {
            assert!(path.ends_with("deck.scpt"));
            assert_eq!(routine, "greet");
            assert_eq!(argv, vec!["world".to_string(), "missing value".to_string()]);
        }
        AssembledScript::Inline {
            ..
        } => panic!("expected compiled assembly"),
    }
}
