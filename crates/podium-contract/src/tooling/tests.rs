// crates/podium-contract/src/tooling/tests.rs
// ============================================================================
// Module: Tooling Schema Unit Tests
// Description: Validates tool contracts and examples against their schemas.
// Purpose: Ensure the tool surface, examples, and docs stay in sync.
// Dependencies: podium-contract, jsonschema, serde_json
// ============================================================================

//! ## Overview
//! Verifies that every tool has a contract, example inputs satisfy their JSON
//! schemas, and the markdown rendering covers the whole surface.

// ============================================================================
// SECTION: Lint Configuration
// ============================================================================

#![allow(
    clippy::panic,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    clippy::missing_docs_in_private_items,
    reason = "Test-only validation helpers use panic-based assertions for clarity."
)]

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeSet;

use jsonschema::Draft;
use jsonschema::Validator;
use serde_json::Value;

use super::tool_contracts;
use super::tool_definitions;
use super::tooling_markdown;
use crate::types::ToolName;

// ============================================================================
// SECTION: Fixtures
// ============================================================================

fn compile_schema(schema: &Value) -> Validator {
    jsonschema::options()
        .with_draft(Draft::Draft202012)
        .build(schema)
        .expect("schema compilation failed")
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[test]
fn every_tool_name_has_exactly_one_contract() {
    let contracts = tool_contracts();
    assert_eq!(contracts.len(), ToolName::all().len());
    let names: BTreeSet<ToolName> = contracts.iter().map(|contract| contract.name).collect();
    assert_eq!(names.len(), contracts.len(), "duplicate tool contract names");
    for name in ToolName::all() {
        assert!(names.contains(name), "contract missing for {name}");
    }
}

#[test]
fn contract_order_matches_canonical_tool_order() {
    let contracts = tool_contracts();
    let ordered: Vec<ToolName> = contracts.iter().map(|contract| contract.name).collect();
    assert_eq!(ordered.as_slice(), ToolName::all());
}

#[test]
fn tool_examples_match_input_schemas() {
    for contract in tool_contracts() {
        let input_schema = compile_schema(&contract.input_schema);
        assert!(!contract.examples.is_empty(), "tool examples missing for {}", contract.name);
        for example in &contract.examples {
            assert!(
                input_schema.is_valid(&example.input),
                "input example failed for {}",
                contract.name
            );
        }
    }
}

#[test]
fn input_schemas_reject_unknown_fields() {
    for contract in tool_contracts() {
        let input_schema = compile_schema(&contract.input_schema);
        let payload = serde_json::json!({ "unexpected_field": 1 });
        assert!(
            !input_schema.is_valid(&payload),
            "schema for {} accepted an unknown field",
            contract.name
        );
    }
}

#[test]
fn slide_number_schemas_reject_zero() {
    let contracts = tool_contracts();
    let contract = contracts
        .iter()
        .find(|contract| contract.name == ToolName::DeleteSlide)
        .expect("delete_slide contract missing");
    let input_schema = compile_schema(&contract.input_schema);
    assert!(!input_schema.is_valid(&serde_json::json!({ "slide_number": 0 })));
    assert!(input_schema.is_valid(&serde_json::json!({ "slide_number": 1 })));
}

#[test]
fn definitions_mirror_contracts() {
    let definitions = tool_definitions();
    let contracts = tool_contracts();
    assert_eq!(definitions.len(), contracts.len());
    for (definition, contract) in definitions.iter().zip(contracts.iter()) {
        assert_eq!(definition.name, contract.name);
        assert_eq!(definition.description, contract.description);
        assert_eq!(definition.input_schema, contract.input_schema);
    }
}

#[test]
fn markdown_covers_every_tool() {
    let contracts = tool_contracts();
    let markdown = tooling_markdown(&contracts);
    for contract in &contracts {
        let heading = format!("## {}", contract.name);
        assert!(markdown.contains(&heading), "markdown missing section for {}", contract.name);
    }
    assert!(markdown.contains("### Inputs"));
    assert!(markdown.contains("### Example"));
}
