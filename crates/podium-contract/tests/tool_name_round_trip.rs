// crates/podium-contract/tests/tool_name_round_trip.rs
// ============================================================================
// Module: Tool Name Round Trip Tests
// Description: Ensure canonical tool naming stays consistent.
// Purpose: Prevent drift between ToolName::all, parse, and serde renderings.
// Dependencies: podium-contract, serde_json
// ============================================================================

//! ## Overview
//! Confirms every canonical tool name parses back to itself and serializes to
//! the same snake_case string used for dispatch.

// ============================================================================
// SECTION: Imports
// ============================================================================

use podium_contract::ToolName;

// ============================================================================
// SECTION: Tests
// ============================================================================

#[test]
fn every_tool_name_parses_back_to_itself() {
    for name in ToolName::all() {
        assert_eq!(ToolName::parse(name.as_str()), Some(*name), "parse drifted for {name}");
    }
}

#[test]
fn unknown_tool_names_do_not_parse() {
    assert_eq!(ToolName::parse("make_coffee"), None);
    assert_eq!(ToolName::parse(""), None);
    assert_eq!(ToolName::parse("Add_Slide"), None);
}

#[test]
fn serde_rendering_matches_as_str() {
    for name in ToolName::all() {
        let serialized = serde_json::to_string(name).unwrap_or_default();
        assert_eq!(serialized, format!("\"{}\"", name.as_str()));
    }
}
