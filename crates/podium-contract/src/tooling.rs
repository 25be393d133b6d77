// crates/podium-contract/src/tooling.rs
// ============================================================================
// Module: MCP Tool Contracts
// Description: Canonical MCP tool definitions and schemas for Podium.
// Purpose: Provide tool contracts for MCP listing and generated docs.
// Dependencies: serde_json, std, podium-contract::types
// ============================================================================

//! ## Overview
//! This module defines the canonical MCP tool surface. Tool contracts drive
//! the MCP tool listing and the CLI's JSON/markdown renderings with strict,
//! deterministic input schemas.
//! Security posture: tool inputs are untrusted; schemas reject unknown fields
//! and the router re-validates ranges before building script text.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeSet;

use serde_json::Value;
use serde_json::json;

use crate::types::ToolContract;
// ============================================================================
// SECTION: Re-Exports
// ============================================================================
/// Tool definition shape used by MCP tool listings.
pub use crate::types::ToolDefinition;
use crate::types::ToolExample;
use crate::types::ToolName;

// ============================================================================
// SECTION: Tool Contracts
// ============================================================================

/// Returns the canonical MCP tool contracts.
///
/// The order is intentional: it is preserved in tool listings and generated
/// docs to keep diffs stable across releases. Append new tools at the end.
#[must_use]
pub fn tool_contracts() -> Vec<ToolContract> {
    vec![
        create_presentation_contract(),
        open_presentation_contract(),
        save_presentation_contract(),
        close_presentation_contract(),
        list_presentations_contract(),
        set_presentation_theme_contract(),
        get_presentation_info_contract(),
        get_available_themes_contract(),
        get_presentation_resolution_contract(),
        get_slide_size_contract(),
        add_slide_contract(),
        delete_slide_contract(),
        duplicate_slide_contract(),
        move_slide_contract(),
        get_slide_count_contract(),
        select_slide_contract(),
        set_slide_layout_contract(),
        get_slide_info_contract(),
        get_available_layouts_contract(),
        add_text_box_contract(),
        add_image_contract(),
        screenshot_slide_contract(),
        export_pdf_contract(),
        export_images_contract(),
    ]
}

/// Builds the tool contract for `create_presentation`.
fn create_presentation_contract() -> ToolContract {
    build_tool_contract(
        ToolName::CreatePresentation,
        "Create a new presentation, apply an optional theme, and save it to the desktop.",
        tool_input_schema(
            &json!({
                "title": schema_text("Presentation title; becomes the saved file name."),
                "theme": schema_text("Theme name to apply; the default theme when omitted.")
            }),
            &["title"],
        ),
        tool_examples(ToolName::CreatePresentation),
        vec![
            "Saves to the desktop as `<title>.key`.".to_string(),
            "Unknown theme names fall back to the default theme.".to_string(),
            "Returns the new document name.".to_string(),
        ],
    )
}

/// Builds the tool contract for `open_presentation`.
fn open_presentation_contract() -> ToolContract {
    build_tool_contract(
        ToolName::OpenPresentation,
        "Open a presentation file from disk and bring it to the front.",
        tool_input_schema(
            &json!({
                "file_path": schema_path("Absolute POSIX path to the presentation file.")
            }),
            &["file_path"],
        ),
        tool_examples(ToolName::OpenPresentation),
        vec!["Returns the opened document name.".to_string()],
    )
}

/// Builds the tool contract for `save_presentation`.
fn save_presentation_contract() -> ToolContract {
    build_tool_contract(
        ToolName::SavePresentation,
        "Save the front presentation or a named open document.",
        tool_input_schema(
            &json!({
                "doc_name": schema_document_name()
            }),
            &[],
        ),
        tool_examples(ToolName::SavePresentation),
        vec!["Targets the front document when doc_name is omitted.".to_string()],
    )
}

/// Builds the tool contract for `close_presentation`.
fn close_presentation_contract() -> ToolContract {
    build_tool_contract(
        ToolName::ClosePresentation,
        "Close the front or named presentation, saving it first unless disabled.",
        tool_input_schema(
            &json!({
                "doc_name": schema_document_name(),
                "should_save": {
                    "type": "boolean",
                    "default": true,
                    "description": "Save the document before closing."
                }
            }),
            &[],
        ),
        tool_examples(ToolName::ClosePresentation),
        vec![
            "Saves before closing unless should_save is false.".to_string(),
            "Returns the closed document name.".to_string(),
        ],
    )
}

/// Builds the tool contract for `list_presentations`.
fn list_presentations_contract() -> ToolContract {
    build_tool_contract(
        ToolName::ListPresentations,
        "List the names of all open presentations.",
        tool_input_schema(&json!({}), &[]),
        tool_examples(ToolName::ListPresentations),
        vec![
            "Returns one bullet per open document.".to_string(),
            "Reports when no presentations are open.".to_string(),
        ],
    )
}

/// Builds the tool contract for `set_presentation_theme`.
fn set_presentation_theme_contract() -> ToolContract {
    build_tool_contract(
        ToolName::SetPresentationTheme,
        "Apply a named theme to an open presentation after checking it is installed.",
        tool_input_schema(
            &json!({
                "theme_name": schema_text("Installed theme name to apply."),
                "doc_name": schema_document_name()
            }),
            &["theme_name"],
        ),
        tool_examples(ToolName::SetPresentationTheme),
        vec![
            "Fails with a theme-not-found message when the theme is not installed.".to_string(),
            "Theme names are case-sensitive; list them with get_available_themes.".to_string(),
        ],
    )
}

/// Builds the tool contract for `get_presentation_info`.
fn get_presentation_info_contract() -> ToolContract {
    build_tool_contract(
        ToolName::GetPresentationInfo,
        "Fetch the name, slide count, and theme of an open presentation.",
        tool_input_schema(
            &json!({
                "doc_name": schema_document_name()
            }),
            &[],
        ),
        tool_examples(ToolName::GetPresentationInfo),
        vec![
            "Theme reads as \"Unknown Theme\" when the document reports none.".to_string(),
        ],
    )
}

/// Builds the tool contract for `get_available_themes`.
fn get_available_themes_contract() -> ToolContract {
    build_tool_contract(
        ToolName::GetAvailableThemes,
        "List the theme names installed in the application.",
        tool_input_schema(&json!({}), &[]),
        tool_examples(ToolName::GetAvailableThemes),
        vec![
            "Use these names with create_presentation and set_presentation_theme.".to_string(),
        ],
    )
}

/// Builds the tool contract for `get_presentation_resolution`.
fn get_presentation_resolution_contract() -> ToolContract {
    build_tool_contract(
        ToolName::GetPresentationResolution,
        "Fetch a presentation's pixel resolution with an aspect-ratio classification.",
        tool_input_schema(
            &json!({
                "doc_name": schema_document_name()
            }),
            &[],
        ),
        tool_examples(ToolName::GetPresentationResolution),
        vec![
            "Falls back to 1920x1080 when the document does not report a size.".to_string(),
            "Aspect ratio is classified as 16:9, 4:3, or Custom.".to_string(),
        ],
    )
}

/// Builds the tool contract for `get_slide_size`.
fn get_slide_size_contract() -> ToolContract {
    build_tool_contract(
        ToolName::GetSlideSize,
        "Fetch slide dimensions with derived layout guides (safe area, margins, center).",
        tool_input_schema(
            &json!({
                "doc_name": schema_document_name()
            }),
            &[],
        ),
        tool_examples(ToolName::GetSlideSize),
        vec![
            "Layout guides assume a 90% safe area centered on the slide.".to_string(),
        ],
    )
}

/// Builds the tool contract for `add_slide`.
fn add_slide_contract() -> ToolContract {
    build_tool_contract(
        ToolName::AddSlide,
        "Insert a new slide, optionally at a position and with a named master layout.",
        tool_input_schema(
            &json!({
                "doc_name": schema_document_name(),
                "position": {
                    "type": "integer",
                    "minimum": 0,
                    "default": 0,
                    "description": "1-based insertion position; 0 appends at the end."
                },
                "layout": schema_text("Master layout name; Blank when omitted.")
            }),
            &[],
        ),
        tool_examples(ToolName::AddSlide),
        vec![
            "Unknown layouts fall back to Blank, then to the document default.".to_string(),
            "Returns the new slide number.".to_string(),
        ],
    )
}

/// Builds the tool contract for `delete_slide`.
fn delete_slide_contract() -> ToolContract {
    build_tool_contract(
        ToolName::DeleteSlide,
        "Delete a slide by number.",
        tool_input_schema(
            &json!({
                "slide_number": schema_slide_number("Slide number to delete."),
                "doc_name": schema_document_name()
            }),
            &["slide_number"],
        ),
        tool_examples(ToolName::DeleteSlide),
        vec!["Slide numbers are 1-based.".to_string()],
    )
}

/// Builds the tool contract for `duplicate_slide`.
fn duplicate_slide_contract() -> ToolContract {
    build_tool_contract(
        ToolName::DuplicateSlide,
        "Duplicate a slide and optionally move the copy to a new position.",
        tool_input_schema(
            &json!({
                "slide_number": schema_slide_number("Slide number to duplicate."),
                "doc_name": schema_document_name(),
                "new_position": {
                    "type": "integer",
                    "minimum": 0,
                    "default": 0,
                    "description": "1-based position for the copy; 0 leaves it after the source."
                }
            }),
            &["slide_number"],
        ),
        tool_examples(ToolName::DuplicateSlide),
        vec!["Returns the copy's slide number.".to_string()],
    )
}

/// Builds the tool contract for `move_slide`.
fn move_slide_contract() -> ToolContract {
    build_tool_contract(
        ToolName::MoveSlide,
        "Move a slide from one position to another.",
        tool_input_schema(
            &json!({
                "from_position": schema_slide_number("Current 1-based slide position."),
                "to_position": schema_slide_number("Target 1-based slide position."),
                "doc_name": schema_document_name()
            }),
            &["from_position", "to_position"],
        ),
        tool_examples(ToolName::MoveSlide),
        vec!["Both positions must refer to existing slides.".to_string()],
    )
}

/// Builds the tool contract for `get_slide_count`.
fn get_slide_count_contract() -> ToolContract {
    build_tool_contract(
        ToolName::GetSlideCount,
        "Count the slides in a presentation.",
        tool_input_schema(
            &json!({
                "doc_name": schema_document_name()
            }),
            &[],
        ),
        tool_examples(ToolName::GetSlideCount),
        vec![],
    )
}

/// Builds the tool contract for `select_slide`.
fn select_slide_contract() -> ToolContract {
    build_tool_contract(
        ToolName::SelectSlide,
        "Make a slide the current slide in the editor.",
        tool_input_schema(
            &json!({
                "slide_number": schema_slide_number("Slide number to select."),
                "doc_name": schema_document_name()
            }),
            &["slide_number"],
        ),
        tool_examples(ToolName::SelectSlide),
        vec![],
    )
}

/// Builds the tool contract for `set_slide_layout`.
fn set_slide_layout_contract() -> ToolContract {
    build_tool_contract(
        ToolName::SetSlideLayout,
        "Apply a named master layout to a slide after checking it exists.",
        tool_input_schema(
            &json!({
                "slide_number": schema_slide_number("Slide number to restyle."),
                "layout": schema_text("Master layout name to apply."),
                "doc_name": schema_document_name()
            }),
            &["slide_number", "layout"],
        ),
        tool_examples(ToolName::SetSlideLayout),
        vec![
            "Fails with a layout-not-found message when no master slide matches.".to_string(),
            "List layout names with get_available_layouts.".to_string(),
        ],
    )
}

/// Builds the tool contract for `get_slide_info`.
fn get_slide_info_contract() -> ToolContract {
    build_tool_contract(
        ToolName::GetSlideInfo,
        "Fetch a slide's number, layout name, and text-item count.",
        tool_input_schema(
            &json!({
                "slide_number": schema_slide_number("Slide number to inspect."),
                "doc_name": schema_document_name()
            }),
            &["slide_number"],
        ),
        tool_examples(ToolName::GetSlideInfo),
        vec![
            "Layout reads as \"Unknown Layout\" when the slide reports none.".to_string(),
        ],
    )
}

/// Builds the tool contract for `get_available_layouts`.
fn get_available_layouts_contract() -> ToolContract {
    build_tool_contract(
        ToolName::GetAvailableLayouts,
        "List the master layout names available in a presentation.",
        tool_input_schema(
            &json!({
                "doc_name": schema_document_name()
            }),
            &[],
        ),
        tool_examples(ToolName::GetAvailableLayouts),
        vec!["Layout names come from the document's master slides.".to_string()],
    )
}

/// Builds the tool contract for `add_text_box`.
fn add_text_box_contract() -> ToolContract {
    build_tool_contract(
        ToolName::AddTextBox,
        "Add a text box to a slide at the given or default coordinates.",
        tool_input_schema(
            &json!({
                "slide_number": schema_slide_number("Slide number to place the text box on."),
                "text": schema_text("Text content; must not be blank."),
                "x": schema_coordinate("Horizontal position in points."),
                "y": schema_coordinate("Vertical position in points."),
                "doc_name": schema_document_name()
            }),
            &["slide_number", "text"],
        ),
        tool_examples(ToolName::AddTextBox),
        vec![
            "Coordinates default to (100.0, 200.0) when omitted or zero.".to_string(),
            "Blank text is rejected before any script runs.".to_string(),
        ],
    )
}

/// Builds the tool contract for `add_image`.
fn add_image_contract() -> ToolContract {
    build_tool_contract(
        ToolName::AddImage,
        "Place an image file on a slide at the given or default coordinates.",
        tool_input_schema(
            &json!({
                "slide_number": schema_slide_number("Slide number to place the image on."),
                "image_path": schema_path("Absolute path to the image file."),
                "x": schema_coordinate("Horizontal position in points."),
                "y": schema_coordinate("Vertical position in points."),
                "doc_name": schema_document_name()
            }),
            &["slide_number", "image_path"],
        ),
        tool_examples(ToolName::AddImage),
        vec![
            "Coordinates default to (300.0, 200.0) when omitted or zero.".to_string(),
            "The image file must be readable by the application.".to_string(),
        ],
    )
}

/// Builds the tool contract for `screenshot_slide`.
fn screenshot_slide_contract() -> ToolContract {
    build_tool_contract(
        ToolName::ScreenshotSlide,
        "Export one slide of the front presentation as an image file.",
        tool_input_schema(
            &json!({
                "slide_number": schema_slide_number("Slide number to capture."),
                "output_path": schema_path(
                    "Destination file path including the file name and extension."
                ),
                "format": schema_image_format()
            }),
            &["slide_number", "output_path"],
        ),
        tool_examples(ToolName::ScreenshotSlide),
        vec![
            "Stages through a temporary directory and moves the image to output_path.".to_string(),
            "Parent directories of output_path are created when missing.".to_string(),
            "format jpg exports JPEG; anything else exports PNG.".to_string(),
        ],
    )
}

/// Builds the tool contract for `export_pdf`.
fn export_pdf_contract() -> ToolContract {
    build_tool_contract(
        ToolName::ExportPdf,
        "Export the front presentation as a PDF document.",
        tool_input_schema(
            &json!({
                "output_path": schema_path("Destination file path including the .pdf extension.")
            }),
            &["output_path"],
        ),
        tool_examples(ToolName::ExportPdf),
        vec!["Parent directories of output_path are created when missing.".to_string()],
    )
}

/// Builds the tool contract for `export_images`.
fn export_images_contract() -> ToolContract {
    build_tool_contract(
        ToolName::ExportImages,
        "Export every slide of the front presentation as an image file in a directory.",
        tool_input_schema(
            &json!({
                "output_dir": schema_path("Destination directory for the slide images."),
                "format": schema_image_format()
            }),
            &["output_dir"],
        ),
        tool_examples(ToolName::ExportImages),
        vec![
            "output_dir is created when missing.".to_string(),
            "The application names the files by slide number.".to_string(),
        ],
    )
}

/// Returns the MCP tool definitions for tool listing.
#[must_use]
pub fn tool_definitions() -> Vec<ToolDefinition> {
    let contracts = tool_contracts();
    let mut definitions = Vec::with_capacity(contracts.len());
    for contract in contracts {
        definitions.push(ToolDefinition {
            name: contract.name,
            description: contract.description,
            input_schema: contract.input_schema,
        });
    }
    definitions
}

/// Builds markdown documentation for the tool contracts.
#[must_use]
pub fn tooling_markdown(contracts: &[ToolContract]) -> String {
    let mut out = String::new();
    out.push_str("# Podium MCP Tools\n\n");
    out.push_str("This document summarizes the MCP tool surface and expected usage. ");
    out.push_str("Every tool responds with prefixed human-readable text; failures are ");
    out.push_str("reported in the response content, never as transport faults.\n\n");
    out.push_str("## Lifecycle quickstart\n\n");
    out.push_str("- `create_presentation` or `open_presentation` establishes the front ");
    out.push_str("document.\n");
    out.push_str("- `add_slide`, `add_text_box`, and `add_image` build slide content.\n");
    out.push_str("- `get_slide_size` reports layout guides for positioning content.\n");
    out.push_str("- `screenshot_slide`, `export_pdf`, and `export_images` write files to disk.\n");
    out.push_str("- `save_presentation` and `close_presentation` finish the session.\n\n");
    out.push_str("| Tool | Description |\n");
    out.push_str("| --- | --- |\n");
    for contract in contracts {
        out.push_str("| ");
        out.push_str(contract.name.as_str());
        out.push_str(" | ");
        out.push_str(&contract.description);
        out.push_str(" |\n");
    }
    out.push('\n');
    for contract in contracts {
        out.push_str("## ");
        out.push_str(contract.name.as_str());
        out.push('\n');
        out.push('\n');
        out.push_str(contract.description.as_str());
        out.push('\n');
        out.push('\n');
        out.push_str("### Inputs\n\n");
        render_schema_fields(&mut out, &contract.input_schema);
        out.push('\n');
        if !contract.notes.is_empty() {
            out.push_str("### Notes\n\n");
            for note in &contract.notes {
                out.push_str("- ");
                out.push_str(note);
                out.push('\n');
            }
            out.push('\n');
        }
        append_tool_examples(&mut out, &contract.examples);
    }
    out
}

// ============================================================================
// SECTION: Tooling Markdown Helpers
// ============================================================================

/// Render top-level schema fields as markdown bullet points.
fn render_schema_fields(out: &mut String, schema: &Value) {
    let Some(properties) = schema.get("properties").and_then(Value::as_object) else {
        out.push_str("_No fields._\n");
        return;
    };
    if properties.is_empty() {
        out.push_str("_No fields._\n");
        return;
    }
    let required = required_field_set(schema);
    let mut keys: Vec<&String> = properties.keys().collect();
    keys.sort();
    for key in keys {
        let value = &properties[key];
        let required_label = if required.contains(key) { "required" } else { "optional" };
        let description = schema_description(value)
            .unwrap_or_else(|| String::from("See schema for details."));
        out.push_str("- `");
        out.push_str(key);
        out.push_str("` (");
        out.push_str(required_label);
        out.push_str("): ");
        out.push_str(&description);
        out.push('\n');
    }
}

/// Collect required field names from a JSON schema object.
fn required_field_set(schema: &Value) -> BTreeSet<String> {
    let mut required = BTreeSet::new();
    if let Some(items) = schema.get("required").and_then(Value::as_array) {
        for item in items {
            if let Some(field) = item.as_str() {
                required.insert(field.to_string());
            }
        }
    }
    required
}

/// Extract a description from a schema if present.
fn schema_description(schema: &Value) -> Option<String> {
    schema.get("description").and_then(Value::as_str).map(str::to_string)
}

/// Append example input/output payloads for a tool, if defined.
fn append_tool_examples(out: &mut String, examples: &[ToolExample]) {
    if examples.is_empty() {
        return;
    }
    out.push_str("### Example\n\n");
    for (idx, example) in examples.iter().enumerate() {
        if examples.len() > 1 {
            out.push_str("Example ");
            out.push_str(&(idx + 1).to_string());
            out.push_str(": ");
        }
        out.push_str(&example.description);
        out.push('\n');
        out.push('\n');
        out.push_str("Input:\n");
        render_json_block(out, &example.input);
        out.push_str("Output:\n");
        render_json_block(out, &example.output);
    }
}

/// Render a JSON value in a fenced markdown code block.
fn render_json_block(out: &mut String, value: &Value) {
    let rendered = serde_json::to_string_pretty(value).unwrap_or_else(|_| String::from("{}"));
    out.push_str("```json\n");
    out.push_str(&rendered);
    out.push_str("\n```\n");
}

// ============================================================================
// SECTION: Tool Examples
// ============================================================================

/// Returns the documented example for a tool.
fn tool_examples(name: ToolName) -> Vec<ToolExample> {
    let (description, input, output) = match name {
        ToolName::CreatePresentation => (
            "Create a themed deck saved to the desktop",
            json!({ "title": "Quarterly Review", "theme": "Gradient" }),
            "✅ Successfully created presentation: Quarterly Review.key",
        ),
        ToolName::OpenPresentation => (
            "Open a deck from disk",
            json!({ "file_path": "/Users/alex/Decks/roadmap.key" }),
            "✅ Successfully opened presentation: roadmap.key",
        ),
        ToolName::SavePresentation => (
            "Save the front document",
            json!({}),
            "✅ Successfully saved presentation: roadmap.key",
        ),
        ToolName::ClosePresentation => (
            "Close the front document without saving",
            json!({ "should_save": false }),
            "✅ Successfully closed presentation: roadmap.key",
        ),
        ToolName::ListPresentations => (
            "List open decks",
            json!({}),
            "📋 Open presentations:\n• roadmap.key\n• budget.key",
        ),
        ToolName::SetPresentationTheme => (
            "Apply an installed theme",
            json!({ "theme_name": "Gradient" }),
            "✅ Theme set: Gradient",
        ),
        ToolName::GetPresentationInfo => (
            "Inspect the front document",
            json!({}),
            "📊 Presentation info:\n• Name: roadmap.key\n• Slides: 12\n• Theme: Gradient",
        ),
        ToolName::GetAvailableThemes => (
            "List installed themes",
            json!({}),
            "🎨 Available themes (3):\n• Basic White\n• Basic Black\n• Gradient",
        ),
        ToolName::GetPresentationResolution => (
            "Read the deck resolution",
            json!({}),
            "📐 Presentation resolution:\n• Width: 1920 px\n• Height: 1080 px\n• Aspect \
             ratio: 1.778 (16:9)",
        ),
        ToolName::GetSlideSize => (
            "Read slide dimensions and layout guides",
            json!({}),
            "📏 Slide size:\n• Dimensions: 1920 × 1080 px\n• Aspect ratio: 1.778 (16:9)\n• \
             Center: (960, 540)\n\n📐 Layout guides:\n• Safe area: 1728 × 972 px\n• Margins: \
             96 × 54 px\n• Title band: y = 54 - 154\n• Content band: y = 174 - 1026",
        ),
        ToolName::AddSlide => (
            "Append a blank slide",
            json!({ "layout": "Blank" }),
            "✅ Added slide 5 (layout: Blank)",
        ),
        ToolName::DeleteSlide => (
            "Delete the third slide",
            json!({ "slide_number": 3 }),
            "✅ Deleted slide 3",
        ),
        ToolName::DuplicateSlide => (
            "Duplicate a slide into position 4",
            json!({ "slide_number": 2, "new_position": 4 }),
            "✅ Duplicated slide, new slide number: 4",
        ),
        ToolName::MoveSlide => (
            "Move slide 5 to position 2",
            json!({ "from_position": 5, "to_position": 2 }),
            "✅ Moved slide from position 5 to position 2",
        ),
        ToolName::GetSlideCount => (
            "Count slides in the front document",
            json!({}),
            "📊 Slide count: 12",
        ),
        ToolName::SelectSlide => (
            "Jump to slide 2",
            json!({ "slide_number": 2 }),
            "✅ Selected slide 2",
        ),
        ToolName::SetSlideLayout => (
            "Restyle a slide with a named layout",
            json!({ "slide_number": 2, "layout": "Title & Bullets" }),
            "✅ Set slide 2 layout to: Title & Bullets",
        ),
        ToolName::GetSlideInfo => (
            "Inspect slide 2",
            json!({ "slide_number": 2 }),
            "📊 Slide 2 info:\n• Number: 2\n• Layout: Title & Bullets\n• Text items: 3",
        ),
        ToolName::GetAvailableLayouts => (
            "List master layouts",
            json!({}),
            "📐 Available layouts:\n• Blank\n• Title & Bullets\n• Photo",
        ),
        ToolName::AddTextBox => (
            "Add a text box with default placement",
            json!({ "slide_number": 1, "text": "Hello" }),
            "✅ Added text box to slide 1 at position (100.0, 200.0)",
        ),
        ToolName::AddImage => (
            "Place a logo with default placement",
            json!({ "slide_number": 1, "image_path": "/Users/alex/Pictures/logo.png" }),
            "✅ Added image to slide 1 at position (300.0, 200.0): /Users/alex/Pictures/logo.png",
        ),
        ToolName::ScreenshotSlide => (
            "Capture slide 1 as a PNG",
            json!({ "slide_number": 1, "output_path": "/tmp/slide-1.png" }),
            "✅ Screenshot saved: /tmp/slide-1.png",
        ),
        ToolName::ExportPdf => (
            "Export the deck as a PDF",
            json!({ "output_path": "/tmp/deck.pdf" }),
            "✅ PDF exported: /tmp/deck.pdf",
        ),
        ToolName::ExportImages => (
            "Export every slide as a PNG",
            json!({ "output_dir": "/tmp/slides" }),
            "✅ Images exported to: /tmp/slides",
        ),
    };
    vec![ToolExample {
        description: description.to_string(),
        input,
        output: Value::String(output.to_string()),
    }]
}

// ============================================================================
// SECTION: Schema Helpers
// ============================================================================

/// Builds a tool contract from its parts.
fn build_tool_contract(
    name: ToolName,
    description: &str,
    input_schema: Value,
    examples: Vec<ToolExample>,
    notes: Vec<String>,
) -> ToolContract {
    ToolContract {
        name,
        description: description.to_string(),
        input_schema,
        examples,
        notes,
    }
}

/// Builds a standard tool input schema wrapper.
#[must_use]
fn tool_input_schema(properties: &Value, required: &[&str]) -> Value {
    with_schema(object_schema(properties, required))
}

/// Builds an object schema without the top-level `$schema` annotation.
#[must_use]
fn object_schema(properties: &Value, required: &[&str]) -> Value {
    let required_values: Vec<Value> =
        required.iter().map(|value| Value::String((*value).to_string())).collect();
    json!({
        "type": "object",
        "required": required_values,
        "properties": properties,
        "additionalProperties": false
    })
}

/// Adds a `$schema` header to a top-level JSON schema.
#[must_use]
fn with_schema(schema: Value) -> Value {
    let Value::Object(mut map) = schema else {
        return schema;
    };
    map.insert(
        String::from("$schema"),
        Value::String(String::from("https://json-schema.org/draft/2020-12/schema")),
    );
    Value::Object(map)
}

/// Returns a schema describing 1-based slide numbers.
#[must_use]
fn schema_slide_number(description: &str) -> Value {
    json!({
        "type": "integer",
        "minimum": 1,
        "description": description
    })
}

/// Returns a schema describing non-negative point coordinates.
#[must_use]
fn schema_coordinate(description: &str) -> Value {
    json!({
        "type": "number",
        "minimum": 0,
        "description": description
    })
}

/// Returns a schema describing free text arguments.
#[must_use]
fn schema_text(description: &str) -> Value {
    json!({
        "type": "string",
        "description": description
    })
}

/// Returns a schema describing filesystem paths.
#[must_use]
fn schema_path(description: &str) -> Value {
    json!({
        "type": "string",
        "description": description
    })
}

/// Returns the shared schema for optional document-name targeting.
#[must_use]
fn schema_document_name() -> Value {
    json!({
        "type": "string",
        "description": "Open document name; the front document when omitted."
    })
}

/// Returns the shared schema for export image formats.
#[must_use]
fn schema_image_format() -> Value {
    json!({
        "type": "string",
        "enum": ["png", "jpg"],
        "default": "png",
        "description": "Image format for the exported file."
    })
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests;
