// crates/podium-mcp/src/tools/tests.rs
// ============================================================================
// Module: Tool Router Tests
// Description: Unit tests for dispatch, validation, and response rendering.
// Purpose: Verify the validate-assemble-invoke-decode pipeline per tool.
// Dependencies: podium-core, serde_json, tempfile
// ============================================================================

#![allow(
    clippy::panic,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    clippy::missing_docs_in_private_items,
    reason = "Test-only assertions use unwrap/expect and panic for clarity."
)]

use std::collections::VecDeque;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::AtomicUsize;
use std::sync::atomic::Ordering;
use std::thread;
use std::time::Duration;

use podium_core::AdapterError;
use podium_core::AssembledScript;
use podium_core::ScriptCatalog;
use podium_core::ScriptInvoker;
use podium_core::ToolName;
use serde_json::json;
use tempfile::TempDir;

use super::ToolCallReply;
use super::ToolRouter;
use super::ToolRouterConfig;
use crate::response::ToolContent;

/// Stub routine resource for text-content tests.
const TEXT_ROUTINE_STUB: &str = "on addTextBox(docName, slideNumber, textContent, xPos, yPos, \
                                 boxWidth, boxHeight)\n    return \"ok\"\nend addTextBox\n";

/// Stub routine resource for media-content tests.
const MEDIA_ROUTINE_STUB: &str = "on addImage(docName, slideNumber, imagePath, xPos, yPos, \
                                  imgWidth, imgHeight)\n    return \"ok\"\nend addImage\n";

/// Recording invoker returning queued responses in order.
struct MockInvoker {
    responses: Mutex<VecDeque<Result<String, AdapterError>>>,
    calls: Mutex<Vec<AssembledScript>>,
}

impl MockInvoker {
    fn with_responses(responses: Vec<Result<String, AdapterError>>) -> Arc<Self> {
        Arc::new(Self {
            responses: Mutex::new(responses.into_iter().collect()),
            calls: Mutex::new(Vec::new()),
        })
    }

    fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    fn inline_sources(&self) -> Vec<String> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter_map(|script| match script {
                AssembledScript::Inline {
                    source,
                } => Some(source.clone()),
                AssembledScript::Compiled {
                    ..
                } => None,
            })
            .collect()
    }
}

impl ScriptInvoker for MockInvoker {
    fn invoke(&self, script: &AssembledScript) -> Result<String, AdapterError> {
        self.calls.lock().unwrap().push(script.clone());
        self.responses.lock().unwrap().pop_front().unwrap_or(Ok(String::new()))
    }
}

fn router_with(invoker: Arc<dyn ScriptInvoker>) -> (ToolRouter, TempDir) {
    let dir = TempDir::new().expect("staging dir");
    let catalog = ScriptCatalog::open(dir.path()).expect("catalog");
    let router = ToolRouter::new(ToolRouterConfig {
        invoker,
        catalog,
    });
    (router, dir)
}

fn reply_text(reply: &ToolCallReply) -> String {
    match reply.content.first() {
        Some(ToolContent::Text {
            text,
        }) => text.clone(),
        other => panic!("expected a text block, got {other:?}"),
    }
}

#[test]
fn unknown_tool_renders_error_block() {
    let invoker = MockInvoker::with_responses(vec![]);
    let (router, _dir) = router_with(invoker.clone());

    let reply = router.handle_tool_call("make_coffee", json!({}));

    assert_eq!(reply.tool, None);
    assert!(reply.is_error());
    assert_eq!(reply.error_kind, Some("unknown_tool"));
    assert_eq!(reply_text(&reply), "❌ Unknown tool: make_coffee");
    assert_eq!(invoker.call_count(), 0);
}

#[test]
fn invalid_slide_number_short_circuits_before_invocation() {
    let invoker = MockInvoker::with_responses(vec![]);
    let (router, _dir) = router_with(invoker.clone());

    let reply = router.handle_tool_call("delete_slide", json!({ "slide_number": 0 }));

    assert_eq!(reply.error_kind, Some("parameter"));
    assert_eq!(
        reply_text(&reply),
        "❌ Parameter error: slide_number must be 1 or greater (got 0)"
    );
    assert_eq!(invoker.call_count(), 0);
}

#[test]
fn unknown_fields_are_parameter_errors() {
    let invoker = MockInvoker::with_responses(vec![]);
    let (router, _dir) = router_with(invoker.clone());

    let reply =
        router.handle_tool_call("delete_slide", json!({ "slide_number": 1, "slide": 2 }));

    assert_eq!(reply.error_kind, Some("parameter"));
    assert!(reply_text(&reply).contains("unknown field"));
    assert_eq!(invoker.call_count(), 0);
}

#[test]
fn delete_slide_targets_the_requested_slide() {
    let invoker = MockInvoker::with_responses(vec![Ok(String::new())]);
    let (router, _dir) = router_with(invoker.clone());

    let reply = router.handle_tool_call("delete_slide", json!({ "slide_number": 2 }));

    assert_eq!(reply.tool, Some(ToolName::DeleteSlide));
    assert!(!reply.is_error());
    assert_eq!(reply_text(&reply), "✅ Deleted slide 2");
    let sources = invoker.inline_sources();
    assert_eq!(sources.len(), 1);
    assert!(sources[0].contains("delete slide 2 of targetDoc"));
    assert!(sources[0].contains("set targetDoc to front document"));
}

#[test]
fn create_presentation_saves_to_the_desktop() {
    let invoker = MockInvoker::with_responses(vec![Ok("Quarterly Review.key".to_string())]);
    let (router, _dir) = router_with(invoker.clone());

    let reply = router.handle_tool_call(
        "create_presentation",
        json!({ "title": "Quarterly Review", "theme": "Gradient" }),
    );

    assert_eq!(reply_text(&reply), "✅ Successfully created presentation: Quarterly Review.key");
    let sources = invoker.inline_sources();
    assert!(
        sources[0]
            .contains("set desktopPath to (path to desktop as string) & \"Quarterly Review.key\"")
    );
    assert!(sources[0].contains("set theme of newDoc to theme \"Gradient\""));
}

#[test]
fn text_arguments_are_escaped_into_script_literals() {
    let invoker = MockInvoker::with_responses(vec![Ok("x.key".to_string())]);
    let (router, _dir) = router_with(invoker.clone());

    let reply = router
        .handle_tool_call("create_presentation", json!({ "title": "He said \"hi\"\nloudly" }));

    assert!(!reply.is_error());
    let sources = invoker.inline_sources();
    assert!(sources[0].contains(r#"He said \"hi\"\nloudly"#));
}

#[test]
fn close_presentation_renders_the_save_flag_literal() {
    let invoker = MockInvoker::with_responses(vec![Ok("deck.key".to_string())]);
    let (router, _dir) = router_with(invoker.clone());

    let reply =
        router.handle_tool_call("close_presentation", json!({ "should_save": false }));

    assert_eq!(reply_text(&reply), "✅ Successfully closed presentation: deck.key");
    assert!(invoker.inline_sources()[0].contains("if false then"));
}

#[test]
fn close_presentation_saves_by_default() {
    let invoker = MockInvoker::with_responses(vec![Ok("deck.key".to_string())]);
    let (router, _dir) = router_with(invoker.clone());

    let _ = router.handle_tool_call("close_presentation", json!({}));

    assert!(invoker.inline_sources()[0].contains("if true then"));
}

#[test]
fn list_presentations_renders_bullets() {
    let invoker = MockInvoker::with_responses(vec![Ok("{roadmap.key, budget.key}".to_string())]);
    let (router, _dir) = router_with(invoker);

    let reply = router.handle_tool_call("list_presentations", json!({}));

    assert_eq!(reply_text(&reply), "📋 Open presentations:\n• roadmap.key\n• budget.key");
}

#[test]
fn list_presentations_reports_none_open() {
    let invoker = MockInvoker::with_responses(vec![Ok(String::new())]);
    let (router, _dir) = router_with(invoker);

    let reply = router.handle_tool_call("list_presentations", json!({}));

    assert_eq!(reply_text(&reply), "📋 No presentations currently open");
}

#[test]
fn set_theme_reports_success() {
    let invoker = MockInvoker::with_responses(vec![Ok("success".to_string())]);
    let (router, _dir) = router_with(invoker);

    let reply =
        router.handle_tool_call("set_presentation_theme", json!({ "theme_name": "Gradient" }));

    assert!(!reply.is_error());
    assert_eq!(reply_text(&reply), "✅ Theme set: Gradient");
}

#[test]
fn set_theme_reports_missing_theme() {
    let invoker = MockInvoker::with_responses(vec![Ok("theme_not_found".to_string())]);
    let (router, _dir) = router_with(invoker);

    let reply =
        router.handle_tool_call("set_presentation_theme", json!({ "theme_name": "Nope" }));

    assert_eq!(reply_text(&reply), "❌ Theme not found: Nope");
}

#[test]
fn set_theme_passes_through_script_failure_text() {
    let invoker = MockInvoker::with_responses(vec![Ok("error: theme is locked".to_string())]);
    let (router, _dir) = router_with(invoker);

    let reply =
        router.handle_tool_call("set_presentation_theme", json!({ "theme_name": "Gradient" }));

    assert_eq!(reply_text(&reply), "❌ Failed to set theme: error: theme is locked");
}

#[test]
fn presentation_info_renders_name_slides_and_theme() {
    let invoker =
        MockInvoker::with_responses(vec![Ok("{roadmap.key, 12, Gradient}".to_string())]);
    let (router, _dir) = router_with(invoker);

    let reply = router.handle_tool_call("get_presentation_info", json!({}));

    assert_eq!(
        reply_text(&reply),
        "📊 Presentation info:\n• Name: roadmap.key\n• Slides: 12\n• Theme: Gradient"
    );
}

#[test]
fn presentation_info_falls_back_to_raw_output() {
    let invoker = MockInvoker::with_responses(vec![Ok("odd output".to_string())]);
    let (router, _dir) = router_with(invoker);

    let reply = router.handle_tool_call("get_presentation_info", json!({}));

    assert_eq!(reply_text(&reply), "📊 Presentation info: odd output");
}

#[test]
fn available_themes_counts_listed_names() {
    let invoker = MockInvoker::with_responses(vec![Ok(
        "Basic White|||Basic Black|||Gradient".to_string(),
    )]);
    let (router, _dir) = router_with(invoker);

    let reply = router.handle_tool_call("get_available_themes", json!({}));

    assert_eq!(
        reply_text(&reply),
        "🎨 Available themes (3):\n• Basic White\n• Basic Black\n• Gradient"
    );
}

#[test]
fn available_themes_reports_empty_catalog() {
    let invoker = MockInvoker::with_responses(vec![Ok(String::new())]);
    let (router, _dir) = router_with(invoker);

    let reply = router.handle_tool_call("get_available_themes", json!({}));

    assert_eq!(reply_text(&reply), "🎨 No themes found");
}

#[test]
fn resolution_classifies_widescreen() {
    let invoker = MockInvoker::with_responses(vec![Ok("1920,1080".to_string())]);
    let (router, _dir) = router_with(invoker);

    let reply = router.handle_tool_call("get_presentation_resolution", json!({}));

    assert_eq!(
        reply_text(&reply),
        "📐 Presentation resolution:\n• Width: 1920 px\n• Height: 1080 px\n• Aspect ratio: \
         1.778 (16:9)"
    );
}

#[test]
fn resolution_classifies_standard_ratio() {
    let invoker = MockInvoker::with_responses(vec![Ok("1024,768".to_string())]);
    let (router, _dir) = router_with(invoker);

    let reply = router.handle_tool_call("get_presentation_resolution", json!({}));

    assert_eq!(
        reply_text(&reply),
        "📐 Presentation resolution:\n• Width: 1024 px\n• Height: 768 px\n• Aspect ratio: \
         1.333 (4:3)"
    );
}

#[test]
fn slide_size_derives_layout_guides() {
    let invoker = MockInvoker::with_responses(vec![Ok("1920,1080,1.7777778,16:9".to_string())]);
    let (router, _dir) = router_with(invoker);

    let reply = router.handle_tool_call("get_slide_size", json!({}));

    assert_eq!(
        reply_text(&reply),
        "📏 Slide size:\n• Dimensions: 1920 × 1080 px\n• Aspect ratio: 1.778 (16:9)\n• Center: \
         (960, 540)\n\n📐 Layout guides:\n• Safe area: 1728 × 972 px\n• Margins: 96 × 54 px\n• \
         Title band: y = 54 - 154\n• Content band: y = 174 - 1026"
    );
}

#[test]
fn slide_size_falls_back_on_short_output() {
    let invoker = MockInvoker::with_responses(vec![Ok("1920,1080".to_string())]);
    let (router, _dir) = router_with(invoker);

    let reply = router.handle_tool_call("get_slide_size", json!({}));

    assert_eq!(reply_text(&reply), "📏 Slide size info: 1920,1080");
}

#[test]
fn add_slide_defaults_to_blank_layout_at_end() {
    let invoker = MockInvoker::with_responses(vec![Ok("5".to_string())]);
    let (router, _dir) = router_with(invoker.clone());

    let reply = router.handle_tool_call("add_slide", json!({}));

    assert_eq!(reply_text(&reply), "✅ Added slide 5 (layout: Blank)");
    let sources = invoker.inline_sources();
    assert!(sources[0].contains("if 0 is 0 then"));
    assert!(sources[0].contains("master slide \"Blank\" of targetDoc"));
}

#[test]
fn add_slide_inserts_at_position() {
    let invoker = MockInvoker::with_responses(vec![Ok("2".to_string())]);
    let (router, _dir) = router_with(invoker.clone());

    let reply =
        router.handle_tool_call("add_slide", json!({ "position": 2, "layout": "Photo" }));

    assert_eq!(reply_text(&reply), "✅ Added slide 2 (layout: Photo)");
    let sources = invoker.inline_sources();
    assert!(sources[0].contains("make new slide at slide 2 of targetDoc"));
    assert!(sources[0].contains("master slide \"Photo\" of targetDoc"));
}

#[test]
fn add_slide_rejects_negative_position() {
    let invoker = MockInvoker::with_responses(vec![]);
    let (router, _dir) = router_with(invoker.clone());

    let reply = router.handle_tool_call("add_slide", json!({ "position": -2 }));

    assert_eq!(reply_text(&reply), "❌ Parameter error: position must be 0 or greater (got -2)");
    assert_eq!(invoker.call_count(), 0);
}

#[test]
fn duplicate_slide_reports_the_copy_number() {
    let invoker = MockInvoker::with_responses(vec![Ok("4".to_string())]);
    let (router, _dir) = router_with(invoker.clone());

    let reply = router.handle_tool_call("duplicate_slide", json!({ "slide_number": 3 }));

    assert_eq!(reply_text(&reply), "✅ Duplicated slide, new slide number: 4");
    assert!(invoker.inline_sources()[0].contains("if 0 is not 0 then"));
}

#[test]
fn move_slide_validates_both_positions() {
    let invoker = MockInvoker::with_responses(vec![]);
    let (router, _dir) = router_with(invoker.clone());

    let reply =
        router.handle_tool_call("move_slide", json!({ "from_position": 5, "to_position": 0 }));

    assert_eq!(
        reply_text(&reply),
        "❌ Parameter error: to_position must be 1 or greater (got 0)"
    );
    assert_eq!(invoker.call_count(), 0);
}

#[test]
fn move_slide_reports_both_positions() {
    let invoker = MockInvoker::with_responses(vec![Ok(String::new())]);
    let (router, _dir) = router_with(invoker);

    let reply =
        router.handle_tool_call("move_slide", json!({ "from_position": 5, "to_position": 2 }));

    assert_eq!(reply_text(&reply), "✅ Moved slide from position 5 to position 2");
}

#[test]
fn slide_count_passes_through_the_scalar() {
    let invoker = MockInvoker::with_responses(vec![Ok("12".to_string())]);
    let (router, _dir) = router_with(invoker);

    let reply = router.handle_tool_call("get_slide_count", json!({}));

    assert_eq!(reply_text(&reply), "📊 Slide count: 12");
}

#[test]
fn select_slide_reports_selection() {
    let invoker = MockInvoker::with_responses(vec![Ok(String::new())]);
    let (router, _dir) = router_with(invoker.clone());

    let reply = router.handle_tool_call("select_slide", json!({ "slide_number": 2 }));

    assert_eq!(reply_text(&reply), "✅ Selected slide 2");
    assert!(invoker.inline_sources()[0].contains("set current slide of targetDoc to slide 2"));
}

#[test]
fn set_slide_layout_reports_missing_layout() {
    let invoker = MockInvoker::with_responses(vec![Ok("layout_not_found".to_string())]);
    let (router, _dir) = router_with(invoker);

    let reply = router
        .handle_tool_call("set_slide_layout", json!({ "slide_number": 2, "layout": "Mystery" }));

    assert_eq!(reply_text(&reply), "❌ Layout not found: Mystery");
}

#[test]
fn set_slide_layout_reports_success() {
    let invoker = MockInvoker::with_responses(vec![Ok("success".to_string())]);
    let (router, _dir) = router_with(invoker);

    let reply = router.handle_tool_call(
        "set_slide_layout",
        json!({ "slide_number": 2, "layout": "Title & Bullets" }),
    );

    assert_eq!(reply_text(&reply), "✅ Set slide 2 layout to: Title & Bullets");
}

#[test]
fn slide_info_renders_number_layout_and_text_items() {
    let invoker =
        MockInvoker::with_responses(vec![Ok("{2, Title & Bullets, 3}".to_string())]);
    let (router, _dir) = router_with(invoker);

    let reply = router.handle_tool_call("get_slide_info", json!({ "slide_number": 2 }));

    assert_eq!(
        reply_text(&reply),
        "📊 Slide 2 info:\n• Number: 2\n• Layout: Title & Bullets\n• Text items: 3"
    );
}

#[test]
fn available_layouts_renders_bullets() {
    let invoker =
        MockInvoker::with_responses(vec![Ok("Blank|||Title & Bullets|||Photo".to_string())]);
    let (router, _dir) = router_with(invoker);

    let reply = router.handle_tool_call("get_available_layouts", json!({}));

    assert_eq!(
        reply_text(&reply),
        "📐 Available layouts:\n• Blank\n• Title & Bullets\n• Photo"
    );
}

#[test]
fn add_text_box_substitutes_default_coordinates() {
    let invoker = MockInvoker::with_responses(vec![Ok("ok".to_string())]);
    let (router, dir) = router_with(invoker.clone());
    fs::write(dir.path().join("text_content.applescript"), TEXT_ROUTINE_STUB).unwrap();

    let reply =
        router.handle_tool_call("add_text_box", json!({ "slide_number": 1, "text": "Hello" }));

    assert!(!reply.is_error());
    assert_eq!(reply_text(&reply), "✅ Added text box to slide 1 at position (100.0, 200.0)");
    let sources = invoker.inline_sources();
    assert_eq!(sources.len(), 1);
    assert!(sources[0].contains("addTextBox(\"\", 1, \"Hello\", 100.0, 200.0, 0, 0)"));
    assert!(sources[0].starts_with("on addTextBox"));
}

#[test]
fn add_text_box_rejects_blank_text() {
    let invoker = MockInvoker::with_responses(vec![]);
    let (router, dir) = router_with(invoker.clone());
    fs::write(dir.path().join("text_content.applescript"), TEXT_ROUTINE_STUB).unwrap();

    let reply =
        router.handle_tool_call("add_text_box", json!({ "slide_number": 1, "text": "   " }));

    assert_eq!(reply_text(&reply), "❌ Parameter error: text cannot be empty");
    assert_eq!(invoker.call_count(), 0);
}

#[test]
fn add_text_box_without_routine_resource_is_a_file_error() {
    let invoker = MockInvoker::with_responses(vec![]);
    let (router, _dir) = router_with(invoker.clone());

    let reply =
        router.handle_tool_call("add_text_box", json!({ "slide_number": 1, "text": "Hello" }));

    assert_eq!(reply.error_kind, Some("file_operation"));
    assert!(reply_text(&reply).contains("Script file not found: text_content"));
    assert_eq!(invoker.call_count(), 0);
}

#[test]
fn add_image_reports_path_and_supplied_coordinates() {
    let invoker = MockInvoker::with_responses(vec![Ok("ok".to_string())]);
    let (router, dir) = router_with(invoker.clone());
    fs::write(dir.path().join("media_content.applescript"), MEDIA_ROUTINE_STUB).unwrap();

    let reply = router.handle_tool_call(
        "add_image",
        json!({ "slide_number": 1, "image_path": "/tmp/logo.png", "x": 10.0, "y": 20.5 }),
    );

    assert_eq!(
        reply_text(&reply),
        "✅ Added image to slide 1 at position (10.0, 20.5): /tmp/logo.png"
    );
    assert!(
        invoker.inline_sources()[0]
            .contains("addImage(\"\", 1, \"/tmp/logo.png\", 10.0, 20.5, 0, 0)")
    );
}

#[test]
fn add_image_defaults_coordinates() {
    let invoker = MockInvoker::with_responses(vec![Ok("ok".to_string())]);
    let (router, dir) = router_with(invoker);
    fs::write(dir.path().join("media_content.applescript"), MEDIA_ROUTINE_STUB).unwrap();

    let reply = router.handle_tool_call(
        "add_image",
        json!({ "slide_number": 1, "image_path": "/tmp/logo.png" }),
    );

    assert_eq!(
        reply_text(&reply),
        "✅ Added image to slide 1 at position (300.0, 200.0): /tmp/logo.png"
    );
}

#[test]
fn script_failures_render_interpreter_stderr() {
    let invoker = MockInvoker::with_responses(vec![Err(AdapterError::from_stderr(
        "execution error: Can't get slide 99. (-1728)",
    ))]);
    let (router, _dir) = router_with(invoker);

    let reply = router.handle_tool_call("delete_slide", json!({ "slide_number": 99 }));

    assert_eq!(reply.error_kind, Some("script"));
    assert_eq!(
        reply_text(&reply),
        "❌ AppleScript error: execution error: Can't get slide 99. (-1728)"
    );
}

#[test]
fn export_images_creates_the_destination_directory() {
    let invoker = MockInvoker::with_responses(vec![Ok(String::new())]);
    let (router, _dir) = router_with(invoker.clone());
    let staging = TempDir::new().unwrap();
    let output_dir = staging.path().join("exports").join("deck");
    let output_text = output_dir.display().to_string();

    let reply =
        router.handle_tool_call("export_images", json!({ "output_dir": output_text.clone() }));

    assert_eq!(reply_text(&reply), format!("✅ Images exported to: {output_text}"));
    assert!(output_dir.is_dir());
    assert!(invoker.inline_sources()[0].contains("export as PNG to POSIX file"));
}

#[test]
fn export_pdf_creates_the_parent_directory() {
    let invoker = MockInvoker::with_responses(vec![Ok(String::new())]);
    let (router, _dir) = router_with(invoker.clone());
    let staging = TempDir::new().unwrap();
    let output_path = staging.path().join("exports").join("deck.pdf");
    let output_text = output_path.display().to_string();

    let reply =
        router.handle_tool_call("export_pdf", json!({ "output_path": output_text.clone() }));

    assert_eq!(reply_text(&reply), format!("✅ PDF exported: {output_text}"));
    assert!(output_path.parent().unwrap().is_dir());
    assert!(invoker.inline_sources()[0].contains("as PDF"));
}

/// Invoker that stages an export file the way the interpreter would.
struct ExportingInvoker {
    staged_dir: Mutex<Option<PathBuf>>,
    sources: Mutex<Vec<String>>,
    fail: bool,
    write_file: bool,
}

impl ExportingInvoker {
    fn staging_path_from(source: &str) -> PathBuf {
        let marker = "to POSIX file \"";
        let start = source.find(marker).expect("staging marker") + marker.len();
        let rest = &source[start..];
        let end = rest.find("/\"").expect("staging terminator");
        PathBuf::from(&rest[..end])
    }
}

impl ScriptInvoker for ExportingInvoker {
    fn invoke(&self, script: &AssembledScript) -> Result<String, AdapterError> {
        let AssembledScript::Inline {
            source,
        } = script
        else {
            panic!("expected an inline export script");
        };
        let staging = Self::staging_path_from(source);
        *self.staged_dir.lock().unwrap() = Some(staging.clone());
        self.sources.lock().unwrap().push(source.clone());
        if self.fail {
            return Err(AdapterError::from_stderr("execution error: export failed"));
        }
        if self.write_file {
            fs::write(staging.join("slide.png"), b"png-bytes").unwrap();
        }
        Ok(String::new())
    }
}

#[test]
fn screenshot_moves_the_staged_file_and_removes_staging() {
    let invoker = Arc::new(ExportingInvoker {
        staged_dir: Mutex::new(None),
        sources: Mutex::new(Vec::new()),
        fail: false,
        write_file: true,
    });
    let (router, _dir) = router_with(invoker.clone());
    let output_root = TempDir::new().unwrap();
    let output_path = output_root.path().join("captures").join("slide-1.png");
    let output_text = output_path.display().to_string();

    let reply = router.handle_tool_call(
        "screenshot_slide",
        json!({ "slide_number": 1, "output_path": output_text.clone() }),
    );

    assert_eq!(reply_text(&reply), format!("✅ Screenshot saved: {output_text}"));
    assert_eq!(fs::read(&output_path).unwrap(), b"png-bytes");
    let staged = invoker.staged_dir.lock().unwrap().clone().expect("staging recorded");
    assert!(!staged.exists());
}

#[test]
fn screenshot_removes_staging_when_the_interpreter_fails() {
    let invoker = Arc::new(ExportingInvoker {
        staged_dir: Mutex::new(None),
        sources: Mutex::new(Vec::new()),
        fail: true,
        write_file: false,
    });
    let (router, _dir) = router_with(invoker.clone());
    let output_root = TempDir::new().unwrap();
    let output_path = output_root.path().join("slide-1.png").display().to_string();

    let reply = router.handle_tool_call(
        "screenshot_slide",
        json!({ "slide_number": 1, "output_path": output_path }),
    );

    assert_eq!(reply.error_kind, Some("script"));
    let staged = invoker.staged_dir.lock().unwrap().clone().expect("staging recorded");
    assert!(!staged.exists());
}

#[test]
fn screenshot_reports_a_missing_staged_file() {
    let invoker = Arc::new(ExportingInvoker {
        staged_dir: Mutex::new(None),
        sources: Mutex::new(Vec::new()),
        fail: false,
        write_file: false,
    });
    let (router, _dir) = router_with(invoker);
    let output_root = TempDir::new().unwrap();
    let output_path = output_root.path().join("slide-1.png").display().to_string();

    let reply = router.handle_tool_call(
        "screenshot_slide",
        json!({ "slide_number": 1, "output_path": output_path }),
    );

    assert_eq!(reply.error_kind, Some("file_operation"));
    assert_eq!(reply_text(&reply), "❌ File operation error: no screenshot file generated");
}

#[test]
fn screenshot_exports_jpeg_for_jpg_format() {
    let invoker = Arc::new(ExportingInvoker {
        staged_dir: Mutex::new(None),
        sources: Mutex::new(Vec::new()),
        fail: true,
        write_file: false,
    });
    let (router, _dir) = router_with(invoker.clone());

    let _ = router.handle_tool_call(
        "screenshot_slide",
        json!({ "slide_number": 1, "output_path": "/tmp/x.jpg", "format": "jpg" }),
    );

    let sources = invoker.sources.lock().unwrap().clone();
    assert_eq!(sources.len(), 1);
    assert!(sources[0].contains("as JPEG to POSIX file"));
}

/// Invoker that tracks how many invocations overlap in time.
struct OverlapInvoker {
    active: AtomicUsize,
    max_active: AtomicUsize,
}

impl ScriptInvoker for OverlapInvoker {
    fn invoke(&self, _script: &AssembledScript) -> Result<String, AdapterError> {
        let now = self.active.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_active.fetch_max(now, Ordering::SeqCst);
        thread::sleep(Duration::from_millis(25));
        self.active.fetch_sub(1, Ordering::SeqCst);
        Ok("1".to_string())
    }
}

#[test]
fn invocations_are_serialized_across_clones() {
    let invoker = Arc::new(OverlapInvoker {
        active: AtomicUsize::new(0),
        max_active: AtomicUsize::new(0),
    });
    let (router, _dir) = router_with(invoker.clone());
    let second = router.clone();

    let handle = thread::spawn(move || {
        let _ = second.handle_tool_call("get_slide_count", json!({}));
    });
    let _ = router.handle_tool_call("get_slide_count", json!({}));
    handle.join().unwrap();

    assert_eq!(invoker.max_active.load(Ordering::SeqCst), 1);
}

#[test]
fn list_tools_advertises_every_operation() {
    let invoker = MockInvoker::with_responses(vec![]);
    let (router, _dir) = router_with(invoker);

    let tools = router.list_tools();

    assert_eq!(tools.len(), ToolName::all().len());
    assert!(tools.iter().any(|tool| tool.name == ToolName::ScreenshotSlide));
}
