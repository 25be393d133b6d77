// crates/podium-mcp/src/tools.rs
// ============================================================================
// Module: Tool Router
// Description: MCP tool dispatch, script generation, and response rendering.
// Purpose: Route tool calls through validate, assemble, invoke, and decode.
// Dependencies: podium-contract, podium-core, serde, serde_json, tempfile
// ============================================================================

//! ## Overview
//! The router is the only component that converts between the MCP surface and
//! the automation adapter. Each call moves through a fixed pipeline: decode
//! the JSON arguments into a typed request, validate ranges and shapes, build
//! the script unit (an inline source or a catalog routine call), invoke the
//! interpreter, decode its stdout, and render response text. A failure at any
//! stage short-circuits straight to a rendered `❌` block; no external process
//! starts before validation and assembly succeed, and every call terminates
//! in a response.
//!
//! Invocations are serialized through a router-level mutex so one adapter
//! instance never has two interpreter processes mutating the same document
//! concurrently.
//!
//! Security posture: tool arguments are untrusted. Text arguments are escaped
//! before they are embedded in generated script source, and catalog resource
//! stems are fixed constants rather than caller input.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs;
use std::path::Path;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::PoisonError;

use podium_contract::ToolDefinition;
use podium_contract::tool_definitions;
use podium_core::AdapterError;
use podium_core::AssembledScript;
use podium_core::DecodeMode;
use podium_core::Decoded;
use podium_core::RoutineCall;
use podium_core::ScriptArg;
use podium_core::ScriptCatalog;
use podium_core::ScriptInvoker;
use podium_core::ToolName;
use podium_core::decode_output;
use podium_core::escape_text;
use podium_core::format_real;
use podium_core::validate_coordinates;
use podium_core::validate_file_path;
use podium_core::validate_non_empty_text;
use podium_core::validate_slide_number;
use serde::Deserialize;
use serde_json::Value;

use crate::response::ToolContent;
use crate::response::error_kind_label;
use crate::response::render_error;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default text-box placement substituted for absent or `(0, 0)` coordinates.
const TEXT_BOX_DEFAULT_POSITION: (f64, f64) = (100.0, 200.0);

/// Default image placement substituted for absent or `(0, 0)` coordinates.
const IMAGE_DEFAULT_POSITION: (f64, f64) = (300.0, 200.0);

/// Catalog stem of the resource holding text-content routines.
const TEXT_CONTENT_SCRIPT: &str = "text_content";

/// Catalog stem of the resource holding media-content routines.
const MEDIA_CONTENT_SCRIPT: &str = "media_content";

/// Decode mode for AppleScript list-as-string output.
const NAME_LIST_DECODE: DecodeMode = DecodeMode::DelimitedList {
    delimiter: ", ",
    strip_brackets: true,
};

/// Decode mode for `|||`-joined name lists.
const TRIPLE_BAR_DECODE: DecodeMode = DecodeMode::DelimitedList {
    delimiter: "|||",
    strip_brackets: false,
};

/// Decode mode for comma-joined numeric tuples.
const CSV_DECODE: DecodeMode = DecodeMode::DelimitedList {
    delimiter: ",",
    strip_brackets: false,
};

// ============================================================================
// SECTION: Tool Call Replies
// ============================================================================

/// Terminal reply for one tool call.
///
/// # Invariants
/// - Every call produces a reply; failures are rendered into `content` and
///   never surface as transport-level faults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolCallReply {
    /// Parsed tool when the request named a known tool.
    pub tool: Option<ToolName>,
    /// Content blocks returned to the client.
    pub content: Vec<ToolContent>,
    /// Failure category label when the call failed.
    pub error_kind: Option<&'static str>,
}

impl ToolCallReply {
    /// Returns true when the call failed.
    #[must_use]
    pub const fn is_error(&self) -> bool {
        self.error_kind.is_some()
    }
}

// ============================================================================
// SECTION: Tool Router
// ============================================================================

/// Configuration bundle for constructing a [`ToolRouter`].
pub struct ToolRouterConfig {
    /// Script invoker driving the external interpreter.
    pub invoker: Arc<dyn ScriptInvoker>,
    /// Catalog of on-disk script resources.
    pub catalog: ScriptCatalog,
}

/// Routes MCP tool calls to automation handlers.
#[derive(Clone)]
pub struct ToolRouter {
    /// Script invoker driving the external interpreter.
    invoker: Arc<dyn ScriptInvoker>,
    /// Catalog of on-disk script resources.
    catalog: ScriptCatalog,
    /// Serializes invocations; one external process at a time per router.
    invoke_gate: Arc<Mutex<()>>,
}

impl ToolRouter {
    /// Creates a tool router from its dependencies.
    #[must_use]
    pub fn new(config: ToolRouterConfig) -> Self {
        Self {
            invoker: config.invoker,
            catalog: config.catalog,
            invoke_gate: Arc::new(Mutex::new(())),
        }
    }

    /// Returns the tool definitions advertised by `tools/list`.
    #[must_use]
    pub fn list_tools(&self) -> Vec<ToolDefinition> {
        let _ = self;
        tool_definitions()
    }

    /// Handles one `tools/call` request.
    ///
    /// Unknown tool names and handler failures are rendered into response
    /// content; the reply always carries at least one block.
    #[must_use]
    pub fn handle_tool_call(&self, name: &str, arguments: Value) -> ToolCallReply {
        let Some(tool) = ToolName::parse(name) else {
            return ToolCallReply {
                tool: None,
                content: vec![ToolContent::text(format!("❌ Unknown tool: {name}"))],
                error_kind: Some("unknown_tool"),
            };
        };
        let payload = if arguments.is_null() {
            Value::Object(serde_json::Map::new())
        } else {
            arguments
        };
        match self.dispatch(tool, payload) {
            Ok(text) => ToolCallReply {
                tool: Some(tool),
                content: vec![ToolContent::text(text)],
                error_kind: None,
            },
            Err(error) => ToolCallReply {
                tool: Some(tool),
                content: vec![ToolContent::text(render_error(&error))],
                error_kind: Some(error_kind_label(&error)),
            },
        }
    }

    /// Routes one parsed tool to its handler.
    fn dispatch(&self, tool: ToolName, payload: Value) -> Result<String, AdapterError> {
        match tool {
            ToolName::CreatePresentation => self.handle_create_presentation(payload),
            ToolName::OpenPresentation => self.handle_open_presentation(payload),
            ToolName::SavePresentation => self.handle_save_presentation(payload),
            ToolName::ClosePresentation => self.handle_close_presentation(payload),
            ToolName::ListPresentations => self.handle_list_presentations(payload),
            ToolName::SetPresentationTheme => self.handle_set_presentation_theme(payload),
            ToolName::GetPresentationInfo => self.handle_get_presentation_info(payload),
            ToolName::GetAvailableThemes => self.handle_get_available_themes(payload),
            ToolName::GetPresentationResolution => {
                self.handle_get_presentation_resolution(payload)
            }
            ToolName::GetSlideSize => self.handle_get_slide_size(payload),
            ToolName::AddSlide => self.handle_add_slide(payload),
            ToolName::DeleteSlide => self.handle_delete_slide(payload),
            ToolName::DuplicateSlide => self.handle_duplicate_slide(payload),
            ToolName::MoveSlide => self.handle_move_slide(payload),
            ToolName::GetSlideCount => self.handle_get_slide_count(payload),
            ToolName::SelectSlide => self.handle_select_slide(payload),
            ToolName::SetSlideLayout => self.handle_set_slide_layout(payload),
            ToolName::GetSlideInfo => self.handle_get_slide_info(payload),
            ToolName::GetAvailableLayouts => self.handle_get_available_layouts(payload),
            ToolName::AddTextBox => self.handle_add_text_box(payload),
            ToolName::AddImage => self.handle_add_image(payload),
            ToolName::ScreenshotSlide => self.handle_screenshot_slide(payload),
            ToolName::ExportPdf => self.handle_export_pdf(payload),
            ToolName::ExportImages => self.handle_export_images(payload),
        }
    }

    /// Runs an assembled script through the serialized invocation gate.
    fn invoke(&self, script: &AssembledScript) -> Result<String, AdapterError> {
        let _guard = self.invoke_gate.lock().unwrap_or_else(PoisonError::into_inner);
        self.invoker.invoke(script)
    }

    /// Runs inline script source through the serialized invocation gate.
    fn invoke_inline(&self, source: String) -> Result<String, AdapterError> {
        self.invoke(&AssembledScript::inline(source))
    }
}

// ============================================================================
// SECTION: Request Payloads
// ============================================================================

/// Arguments for tools that take no parameters.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct EmptyRequest {}

/// Arguments for tools scoped to an optionally named document.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct DocumentRequest {
    /// Open document name; the front document when omitted.
    doc_name: Option<String>,
}

/// Arguments for `create_presentation`.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct CreatePresentationRequest {
    /// Presentation title; also names the saved desktop file.
    title: String,
    /// Theme to apply; the default theme when omitted or unknown.
    theme: Option<String>,
}

/// Arguments for `open_presentation`.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct OpenPresentationRequest {
    /// Path of the presentation file to open.
    file_path: String,
}

/// Arguments for `close_presentation`.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ClosePresentationRequest {
    /// Open document name; the front document when omitted.
    doc_name: Option<String>,
    /// Save before closing; true when omitted.
    should_save: Option<bool>,
}

/// Arguments for `set_presentation_theme`.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct SetPresentationThemeRequest {
    /// Theme name to apply.
    theme_name: String,
    /// Open document name; the front document when omitted.
    doc_name: Option<String>,
}

/// Arguments for `add_slide`.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct AddSlideRequest {
    /// Open document name; the front document when omitted.
    doc_name: Option<String>,
    /// Insertion position; `0` or omitted appends at the end.
    position: Option<i64>,
    /// Master layout name; `Blank` when omitted.
    layout: Option<String>,
}

/// Arguments for tools addressing one slide.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct SlideRequest {
    /// Slide number, 1-based.
    slide_number: i64,
    /// Open document name; the front document when omitted.
    doc_name: Option<String>,
}

/// Arguments for `duplicate_slide`.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct DuplicateSlideRequest {
    /// Slide number to duplicate, 1-based.
    slide_number: i64,
    /// Position for the copy; `0` or omitted leaves it after the source.
    new_position: Option<i64>,
    /// Open document name; the front document when omitted.
    doc_name: Option<String>,
}

/// Arguments for `move_slide`.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct MoveSlideRequest {
    /// Current slide position, 1-based.
    from_position: i64,
    /// Target slide position, 1-based.
    to_position: i64,
    /// Open document name; the front document when omitted.
    doc_name: Option<String>,
}

/// Arguments for `set_slide_layout`.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct SetSlideLayoutRequest {
    /// Slide number, 1-based.
    slide_number: i64,
    /// Master layout name to apply.
    layout: String,
    /// Open document name; the front document when omitted.
    doc_name: Option<String>,
}

/// Arguments for `add_text_box`.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct AddTextBoxRequest {
    /// Slide number, 1-based.
    slide_number: i64,
    /// Text content for the new box.
    text: String,
    /// Horizontal position in points.
    x: Option<f64>,
    /// Vertical position in points.
    y: Option<f64>,
    /// Open document name; the front document when omitted.
    doc_name: Option<String>,
}

/// Arguments for `add_image`.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct AddImageRequest {
    /// Slide number, 1-based.
    slide_number: i64,
    /// Path of the image file to place.
    image_path: String,
    /// Horizontal position in points.
    x: Option<f64>,
    /// Vertical position in points.
    y: Option<f64>,
    /// Open document name; the front document when omitted.
    doc_name: Option<String>,
}

/// Arguments for `screenshot_slide`.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ScreenshotSlideRequest {
    /// Slide number to capture, 1-based.
    slide_number: i64,
    /// Destination file path for the captured image.
    output_path: String,
    /// Image format, `png` or `jpg`; `png` when omitted.
    format: Option<String>,
}

/// Arguments for `export_pdf`.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ExportPdfRequest {
    /// Destination file path for the PDF.
    output_path: String,
}

/// Arguments for `export_images`.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ExportImagesRequest {
    /// Destination directory for the exported images.
    output_dir: String,
    /// Image format, `png` or `jpg`; `png` when omitted.
    format: Option<String>,
}

/// Decodes a JSON payload into a typed request struct.
fn decode_request<T: for<'de> Deserialize<'de>>(payload: Value) -> Result<T, AdapterError> {
    serde_json::from_value(payload).map_err(|err| AdapterError::Parameter(err.to_string()))
}

// ============================================================================
// SECTION: Presentation Handlers
// ============================================================================

impl ToolRouter {
    /// Creates a presentation, optionally themed, saved to the desktop.
    fn handle_create_presentation(&self, payload: Value) -> Result<String, AdapterError> {
        let request: CreatePresentationRequest = decode_request(payload)?;
        let title = escape_text(&request.title);
        let theme = escape_text(request.theme.as_deref().unwrap_or(""));
        let raw = self.invoke_inline(create_presentation_script(&title, &theme))?;
        let name = decode_scalar(&raw);
        Ok(format!("✅ Successfully created presentation: {name}"))
    }

    /// Opens a presentation file from disk.
    fn handle_open_presentation(&self, payload: Value) -> Result<String, AdapterError> {
        let request: OpenPresentationRequest = decode_request(payload)?;
        let file_path = validate_file_path("file_path", &request.file_path)?;
        let raw = self.invoke_inline(open_presentation_script(&escape_text(&file_path)))?;
        let name = decode_scalar(&raw);
        Ok(format!("✅ Successfully opened presentation: {name}"))
    }

    /// Saves a presentation document.
    fn handle_save_presentation(&self, payload: Value) -> Result<String, AdapterError> {
        let request: DocumentRequest = decode_request(payload)?;
        let doc_name = escape_text(request.doc_name.as_deref().unwrap_or(""));
        let raw = self.invoke_inline(save_presentation_script(&doc_name))?;
        let name = decode_scalar(&raw);
        Ok(format!("✅ Successfully saved presentation: {name}"))
    }

    /// Closes a presentation document, saving first by default.
    fn handle_close_presentation(&self, payload: Value) -> Result<String, AdapterError> {
        let request: ClosePresentationRequest = decode_request(payload)?;
        let doc_name = escape_text(request.doc_name.as_deref().unwrap_or(""));
        let should_save = request.should_save.unwrap_or(true);
        let raw = self.invoke_inline(close_presentation_script(&doc_name, should_save))?;
        let name = decode_scalar(&raw);
        Ok(format!("✅ Successfully closed presentation: {name}"))
    }

    /// Lists the names of all open presentations.
    fn handle_list_presentations(&self, payload: Value) -> Result<String, AdapterError> {
        let _request: EmptyRequest = decode_request(payload)?;
        let raw = self.invoke_inline(LIST_PRESENTATIONS_SCRIPT.to_string())?;
        let names = decode_list(&raw, &NAME_LIST_DECODE);
        if names.is_empty() {
            return Ok("📋 No presentations currently open".to_string());
        }
        Ok(format!("📋 Open presentations:\n{}", bullet_lines(&names)))
    }

    /// Applies a named theme after checking it is installed.
    fn handle_set_presentation_theme(&self, payload: Value) -> Result<String, AdapterError> {
        let request: SetPresentationThemeRequest = decode_request(payload)?;
        let doc_name = escape_text(request.doc_name.as_deref().unwrap_or(""));
        let theme = escape_text(&request.theme_name);
        let raw = self.invoke_inline(set_presentation_theme_script(&doc_name, &theme))?;
        let status = decode_scalar(&raw);
        Ok(match status.as_str() {
            "success" => format!("✅ Theme set: {}", request.theme_name),
            "theme_not_found" => format!("❌ Theme not found: {}", request.theme_name),
            _ => format!("❌ Failed to set theme: {status}"),
        })
    }

    /// Reports name, slide count, and theme for a presentation.
    fn handle_get_presentation_info(&self, payload: Value) -> Result<String, AdapterError> {
        let request: DocumentRequest = decode_request(payload)?;
        let doc_name = escape_text(request.doc_name.as_deref().unwrap_or(""));
        let raw = self.invoke_inline(presentation_info_script(&doc_name))?;
        let parts = decode_list(&raw, &NAME_LIST_DECODE);
        if parts.len() >= 3 {
            return Ok(format!(
                "📊 Presentation info:\n• Name: {}\n• Slides: {}\n• Theme: {}",
                parts[0], parts[1], parts[2]
            ));
        }
        Ok(format!("📊 Presentation info: {raw}"))
    }

    /// Lists the theme names installed in the application.
    fn handle_get_available_themes(&self, payload: Value) -> Result<String, AdapterError> {
        let _request: EmptyRequest = decode_request(payload)?;
        let raw = self.invoke_inline(AVAILABLE_THEMES_SCRIPT.to_string())?;
        let themes = decode_list(&raw, &TRIPLE_BAR_DECODE);
        if themes.is_empty() {
            return Ok("🎨 No themes found".to_string());
        }
        Ok(format!("🎨 Available themes ({}):\n{}", themes.len(), bullet_lines(&themes)))
    }

    /// Reports the pixel resolution of a presentation.
    fn handle_get_presentation_resolution(&self, payload: Value) -> Result<String, AdapterError> {
        let request: DocumentRequest = decode_request(payload)?;
        let doc_name = escape_text(request.doc_name.as_deref().unwrap_or(""));
        let raw = self.invoke_inline(presentation_resolution_script(&doc_name))?;
        let parts = decode_list(&raw, &CSV_DECODE);
        if parts.len() < 2 {
            return Ok(format!("📐 Resolution info: {raw}"));
        }
        let width = parse_real("width", &parts[0])?;
        let height = parse_real("height", &parts[1])?;
        if height.abs() < f64::EPSILON {
            return Err(AdapterError::Unexpected(format!(
                "routine reported a zero height: {raw}"
            )));
        }
        let ratio = width / height;
        let width_px = width.trunc();
        let height_px = height.trunc();
        let label = aspect_ratio_label(ratio);
        Ok(format!(
            "📐 Presentation resolution:\n• Width: {width_px:.0} px\n• Height: {height_px:.0} \
             px\n• Aspect ratio: {ratio:.3} ({label})"
        ))
    }

    /// Reports slide dimensions plus derived layout guides.
    fn handle_get_slide_size(&self, payload: Value) -> Result<String, AdapterError> {
        let request: DocumentRequest = decode_request(payload)?;
        let doc_name = escape_text(request.doc_name.as_deref().unwrap_or(""));
        let raw = self.invoke_inline(slide_size_script(&doc_name))?;
        let parts = decode_list(&raw, &CSV_DECODE);
        if parts.len() < 4 {
            return Ok(format!("📏 Slide size info: {raw}"));
        }
        let width = parse_real("width", &parts[0])?;
        let height = parse_real("height", &parts[1])?;
        let ratio = parse_real("aspect ratio", &parts[2])?;
        let ratio_type = parts[3].as_str();
        let width_px = width.trunc();
        let height_px = height.trunc();
        let center_x = (width / 2.0).trunc();
        let center_y = (height / 2.0).trunc();
        // Layout guides: a 90% safe area centered on the slide.
        let safe_width = (width * 0.9).trunc();
        let safe_height = (height * 0.9).trunc();
        let margin_x = ((width - safe_width) / 2.0).trunc();
        let margin_y = ((height - safe_height) / 2.0).trunc();
        Ok(format!(
            "📏 Slide size:\n• Dimensions: {width_px:.0} × {height_px:.0} px\n• Aspect ratio: \
             {ratio:.3} ({ratio_type})\n• Center: ({center_x:.0}, {center_y:.0})\n\n📐 Layout \
             guides:\n• Safe area: {safe_width:.0} × {safe_height:.0} px\n• Margins: \
             {margin_x:.0} × {margin_y:.0} px\n• Title band: y = {margin_y:.0} - \
             {title_end:.0}\n• Content band: y = {content_start:.0} - {content_end:.0}",
            title_end = margin_y + 100.0,
            content_start = margin_y + 120.0,
            content_end = safe_height + margin_y,
        ))
    }
}

// ============================================================================
// SECTION: Slide Handlers
// ============================================================================

impl ToolRouter {
    /// Inserts a new slide, appending at the end by default.
    fn handle_add_slide(&self, payload: Value) -> Result<String, AdapterError> {
        let request: AddSlideRequest = decode_request(payload)?;
        let position = request.position.unwrap_or(0);
        if position < 0 {
            return Err(AdapterError::Parameter(format!(
                "position must be 0 or greater (got {position})"
            )));
        }
        let layout = match request.layout {
            Some(layout) if !layout.trim().is_empty() => layout,
            _ => "Blank".to_string(),
        };
        let doc_name = escape_text(request.doc_name.as_deref().unwrap_or(""));
        let raw =
            self.invoke_inline(add_slide_script(&doc_name, position, &escape_text(&layout)))?;
        let slide_number = decode_scalar(&raw);
        Ok(format!("✅ Added slide {slide_number} (layout: {layout})"))
    }

    /// Deletes a slide by number.
    fn handle_delete_slide(&self, payload: Value) -> Result<String, AdapterError> {
        let request: SlideRequest = decode_request(payload)?;
        let slide_number = validate_slide_number("slide_number", request.slide_number)?;
        let doc_name = escape_text(request.doc_name.as_deref().unwrap_or(""));
        self.invoke_inline(delete_slide_script(&doc_name, slide_number))?;
        Ok(format!("✅ Deleted slide {slide_number}"))
    }

    /// Duplicates a slide, optionally moving the copy.
    fn handle_duplicate_slide(&self, payload: Value) -> Result<String, AdapterError> {
        let request: DuplicateSlideRequest = decode_request(payload)?;
        let slide_number = validate_slide_number("slide_number", request.slide_number)?;
        let new_position = request.new_position.unwrap_or(0);
        if new_position < 0 {
            return Err(AdapterError::Parameter(format!(
                "new_position must be 0 or greater (got {new_position})"
            )));
        }
        let doc_name = escape_text(request.doc_name.as_deref().unwrap_or(""));
        let raw =
            self.invoke_inline(duplicate_slide_script(&doc_name, slide_number, new_position))?;
        let new_number = decode_scalar(&raw);
        Ok(format!("✅ Duplicated slide, new slide number: {new_number}"))
    }

    /// Moves a slide to a new position.
    fn handle_move_slide(&self, payload: Value) -> Result<String, AdapterError> {
        let request: MoveSlideRequest = decode_request(payload)?;
        let from_position = validate_slide_number("from_position", request.from_position)?;
        let to_position = validate_slide_number("to_position", request.to_position)?;
        let doc_name = escape_text(request.doc_name.as_deref().unwrap_or(""));
        self.invoke_inline(move_slide_script(&doc_name, from_position, to_position))?;
        Ok(format!("✅ Moved slide from position {from_position} to position {to_position}"))
    }

    /// Counts the slides in a presentation.
    fn handle_get_slide_count(&self, payload: Value) -> Result<String, AdapterError> {
        let request: DocumentRequest = decode_request(payload)?;
        let doc_name = escape_text(request.doc_name.as_deref().unwrap_or(""));
        let raw = self.invoke_inline(slide_count_script(&doc_name))?;
        let count = decode_scalar(&raw);
        Ok(format!("📊 Slide count: {count}"))
    }

    /// Makes a slide the current slide.
    fn handle_select_slide(&self, payload: Value) -> Result<String, AdapterError> {
        let request: SlideRequest = decode_request(payload)?;
        let slide_number = validate_slide_number("slide_number", request.slide_number)?;
        let doc_name = escape_text(request.doc_name.as_deref().unwrap_or(""));
        self.invoke_inline(select_slide_script(&doc_name, slide_number))?;
        Ok(format!("✅ Selected slide {slide_number}"))
    }

    /// Applies a named master layout after checking it exists.
    fn handle_set_slide_layout(&self, payload: Value) -> Result<String, AdapterError> {
        let request: SetSlideLayoutRequest = decode_request(payload)?;
        let slide_number = validate_slide_number("slide_number", request.slide_number)?;
        let doc_name = escape_text(request.doc_name.as_deref().unwrap_or(""));
        let layout = escape_text(&request.layout);
        let raw =
            self.invoke_inline(set_slide_layout_script(&doc_name, slide_number, &layout))?;
        let status = decode_scalar(&raw);
        Ok(match status.as_str() {
            "success" => format!("✅ Set slide {slide_number} layout to: {}", request.layout),
            "layout_not_found" => format!("❌ Layout not found: {}", request.layout),
            _ => format!("❌ Failed to set layout: {status}"),
        })
    }

    /// Reports number, layout, and text-item count for a slide.
    fn handle_get_slide_info(&self, payload: Value) -> Result<String, AdapterError> {
        let request: SlideRequest = decode_request(payload)?;
        let slide_number = validate_slide_number("slide_number", request.slide_number)?;
        let doc_name = escape_text(request.doc_name.as_deref().unwrap_or(""));
        let raw = self.invoke_inline(slide_info_script(&doc_name, slide_number))?;
        let parts = decode_list(&raw, &NAME_LIST_DECODE);
        if parts.len() >= 3 {
            return Ok(format!(
                "📊 Slide {slide_number} info:\n• Number: {}\n• Layout: {}\n• Text items: {}",
                parts[0], parts[1], parts[2]
            ));
        }
        Ok(format!("📊 Slide {slide_number} info: {raw}"))
    }

    /// Lists the master layout names in a presentation.
    fn handle_get_available_layouts(&self, payload: Value) -> Result<String, AdapterError> {
        let request: DocumentRequest = decode_request(payload)?;
        let doc_name = escape_text(request.doc_name.as_deref().unwrap_or(""));
        let raw = self.invoke_inline(available_layouts_script(&doc_name))?;
        let layouts = decode_list(&raw, &TRIPLE_BAR_DECODE);
        if layouts.is_empty() {
            return Ok("📐 No layouts found".to_string());
        }
        Ok(format!("📐 Available layouts:\n{}", bullet_lines(&layouts)))
    }
}

// ============================================================================
// SECTION: Content Handlers
// ============================================================================

impl ToolRouter {
    /// Adds a text box to a slide through the text-content routine.
    fn handle_add_text_box(&self, payload: Value) -> Result<String, AdapterError> {
        let request: AddTextBoxRequest = decode_request(payload)?;
        let slide_number = validate_slide_number("slide_number", request.slide_number)?;
        let text = validate_non_empty_text("text", &request.text)?;
        let (x, y) = validate_coordinates(request.x, request.y, TEXT_BOX_DEFAULT_POSITION)?;
        let doc_name = request.doc_name.unwrap_or_default();
        let call = RoutineCall::new(
            TEXT_CONTENT_SCRIPT,
            "addTextBox",
            vec![
                ScriptArg::Text(doc_name),
                ScriptArg::Integer(slide_number),
                ScriptArg::Text(text),
                ScriptArg::Real(x),
                ScriptArg::Real(y),
                ScriptArg::Integer(0),
                ScriptArg::Integer(0),
            ],
        );
        let script = self.catalog.assemble(&call)?;
        self.invoke(&script)?;
        Ok(format!(
            "✅ Added text box to slide {slide_number} at position ({}, {})",
            format_real(x),
            format_real(y)
        ))
    }

    /// Adds an image from disk to a slide through the media-content routine.
    fn handle_add_image(&self, payload: Value) -> Result<String, AdapterError> {
        let request: AddImageRequest = decode_request(payload)?;
        let slide_number = validate_slide_number("slide_number", request.slide_number)?;
        let image_path = validate_file_path("image_path", &request.image_path)?;
        let (x, y) = validate_coordinates(request.x, request.y, IMAGE_DEFAULT_POSITION)?;
        let doc_name = request.doc_name.unwrap_or_default();
        let call = RoutineCall::new(
            MEDIA_CONTENT_SCRIPT,
            "addImage",
            vec![
                ScriptArg::Text(doc_name),
                ScriptArg::Integer(slide_number),
                ScriptArg::Text(image_path.clone()),
                ScriptArg::Real(x),
                ScriptArg::Real(y),
                ScriptArg::Integer(0),
                ScriptArg::Integer(0),
            ],
        );
        let script = self.catalog.assemble(&call)?;
        self.invoke(&script)?;
        Ok(format!(
            "✅ Added image to slide {slide_number} at position ({}, {}): {image_path}",
            format_real(x),
            format_real(y)
        ))
    }
}

// ============================================================================
// SECTION: Export Handlers
// ============================================================================

impl ToolRouter {
    /// Exports one slide as an image, staging through a temp directory.
    ///
    /// The staging directory is removed when this function returns, on the
    /// success path and on every failure path.
    fn handle_screenshot_slide(&self, payload: Value) -> Result<String, AdapterError> {
        let request: ScreenshotSlideRequest = decode_request(payload)?;
        let slide_number = validate_slide_number("slide_number", request.slide_number)?;
        let output_path = validate_file_path("output_path", &request.output_path)?;
        let export_format = image_export_format(request.format.as_deref());
        let staging = tempfile::tempdir().map_err(|err| {
            AdapterError::FileOperation(format!("failed to create staging directory: {err}"))
        })?;
        let staging_dir = staging.path().display().to_string();
        self.invoke_inline(screenshot_slide_script(
            slide_number,
            export_format,
            &escape_text(&staging_dir),
        ))?;
        let destination = Path::new(&output_path);
        ensure_parent_dir(destination)?;
        let staged = first_staged_file(staging.path())?;
        move_file(&staged, destination)?;
        Ok(format!("✅ Screenshot saved: {output_path}"))
    }

    /// Exports the front presentation as a PDF file.
    fn handle_export_pdf(&self, payload: Value) -> Result<String, AdapterError> {
        let request: ExportPdfRequest = decode_request(payload)?;
        let output_path = validate_file_path("output_path", &request.output_path)?;
        ensure_parent_dir(Path::new(&output_path))?;
        self.invoke_inline(export_pdf_script(&escape_text(&output_path)))?;
        Ok(format!("✅ PDF exported: {output_path}"))
    }

    /// Exports every slide of the front presentation as an image file.
    fn handle_export_images(&self, payload: Value) -> Result<String, AdapterError> {
        let request: ExportImagesRequest = decode_request(payload)?;
        let output_dir = validate_file_path("output_dir", &request.output_dir)?;
        fs::create_dir_all(&output_dir).map_err(|err| {
            AdapterError::FileOperation(format!("failed to create {output_dir}: {err}"))
        })?;
        let export_format = image_export_format(request.format.as_deref());
        self.invoke_inline(export_images_script(export_format, &escape_text(&output_dir)))?;
        Ok(format!("✅ Images exported to: {output_dir}"))
    }
}

// ============================================================================
// SECTION: Decode Helpers
// ============================================================================

/// Decodes scalar routine output, treating no output as an empty value.
fn decode_scalar(raw: &str) -> String {
    match decode_output(raw, &DecodeMode::Scalar) {
        Decoded::Scalar(value) => value,
        _ => String::new(),
    }
}

/// Decodes list routine output, treating no output as an empty list.
fn decode_list(raw: &str, mode: &DecodeMode) -> Vec<String> {
    match decode_output(raw, mode) {
        Decoded::List(items) => items,
        _ => Vec::new(),
    }
}

/// Parses a numeric field reported by a routine.
fn parse_real(field: &str, value: &str) -> Result<f64, AdapterError> {
    value.trim().parse::<f64>().map_err(|_| {
        AdapterError::Unexpected(format!("routine reported a non-numeric {field}: {value}"))
    })
}

// ============================================================================
// SECTION: Response Helpers
// ============================================================================

/// Renders one `•` bullet line per element.
fn bullet_lines(items: &[String]) -> String {
    items.iter().map(|item| format!("• {item}")).collect::<Vec<_>>().join("\n")
}

/// Classifies a width-to-height ratio into a display label.
fn aspect_ratio_label(ratio: f64) -> &'static str {
    if ratio > 1.7 && ratio < 1.8 {
        "16:9"
    } else if ratio > 1.3 && ratio < 1.4 {
        "4:3"
    } else {
        "Custom"
    }
}

/// Maps a requested image format onto the interpreter's export constant.
fn image_export_format(format: Option<&str>) -> &'static str {
    match format {
        Some(value) if value.eq_ignore_ascii_case("jpg") => "JPEG",
        _ => "PNG",
    }
}

// ============================================================================
// SECTION: File Helpers
// ============================================================================

/// Creates the parent directory of a destination path when it has one.
fn ensure_parent_dir(destination: &Path) -> Result<(), AdapterError> {
    if let Some(parent) = destination.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|err| {
            AdapterError::FileOperation(format!("failed to create {}: {err}", parent.display()))
        })?;
    }
    Ok(())
}

/// Returns the first file the interpreter staged into the export directory.
fn first_staged_file(staging: &Path) -> Result<PathBuf, AdapterError> {
    let mut entries = fs::read_dir(staging)
        .map_err(|err| {
            AdapterError::FileOperation(format!("failed to read staging directory: {err}"))
        })?
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .collect::<Vec<_>>();
    entries.sort();
    entries
        .into_iter()
        .next()
        .ok_or_else(|| AdapterError::FileOperation("no screenshot file generated".to_string()))
}

/// Moves a staged file to its destination, copying across filesystems.
fn move_file(source: &Path, destination: &Path) -> Result<(), AdapterError> {
    if fs::rename(source, destination).is_ok() {
        return Ok(());
    }
    fs::copy(source, destination).map_err(|err| {
        AdapterError::FileOperation(format!(
            "failed to move screenshot to {}: {err}",
            destination.display()
        ))
    })?;
    // The staging directory is removed wholesale, so a leftover source is fine.
    let _ = fs::remove_file(source);
    Ok(())
}

// ============================================================================
// SECTION: Script Builders
// ============================================================================

/// Inline script returning open document names as a list string.
const LIST_PRESENTATIONS_SCRIPT: &str = r#"tell application "Keynote"
    set docList to {}
    repeat with doc in documents
        set end of docList to name of doc
    end repeat
    return docList as string
end tell"#;

/// Inline script returning installed theme names joined by `|||`.
const AVAILABLE_THEMES_SCRIPT: &str = r#"tell application "Keynote"
    set themeList to {}
    repeat with t in themes
        set end of themeList to name of t
    end repeat
    set AppleScript's text item delimiters to "|||"
    set themeString to themeList as string
    set AppleScript's text item delimiters to ""
    return themeString
end tell"#;

/// Renders the prologue resolving `targetDoc` from an optional document name.
///
/// Expects `doc_name` pre-escaped; an empty name targets the front document.
fn target_document_block(doc_name: &str) -> String {
    format!(
        r#"    if "{doc_name}" is "" then
        set targetDoc to front document
    else
        set targetDoc to document "{doc_name}"
    end if"#
    )
}

/// Builds the inline script for `create_presentation`.
fn create_presentation_script(title: &str, theme: &str) -> String {
    format!(
        r#"tell application "Keynote"
    activate
    set newDoc to make new document

    if "{theme}" is not "" then
        try
            set theme of newDoc to theme "{theme}"
        on error
            log "Theme {theme} not found, using default theme"
        end try
    end if

    if "{title}" is not "" then
        set desktopPath to (path to desktop as string) & "{title}.key"
        save newDoc in file desktopPath
    end if

    return name of newDoc
end tell"#
    )
}

/// Builds the inline script for `open_presentation`.
fn open_presentation_script(file_path: &str) -> String {
    format!(
        r#"tell application "Keynote"
    activate
    set targetFile to POSIX file "{file_path}"
    open targetFile
    return name of front document
end tell"#
    )
}

/// Builds the inline script for `save_presentation`.
fn save_presentation_script(doc_name: &str) -> String {
    format!(
        r#"tell application "Keynote"
    if "{doc_name}" is "" then
        save front document
        return name of front document
    else
        save document "{doc_name}"
        return "{doc_name}"
    end if
end tell"#
    )
}

/// Builds the inline script for `close_presentation`.
fn close_presentation_script(doc_name: &str, should_save: bool) -> String {
    format!(
        r#"tell application "Keynote"
{target}

    set docName to name of targetDoc

    if {save_flag} then
        save targetDoc
    end if

    close targetDoc
    return docName
end tell"#,
        target = target_document_block(doc_name),
        save_flag = ScriptArg::Bool(should_save).literal(),
    )
}

/// Builds the inline script for `set_presentation_theme`.
fn set_presentation_theme_script(doc_name: &str, theme: &str) -> String {
    format!(
        r#"tell application "Keynote"
{target}

    set themeExists to false
    repeat with t in themes
        if name of t is "{theme}" then
            set themeExists to true
            exit repeat
        end if
    end repeat

    if not themeExists then
        return "theme_not_found"
    end if

    try
        set document theme of targetDoc to theme "{theme}"
        return "success"
    on error errMsg
        return "error: " & errMsg
    end try
end tell"#,
        target = target_document_block(doc_name),
    )
}

/// Builds the inline script for `get_presentation_info`.
fn presentation_info_script(doc_name: &str) -> String {
    format!(
        r#"tell application "Keynote"
{target}

    set docName to name of targetDoc
    set slideCount to count of slides of targetDoc

    try
        set themeName to name of document theme of targetDoc
    on error
        set themeName to "Unknown Theme"
    end try

    set docInfo to {{docName, slideCount, themeName}}
    return docInfo as string
end tell"#,
        target = target_document_block(doc_name),
    )
}

/// Builds the inline script for `get_presentation_resolution`.
fn presentation_resolution_script(doc_name: &str) -> String {
    format!(
        r#"tell application "Keynote"
{target}

    try
        set docWidth to width of targetDoc
        set docHeight to height of targetDoc
        set AppleScript's text item delimiters to ","
        set resolutionInfo to {{docWidth, docHeight}} as string
        set AppleScript's text item delimiters to ""
        return resolutionInfo
    on error
        return "1920,1080"
    end try
end tell"#,
        target = target_document_block(doc_name),
    )
}

/// Builds the inline script for `get_slide_size`.
fn slide_size_script(doc_name: &str) -> String {
    format!(
        r#"tell application "Keynote"
{target}

    try
        set slideWidth to width of targetDoc
        set slideHeight to height of targetDoc
        set aspectRatio to slideWidth / slideHeight

        if aspectRatio > 1.7 and aspectRatio < 1.8 then
            set ratioType to "16:9"
        else if aspectRatio > 1.3 and aspectRatio < 1.4 then
            set ratioType to "4:3"
        else
            set ratioType to "Custom"
        end if

        set AppleScript's text item delimiters to ","
        set sizeInfo to {{slideWidth, slideHeight, aspectRatio, ratioType}} as string
        set AppleScript's text item delimiters to ""
        return sizeInfo
    on error
        return "1920,1080,1.777,16:9"
    end try
end tell"#,
        target = target_document_block(doc_name),
    )
}

/// Builds the inline script for `add_slide`.
fn add_slide_script(doc_name: &str, position: i64, layout: &str) -> String {
    format!(
        r#"tell application "Keynote"
    activate
{target}

    if {position} is 0 then
        set newSlide to make new slide at end of slides of targetDoc
    else
        set newSlide to make new slide at slide {position} of targetDoc
    end if

    if "{layout}" is not "" then
        try
            set base slide of newSlide to master slide "{layout}" of targetDoc
        on error
            try
                set base slide of newSlide to master slide "Blank" of targetDoc
            end try
        end try
    end if

    return slide number of newSlide
end tell"#,
        target = target_document_block(doc_name),
    )
}

/// Builds the inline script for `delete_slide`.
fn delete_slide_script(doc_name: &str, slide_number: i64) -> String {
    format!(
        r#"tell application "Keynote"
{target}

    delete slide {slide_number} of targetDoc
end tell"#,
        target = target_document_block(doc_name),
    )
}

/// Builds the inline script for `duplicate_slide`.
fn duplicate_slide_script(doc_name: &str, slide_number: i64, new_position: i64) -> String {
    format!(
        r#"tell application "Keynote"
{target}

    set sourceSlide to slide {slide_number} of targetDoc
    set newSlide to duplicate sourceSlide

    if {new_position} is not 0 then
        move newSlide to slide {new_position} of targetDoc
    end if

    return slide number of newSlide
end tell"#,
        target = target_document_block(doc_name),
    )
}

/// Builds the inline script for `move_slide`.
fn move_slide_script(doc_name: &str, from_position: i64, to_position: i64) -> String {
    format!(
        r#"tell application "Keynote"
{target}

    set sourceSlide to slide {from_position} of targetDoc
    move sourceSlide to slide {to_position} of targetDoc
end tell"#,
        target = target_document_block(doc_name),
    )
}

/// Builds the inline script for `get_slide_count`.
fn slide_count_script(doc_name: &str) -> String {
    format!(
        r#"tell application "Keynote"
{target}

    return count of slides of targetDoc
end tell"#,
        target = target_document_block(doc_name),
    )
}

/// Builds the inline script for `select_slide`.
fn select_slide_script(doc_name: &str, slide_number: i64) -> String {
    format!(
        r#"tell application "Keynote"
{target}

    set current slide of targetDoc to slide {slide_number} of targetDoc
end tell"#,
        target = target_document_block(doc_name),
    )
}

/// Builds the inline script for `set_slide_layout`.
fn set_slide_layout_script(doc_name: &str, slide_number: i64, layout: &str) -> String {
    format!(
        r#"tell application "Keynote"
{target}

    set targetLayout to missing value
    repeat with masterSlide in master slides of targetDoc
        if name of masterSlide is "{layout}" then
            set targetLayout to masterSlide
            exit repeat
        end if
    end repeat

    if targetLayout is missing value then
        return "layout_not_found"
    end if

    try
        set base slide of slide {slide_number} of targetDoc to targetLayout
        return "success"
    on error errMsg
        return "error: " & errMsg
    end try
end tell"#,
        target = target_document_block(doc_name),
    )
}

/// Builds the inline script for `get_slide_info`.
fn slide_info_script(doc_name: &str, slide_number: i64) -> String {
    format!(
        r#"tell application "Keynote"
{target}

    set targetSlide to slide {slide_number} of targetDoc
    set slideNumber to slide number of targetSlide

    try
        set layoutName to name of base slide of targetSlide
    on error
        set layoutName to "Unknown Layout"
    end try

    try
        set textCount to count of text items of targetSlide
    on error
        set textCount to 0
    end try

    set slideInfo to {{slideNumber, layoutName, textCount}}
    return slideInfo as string
end tell"#,
        target = target_document_block(doc_name),
    )
}

/// Builds the inline script for `get_available_layouts`.
fn available_layouts_script(doc_name: &str) -> String {
    format!(
        r#"tell application "Keynote"
{target}

    set layoutList to {{}}
    repeat with masterSlide in master slides of targetDoc
        set end of layoutList to name of masterSlide
    end repeat

    set AppleScript's text item delimiters to "|||"
    set layoutString to layoutList as string
    set AppleScript's text item delimiters to ""
    return layoutString
end tell"#,
        target = target_document_block(doc_name),
    )
}

/// Builds the inline script for `screenshot_slide`.
///
/// The interpreter writes into the staging directory; the caller moves the
/// staged file to its destination afterwards.
fn screenshot_slide_script(slide_number: i64, export_format: &str, staging_dir: &str) -> String {
    format!(
        r#"tell application "Keynote"
    tell front document
        export slide {slide_number} as {export_format} to POSIX file "{staging_dir}/"
    end tell
end tell"#
    )
}

/// Builds the inline script for `export_pdf`.
fn export_pdf_script(output_path: &str) -> String {
    format!(
        r#"tell application "Keynote"
    tell front document
        export to POSIX file "{output_path}" as PDF
    end tell
end tell"#
    )
}

/// Builds the inline script for `export_images`.
fn export_images_script(export_format: &str, output_dir: &str) -> String {
    format!(
        r#"tell application "Keynote"
    tell front document
        export as {export_format} to POSIX file "{output_dir}/"
    end tell
end tell"#
    )
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests;
