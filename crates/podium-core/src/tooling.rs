// crates/podium-core/src/tooling.rs
// ============================================================================
// Module: Tooling Identifiers
// Description: Canonical MCP tool identifiers for Podium.
// Purpose: Shared tool naming across contracts, routing, and config.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! Canonical tool identifiers used by Podium MCP.
//! These names are part of the external contract surface.

use std::fmt;

use serde::Deserialize;
use serde::Serialize;

/// Canonical tool names for Podium MCP.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolName {
    /// Create a new presentation and save it to the desktop.
    CreatePresentation,
    /// Open a presentation file from disk.
    OpenPresentation,
    /// Save a presentation document.
    SavePresentation,
    /// Close a presentation document, optionally saving first.
    ClosePresentation,
    /// List the names of all open presentations.
    ListPresentations,
    /// Apply a named theme to a presentation.
    SetPresentationTheme,
    /// Fetch name, slide count, and theme for a presentation.
    GetPresentationInfo,
    /// List the theme names installed in the application.
    GetAvailableThemes,
    /// Fetch a presentation's pixel resolution.
    GetPresentationResolution,
    /// Fetch slide dimensions with derived layout guides.
    GetSlideSize,
    /// Insert a new slide.
    AddSlide,
    /// Delete a slide by number.
    DeleteSlide,
    /// Duplicate a slide, optionally moving the copy.
    DuplicateSlide,
    /// Move a slide to a new position.
    MoveSlide,
    /// Count the slides in a presentation.
    GetSlideCount,
    /// Make a slide the current slide.
    SelectSlide,
    /// Apply a named master layout to a slide.
    SetSlideLayout,
    /// Fetch number, layout, and text-item count for a slide.
    GetSlideInfo,
    /// List the master layout names in a presentation.
    GetAvailableLayouts,
    /// Add a text box to a slide.
    AddTextBox,
    /// Add an image from disk to a slide.
    AddImage,
    /// Export one slide as an image file.
    ScreenshotSlide,
    /// Export a presentation as a PDF file.
    ExportPdf,
    /// Export every slide as an image file.
    ExportImages,
}

impl ToolName {
    /// Returns the canonical string name for the tool.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::CreatePresentation => "create_presentation",
            Self::OpenPresentation => "open_presentation",
            Self::SavePresentation => "save_presentation",
            Self::ClosePresentation => "close_presentation",
            Self::ListPresentations => "list_presentations",
            Self::SetPresentationTheme => "set_presentation_theme",
            Self::GetPresentationInfo => "get_presentation_info",
            Self::GetAvailableThemes => "get_available_themes",
            Self::GetPresentationResolution => "get_presentation_resolution",
            Self::GetSlideSize => "get_slide_size",
            Self::AddSlide => "add_slide",
            Self::DeleteSlide => "delete_slide",
            Self::DuplicateSlide => "duplicate_slide",
            Self::MoveSlide => "move_slide",
            Self::GetSlideCount => "get_slide_count",
            Self::SelectSlide => "select_slide",
            Self::SetSlideLayout => "set_slide_layout",
            Self::GetSlideInfo => "get_slide_info",
            Self::GetAvailableLayouts => "get_available_layouts",
            Self::AddTextBox => "add_text_box",
            Self::AddImage => "add_image",
            Self::ScreenshotSlide => "screenshot_slide",
            Self::ExportPdf => "export_pdf",
            Self::ExportImages => "export_images",
        }
    }

    /// Returns all Podium tool names in canonical order.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::CreatePresentation,
            Self::OpenPresentation,
            Self::SavePresentation,
            Self::ClosePresentation,
            Self::ListPresentations,
            Self::SetPresentationTheme,
            Self::GetPresentationInfo,
            Self::GetAvailableThemes,
            Self::GetPresentationResolution,
            Self::GetSlideSize,
            Self::AddSlide,
            Self::DeleteSlide,
            Self::DuplicateSlide,
            Self::MoveSlide,
            Self::GetSlideCount,
            Self::SelectSlide,
            Self::SetSlideLayout,
            Self::GetSlideInfo,
            Self::GetAvailableLayouts,
            Self::AddTextBox,
            Self::AddImage,
            Self::ScreenshotSlide,
            Self::ExportPdf,
            Self::ExportImages,
        ]
    }

    /// Parses a tool name from its string representation.
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "create_presentation" => Some(Self::CreatePresentation),
            "open_presentation" => Some(Self::OpenPresentation),
            "save_presentation" => Some(Self::SavePresentation),
            "close_presentation" => Some(Self::ClosePresentation),
            "list_presentations" => Some(Self::ListPresentations),
            "set_presentation_theme" => Some(Self::SetPresentationTheme),
            "get_presentation_info" => Some(Self::GetPresentationInfo),
            "get_available_themes" => Some(Self::GetAvailableThemes),
            "get_presentation_resolution" => Some(Self::GetPresentationResolution),
            "get_slide_size" => Some(Self::GetSlideSize),
            "add_slide" => Some(Self::AddSlide),
            "delete_slide" => Some(Self::DeleteSlide),
            "duplicate_slide" => Some(Self::DuplicateSlide),
            "move_slide" => Some(Self::MoveSlide),
            "get_slide_count" => Some(Self::GetSlideCount),
            "select_slide" => Some(Self::SelectSlide),
            "set_slide_layout" => Some(Self::SetSlideLayout),
            "get_slide_info" => Some(Self::GetSlideInfo),
            "get_available_layouts" => Some(Self::GetAvailableLayouts),
            "add_text_box" => Some(Self::AddTextBox),
            "add_image" => Some(Self::AddImage),
            "screenshot_slide" => Some(Self::ScreenshotSlide),
            "export_pdf" => Some(Self::ExportPdf),
            "export_images" => Some(Self::ExportImages),
            _ => None,
        }
    }
}

impl fmt::Display for ToolName {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}
