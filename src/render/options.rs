//! Rendering options and configuration.

use super::{CleanupOptions, CleanupPreset};
use crate::analysis::DEFAULT_LINE_MARKER;

/// Options for rendering tagged blocks.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Line marker used when the blocks were tagged
    pub line_marker: char,

    /// Keep source line breaks instead of joining lines with spaces
    pub preserve_line_breaks: bool,

    /// Maximum Markdown heading level (1-6)
    pub max_heading_level: u8,

    /// Keep `<p>`/`<hN>`/`<sN>` prefixes in plain text output
    pub include_tags: bool,

    /// Path prefix for image links in Markdown (None = no image links)
    pub image_path_prefix: Option<String>,

    /// Text cleanup options
    pub cleanup: Option<CleanupOptions>,
}

impl RenderOptions {
    /// Create new render options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the line marker the blocks were tagged with.
    pub fn with_line_marker(mut self, marker: char) -> Self {
        self.line_marker = marker;
        self
    }

    /// Enable or disable line break preservation.
    pub fn with_line_breaks(mut self, preserve: bool) -> Self {
        self.preserve_line_breaks = preserve;
        self
    }

    /// Set the maximum heading level.
    pub fn with_max_heading(mut self, level: u8) -> Self {
        self.max_heading_level = level.clamp(1, 6);
        self
    }

    /// Keep tag prefixes in text output.
    pub fn with_tags(mut self, include: bool) -> Self {
        self.include_tags = include;
        self
    }

    /// Link images in Markdown output under this prefix.
    pub fn with_image_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.image_path_prefix = Some(prefix.into());
        self
    }

    /// Set cleanup options.
    pub fn with_cleanup(mut self, cleanup: CleanupOptions) -> Self {
        self.cleanup = Some(cleanup);
        self
    }

    /// Set cleanup preset.
    pub fn with_cleanup_preset(mut self, preset: CleanupPreset) -> Self {
        self.cleanup = Some(CleanupOptions::from_preset(preset));
        self
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            line_marker: DEFAULT_LINE_MARKER,
            preserve_line_breaks: false,
            max_heading_level: 6,
            include_tags: false,
            image_path_prefix: None,
            cleanup: None,
        }
    }
}
