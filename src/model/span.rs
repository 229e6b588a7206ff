//! Span and line types.

use serde::{Deserialize, Serialize};

/// An atomic run of text with uniform typography.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Span {
    /// Raw text (may be whitespace only)
    pub text: String,

    /// Font size in points
    pub size: f32,

    /// Font family name (e.g., "Helvetica-Bold")
    pub font: String,

    /// Style bitmask, see [`SpanFlags`]
    pub flags: u32,

    /// Packed sRGB color (0xRRGGBB)
    pub color: u32,
}

impl Span {
    /// Create a span with the given text and size and no other styling.
    pub fn new(text: impl Into<String>, size: f32) -> Self {
        Self {
            text: text.into(),
            size,
            font: String::new(),
            flags: 0,
            color: 0,
        }
    }

    /// Set the font family.
    pub fn with_font(mut self, font: impl Into<String>) -> Self {
        self.font = font.into();
        self
    }

    /// Set the style flags.
    pub fn with_flags(mut self, flags: u32) -> Self {
        self.flags = flags;
        self
    }

    /// Set the packed color.
    pub fn with_color(mut self, color: u32) -> Self {
        self.color = color;
        self
    }

    /// Whether the span carries any non-whitespace text.
    pub fn has_text(&self) -> bool {
        !self.text.trim().is_empty()
    }

    /// Decoded style flags.
    pub fn style(&self) -> SpanFlags {
        SpanFlags(self.flags)
    }

    /// Color as a `#RRGGBB` hex string.
    pub fn color_hex(&self) -> String {
        format!("#{:06X}", self.color & 0x00FF_FFFF)
    }
}

/// Style bitmask carried by a span.
///
/// Bit layout follows the usual PDF toolkit convention:
/// 1 superscript, 2 italic, 4 serif, 8 monospaced, 16 bold.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct SpanFlags(pub u32);

impl SpanFlags {
    pub const SUPERSCRIPT: u32 = 1;
    pub const ITALIC: u32 = 1 << 1;
    pub const SERIF: u32 = 1 << 2;
    pub const MONOSPACED: u32 = 1 << 3;
    pub const BOLD: u32 = 1 << 4;

    fn has(self, bit: u32) -> bool {
        self.0 & bit != 0
    }

    pub fn is_superscript(self) -> bool {
        self.has(Self::SUPERSCRIPT)
    }

    pub fn is_italic(self) -> bool {
        self.has(Self::ITALIC)
    }

    pub fn is_serif(self) -> bool {
        self.has(Self::SERIF)
    }

    pub fn is_monospaced(self) -> bool {
        self.has(Self::MONOSPACED)
    }

    pub fn is_bold(self) -> bool {
        self.has(Self::BOLD)
    }

    /// Short human-readable description, e.g. "bold italic serif".
    pub fn describe(self) -> String {
        let names = [
            (self.is_bold(), "bold"),
            (self.is_italic(), "italic"),
            (self.is_serif(), "serif"),
            (self.is_monospaced(), "mono"),
            (self.is_superscript(), "superscript"),
        ];
        let parts: Vec<&str> = names
            .iter()
            .filter(|(set, _)| *set)
            .map(|(_, name)| *name)
            .collect();
        if parts.is_empty() {
            "regular".to_string()
        } else {
            parts.join(" ")
        }
    }
}

/// A visual line: spans in reading order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Line {
    /// Spans in this line
    pub spans: Vec<Span>,
}

impl Line {
    /// Create a line from spans.
    pub fn new(spans: Vec<Span>) -> Self {
        Self { spans }
    }

    /// Combined text of all spans.
    pub fn text(&self) -> String {
        self.spans.iter().map(|s| s.text.as_str()).collect()
    }
}
