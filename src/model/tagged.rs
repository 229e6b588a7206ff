//! Tagged output blocks.

use serde::{Deserialize, Serialize};

use super::payload::base64_bytes;
use super::StructuralTag;

/// A run of text sharing one structural tag.
///
/// `text` holds the span texts joined by single spaces, with a line marker
/// appended wherever a source line ended. Blocks flushed before any text
/// arrived (empty or marker-only) carry no tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaggedBlock {
    /// Tag of the block's first span
    pub tag: Option<StructuralTag>,

    /// Body text with embedded line markers
    pub text: String,
}

impl TaggedBlock {
    /// Create a tagged block.
    pub fn new(tag: StructuralTag, text: impl Into<String>) -> Self {
        Self {
            tag: Some(tag),
            text: text.into(),
        }
    }

    /// Create a block with no tag (only line markers or nothing).
    pub fn untagged(text: impl Into<String>) -> Self {
        Self {
            tag: None,
            text: text.into(),
        }
    }

    /// Tag prefix followed by the body, e.g. `<h1>Intro|`.
    pub fn rendered(&self) -> String {
        match self.tag {
            Some(tag) => format!("{}{}", tag, self.text),
            None => self.text.clone(),
        }
    }

    /// Source lines of the block, trimmed, without markers.
    pub fn lines(&self, marker: char) -> impl Iterator<Item = &str> {
        self.text
            .split(marker)
            .map(str::trim)
            .filter(|line| !line.is_empty())
    }

    /// Text with markers removed and lines joined by spaces.
    pub fn plain_text(&self, marker: char) -> String {
        self.lines(marker).collect::<Vec<_>>().join(" ")
    }

    /// Whether this block is a heading at exactly `level`.
    pub fn is_heading_level(&self, level: u32) -> bool {
        self.tag.is_some_and(|tag| tag.is_heading_level(level))
    }

    /// True when no span text ever reached this block.
    pub fn is_empty(&self) -> bool {
        self.tag.is_none()
    }
}

/// Image bytes collected after an anchor heading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageAttachment {
    /// Raw encoded image bytes
    #[serde(with = "base64_bytes")]
    pub data: Vec<u8>,

    /// Index into the block list of the latest anchor heading seen before the image
    pub anchor: usize,
}

impl ImageAttachment {
    /// Size of the payload in bytes.
    pub fn size(&self) -> usize {
        self.data.len()
    }
}
