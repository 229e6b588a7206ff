//! Page-level types.

use serde::{Deserialize, Serialize};

use super::payload::ImagePayload;
use super::{Line, Span};
use crate::error::Error;

/// A single page of the parsed document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Page {
    /// Page number (1-indexed, 0 = not yet numbered)
    #[serde(default)]
    pub number: u32,

    /// Page width in points
    #[serde(default)]
    pub width: f32,

    /// Page height in points
    #[serde(default)]
    pub height: f32,

    /// Blocks in source order
    pub blocks: Vec<Block>,
}

impl Page {
    /// Create an empty page.
    pub fn new(number: u32) -> Self {
        Self {
            number,
            ..Default::default()
        }
    }

    /// Set page dimensions.
    pub fn with_size(mut self, width: f32, height: f32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Add a block to the page.
    pub fn add_block(&mut self, block: Block) {
        self.blocks.push(block);
    }

    /// Add a text block built from lines.
    pub fn add_text(&mut self, lines: Vec<Line>) {
        self.blocks.push(Block::Text { lines });
    }

    /// Add an image block.
    pub fn add_image(&mut self, data: Vec<u8>) {
        self.blocks.push(Block::Image { data });
    }

    /// All spans on the page, in block/line order.
    pub fn spans(&self) -> impl Iterator<Item = &Span> {
        self.blocks.iter().flat_map(|block| block.spans())
    }

    /// Number of image blocks on the page.
    pub fn image_count(&self) -> usize {
        self.blocks.iter().filter(|b| b.is_image()).count()
    }

    /// Check if the page has no blocks.
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}

/// A block on a page: either text or an image.
///
/// Serialized in the span dump layout, where `"type": 0` marks a text
/// block carrying `lines` and `"type": 1` an image block carrying `image`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawBlock", into = "RawBlock")]
pub enum Block {
    /// Lines of styled spans
    Text {
        /// Lines in reading order
        lines: Vec<Line>,
    },

    /// An embedded image
    Image {
        /// Raw encoded image bytes
        data: Vec<u8>,
    },
}

impl Block {
    /// Create a text block.
    pub fn text(lines: Vec<Line>) -> Self {
        Block::Text { lines }
    }

    /// Create an image block.
    pub fn image(data: Vec<u8>) -> Self {
        Block::Image { data }
    }

    /// Check if this block carries text.
    pub fn is_text(&self) -> bool {
        matches!(self, Block::Text { .. })
    }

    /// Check if this block is an image.
    pub fn is_image(&self) -> bool {
        matches!(self, Block::Image { .. })
    }

    /// Spans of a text block (empty for images).
    pub fn spans(&self) -> impl Iterator<Item = &Span> {
        let lines: &[Line] = match self {
            Block::Text { lines } => lines,
            Block::Image { .. } => &[],
        };
        lines.iter().flat_map(|line| line.spans.iter())
    }
}

const TEXT_BLOCK: u8 = 0;
const IMAGE_BLOCK: u8 = 1;

#[derive(Serialize, Deserialize)]
struct RawBlock {
    #[serde(rename = "type")]
    kind: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    lines: Option<Vec<Line>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    image: Option<ImagePayload>,
}

impl TryFrom<RawBlock> for Block {
    type Error = Error;

    fn try_from(raw: RawBlock) -> Result<Self, Self::Error> {
        match raw.kind {
            TEXT_BLOCK => raw
                .lines
                .map(|lines| Block::Text { lines })
                .ok_or_else(|| Error::MalformedBlock("text block without lines".to_string())),
            IMAGE_BLOCK => match raw.image {
                Some(payload) => Ok(Block::Image {
                    data: payload.into_bytes()?,
                }),
                None => Err(Error::MalformedBlock(
                    "image block without image data".to_string(),
                )),
            },
            other => Err(Error::MalformedBlock(format!("unknown block type {}", other))),
        }
    }
}

impl From<Block> for RawBlock {
    fn from(block: Block) -> Self {
        match block {
            Block::Text { lines } => RawBlock {
                kind: TEXT_BLOCK,
                lines: Some(lines),
                image: None,
            },
            Block::Image { data } => RawBlock {
                kind: IMAGE_BLOCK,
                lines: None,
                image: Some(ImagePayload::Bytes(data)),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_spans_skip_images() {
        let mut page = Page::new(1);
        page.add_text(vec![Line::new(vec![Span::new("a", 10.0), Span::new("b", 10.0)])]);
        page.add_image(vec![1, 2, 3]);
        page.add_text(vec![Line::new(vec![Span::new("c", 12.0)])]);

        let texts: Vec<&str> = page.spans().map(|s| s.text.as_str()).collect();
        assert_eq!(texts, vec!["a", "b", "c"]);
        assert_eq!(page.image_count(), 1);
    }

    #[test]
    fn test_block_from_dump() {
        let json = r#"{"type": 0, "bbox": [0, 0, 1, 1], "lines": [{"spans": [
            {"text": "Hi", "size": 12.0, "font": "Arial", "flags": 0, "color": 0}]}]}"#;
        let block: Block = serde_json::from_str(json).unwrap();
        assert!(block.is_text());
        assert_eq!(block.spans().count(), 1);

        let json = r#"{"type": 1, "image": "AQID", "ext": "png"}"#;
        let block: Block = serde_json::from_str(json).unwrap();
        assert_eq!(block, Block::image(vec![1, 2, 3]));
    }

    #[test]
    fn test_malformed_blocks() {
        let missing_lines = r#"{"type": 0}"#;
        let err = serde_json::from_str::<Block>(missing_lines).unwrap_err();
        assert!(err.to_string().contains("text block without lines"));

        let missing_image = r#"{"type": 1}"#;
        assert!(serde_json::from_str::<Block>(missing_image).is_err());

        let unknown = r#"{"type": 7, "lines": []}"#;
        let err = serde_json::from_str::<Block>(unknown).unwrap_err();
        assert!(err.to_string().contains("unknown block type 7"));
    }

    #[test]
    fn test_block_serializes_in_dump_layout() {
        let block = Block::text(vec![Line::new(vec![Span::new("x", 9.0)])]);
        let value = serde_json::to_value(&block).unwrap();
        assert_eq!(value["type"], 0);
        assert!(value.get("image").is_none());
    }
}
