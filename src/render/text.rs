//! Plain text rendering for tagged blocks.

use crate::analysis::TaggingResult;
use crate::error::Result;
use crate::model::TaggedBlock;

use super::{CleanupPipeline, RenderOptions};

/// Convert tagged blocks to plain text, one block per paragraph.
pub fn to_text(result: &TaggingResult, options: &RenderOptions) -> Result<String> {
    let mut output = result
        .tagged()
        .map(|block| render_block(block, options))
        .collect::<Vec<_>>()
        .join("\n\n");

    if let Some(ref cleanup_options) = options.cleanup {
        let pipeline = CleanupPipeline::new(cleanup_options.clone());
        output = pipeline.process(&output);
    }

    Ok(output.trim().to_string())
}

/// Body of a block with its source lines joined per the options.
pub(crate) fn block_body(block: &TaggedBlock, options: &RenderOptions) -> String {
    let separator = if options.preserve_line_breaks { "\n" } else { " " };
    block
        .lines(options.line_marker)
        .collect::<Vec<_>>()
        .join(separator)
}

fn render_block(block: &TaggedBlock, options: &RenderOptions) -> String {
    let body = block_body(block, options);
    match block.tag {
        Some(tag) if options.include_tags => format!("{}{}", tag, body),
        _ => body,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::StructuralTag;

    fn sample() -> TaggingResult {
        TaggingResult {
            blocks: vec![
                TaggedBlock::new(StructuralTag::Heading(1), "Intro|"),
                TaggedBlock::untagged("||"),
                TaggedBlock::new(StructuralTag::Paragraph, "First line| second line|"),
            ],
            ..Default::default()
        }
    }

    #[test]
    fn test_to_text() {
        let text = to_text(&sample(), &RenderOptions::default()).unwrap();
        assert_eq!(text, "Intro\n\nFirst line second line");
    }

    #[test]
    fn test_to_text_with_tags_and_breaks() {
        let options = RenderOptions::new().with_tags(true).with_line_breaks(true);
        let text = to_text(&sample(), &options).unwrap();
        assert_eq!(text, "<h1>Intro\n\n<p>First line\nsecond line");
    }

    #[test]
    fn test_to_text_with_cleanup() {
        let result = TaggingResult {
            blocks: vec![TaggedBlock::new(StructuralTag::Paragraph, "e\u{FB03}cient   code|")],
            ..Default::default()
        };
        let options = RenderOptions::new().with_cleanup(Default::default());
        assert_eq!(to_text(&result, &options).unwrap(), "efficient code");
    }
}
