//! Markdown rendering for tagged blocks.

use crate::analysis::TaggingResult;
use crate::error::Result;
use crate::model::{StructuralTag, TaggedBlock};

use super::text::block_body;
use super::{image_file_name, CleanupPipeline, RenderOptions};

/// Convert tagged blocks to Markdown.
pub fn to_markdown(result: &TaggingResult, options: &RenderOptions) -> Result<String> {
    let renderer = MarkdownRenderer::new(options.clone());
    renderer.render(result)
}

/// Markdown renderer.
///
/// Headings become ATX headings (`#` per level, capped at the configured
/// maximum), paragraphs stay plain and subnotes are set in italics.
pub struct MarkdownRenderer {
    options: RenderOptions,
}

impl MarkdownRenderer {
    /// Create a new Markdown renderer.
    pub fn new(options: RenderOptions) -> Self {
        Self { options }
    }

    /// Render tagged blocks to Markdown.
    pub fn render(self, result: &TaggingResult) -> Result<String> {
        let mut output = String::new();

        for (index, block) in result.blocks.iter().enumerate() {
            if !block.is_empty() {
                self.render_block(&mut output, block);
            }
            self.render_images(&mut output, result, index);
        }

        if let Some(ref cleanup_options) = self.options.cleanup {
            let pipeline = CleanupPipeline::new(cleanup_options.clone());
            output = pipeline.process(&output);
        }

        Ok(output.trim().to_string())
    }

    fn render_block(&self, output: &mut String, block: &TaggedBlock) {
        match block.tag {
            Some(StructuralTag::Heading(level)) => {
                let depth = level.min(u32::from(self.options.max_heading_level)) as usize;
                output.push_str(&"#".repeat(depth));
                output.push(' ');
                output.push_str(&block.plain_text(self.options.line_marker));
            }
            Some(StructuralTag::Subnote(_)) => {
                let body = block.plain_text(self.options.line_marker);
                output.push('*');
                output.push_str(&escape_emphasis(&body));
                output.push('*');
            }
            Some(StructuralTag::Paragraph) | None => {
                let body = block_body(block, &self.options);
                if self.options.preserve_line_breaks {
                    output.push_str(&body.replace('\n', "  \n"));
                } else {
                    output.push_str(&body);
                }
            }
        }
        output.push_str("\n\n");
    }

    /// Image links for images anchored at block `index`.
    fn render_images(&self, output: &mut String, result: &TaggingResult, index: usize) {
        let Some(ref prefix) = self.options.image_path_prefix else {
            return;
        };

        for (i, image) in result.images.iter().enumerate() {
            if image.anchor != index {
                continue;
            }
            if let Some(name) = image_file_name(result, i, self.options.line_marker) {
                let alt = result.blocks[index].plain_text(self.options.line_marker);
                output.push_str(&format!("![{}]({}{})\n\n", alt, prefix, name));
            }
        }
    }
}

fn escape_emphasis(text: &str) -> String {
    text.replace('*', "\\*")
}
