//! # typotag
//!
//! Infer document structure from typography alone.
//!
//! Given the styled spans a PDF toolkit extracts from each page, typotag
//! finds the most common font size (body text), ranks every other size
//! against it, and walks the spans again to produce a flat list of tagged
//! blocks: `<h1>`, `<h2>`, ... for larger text, `<p>` for body text and
//! `<s1>`, `<s2>`, ... for smaller notes.
//!
//! ## Quick Start
//!
//! ```no_run
//! use typotag::{analyze_file, render};
//!
//! fn main() -> typotag::Result<()> {
//!     let analysis = analyze_file("spans.json")?;
//!
//!     for block in &analysis.result.blocks {
//!         println!("{}", block.rendered());
//!     }
//!
//!     let markdown = render::to_markdown(&analysis.result, &render::RenderOptions::default())?;
//!     println!("{}", markdown);
//!     Ok(())
//! }
//! ```
//!
//! ## Input
//!
//! Spans come from any [`SpanSource`]. [`Document`] implements it and can
//! be loaded from a JSON span dump (`{"pages": [{"blocks": [...]}]}` with
//! `"type": 0` text blocks and `"type": 1` image blocks).

pub mod analysis;
pub mod error;
pub mod model;
pub mod render;
pub mod source;

pub use analysis::{
    tag_blocks, FontCount, FontHistogram, Granularity, SizeTagTable, StyleInfo, StyleKey,
    TaggingOptions, TaggingResult,
};
pub use error::{Error, Result};
pub use model::{
    Block, Document, ImageAttachment, Line, Page, Span, SpanFlags, StructuralTag, TaggedBlock,
};
pub use render::{CleanupPreset, JsonFormat, RenderOptions};
pub use source::SpanSource;

use std::path::Path;

/// Everything the analysis produced for one document.
#[derive(Debug, Clone)]
pub struct Analysis {
    /// Style usage counts
    pub histogram: FontHistogram,
    /// Size to tag mapping
    pub table: SizeTagTable,
    /// Tagged blocks, images and anchors
    pub result: TaggingResult,
}

/// Count style usage over a document.
pub fn font_histogram<S: SpanSource + ?Sized>(
    source: &S,
    options: &TaggingOptions,
) -> Result<FontHistogram> {
    FontHistogram::with_options(source, options)
}

/// Run the full pipeline with default options.
///
/// # Example
///
/// ```
/// use typotag::{analyze, Document, Line, Page, Span};
///
/// let mut page = Page::new(1);
/// page.add_text(vec![Line::new(vec![Span::new("Hello", 12.0), Span::new("World", 12.0)])]);
/// let doc = Document::from_pages(vec![page]);
///
/// let analysis = analyze(&doc).unwrap();
/// assert_eq!(analysis.result.blocks[0].rendered(), "<p>Hello World|");
/// ```
pub fn analyze<S: SpanSource + ?Sized>(source: &S) -> Result<Analysis> {
    analyze_with_options(source, &TaggingOptions::default())
}

/// Run the full pipeline with custom options.
pub fn analyze_with_options<S: SpanSource + ?Sized>(
    source: &S,
    options: &TaggingOptions,
) -> Result<Analysis> {
    let histogram = font_histogram(source, options)?;
    let table = SizeTagTable::build(&histogram);
    let result = tag_blocks(source, &table, options)?;
    Ok(Analysis {
        histogram,
        table,
        result,
    })
}

/// Load a JSON span dump and run the pipeline with default options.
pub fn analyze_file<P: AsRef<Path>>(path: P) -> Result<Analysis> {
    let doc = Document::open(path)?;
    analyze(&doc)
}

/// Builder for analyzing documents.
///
/// # Example
///
/// ```no_run
/// use typotag::Typotag;
///
/// let analysis = Typotag::new()
///     .granular()
///     .sequential()
///     .with_anchor_level(3)
///     .analyze_file("spans.json")?;
/// println!("{} blocks", analysis.result.blocks.len());
/// # Ok::<(), typotag::Error>(())
/// ```
pub struct Typotag {
    options: TaggingOptions,
}

impl Typotag {
    /// Create a new builder with default options.
    pub fn new() -> Self {
        Self {
            options: TaggingOptions::default(),
        }
    }

    /// Distinguish styles by size, flags, font and color.
    pub fn granular(mut self) -> Self {
        self.options = self.options.granular();
        self
    }

    /// Disable parallel processing.
    pub fn sequential(mut self) -> Self {
        self.options = self.options.sequential();
        self
    }

    /// Set the heading level that gates image collection.
    pub fn with_anchor_level(mut self, level: u32) -> Self {
        self.options = self.options.with_anchor_level(level);
        self
    }

    /// Set the line-boundary marker.
    pub fn with_line_marker(mut self, marker: char) -> Self {
        self.options = self.options.with_line_marker(marker);
        self
    }

    /// Replace all options.
    pub fn with_options(mut self, options: TaggingOptions) -> Self {
        self.options = options;
        self
    }

    /// The options this builder will analyze with.
    pub fn options(&self) -> &TaggingOptions {
        &self.options
    }

    /// Analyze an in-memory source.
    pub fn analyze<S: SpanSource + ?Sized>(&self, source: &S) -> Result<Analysis> {
        analyze_with_options(source, &self.options)
    }

    /// Load a JSON span dump and analyze it.
    pub fn analyze_file<P: AsRef<Path>>(&self, path: P) -> Result<Analysis> {
        let doc = Document::open(path)?;
        self.analyze(&doc)
    }

    /// Parse a JSON span dump from a string and analyze it.
    pub fn analyze_json(&self, json: &str) -> Result<Analysis> {
        let doc = Document::from_json_str(json)?;
        self.analyze(&doc)
    }
}

impl Default for Typotag {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let builder = Typotag::new().granular().sequential().with_anchor_level(2);
        assert_eq!(builder.options().granularity, Granularity::Granular);
        assert!(!builder.options().parallel);
        assert_eq!(builder.options().anchor_level, 2);
    }

    #[test]
    fn test_builder_default() {
        let builder = Typotag::default();
        assert_eq!(builder.options().granularity, Granularity::Coarse);
        assert_eq!(builder.options().line_marker, '|');
    }

    #[test]
    fn test_analyze_empty_document() {
        let result = analyze(&Document::new());
        assert!(matches!(result, Err(Error::EmptyDocument)));
    }

    #[test]
    fn test_analyze_json() {
        let json = r#"[{"blocks": [{"type": 0, "lines": [{"spans": [
            {"text": "Big", "size": 18.0, "font": "F", "flags": 0, "color": 0}]}]},
            {"type": 0, "lines": [{"spans": [
            {"text": "small", "size": 12.0, "font": "F", "flags": 0, "color": 0},
            {"text": "text", "size": 12.0, "font": "F", "flags": 0, "color": 0}]}]}]}]"#;

        let analysis = Typotag::new().analyze_json(json).unwrap();
        assert_eq!(analysis.table.baseline(), 12.0);
        let rendered: Vec<String> = analysis.result.blocks.iter().map(|b| b.rendered()).collect();
        assert_eq!(rendered, vec!["<h1>Big|", "", "<p>small text|"]);
    }

    #[test]
    fn test_analyze_json_malformed() {
        let result = Typotag::new().analyze_json(r#"[{"blocks": [{"type": 0}]}]"#);
        assert!(matches!(result, Err(Error::Json(_))));
    }
}
