//! The seam between a document parser and the analysis.
//!
//! Anything that can hand out pages of text and image blocks can be
//! analyzed. [`Document`] is the in-memory implementation used by the
//! span dump loader.

use crate::model::{Document, Page, Span};

/// A read-only source of pages, each an ordered sequence of blocks.
pub trait SpanSource {
    /// Pages in document order.
    fn pages(&self) -> &[Page];

    /// All text spans in document order.
    fn spans(&self) -> impl Iterator<Item = &Span> {
        self.pages().iter().flat_map(|page| page.spans())
    }
}

impl SpanSource for Document {
    fn pages(&self) -> &[Page] {
        &self.pages
    }
}

impl SpanSource for [Page] {
    fn pages(&self) -> &[Page] {
        self
    }
}

impl SpanSource for Vec<Page> {
    fn pages(&self) -> &[Page] {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Line;

    #[test]
    fn test_page_slice_source() {
        let mut page = Page::new(1);
        page.add_text(vec![Line::new(vec![Span::new("a", 9.0), Span::new(" ", 9.0)])]);
        let pages = vec![page];

        assert_eq!(pages.spans().count(), 2);
        assert_eq!(pages.as_slice().pages().len(), 1);
    }
}
