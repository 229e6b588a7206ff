//! Font usage statistics.
//!
//! Every span in the document is bucketed by a [`StyleKey`] and counted.
//! The most frequent style is taken to be body text. Ties are broken by
//! first appearance, which is why counts are kept in insertion order.

use std::fmt;

use indexmap::IndexMap;
use ordered_float::OrderedFloat;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use super::{Granularity, TaggingOptions};
use crate::error::{Error, Result};
use crate::model::{Page, Span};
use crate::source::SpanSource;

/// Identifier used to bucket spans with the same presentation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum StyleKey {
    /// Size only
    Coarse { size: OrderedFloat<f32> },
    /// Size, flags, font and color
    Granular {
        size: OrderedFloat<f32>,
        flags: u32,
        font: String,
        color: u32,
    },
}

impl StyleKey {
    /// Derive the key for a span.
    pub fn from_span(span: &Span, granularity: Granularity) -> Self {
        let size = OrderedFloat(span.size);
        match granularity {
            Granularity::Coarse => StyleKey::Coarse { size },
            Granularity::Granular => StyleKey::Granular {
                size,
                flags: span.flags,
                font: span.font.clone(),
                color: span.color,
            },
        }
    }

    /// Font size of the style.
    pub fn size(&self) -> f32 {
        match self {
            StyleKey::Coarse { size } | StyleKey::Granular { size, .. } => size.into_inner(),
        }
    }
}

impl fmt::Display for StyleKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StyleKey::Coarse { size } => write!(f, "{}", size),
            StyleKey::Granular {
                size,
                flags,
                font,
                color,
            } => write!(f, "{}_{}_{}_{}", size, flags, font, color),
        }
    }
}

/// Representative attributes of a style.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StyleInfo {
    /// Font size in points
    pub size: f32,
    /// Font family of the last span seen with this style
    pub font: String,
    /// Style flags (granular mode only)
    pub flags: Option<u32>,
    /// Packed color (granular mode only)
    pub color: Option<u32>,
}

impl StyleInfo {
    fn from_span(span: &Span, granularity: Granularity) -> Self {
        let granular = granularity == Granularity::Granular;
        Self {
            size: span.size,
            font: span.font.clone(),
            flags: granular.then_some(span.flags),
            color: granular.then_some(span.color),
        }
    }
}

/// A style and the number of spans using it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FontCount {
    pub key: StyleKey,
    pub count: usize,
}

/// Span counts per style, most frequent first.
#[derive(Debug, Clone)]
pub struct FontHistogram {
    counts: Vec<FontCount>,
    styles: IndexMap<StyleKey, StyleInfo>,
    granularity: Granularity,
}

impl FontHistogram {
    /// Count styles over every span of the document.
    ///
    /// Fails with [`Error::EmptyDocument`] when the document has no spans.
    pub fn compute<S: SpanSource + ?Sized>(source: &S, granularity: Granularity) -> Result<Self> {
        let mut tally = Tally::default();
        for span in source.spans() {
            tally.observe(span, granularity);
        }
        tally.finish(granularity)
    }

    /// Count styles page by page in parallel, then merge in page order.
    ///
    /// Produces the same counts and tie order as [`FontHistogram::compute`].
    pub fn compute_parallel<S: SpanSource + ?Sized>(
        source: &S,
        granularity: Granularity,
    ) -> Result<Self> {
        let tallies: Vec<Tally> = source
            .pages()
            .par_iter()
            .map(|page| Tally::of_page(page, granularity))
            .collect();

        let merged = tallies
            .into_iter()
            .fold(Tally::default(), |mut acc, page_tally| {
                acc.merge(page_tally);
                acc
            });
        merged.finish(granularity)
    }

    /// Compute with the granularity and parallelism from `options`.
    pub fn with_options<S: SpanSource + ?Sized>(source: &S, options: &TaggingOptions) -> Result<Self> {
        if options.parallel {
            Self::compute_parallel(source, options.granularity)
        } else {
            Self::compute(source, options.granularity)
        }
    }

    /// Style counts sorted by count, most frequent first.
    pub fn counts(&self) -> &[FontCount] {
        &self.counts
    }

    /// Attributes per style, in first-seen order.
    pub fn styles(&self) -> &IndexMap<StyleKey, StyleInfo> {
        &self.styles
    }

    /// Look up the attributes of a style.
    pub fn style(&self, key: &StyleKey) -> Option<&StyleInfo> {
        self.styles.get(key)
    }

    /// The most frequent style.
    pub fn dominant(&self) -> &FontCount {
        // A histogram is only built from a non-empty tally.
        &self.counts[0]
    }

    /// Size of the most frequent style, taken to be body text.
    pub fn body_size(&self) -> f32 {
        self.dominant().key.size()
    }

    /// Total number of spans counted.
    pub fn total_spans(&self) -> usize {
        self.counts.iter().map(|c| c.count).sum()
    }

    /// Number of distinct styles.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Always false: empty documents are rejected when computing.
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn granularity(&self) -> Granularity {
        self.granularity
    }
}

/// Running counts in first-seen order.
#[derive(Default)]
struct Tally {
    counts: IndexMap<StyleKey, usize>,
    styles: IndexMap<StyleKey, StyleInfo>,
}

impl Tally {
    fn of_page(page: &Page, granularity: Granularity) -> Self {
        let mut tally = Self::default();
        for span in page.spans() {
            tally.observe(span, granularity);
        }
        tally
    }

    fn observe(&mut self, span: &Span, granularity: Granularity) {
        let key = StyleKey::from_span(span, granularity);
        self.styles
            .insert(key.clone(), StyleInfo::from_span(span, granularity));
        *self.counts.entry(key).or_insert(0) += 1;
    }

    /// Fold a later tally into this one, keeping first-seen order.
    fn merge(&mut self, later: Tally) {
        for (key, count) in later.counts {
            *self.counts.entry(key).or_insert(0) += count;
        }
        for (key, info) in later.styles {
            self.styles.insert(key, info);
        }
    }

    fn finish(self, granularity: Granularity) -> Result<FontHistogram> {
        if self.counts.is_empty() {
            return Err(Error::EmptyDocument);
        }

        let mut counts: Vec<FontCount> = self
            .counts
            .into_iter()
            .map(|(key, count)| FontCount { key, count })
            .collect();
        // Stable: equal counts keep first-seen order.
        counts.sort_by(|a, b| b.count.cmp(&a.count));

        log::debug!(
            "Font histogram: {} styles, dominant {} ({} spans)",
            counts.len(),
            counts[0].key,
            counts[0].count
        );

        Ok(FontHistogram {
            counts,
            styles: self.styles,
            granularity,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Document, Line};

    fn doc_with_pages(pages: Vec<Vec<Span>>) -> Document {
        let mut doc = Document::new();
        for spans in pages {
            let mut page = Page::default();
            page.add_text(vec![Line::new(spans)]);
            doc.add_page(page);
        }
        doc
    }

    #[test]
    fn test_counts_sorted_descending() {
        let mut spans = vec![Span::new("Title", 18.0), Span::new("Sub", 18.0)];
        spans.extend((0..10).map(|i| Span::new(format!("word{}", i), 12.0)));
        let doc = doc_with_pages(vec![spans]);

        let hist = FontHistogram::compute(&doc, Granularity::Coarse).unwrap();
        assert_eq!(hist.len(), 2);
        assert_eq!(hist.counts()[0].count, 10);
        assert_eq!(hist.body_size(), 12.0);
        assert_eq!(hist.counts()[1].key.size(), 18.0);
        assert_eq!(hist.total_spans(), 12);
    }

    #[test]
    fn test_ties_keep_first_seen() {
        let doc = doc_with_pages(vec![vec![
            Span::new("a", 10.0),
            Span::new("b", 14.0),
            Span::new("c", 14.0),
            Span::new("d", 10.0),
        ]]);
        let hist = FontHistogram::compute(&doc, Granularity::Coarse).unwrap();
        assert_eq!(hist.body_size(), 10.0);
    }

    #[test]
    fn test_whitespace_spans_are_counted() {
        let doc = doc_with_pages(vec![vec![Span::new(" ", 8.0), Span::new(" ", 8.0), Span::new("x", 11.0)]]);
        let hist = FontHistogram::compute(&doc, Granularity::Coarse).unwrap();
        assert_eq!(hist.body_size(), 8.0);
    }

    #[test]
    fn test_granular_keys() {
        let doc = doc_with_pages(vec![vec![
            Span::new("a", 12.0).with_font("Times").with_flags(4),
            Span::new("b", 12.0).with_font("Times-Bold").with_flags(20),
            Span::new("c", 12.0).with_font("Times").with_flags(4),
        ]]);

        let coarse = FontHistogram::compute(&doc, Granularity::Coarse).unwrap();
        assert_eq!(coarse.len(), 1);
        let info = coarse.style(&coarse.dominant().key).unwrap();
        assert_eq!(info.flags, None);
        assert_eq!(info.font, "Times");

        let granular = FontHistogram::compute(&doc, Granularity::Granular).unwrap();
        assert_eq!(granular.len(), 2);
        assert_eq!(granular.dominant().count, 2);
        assert_eq!(granular.dominant().key.to_string(), "12_4_Times_0");
        let info = granular.style(&granular.dominant().key).unwrap();
        assert_eq!(info.flags, Some(4));
    }

    #[test]
    fn test_empty_document() {
        let doc = Document::new();
        assert!(matches!(
            FontHistogram::compute(&doc, Granularity::Coarse),
            Err(Error::EmptyDocument)
        ));
        assert!(matches!(
            FontHistogram::compute_parallel(&doc, Granularity::Coarse),
            Err(Error::EmptyDocument)
        ));
    }

    #[test]
    fn test_image_only_document_is_empty() {
        let mut page = Page::new(1);
        page.add_image(vec![0xFF, 0xD8]);
        let doc = Document::from_pages(vec![page]);
        assert!(matches!(
            FontHistogram::compute(&doc, Granularity::Coarse),
            Err(Error::EmptyDocument)
        ));
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let doc = doc_with_pages(vec![
            vec![Span::new("a", 9.0), Span::new("b", 11.0)],
            vec![Span::new("c", 11.0), Span::new("d", 14.0)],
            vec![Span::new("e", 9.0), Span::new("f", 14.0)],
        ]);

        let seq = FontHistogram::compute(&doc, Granularity::Coarse).unwrap();
        let par = FontHistogram::compute_parallel(&doc, Granularity::Coarse).unwrap();
        assert_eq!(seq.counts(), par.counts());
        assert_eq!(par.body_size(), 9.0);
    }
}
