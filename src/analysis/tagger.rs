//! Mapping from font size to structural tag.

use indexmap::IndexMap;
use ordered_float::OrderedFloat;

use super::FontHistogram;
use crate::error::{Error, Result};
use crate::model::StructuralTag;

/// One structural tag per distinct font size in the document.
///
/// The size of the most frequent style is body text (`<p>`). Larger sizes
/// become headings ranked from the largest down, smaller sizes become
/// subnotes ranked from just below the body size.
#[derive(Debug, Clone, PartialEq)]
pub struct SizeTagTable {
    baseline: OrderedFloat<f32>,
    /// Sizes in descending order.
    tags: IndexMap<OrderedFloat<f32>, StructuralTag>,
}

impl SizeTagTable {
    /// Build the table from a histogram.
    pub fn build(histogram: &FontHistogram) -> Self {
        let baseline = OrderedFloat(histogram.body_size());

        let mut sizes: Vec<OrderedFloat<f32>> = histogram
            .styles()
            .keys()
            .map(|key| OrderedFloat(key.size()))
            .collect();
        sizes.sort_by(|a, b| b.cmp(a));
        sizes.dedup();

        let mut rank = 0;
        let mut tags = IndexMap::with_capacity(sizes.len());
        for size in sizes {
            rank += 1;
            let tag = if size == baseline {
                rank = 0;
                StructuralTag::Paragraph
            } else if size > baseline {
                StructuralTag::Heading(rank)
            } else {
                StructuralTag::Subnote(rank)
            };
            tags.insert(size, tag);
        }

        log::debug!(
            "Size tags: baseline {}, {} distinct sizes",
            baseline,
            tags.len()
        );

        Self { baseline, tags }
    }

    /// Tag for a font size.
    ///
    /// Fails with [`Error::MissingSizeTag`] for a size the document never used.
    pub fn lookup(&self, size: f32) -> Result<StructuralTag> {
        self.get(size).ok_or(Error::MissingSizeTag(size))
    }

    /// Tag for a font size, if registered.
    pub fn get(&self, size: f32) -> Option<StructuralTag> {
        self.tags.get(&OrderedFloat(size)).copied()
    }

    /// Body text size.
    pub fn baseline(&self) -> f32 {
        self.baseline.into_inner()
    }

    /// Sizes and their tags, largest size first.
    pub fn iter(&self) -> impl Iterator<Item = (f32, StructuralTag)> + '_ {
        self.tags.iter().map(|(size, tag)| (size.into_inner(), *tag))
    }

    /// Number of distinct sizes.
    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::Granularity;
    use crate::model::{Document, Line, Page, Span};

    /// One page whose spans have the given (size, count) usage, in order.
    fn histogram(usage: &[(f32, usize)], granularity: Granularity) -> FontHistogram {
        let spans = usage
            .iter()
            .flat_map(|&(size, count)| (0..count).map(move |i| Span::new(format!("w{}", i), size)))
            .collect();
        let mut page = Page::new(1);
        page.add_text(vec![Line::new(spans)]);
        FontHistogram::compute(&Document::from_pages(vec![page]), granularity).unwrap()
    }

    #[test]
    fn test_heading_over_body() {
        let table = SizeTagTable::build(&histogram(&[(18.0, 2), (12.0, 10)], Granularity::Coarse));
        assert_eq!(table.baseline(), 12.0);
        assert_eq!(table.lookup(12.0).unwrap(), StructuralTag::Paragraph);
        assert_eq!(table.lookup(18.0).unwrap(), StructuralTag::Heading(1));
    }

    #[test]
    fn test_ranks_around_body() {
        let table = SizeTagTable::build(&histogram(
            &[(24.0, 1), (12.0, 20), (18.0, 3), (9.0, 4), (7.5, 2), (14.0, 5)],
            Granularity::Coarse,
        ));

        let tags: Vec<(f32, StructuralTag)> = table.iter().collect();
        assert_eq!(
            tags,
            vec![
                (24.0, StructuralTag::Heading(1)),
                (18.0, StructuralTag::Heading(2)),
                (14.0, StructuralTag::Heading(3)),
                (12.0, StructuralTag::Paragraph),
                (9.0, StructuralTag::Subnote(1)),
                (7.5, StructuralTag::Subnote(2)),
            ]
        );
    }

    #[test]
    fn test_body_is_largest() {
        let table = SizeTagTable::build(&histogram(&[(12.0, 5), (10.0, 1), (8.0, 1)], Granularity::Coarse));
        assert!(table.iter().all(|(_, tag)| !tag.is_heading()));
        assert_eq!(table.lookup(10.0).unwrap(), StructuralTag::Subnote(1));
        assert_eq!(table.lookup(8.0).unwrap(), StructuralTag::Subnote(2));
    }

    #[test]
    fn test_single_size() {
        let table = SizeTagTable::build(&histogram(&[(11.0, 3)], Granularity::Coarse));
        assert_eq!(table.len(), 1);
        assert_eq!(table.lookup(11.0).unwrap(), StructuralTag::Paragraph);
    }

    #[test]
    fn test_granular_sizes_are_deduplicated() {
        let spans = vec![
            Span::new("A", 16.0).with_flags(16),
            Span::new("B", 16.0).with_flags(2),
            Span::new("c", 10.0),
            Span::new("d", 10.0),
            Span::new("e", 10.0),
        ];
        let mut page = Page::new(1);
        page.add_text(vec![Line::new(spans)]);
        let hist = FontHistogram::compute(&Document::from_pages(vec![page]), Granularity::Granular).unwrap();
        assert_eq!(hist.len(), 3);

        let table = SizeTagTable::build(&hist);
        assert_eq!(table.len(), 2);
        assert_eq!(table.lookup(16.0).unwrap(), StructuralTag::Heading(1));
    }

    #[test]
    fn test_missing_size() {
        let table = SizeTagTable::build(&histogram(&[(12.0, 1)], Granularity::Coarse));
        assert!(matches!(table.lookup(13.0), Err(Error::MissingSizeTag(s)) if s == 13.0));
        assert_eq!(table.get(13.0), None);
    }
}
