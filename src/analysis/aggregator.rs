//! Block aggregation: turning spans into tagged text blocks.
//!
//! The document is flattened into a stream of [`Event`]s and folded through
//! an [`Aggregator`]. Consecutive spans of the same size accumulate into one
//! block; a size change flushes the block and starts a new one. Every source
//! text block ends with a flush of its own, and every source line appends a
//! line marker to whatever is accumulating.

use std::iter;

use serde::{Deserialize, Serialize};

use super::{SizeTagTable, TaggingOptions};
use crate::error::Result;
use crate::model::{Block, ImageAttachment, Line, Span, StructuralTag, TaggedBlock};
use crate::source::SpanSource;

/// Output of the aggregation pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaggingResult {
    /// Tagged blocks in document order
    pub blocks: Vec<TaggedBlock>,

    /// Images seen after the first anchor heading
    pub images: Vec<ImageAttachment>,

    /// Blocks tagged at the anchor heading level, in document order
    pub anchors: Vec<TaggedBlock>,
}

impl TaggingResult {
    /// Pair the i-th image with the i-th anchor block.
    ///
    /// This is a positional convention only; use [`ImageAttachment::anchor`]
    /// for the heading that actually preceded each image.
    pub fn pairs(&self) -> impl Iterator<Item = (&ImageAttachment, &TaggedBlock)> {
        self.images.iter().zip(self.anchors.iter())
    }

    /// The anchor heading that preceded an image.
    pub fn anchor_of(&self, image: &ImageAttachment) -> Option<&TaggedBlock> {
        self.blocks.get(image.anchor)
    }

    /// Blocks that received a tag.
    pub fn tagged(&self) -> impl Iterator<Item = &TaggedBlock> {
        self.blocks.iter().filter(|b| !b.is_empty())
    }

    /// Heading blocks of any level.
    pub fn headings(&self) -> impl Iterator<Item = &TaggedBlock> {
        self.blocks
            .iter()
            .filter(|b| b.tag.is_some_and(|t| t.is_heading()))
    }
}

/// Walk the document and emit tagged blocks.
///
/// Fails with [`crate::Error::MissingSizeTag`] if a span size is absent from
/// `table`, which only happens when the table was built for another document.
pub fn tag_blocks<S: SpanSource + ?Sized>(
    source: &S,
    table: &SizeTagTable,
    options: &TaggingOptions,
) -> Result<TaggingResult> {
    let aggregator = events(source).try_fold(
        Aggregator::new(table, options),
        |mut aggregator, event| -> Result<_> {
            aggregator.step(event)?;
            Ok(aggregator)
        },
    )?;
    let result = aggregator.finish();

    log::debug!(
        "Tagged {} blocks, {} anchors, {} images",
        result.blocks.len(),
        result.anchors.len(),
        result.images.len()
    );
    Ok(result)
}

/// One step of the flattened block/line/span walk.
#[derive(Debug, Clone, Copy)]
enum Event<'a> {
    BlockStart,
    Span(&'a Span),
    LineEnd,
    BlockEnd,
    Image(&'a [u8]),
}

fn events<S: SpanSource + ?Sized>(source: &S) -> impl Iterator<Item = Event<'_>> {
    source
        .pages()
        .iter()
        .flat_map(|page| page.blocks.iter())
        .flat_map(block_events)
}

fn block_events(block: &Block) -> Box<dyn Iterator<Item = Event<'_>> + '_> {
    match block {
        Block::Text { lines } => Box::new(
            iter::once(Event::BlockStart)
                .chain(lines.iter().flat_map(line_events))
                .chain(iter::once(Event::BlockEnd)),
        ),
        Block::Image { data } => Box::new(iter::once(Event::Image(data.as_slice()))),
    }
}

fn line_events(line: &Line) -> impl Iterator<Item = Event<'_>> {
    line.spans
        .iter()
        .map(Event::Span)
        .chain(iter::once(Event::LineEnd))
}

/// How a span relates to the block being accumulated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Transition {
    /// Same size as the previous span: keep building the block
    Accumulating,
    /// Size changed: emit the block and start over
    BoundaryFlush,
}

/// The block under construction.
#[derive(Debug, Default)]
struct Accumulator {
    tag: Option<StructuralTag>,
    text: String,
}

impl Accumulator {
    fn restart(&mut self, tag: StructuralTag, text: &str) {
        self.tag = Some(tag);
        self.text.clear();
        self.text.push_str(text);
    }

    fn append(&mut self, text: &str) {
        self.text.push(' ');
        self.text.push_str(text);
    }

    fn take(&mut self) -> TaggedBlock {
        let acc = std::mem::take(self);
        TaggedBlock {
            tag: acc.tag,
            text: acc.text,
        }
    }
}

struct Aggregator<'t> {
    table: &'t SizeTagTable,
    anchor_level: u32,
    line_marker: char,
    current: Accumulator,
    /// Size of the last span with text; `None` until the first one.
    previous_size: Option<f32>,
    /// Index in `blocks` of the most recent anchor heading.
    last_anchor: Option<usize>,
    result: TaggingResult,
}

impl<'t> Aggregator<'t> {
    fn new(table: &'t SizeTagTable, options: &TaggingOptions) -> Self {
        Self {
            table,
            anchor_level: options.anchor_level,
            line_marker: options.line_marker,
            current: Accumulator::default(),
            previous_size: None,
            last_anchor: None,
            result: TaggingResult::default(),
        }
    }

    fn step(&mut self, event: Event<'_>) -> Result<()> {
        match event {
            Event::BlockStart => self.current = Accumulator::default(),
            Event::Span(span) if span.has_text() => self.accept(span)?,
            Event::Span(_) => {}
            Event::LineEnd => self.current.text.push(self.line_marker),
            Event::BlockEnd => self.end_block(),
            Event::Image(data) => self.collect_image(data),
        }
        Ok(())
    }

    fn transition(&self, size: f32) -> Option<Transition> {
        self.previous_size.map(|previous| {
            if previous == size {
                Transition::Accumulating
            } else {
                Transition::BoundaryFlush
            }
        })
    }

    fn accept(&mut self, span: &Span) -> Result<()> {
        let tag = self.table.lookup(span.size)?;

        match self.transition(span.size) {
            None => self.current.restart(tag, &span.text),
            Some(Transition::Accumulating) => {
                // Nothing but markers so far: the block really starts here.
                if self.current.tag.is_none() {
                    self.current.restart(tag, &span.text);
                } else {
                    self.current.append(&span.text);
                }
            }
            Some(Transition::BoundaryFlush) => {
                let block = self.current.take();
                log::trace!(
                    "Size change {:?} -> {}: flushing {:?}",
                    self.previous_size,
                    span.size,
                    block.text
                );
                self.result.blocks.push(block);
                self.current.restart(tag, &span.text);
            }
        }

        self.previous_size = Some(span.size);
        Ok(())
    }

    fn end_block(&mut self) {
        let block = self.current.take();
        if block.is_heading_level(self.anchor_level) {
            self.last_anchor = Some(self.result.blocks.len());
            self.result.anchors.push(block.clone());
        }
        self.result.blocks.push(block);
    }

    fn collect_image(&mut self, data: &[u8]) {
        match self.last_anchor {
            Some(anchor) => self.result.images.push(ImageAttachment {
                data: data.to_vec(),
                anchor,
            }),
            None => log::trace!("Skipping {}-byte image before any anchor heading", data.len()),
        }
    }

    fn finish(self) -> TaggingResult {
        self.result
    }
}
