//! Typography-to-structure inference.
//!
//! Three passes over a [`crate::SpanSource`]:
//!
//! 1. [`FontHistogram`] counts how often each style occurs.
//! 2. [`SizeTagTable`] ranks every font size against the body size.
//! 3. [`tag_blocks`] walks the spans again and emits tagged text blocks.

mod aggregator;
mod histogram;
mod options;
mod tagger;

pub use aggregator::{tag_blocks, TaggingResult};
pub use histogram::{FontCount, FontHistogram, StyleInfo, StyleKey};
pub use options::{Granularity, TaggingOptions, DEFAULT_ANCHOR_LEVEL, DEFAULT_LINE_MARKER};
pub use tagger::SizeTagTable;
