//! Document model types.
//!
//! The input side mirrors what a PDF toolkit hands out per page: blocks of
//! lines of styled spans, plus image blocks. The output side holds the
//! tagged text blocks and image attachments produced by the analysis.

mod document;
mod page;
mod payload;
mod span;
mod tag;
mod tagged;

pub use document::Document;
pub use page::{Block, Page};
pub use span::{Line, Span, SpanFlags};
pub use tag::StructuralTag;
pub use tagged::{ImageAttachment, TaggedBlock};
