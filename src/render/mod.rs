//! Rendering module for converting tagged blocks to output formats.

mod assets;
mod cleanup;
mod json;
mod markdown;
mod options;
mod text;

pub use assets::{image_extension, image_file_name, image_file_stem};
pub use cleanup::{CleanupOptions, CleanupPipeline, CleanupPreset};
pub use json::{to_json, to_json_strings, JsonFormat};
pub use markdown::{to_markdown, MarkdownRenderer};
pub use options::RenderOptions;
pub use text::to_text;
