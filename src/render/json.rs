//! JSON rendering for tagged blocks.

use crate::analysis::TaggingResult;
use crate::error::{Error, Result};

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Pretty-printed JSON with indentation
    #[default]
    Pretty,
    /// Compact JSON without extra whitespace
    Compact,
}

/// Serialize the full tagging result (blocks, images, anchors).
pub fn to_json(result: &TaggingResult, format: JsonFormat) -> Result<String> {
    serialize(result, format)
}

/// Serialize the blocks as a flat array of prefixed strings, e.g. `["<h1>Intro|", ...]`.
pub fn to_json_strings(result: &TaggingResult, format: JsonFormat) -> Result<String> {
    let elements: Vec<String> = result.blocks.iter().map(|b| b.rendered()).collect();
    serialize(&elements, format)
}

fn serialize<T: serde::Serialize + ?Sized>(value: &T, format: JsonFormat) -> Result<String> {
    let result = match format {
        JsonFormat::Pretty => serde_json::to_string_pretty(value),
        JsonFormat::Compact => serde_json::to_string(value),
    };

    result.map_err(|e| Error::Render(format!("JSON serialization error: {}", e)))
}
