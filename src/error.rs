//! Error types for typotag library.

use std::io;
use thiserror::Error;

/// Result type alias for typotag operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while inferring document structure.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading a span dump.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The span dump is not valid JSON or is missing span attributes.
    #[error("Span dump error: {0}")]
    Json(#[from] serde_json::Error),

    /// The document has no text spans, so no body size can be inferred.
    #[error("Zero discriminating fonts found: document has no text spans")]
    EmptyDocument,

    /// A span size was seen during tagging that the size table never registered.
    #[error("No structural tag registered for font size {0}")]
    MissingSizeTag(f32),

    /// A block in the span dump is neither a well-formed text nor image block.
    #[error("Malformed block: {0}")]
    MalformedBlock(String),

    /// A tag prefix could not be parsed.
    #[error("Invalid structural tag: {0}")]
    InvalidTag(String),

    /// Error during rendering (Markdown, text, JSON).
    #[error("Rendering error: {0}")]
    Render(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::EmptyDocument;
        assert_eq!(
            err.to_string(),
            "Zero discriminating fonts found: document has no text spans"
        );

        let err = Error::MissingSizeTag(9.5);
        assert_eq!(err.to_string(), "No structural tag registered for font size 9.5");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_json_error_conversion() {
        let json_err = serde_json::from_str::<u32>("not json").unwrap_err();
        let err: Error = json_err.into();
        assert!(matches!(err, Error::Json(_)));
    }
}
