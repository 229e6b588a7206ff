//! Tagging options and configuration.

/// Default heading level whose blocks gate image collection.
pub const DEFAULT_ANCHOR_LEVEL: u32 = 4;

/// Default line-boundary marker.
pub const DEFAULT_LINE_MARKER: char = '|';

/// Options for analyzing a document.
#[derive(Debug, Clone)]
pub struct TaggingOptions {
    /// How spans are bucketed when counting styles
    pub granularity: Granularity,

    /// Whether to count styles per page in parallel
    pub parallel: bool,

    /// Heading level treated as an image anchor
    pub anchor_level: u32,

    /// Character appended to a block whenever a source line ends
    pub line_marker: char,
}

impl TaggingOptions {
    /// Create new tagging options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set granularity.
    pub fn with_granularity(mut self, granularity: Granularity) -> Self {
        self.granularity = granularity;
        self
    }

    /// Distinguish styles by size, flags, font and color.
    pub fn granular(mut self) -> Self {
        self.granularity = Granularity::Granular;
        self
    }

    /// Enable or disable parallel style counting.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Disable parallel processing.
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }

    /// Set the anchor heading level (clamped to at least 1).
    pub fn with_anchor_level(mut self, level: u32) -> Self {
        self.anchor_level = level.max(1);
        self
    }

    /// Set the line-boundary marker.
    pub fn with_line_marker(mut self, marker: char) -> Self {
        self.line_marker = marker;
        self
    }
}

impl Default for TaggingOptions {
    fn default() -> Self {
        Self {
            granularity: Granularity::Coarse,
            parallel: true,
            anchor_level: DEFAULT_ANCHOR_LEVEL,
            line_marker: DEFAULT_LINE_MARKER,
        }
    }
}

/// How spans are grouped into styles for the histogram.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Granularity {
    /// Size only
    #[default]
    Coarse,
    /// Size, flags, font and color
    Granular,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tagging_options_builder() {
        let options = TaggingOptions::new()
            .granular()
            .sequential()
            .with_anchor_level(3)
            .with_line_marker('¶');

        assert_eq!(options.granularity, Granularity::Granular);
        assert!(!options.parallel);
        assert_eq!(options.anchor_level, 3);
        assert_eq!(options.line_marker, '¶');
    }

    #[test]
    fn test_default_options() {
        let options = TaggingOptions::default();
        assert_eq!(options.granularity, Granularity::Coarse);
        assert!(options.parallel);
        assert_eq!(options.anchor_level, 4);
        assert_eq!(options.line_marker, '|');
    }

    #[test]
    fn test_anchor_level_clamped() {
        assert_eq!(TaggingOptions::new().with_anchor_level(0).anchor_level, 1);
    }
}
