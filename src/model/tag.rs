//! Structural tags inferred from font size.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// The structural role assigned to a font size.
///
/// Levels are 1-based ranks counted away from the body size: `Heading(1)`
/// is the largest size in the document, `Subnote(1)` the first size below
/// body text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "level", rename_all = "snake_case")]
pub enum StructuralTag {
    /// Body text (the most common style)
    Paragraph,
    /// Text larger than body text
    Heading(u32),
    /// Text smaller than body text
    Subnote(u32),
}

impl StructuralTag {
    /// The textual prefix written in front of a tagged block.
    pub fn prefix(&self) -> String {
        self.to_string()
    }

    /// Rank for headings and subnotes, `None` for paragraphs.
    pub fn level(&self) -> Option<u32> {
        match self {
            StructuralTag::Paragraph => None,
            StructuralTag::Heading(level) | StructuralTag::Subnote(level) => Some(*level),
        }
    }

    pub fn is_paragraph(&self) -> bool {
        matches!(self, StructuralTag::Paragraph)
    }

    pub fn is_heading(&self) -> bool {
        matches!(self, StructuralTag::Heading(_))
    }

    pub fn is_subnote(&self) -> bool {
        matches!(self, StructuralTag::Subnote(_))
    }

    /// Check for a heading at exactly `level`.
    pub fn is_heading_level(&self, level: u32) -> bool {
        *self == StructuralTag::Heading(level)
    }
}

impl fmt::Display for StructuralTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StructuralTag::Paragraph => write!(f, "<p>"),
            StructuralTag::Heading(level) => write!(f, "<h{}>", level),
            StructuralTag::Subnote(level) => write!(f, "<s{}>", level),
        }
    }
}

impl FromStr for StructuralTag {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let inner = s
            .strip_prefix('<')
            .and_then(|rest| rest.strip_suffix('>'))
            .ok_or_else(|| Error::InvalidTag(s.to_string()))?;

        if inner == "p" {
            return Ok(StructuralTag::Paragraph);
        }

        let mut chars = inner.chars();
        let kind = chars.next();
        let level: u32 = chars
            .as_str()
            .parse()
            .map_err(|_| Error::InvalidTag(s.to_string()))?;
        if level == 0 {
            return Err(Error::InvalidTag(s.to_string()));
        }

        match kind {
            Some('h') => Ok(StructuralTag::Heading(level)),
            Some('s') => Ok(StructuralTag::Subnote(level)),
            _ => Err(Error::InvalidTag(s.to_string())),
        }
    }
}
