//! Document-level types and span dump loading.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{Page, Span};
use crate::error::Result;

/// A parsed document: pages of text and image blocks.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Pages in the document
    pub pages: Vec<Page>,
}

impl Document {
    /// Create a new empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a document from pages.
    pub fn from_pages(pages: Vec<Page>) -> Self {
        let mut doc = Self { pages };
        doc.number_pages();
        doc
    }

    /// Load a span dump from a JSON file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path.as_ref())?;
        Self::from_reader(BufReader::new(file))
    }

    /// Load a span dump from any reader.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let value: Value = serde_json::from_reader(reader)?;
        Self::from_value(value)
    }

    /// Load a span dump from a JSON string.
    ///
    /// Accepts either `{"pages": [...]}` or a bare array of pages.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(json)?;
        Self::from_value(value)
    }

    fn from_value(value: Value) -> Result<Self> {
        let pages: Vec<Page> = match value {
            Value::Array(_) => serde_json::from_value(value)?,
            other => serde_json::from_value::<Document>(other)?.pages,
        };
        log::debug!("Loaded span dump with {} pages", pages.len());
        Ok(Self::from_pages(pages))
    }

    /// Give unnumbered pages their 1-based position.
    fn number_pages(&mut self) {
        for (i, page) in self.pages.iter_mut().enumerate() {
            if page.number == 0 {
                page.number = i as u32 + 1;
            }
        }
    }

    /// Add a page to the document.
    pub fn add_page(&mut self, mut page: Page) {
        if page.number == 0 {
            page.number = self.pages.len() as u32 + 1;
        }
        self.pages.push(page);
    }

    /// Get the number of pages in the document.
    pub fn page_count(&self) -> u32 {
        self.pages.len() as u32
    }

    /// Get a page by number (1-indexed).
    pub fn get_page(&self, page_num: u32) -> Option<&Page> {
        if page_num == 0 {
            return None;
        }
        self.pages.get((page_num - 1) as usize)
    }

    /// All spans across all pages.
    pub fn spans(&self) -> impl Iterator<Item = &Span> {
        self.pages.iter().flat_map(|page| page.spans())
    }

    /// Total number of image blocks.
    pub fn image_count(&self) -> usize {
        self.pages.iter().map(|p| p.image_count()).sum()
    }

    /// Check if the document has any pages.
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }
}
