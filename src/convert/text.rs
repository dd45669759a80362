//! Plain text dump converter.

use crate::error::{Error, Result};
use crate::model::SegmentedPaper;
use crate::parser::{ParseOptions, TextSegmenter};
use crate::source::{read_text_lines, split_lines};
use std::path::Path;

use super::{pdf_paper_id, DocumentConverter};

/// Converter for text already extracted from a PDF, one line per line.
#[derive(Debug, Clone, Default)]
pub struct TextConverter {
    _private: (),
}

impl TextConverter {
    /// Create a new text converter.
    pub fn new() -> Self {
        Self { _private: () }
    }
}

impl DocumentConverter for TextConverter {
    fn supported_extensions(&self) -> &[&str] {
        &["txt", "text"]
    }

    fn name(&self) -> &str {
        "text"
    }

    fn segment(&self, path: &Path, options: &ParseOptions) -> Result<SegmentedPaper> {
        let lines = read_text_lines(path)?;
        Ok(TextSegmenter::new(options).segment(&lines))
    }

    fn segment_bytes(&self, bytes: &[u8], options: &ParseOptions) -> Result<SegmentedPaper> {
        let text = std::str::from_utf8(bytes)
            .map_err(|e| Error::UnsupportedInput(format!("text is not UTF-8: {}", e)))?;
        Ok(TextSegmenter::new(options).segment(&split_lines(text)))
    }

    // Text dumps stand in for their PDFs, so they share the id scheme.
    fn paper_id(&self, path: &Path) -> String {
        pdf_paper_id(path)
    }
}
