//! PDF paper converter.

use crate::error::Result;
use crate::model::SegmentedPaper;
use crate::parser::{ParseOptions, TextSegmenter};
use crate::source::PdfText;
use std::path::Path;

use super::{file_stem, DocumentConverter};

/// PDF paper converter.
///
/// Extracts text lines with `lopdf` and runs the text-stream segmenter.
#[derive(Debug, Clone, Default)]
pub struct PdfConverter {
    _private: (),
}

impl PdfConverter {
    /// Create a new PDF converter.
    pub fn new() -> Self {
        Self { _private: () }
    }

    fn segment_pdf(&self, pdf: PdfText, options: &ParseOptions) -> Result<SegmentedPaper> {
        let lines = pdf.lines(options)?;
        Ok(TextSegmenter::new(options).segment(&lines))
    }
}

/// Paper id for a PDF: the file stem lowercased, spaces and underscores
/// turned into hyphens.
pub fn pdf_paper_id(path: &Path) -> String {
    file_stem(path).to_lowercase().replace([' ', '_'], "-")
}

impl DocumentConverter for PdfConverter {
    fn supported_extensions(&self) -> &[&str] {
        &["pdf"]
    }

    fn name(&self) -> &str {
        "pdf"
    }

    fn segment(&self, path: &Path, options: &ParseOptions) -> Result<SegmentedPaper> {
        self.segment_pdf(PdfText::open(path)?, options)
    }

    fn segment_bytes(&self, bytes: &[u8], options: &ParseOptions) -> Result<SegmentedPaper> {
        self.segment_pdf(PdfText::from_bytes(bytes)?, options)
    }

    fn paper_id(&self, path: &Path) -> String {
        pdf_paper_id(path)
    }
}
