//! Line sources for the text segmenter.
//!
//! PDFs are loaded with `lopdf`; each page's text is split into lines and
//! pages are concatenated in page order.

use std::path::Path;

use lopdf::Document as LopdfDocument;

use crate::detect::detect_pdf_format;
use crate::error::{Error, Result};
use crate::parser::{ErrorMode, ParseOptions};

/// Text lines extracted from a PDF.
pub struct PdfText {
    doc: LopdfDocument,
    label: String,
}

impl PdfText {
    /// Open a PDF file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)?;
        Self::load(&bytes, path.display().to_string())
    }

    /// Load a PDF from bytes.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        Self::load(data, "<memory>".to_string())
    }

    fn load(data: &[u8], label: String) -> Result<Self> {
        let format = detect_pdf_format(data)?;
        log::debug!("Loading {} ({})", label, format);

        let doc = LopdfDocument::load_mem(data)?;
        if doc.is_encrypted() {
            return Err(Error::Encrypted);
        }

        Ok(Self { doc, label })
    }

    /// Number of pages.
    pub fn page_count(&self) -> usize {
        self.doc.get_pages().len()
    }

    /// Extract all lines, in page order.
    ///
    /// In lenient mode a page whose text cannot be extracted is logged and
    /// skipped; in strict mode the first failure is returned.
    pub fn lines(&self, options: &ParseOptions) -> Result<Vec<String>> {
        let mut lines = Vec::new();

        for page_num in self.doc.get_pages().keys().copied() {
            match self.doc.extract_text(&[page_num]) {
                Ok(text) => lines.extend(split_lines(&text)),
                Err(e) => {
                    if options.error_mode == ErrorMode::Strict {
                        return Err(Error::Pdf(format!("page {}: {}", page_num, e)));
                    }
                    log::warn!("Failed to extract text from page {}: {}", page_num, e);
                }
            }
        }

        if lines.iter().all(|l| l.trim().is_empty()) {
            return Err(Error::NoTextExtracted(self.label.clone()));
        }

        log::debug!("Extracted {} lines from {} pages", lines.len(), self.page_count());
        Ok(lines)
    }
}

/// Read the lines of a plain text dump.
pub fn read_text_lines<P: AsRef<Path>>(path: P) -> Result<Vec<String>> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path)?;
    let lines = split_lines(&text);
    if lines.iter().all(|l| l.trim().is_empty()) {
        return Err(Error::NoTextExtracted(path.display().to_string()));
    }
    Ok(lines)
}

/// Split text into lines, dropping carriage returns.
pub fn split_lines(text: &str) -> Vec<String> {
    text.lines().map(str::to_string).collect()
}
