//! Input format detection.
//!
//! Sources are PDFs, plain text dumps or HTML pages. HTML comes in two
//! flavors with different structure: saved full-text pages and digital
//! library landing pages.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use scraper::Html;

use crate::error::{Error, Result};
use crate::parser::query::{attr_eq, find_descendant, has_class, is_tag};

/// PDF magic bytes: %PDF-
const PDF_MAGIC: &[u8] = b"%PDF-";
const PDF_MAGIC_LEN: usize = 5;
const VERSION_LEN: usize = 3; // e.g., "1.7"

/// Bytes inspected when sniffing content.
const SNIFF_LEN: usize = 1024;

/// Kind of paper source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    /// PDF document
    Pdf,
    /// HTML page
    Html,
    /// Plain text dump, one line per text line
    Text,
}

impl InputKind {
    /// Guess the kind from a file extension (without the dot).
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "pdf" => Some(InputKind::Pdf),
            "html" | "htm" | "xhtml" => Some(InputKind::Html),
            "txt" | "text" => Some(InputKind::Text),
            _ => None,
        }
    }

    /// Short name of the kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            InputKind::Pdf => "pdf",
            InputKind::Html => "html",
            InputKind::Text => "text",
        }
    }
}

/// Structural flavor of an HTML page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HtmlFlavor {
    /// Saved full-text page with a content wrapper and body matter
    SavedFullText,
    /// Landing page with citation metadata
    LandingPage,
    /// Neither marker found
    Unknown,
}

/// PDF version information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PdfFormat {
    /// PDF version (e.g., "1.7", "2.0")
    pub version: String,
}

impl std::fmt::Display for PdfFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "PDF {}", self.version)
    }
}

/// Detect the input kind of a file.
///
/// The extension decides when it is known; otherwise the first bytes are
/// sniffed.
pub fn detect_kind_from_path<P: AsRef<Path>>(path: P) -> Result<InputKind> {
    let path = path.as_ref();
    if let Some(kind) = path
        .extension()
        .and_then(|e| e.to_str())
        .and_then(InputKind::from_extension)
    {
        return Ok(kind);
    }

    let file = File::open(path)?;
    let mut head = Vec::with_capacity(SNIFF_LEN);
    BufReader::new(file)
        .take(SNIFF_LEN as u64)
        .read_to_end(&mut head)?;
    detect_kind_from_bytes(&head)
        .ok_or_else(|| Error::UnsupportedInput(path.display().to_string()))
}

/// Sniff the input kind from leading bytes.
///
/// Returns `None` for binary data that is neither PDF nor UTF-8 text.
pub fn detect_kind_from_bytes(data: &[u8]) -> Option<InputKind> {
    if data.starts_with(PDF_MAGIC) {
        return Some(InputKind::Pdf);
    }

    let head = &data[..data.len().min(SNIFF_LEN)];
    let text = match std::str::from_utf8(head) {
        Ok(text) => text,
        // A multi-byte character may straddle the sniff window.
        Err(e) if e.error_len().is_none() => {
            std::str::from_utf8(&head[..e.valid_up_to()]).unwrap_or_default()
        }
        Err(_) => return None,
    };

    let lower = text.trim_start_matches('\u{feff}').trim_start().to_lowercase();
    if lower.starts_with("<!doctype html") || lower.starts_with("<html") || lower.contains("<html")
    {
        Some(InputKind::Html)
    } else {
        Some(InputKind::Text)
    }
}

/// Detect the PDF version from leading bytes.
pub fn detect_pdf_format(data: &[u8]) -> Result<PdfFormat> {
    if data.len() < PDF_MAGIC_LEN + VERSION_LEN || !data.starts_with(PDF_MAGIC) {
        return Err(Error::UnsupportedInput("missing %PDF- header".to_string()));
    }

    let version_bytes = &data[PDF_MAGIC_LEN..PDF_MAGIC_LEN + VERSION_LEN];
    let version = String::from_utf8_lossy(version_bytes).to_string();
    if !is_valid_version(&version) {
        return Err(Error::UnsupportedInput(format!(
            "invalid PDF version '{}'",
            version
        )));
    }

    Ok(PdfFormat { version })
}

fn is_valid_version(version: &str) -> bool {
    let bytes = version.as_bytes();
    bytes.len() == 3 && bytes[0].is_ascii_digit() && bytes[1] == b'.' && bytes[2].is_ascii_digit()
}

/// Decide which segmenter an HTML page needs.
pub fn detect_html_flavor(doc: &Html) -> HtmlFlavor {
    let root = doc.root_element();

    let saved = find_descendant(root, |el| {
        is_tag(el, "div") && attr_eq(el, "data-core-wrapper", "content")
    });
    if saved.is_some() {
        return HtmlFlavor::SavedFullText;
    }

    let landing = find_descendant(root, |el| {
        (is_tag(el, "h1") && has_class(el, "citation__title"))
            || (is_tag(el, "div") && has_class(el, "article__body"))
    });
    if landing.is_some() {
        return HtmlFlavor::LandingPage;
    }

    HtmlFlavor::Unknown
}
