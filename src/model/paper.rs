//! Segmenter output.

use serde::{Deserialize, Serialize};

use super::{ContentItem, ImageRef, SectionDescriptor, TableRef};

/// Kind of source a paper was segmented from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    /// Flat text lines from a PDF text dump
    #[default]
    PdfText,
    /// Saved full-text HTML with a body-matter section
    SavedHtml,
    /// Digital library landing page
    LandingPage,
}

impl SourceKind {
    /// Stable name used in metadata records.
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceKind::PdfText => "pdf_text",
            SourceKind::SavedHtml => "saved_html",
            SourceKind::LandingPage => "landing_page",
        }
    }
}

/// Result of one segmentation pass over a source document.
///
/// Owned by the calling pipeline for the duration of one conversion run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SegmentedPaper {
    /// Where the content came from
    pub source: SourceKind,

    /// Detected title
    pub title: Option<String>,

    /// Detected author lines
    pub authors: Vec<String>,

    /// Abstract text (structured sources only)
    #[serde(rename = "abstract")]
    pub abstract_text: Option<String>,

    /// Content items in document order
    pub content: Vec<ContentItem>,

    /// Section descriptors in encounter order
    pub sections: Vec<SectionDescriptor>,

    /// Images found in figures
    pub images: Vec<ImageRef>,

    /// Tables found in figures
    pub tables: Vec<TableRef>,

    /// Recoverable anomalies found while segmenting
    pub diagnostics: Vec<String>,

    /// Publication venue line (landing pages only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub publication: Option<String>,
}

impl SegmentedPaper {
    /// Create an empty result for a source kind.
    pub fn new(source: SourceKind) -> Self {
        Self {
            source,
            ..Default::default()
        }
    }

    /// Record a recoverable anomaly and log it.
    pub fn diagnose(&mut self, message: impl Into<String>) {
        let message = message.into();
        log::warn!("{}", message);
        self.diagnostics.push(message);
    }

    /// Check if no content was extracted.
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// Titles of all sections, in order.
    pub fn section_titles(&self) -> impl Iterator<Item = &str> {
        self.sections.iter().map(|s| s.title.as_str())
    }

    /// Number of paragraph items.
    pub fn paragraph_count(&self) -> usize {
        self.content
            .iter()
            .filter(|c| matches!(c, ContentItem::Paragraph { .. }))
            .count()
    }
}
