//! HTML paper converter.

use crate::detect::{detect_html_flavor, HtmlFlavor};
use crate::error::Result;
use crate::model::SegmentedPaper;
use crate::parser::{DomSegmenter, LandingSegmenter, ParseOptions};
use scraper::Html;
use std::path::Path;

use super::DocumentConverter;

/// Converter for saved full-text pages and landing pages.
///
/// The page structure decides the segmenter: landing pages go through
/// the landing segmenter, everything else through the DOM segmenter.
#[derive(Debug, Clone, Default)]
pub struct HtmlConverter {
    _private: (),
}

impl HtmlConverter {
    /// Create a new HTML converter.
    pub fn new() -> Self {
        Self { _private: () }
    }

    /// Segment an HTML string.
    pub fn segment_str(&self, html: &str, options: &ParseOptions) -> SegmentedPaper {
        let doc = Html::parse_document(html);
        match detect_html_flavor(&doc) {
            HtmlFlavor::LandingPage => LandingSegmenter::new(options).segment_document(&doc),
            flavor => {
                if flavor == HtmlFlavor::Unknown {
                    log::debug!("No known page markers; using the full-text segmenter");
                }
                DomSegmenter::new(options).segment_document(&doc)
            }
        }
    }
}

impl DocumentConverter for HtmlConverter {
    fn supported_extensions(&self) -> &[&str] {
        &["html", "htm", "xhtml"]
    }

    fn name(&self) -> &str {
        "html"
    }

    fn segment(&self, path: &Path, options: &ParseOptions) -> Result<SegmentedPaper> {
        let bytes = std::fs::read(path)?;
        self.segment_bytes(&bytes, options)
    }

    fn segment_bytes(&self, bytes: &[u8], options: &ParseOptions) -> Result<SegmentedPaper> {
        let html = String::from_utf8_lossy(bytes);
        Ok(self.segment_str(&html, options))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::SourceKind;

    #[test]
    fn test_flavor_dispatch() {
        let converter = HtmlConverter::new();
        let options = ParseOptions::default();

        let landing =
            converter.segment_str(r#"<h1 class="citation__title">Title</h1>"#, &options);
        assert_eq!(landing.source, SourceKind::LandingPage);

        let saved = converter.segment_str(
            r#"<div data-core-wrapper="content"><section id="bodymatter"></section></div>"#,
            &options,
        );
        assert_eq!(saved.source, SourceKind::SavedHtml);
        assert!(saved.diagnostics.is_empty());

        let unknown = converter.segment_str("<p>Just a paragraph.</p>", &options);
        assert_eq!(unknown.source, SourceKind::SavedHtml);
        assert_eq!(unknown.diagnostics.len(), 1);
    }
}
