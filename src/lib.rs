//! # paperseg
//!
//! Structural parsing of academic papers for reading experiments.
//!
//! A paper (PDF, extracted text, a saved full-text HTML page or a digital
//! library landing page) is segmented into an ordered list of sections,
//! paragraphs, figures and tables. Each section gets an estimated
//! reading-position range, and the paper is rendered as a single-column
//! HTML page with a side-car JSON metadata record.
//!
//! ## Quick Start
//!
//! ```no_run
//! use paperseg::convert_file;
//!
//! fn main() -> paperseg::Result<()> {
//!     let result = convert_file("papers/widgets.pdf")?;
//!     for (title, range) in &result.metadata.section_boundaries {
//!         println!("{}: {}..{}", title, range.start, range.end);
//!     }
//!     std::fs::write("widgets.html", &result.html)?;
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Three segmenters**: line-oriented text, saved full-text DOM, landing pages
//! - **Injectable header grammar**: section keywords are configuration
//! - **Two boundary strategies**: length-weighted and fixed increments
//! - **Experiment layout**: `papers_html/`, `papers_json/`, `papers_images/`
//!   and the `papers-data.js` catalog
//! - **Fetching** (feature `fetch`): landing pages and figures by DOI

pub mod boundary;
pub mod catalog;
pub mod convert;
pub mod detect;
pub mod doi;
pub mod error;
#[cfg(feature = "fetch")]
pub mod fetch;
pub mod layout;
pub mod model;
pub mod parser;
pub mod render;
pub mod source;

// Re-export commonly used types
pub use boundary::{BoundaryCalculator, BoundaryStrategy, LengthWeights};
pub use catalog::{Catalog, CatalogEntry};
pub use convert::{
    ConvertOptions, ConvertResult, ConverterRegistry, DocumentConverter, HtmlConverter,
    PdfConverter, TextConverter,
};
pub use detect::{detect_kind_from_bytes, detect_kind_from_path, HtmlFlavor, InputKind};
pub use doi::PaperRef;
pub use error::{Error, Result};
#[cfg(feature = "fetch")]
pub use fetch::AcmFetcher;
pub use layout::{OutputLayout, WrittenPaper};
pub use model::{
    ContentItem, PaperMetadata, SectionBoundaries, SectionBoundary, SectionDescriptor,
    SegmentedPaper, SourceKind,
};
pub use parser::{
    DomSegmenter, ErrorMode, LandingSegmenter, ParseOptions, SectionKeywords, TextSegmenter,
};
pub use render::{JsonFormat, RenderOptions};

use std::path::Path;

/// Segment a paper file without rendering it.
///
/// The converter is chosen from the file extension.
///
/// # Example
///
/// ```no_run
/// use paperseg::segment_file;
///
/// let paper = segment_file("papers/widgets.html").unwrap();
/// for title in paper.section_titles() {
///     println!("{}", title);
/// }
/// ```
pub fn segment_file<P: AsRef<Path>>(path: P) -> Result<SegmentedPaper> {
    segment_file_with_options(path, &ParseOptions::default())
}

/// Segment a paper file with custom options.
///
/// # Example
///
/// ```no_run
/// use paperseg::{segment_file_with_options, ParseOptions, SectionKeywords};
///
/// let options = ParseOptions::new()
///     .lenient()
///     .with_keywords(SectionKeywords::default().with_keyword("STUDY DESIGN"));
/// let paper = segment_file_with_options("papers/widgets.pdf", &options).unwrap();
/// ```
pub fn segment_file_with_options<P: AsRef<Path>>(
    path: P,
    options: &ParseOptions,
) -> Result<SegmentedPaper> {
    ConverterRegistry::with_defaults().segment(path.as_ref(), options)
}

/// Segment text lines extracted from a PDF.
pub fn segment_text(text: &str) -> SegmentedPaper {
    TextSegmenter::new(&ParseOptions::default()).segment_text(text)
}

/// Segment a saved full-text HTML page.
pub fn segment_html(html: &str) -> SegmentedPaper {
    DomSegmenter::new(&ParseOptions::default()).segment_html(html)
}

/// Convert a paper file into a page, a metadata record and boundaries.
///
/// # Example
///
/// ```no_run
/// use paperseg::convert_file;
///
/// let result = convert_file("papers/widgets.pdf").unwrap();
/// println!("{}", result.paper_id);
/// ```
pub fn convert_file<P: AsRef<Path>>(path: P) -> Result<ConvertResult> {
    convert_file_with_options(path, &ConvertOptions::default())
}

/// Convert a paper file with custom options.
pub fn convert_file_with_options<P: AsRef<Path>>(
    path: P,
    options: &ConvertOptions,
) -> Result<ConvertResult> {
    ConverterRegistry::with_defaults().convert(path.as_ref(), options)
}

/// Builder for converting papers into an experiment layout.
///
/// # Example
///
/// ```no_run
/// use paperseg::{BoundaryStrategy, Paperseg};
///
/// let written = Paperseg::new()
///     .lenient()
///     .with_paper_id("chi25-widgets")
///     .with_strategy(BoundaryStrategy::fixed())
///     .with_review_panel()
///     .convert("papers/widgets.pdf")?
///     .write_to("experiment")?;
/// println!("{}", written.html.display());
/// # Ok::<(), paperseg::Error>(())
/// ```
pub struct Paperseg {
    options: ConvertOptions,
}

impl Paperseg {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            options: ConvertOptions::default(),
        }
    }

    /// Enable lenient mode (failing PDF pages are skipped).
    pub fn lenient(mut self) -> Self {
        self.options.parse = self.options.parse.lenient();
        self
    }

    /// Set the paper id.
    pub fn with_paper_id(mut self, id: impl Into<String>) -> Self {
        self.options = self.options.with_paper_id(id);
        self
    }

    /// Replace the section keyword set.
    pub fn with_keywords(mut self, keywords: SectionKeywords) -> Self {
        self.options = self.options.with_keywords(keywords);
        self
    }

    /// Force a boundary strategy.
    pub fn with_strategy(mut self, strategy: BoundaryStrategy) -> Self {
        self.options = self.options.with_strategy(strategy);
        self
    }

    /// Set the image path prefix used in the page.
    pub fn with_image_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.options.render = self.options.render.with_image_prefix(prefix);
        self
    }

    /// Append the review panel to the page.
    pub fn with_review_panel(mut self) -> Self {
        self.options.render = self.options.render.with_review_panel(true);
        self
    }

    /// Options collected so far.
    pub fn options(&self) -> &ConvertOptions {
        &self.options
    }

    /// Convert a paper file.
    pub fn convert<P: AsRef<Path>>(self, path: P) -> Result<PapersegResult> {
        let result = convert_file_with_options(path, &self.options)?;
        Ok(PapersegResult {
            result,
            options: self.options,
        })
    }

    /// Convert an in-memory source; `ext` selects the converter.
    pub fn convert_bytes(self, data: &[u8], ext: &str) -> Result<PapersegResult> {
        let result = ConverterRegistry::with_defaults().convert_bytes(data, ext, &self.options)?;
        Ok(PapersegResult {
            result,
            options: self.options,
        })
    }
}

impl Default for Paperseg {
    fn default() -> Self {
        Self::new()
    }
}

/// Result of a [`Paperseg`] conversion.
pub struct PapersegResult {
    result: ConvertResult,
    options: ConvertOptions,
}

impl PapersegResult {
    /// The conversion result.
    pub fn result(&self) -> &ConvertResult {
        &self.result
    }

    /// The rendered page.
    pub fn html(&self) -> &str {
        &self.result.html
    }

    /// The metadata record as JSON.
    pub fn to_json(&self) -> Result<String> {
        self.result.metadata_json(&self.options.render)
    }

    /// Write the page and metadata record under an experiment root.
    pub fn write_to<P: AsRef<Path>>(&self, root: P) -> Result<WrittenPaper> {
        OutputLayout::new(root.as_ref()).write(&self.result, &self.options.render)
    }

    /// Take the conversion result.
    pub fn into_result(self) -> ConvertResult {
        self.result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paperseg_builder() {
        let builder = Paperseg::new()
            .lenient()
            .with_paper_id("chi25-widgets")
            .with_strategy(BoundaryStrategy::fixed())
            .with_review_panel();

        assert_eq!(builder.options().parse.error_mode, ErrorMode::Lenient);
        assert_eq!(builder.options().paper_id.as_deref(), Some("chi25-widgets"));
        assert!(builder.options().render.review_panel);
    }

    #[test]
    fn test_segment_text_convenience() {
        let paper = segment_text("ABSTRACT\nWe study widgets in a long enough line.\n");
        assert_eq!(paper.section_titles().collect::<Vec<_>>(), vec!["Abstract"]);
    }

    #[test]
    fn test_convert_bytes_empty_pdf() {
        let result = Paperseg::new()
            .with_paper_id("empty")
            .convert_bytes(&[], "pdf");
        assert!(result.is_err());
    }

    #[test]
    fn test_convert_bytes_unknown_extension() {
        let result = Paperseg::new()
            .with_paper_id("x")
            .convert_bytes(b"data", "docx");
        assert!(matches!(result, Err(Error::UnsupportedInput(_))));
    }

    #[test]
    fn test_builder_writes_layout() {
        let dir = tempfile::tempdir().unwrap();
        let written = Paperseg::new()
            .with_paper_id("widgets")
            .convert_bytes(
                b"A Study of Widgets and Gadgets\nABSTRACT\nWe study widgets in this paper at length.\n",
                "txt",
            )
            .unwrap()
            .write_to(dir.path())
            .unwrap();

        assert!(written.html.ends_with("papers_html/widgets.html"));
        let json = std::fs::read_to_string(&written.json).unwrap();
        assert!(json.contains("\"paper_id\": \"widgets\""));
    }
}
