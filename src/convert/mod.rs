//! Document converters: segment a source, estimate boundaries, render.
//!
//! Converters are registered per file extension, the same way for PDFs,
//! text dumps and HTML pages.
//!
//! # Example
//!
//! ```no_run
//! use paperseg::convert::{ConverterRegistry, ConvertOptions};
//! use std::path::Path;
//!
//! fn main() -> paperseg::Result<()> {
//!     let registry = ConverterRegistry::with_defaults();
//!     let result = registry.convert(Path::new("widgets.pdf"), &ConvertOptions::default())?;
//!     println!("{} sections", result.metadata.sections.len());
//!     Ok(())
//! }
//! ```

mod html;
mod pdf;
mod text;

pub use html::HtmlConverter;
pub use pdf::{pdf_paper_id, PdfConverter};
pub use text::TextConverter;

use crate::boundary::{BoundaryCalculator, BoundaryStrategy};
use crate::detect::detect_kind_from_path;
use crate::error::{Error, Result};
use crate::model::{PaperMetadata, SectionBoundaries, SegmentedPaper};
use crate::parser::{ParseOptions, SectionKeywords};
use crate::render::{to_json, ExtractionStats, HtmlRenderer, RenderOptions};
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

/// Options for converting a paper.
#[derive(Debug, Clone, Default)]
pub struct ConvertOptions {
    /// Paper id; derived from the file name when absent
    pub paper_id: Option<String>,

    /// Segmentation options
    pub parse: ParseOptions,

    /// Rendering options
    pub render: RenderOptions,

    /// Boundary strategy; chosen from the source kind when absent
    pub strategy: Option<BoundaryStrategy>,
}

impl ConvertOptions {
    /// Create new conversion options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the paper id.
    pub fn with_paper_id(mut self, id: impl Into<String>) -> Self {
        self.paper_id = Some(id.into());
        self
    }

    /// Set segmentation options.
    pub fn with_parse_options(mut self, options: ParseOptions) -> Self {
        self.parse = options;
        self
    }

    /// Set rendering options.
    pub fn with_render_options(mut self, options: RenderOptions) -> Self {
        self.render = options;
        self
    }

    /// Replace the section keyword set.
    pub fn with_keywords(mut self, keywords: SectionKeywords) -> Self {
        self.parse.keywords = keywords;
        self
    }

    /// Force a boundary strategy.
    pub fn with_strategy(mut self, strategy: BoundaryStrategy) -> Self {
        self.strategy = Some(strategy);
        self
    }
}

/// Result of converting one paper.
#[derive(Debug, Clone)]
pub struct ConvertResult {
    /// Paper id used for file names and image paths
    pub paper_id: String,

    /// Rendered page
    pub html: String,

    /// Side-car metadata record
    pub metadata: PaperMetadata,

    /// Every section boundary, duplicates included
    pub boundaries: SectionBoundaries,

    /// Strategy the boundaries were computed with
    pub strategy: BoundaryStrategy,

    /// Rendering statistics
    pub stats: ExtractionStats,

    /// Segmenter output
    pub paper: SegmentedPaper,
}

impl ConvertResult {
    /// Metadata record as JSON, in the configured format.
    pub fn metadata_json(&self, options: &RenderOptions) -> Result<String> {
        to_json(&self.metadata, options.json_format)
    }

    /// Recoverable anomalies found while segmenting.
    pub fn diagnostics(&self) -> &[String] {
        &self.paper.diagnostics
    }
}

/// Estimate boundaries, build the metadata record and render the page.
pub fn assemble(
    paper: SegmentedPaper,
    paper_id: &str,
    options: &ConvertOptions,
) -> Result<ConvertResult> {
    assemble_with(paper, paper_id, options, |_| {})
}

/// Like [`assemble`], letting the caller fill in metadata fields (DOI,
/// URL, source file) before the page is rendered.
pub fn assemble_with<F>(
    paper: SegmentedPaper,
    paper_id: &str,
    options: &ConvertOptions,
    annotate: F,
) -> Result<ConvertResult>
where
    F: FnOnce(&mut PaperMetadata),
{
    let strategy = options
        .strategy
        .unwrap_or_else(|| BoundaryStrategy::for_source(paper.source));
    let boundaries = BoundaryCalculator::new(strategy).compute(&paper);

    let mut metadata = build_metadata(&paper, paper_id, &boundaries);
    annotate(&mut metadata);
    let rendered = HtmlRenderer::new(options.render.clone()).render(&metadata, &paper.content)?;

    log::info!(
        "Converted {} ({}): {} sections, {} items, {} boundary",
        paper_id,
        paper.source.as_str(),
        metadata.sections.len(),
        paper.content.len(),
        strategy
    );

    Ok(ConvertResult {
        paper_id: paper_id.to_string(),
        html: rendered.content,
        metadata: rendered.metadata,
        boundaries,
        strategy,
        stats: rendered.stats,
        paper,
    })
}

/// Build the metadata record for a segmented paper.
pub fn build_metadata(
    paper: &SegmentedPaper,
    paper_id: &str,
    boundaries: &SectionBoundaries,
) -> PaperMetadata {
    PaperMetadata {
        paper_id: paper_id.to_string(),
        title: paper.title.clone(),
        authors: paper.authors.clone(),
        abstract_text: paper.abstract_text.clone(),
        sections: paper.sections.clone(),
        section_boundaries: boundaries.to_map(),
        source: Some(paper.source.as_str().to_string()),
        publication: paper.publication.clone(),
        ..PaperMetadata::default()
    }
}

/// Trait for paper converters.
///
/// A converter only segments; boundary estimation and rendering are
/// shared by all converters through [`assemble`].
pub trait DocumentConverter: Send + Sync {
    /// Supported file extensions, lowercase without the leading dot.
    fn supported_extensions(&self) -> &[&str];

    /// Name of this converter.
    fn name(&self) -> &str;

    /// Segment the file at a path.
    fn segment(&self, path: &Path, options: &ParseOptions) -> Result<SegmentedPaper>;

    /// Segment an in-memory source.
    fn segment_bytes(&self, bytes: &[u8], options: &ParseOptions) -> Result<SegmentedPaper>;

    /// Default paper id for a file.
    fn paper_id(&self, path: &Path) -> String {
        file_stem(path)
    }

    /// Convert the file at a path.
    fn convert(&self, path: &Path, options: &ConvertOptions) -> Result<ConvertResult> {
        let paper = self.segment(path, &options.parse)?;
        let paper_id = options
            .paper_id
            .clone()
            .unwrap_or_else(|| self.paper_id(path));

        let source_file = path
            .file_name()
            .and_then(|n| n.to_str())
            .map(str::to_string);
        assemble_with(paper, &paper_id, options, |metadata| {
            metadata.source_file = source_file;
        })
    }

    /// Convert an in-memory source. A paper id must be given in the options.
    fn convert_bytes(&self, bytes: &[u8], options: &ConvertOptions) -> Result<ConvertResult> {
        let paper_id = options
            .paper_id
            .clone()
            .ok_or_else(|| Error::Config("a paper id is required for in-memory sources".into()))?;
        let paper = self.segment_bytes(bytes, &options.parse)?;
        assemble(paper, &paper_id, options)
    }

    /// Check if this converter supports the given extension.
    fn supports_extension(&self, ext: &str) -> bool {
        let ext_lower = ext.to_lowercase();
        self.supported_extensions().iter().any(|e| *e == ext_lower)
    }
}

pub(crate) fn file_stem(path: &Path) -> String {
    path.file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("paper")
        .to_string()
}

/// Registry for paper converters.
///
/// The registry maps file extensions to converters and provides
/// convenient methods for converting papers.
pub struct ConverterRegistry {
    converters: HashMap<String, Arc<dyn DocumentConverter>>,
    by_name: HashMap<String, Arc<dyn DocumentConverter>>,
}

impl ConverterRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self {
            converters: HashMap::new(),
            by_name: HashMap::new(),
        }
    }

    /// Create a registry with the PDF, text and HTML converters.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(PdfConverter::new()));
        registry.register(Arc::new(TextConverter::new()));
        registry.register(Arc::new(HtmlConverter::new()));
        registry
    }

    /// Register a converter.
    ///
    /// The converter will be registered for all its supported extensions.
    pub fn register(&mut self, converter: Arc<dyn DocumentConverter>) {
        for ext in converter.supported_extensions() {
            self.converters
                .insert(ext.to_lowercase(), converter.clone());
        }
        self.by_name
            .insert(converter.name().to_lowercase(), converter);
    }

    /// Get a converter by file extension.
    pub fn get_by_extension(&self, ext: &str) -> Option<Arc<dyn DocumentConverter>> {
        self.converters.get(&ext.to_lowercase()).cloned()
    }

    /// Get a converter by name.
    pub fn get_by_name(&self, name: &str) -> Option<Arc<dyn DocumentConverter>> {
        self.by_name.get(&name.to_lowercase()).cloned()
    }

    /// Check if an extension is supported.
    pub fn supports(&self, ext: &str) -> bool {
        self.converters.contains_key(&ext.to_lowercase())
    }

    /// Get all supported extensions, sorted.
    pub fn supported_extensions(&self) -> Vec<&str> {
        let mut exts: Vec<&str> = self.converters.keys().map(|s| s.as_str()).collect();
        exts.sort_unstable();
        exts
    }

    /// Converter for a path, by extension.
    ///
    /// Files without an extension are sniffed and matched by converter name.
    pub fn for_path(&self, path: &Path) -> Result<Arc<dyn DocumentConverter>> {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) => self.get_by_extension(ext).ok_or_else(|| {
                Error::UnsupportedInput(format!("no converter for extension: {}", ext))
            }),
            None => {
                let kind = detect_kind_from_path(path)?;
                log::debug!("Sniffed {} as {}", path.display(), kind.as_str());
                self.get_by_name(kind.as_str()).ok_or_else(|| {
                    Error::UnsupportedInput(format!("no converter for {} input", kind.as_str()))
                })
            }
        }
    }

    /// Segment a file without rendering.
    pub fn segment(&self, path: &Path, options: &ParseOptions) -> Result<SegmentedPaper> {
        self.for_path(path)?.segment(path, options)
    }

    /// Convert a file using the appropriate converter.
    pub fn convert(&self, path: &Path, options: &ConvertOptions) -> Result<ConvertResult> {
        self.for_path(path)?.convert(path, options)
    }

    /// Convert bytes using the specified extension to determine the converter.
    pub fn convert_bytes(
        &self,
        bytes: &[u8],
        ext: &str,
        options: &ConvertOptions,
    ) -> Result<ConvertResult> {
        let converter = self
            .get_by_extension(ext)
            .ok_or_else(|| Error::UnsupportedInput(format!("no converter for extension: {}", ext)))?;

        converter.convert_bytes(bytes, options)
    }
}

impl Default for ConverterRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}
