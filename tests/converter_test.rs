//! Integration tests for the converter registry, output layout and catalog.

use std::fs;
use std::path::Path;
use std::sync::Arc;

use paperseg::catalog::Catalog;
use paperseg::convert::{ConvertOptions, ConverterRegistry, DocumentConverter};
use paperseg::error::{Error, Result};
use paperseg::layout::OutputLayout;
use paperseg::model::{ContentItem, SectionDescriptor, SegmentedPaper, SourceKind};
use paperseg::parser::ParseOptions;
use paperseg::render::from_json;
use paperseg::BoundaryStrategy;

const WIDGETS_TXT: &str = "A Study of Widgets\n\
alice@example.edu\n\
ABSTRACT\n\
This is the abstract paragraph text exceeding twenty chars.\n\
1. INTRODUCTION\n\
This is an introduction paragraph over twenty characters.\n";

const WIDGETS_HTML: &str = r#"<html><head><title>Widgets in the Wild | ACM</title></head><body>
<div data-core-wrapper="content">
<section id="summary-abstract"><div role="paragraph">We study how widgets behave outside the lab.</div></section>
<section id="bodymatter">
  <section id="sec-1"><h2>Introduction</h2>
    <div role="paragraph">Widgets are everywhere and deserve careful study.</div>
    <figure id="fig1"><img src="/cms/asset/fig1.png"/><figcaption>Figure 1: A widget</figcaption></figure>
  </section>
</section>
</div></body></html>"#;

/// Converter for a made-up outline format: one section title per line.
struct OutlineConverter;

impl DocumentConverter for OutlineConverter {
    fn supported_extensions(&self) -> &[&str] {
        &["outline"]
    }

    fn name(&self) -> &str {
        "outline"
    }

    fn segment(&self, path: &Path, options: &ParseOptions) -> Result<SegmentedPaper> {
        self.segment_bytes(&fs::read(path)?, options)
    }

    fn segment_bytes(&self, bytes: &[u8], _options: &ParseOptions) -> Result<SegmentedPaper> {
        let text = String::from_utf8_lossy(bytes);
        let mut paper = SegmentedPaper::new(SourceKind::PdfText);
        for line in text.lines().filter(|l| !l.trim().is_empty()) {
            paper.sections.push(SectionDescriptor::new(line.trim(), 2));
            paper.content.push(ContentItem::section(line.trim()));
        }
        Ok(paper)
    }
}

#[test]
fn test_text_dump_to_layout() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("Widgets Study_v2.txt");
    fs::write(&input, WIDGETS_TXT).unwrap();

    let registry = ConverterRegistry::with_defaults();
    let options = ConvertOptions::default();
    let result = registry.convert(&input, &options).unwrap();

    assert_eq!(result.paper_id, "widgets-study-v2");
    assert_eq!(result.strategy, BoundaryStrategy::fixed());
    assert_eq!(result.metadata.section_titles(), vec!["Abstract", "Introduction"]);
    assert_eq!(result.metadata.section_boundaries["Introduction"].start, 600);
    assert_eq!(result.metadata.source_file.as_deref(), Some("Widgets Study_v2.txt"));

    let layout = OutputLayout::new(dir.path().join("experiment"));
    let written = layout.write(&result, &options.render).unwrap();
    assert!(written.html.is_file());
    assert!(written.images.is_dir());

    let record = from_json(&fs::read_to_string(&written.json).unwrap()).unwrap();
    assert_eq!(record, result.metadata);
}

#[test]
fn test_saved_html_uses_length_strategy() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("chi25-widgets.html");
    fs::write(&input, WIDGETS_HTML).unwrap();

    let result = ConverterRegistry::with_defaults()
        .convert(&input, &ConvertOptions::default())
        .unwrap();

    assert_eq!(result.paper_id, "chi25-widgets");
    assert_eq!(result.metadata.source.as_deref(), Some("saved_html"));
    assert_eq!(result.metadata.section_titles(), vec!["Abstract", "Introduction"]);
    let abstract_range = result.metadata.section_boundaries["Abstract"];
    let intro_range = result.metadata.section_boundaries["Introduction"];
    assert_eq!(abstract_range.end, intro_range.start);
    assert!(result
        .html
        .contains("src=\"../papers_images/chi25-widgets/fig1.png\""));
    assert!(result.diagnostics().is_empty());
}

#[test]
fn test_xhtml_saved_page_converts() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("chi25-widgets.xhtml");
    fs::write(&input, WIDGETS_HTML).unwrap();

    let result = ConverterRegistry::with_defaults()
        .convert(&input, &ConvertOptions::default())
        .unwrap();

    assert_eq!(result.paper_id, "chi25-widgets");
    assert_eq!(result.metadata.source.as_deref(), Some("saved_html"));
    assert_eq!(result.metadata.section_titles(), vec!["Abstract", "Introduction"]);
}

#[test]
fn test_strategy_override() {
    let registry = ConverterRegistry::with_defaults();
    let options = ConvertOptions::new()
        .with_paper_id("widgets")
        .with_strategy(BoundaryStrategy::fixed());
    let result = registry
        .convert_bytes(WIDGETS_HTML.as_bytes(), "html", &options)
        .unwrap();

    assert_eq!(result.metadata.section_boundaries["Abstract"].end, 600);
    assert_eq!(result.metadata.section_boundaries["Introduction"].start, 600);
}

#[test]
fn test_missing_anchors_are_diagnostics() {
    let options = ConvertOptions::new().with_paper_id("bare");
    let result = ConverterRegistry::with_defaults()
        .convert_bytes(b"<html><body><p>nothing here</p></body></html>", "html", &options)
        .unwrap();

    assert_eq!(result.diagnostics().len(), 1);
    assert!(result.metadata.sections.is_empty());
    assert!(result.html.contains("id=\"paper-content\""));
}

#[test]
fn test_corrupt_pdf_is_error() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("broken.pdf");
    fs::write(&input, b"%PDF-1.7\nthis is not really a pdf").unwrap();

    let registry = ConverterRegistry::with_defaults();
    let strict = registry.convert(&input, &ConvertOptions::default());
    assert!(strict.is_err());

    let lenient = ConvertOptions::new().with_parse_options(ParseOptions::new().lenient());
    assert!(registry.convert(&input, &lenient).is_err());
}

#[test]
fn test_custom_converter_registration() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("plan.outline");
    fs::write(&input, "Introduction\nMethod\nResults\n").unwrap();

    let mut registry = ConverterRegistry::with_defaults();
    registry.register(Arc::new(OutlineConverter));
    assert!(registry.supports("outline"));

    let result = registry.convert(&input, &ConvertOptions::default()).unwrap();
    assert_eq!(result.paper_id, "plan");
    assert_eq!(result.metadata.section_boundaries["Results"].start, 1200);
}

#[test]
fn test_unknown_extension() {
    let registry = ConverterRegistry::with_defaults();
    let err = registry
        .convert(Path::new("paper.docx"), &ConvertOptions::default())
        .unwrap_err();
    assert!(matches!(err, Error::UnsupportedInput(_)));
}

#[test]
fn test_catalog_from_layout() {
    let dir = tempfile::tempdir().unwrap();
    let layout = OutputLayout::new(dir.path());
    let registry = ConverterRegistry::with_defaults();

    for (id, title) in [("b-paper", "Don't Panic"), ("a-paper", "Widgets in the Wild")] {
        let text = format!("{}\nINTRODUCTION\nAn introduction line that is long enough.\n", title);
        let options = ConvertOptions::new().with_paper_id(id);
        let result = registry.convert_bytes(text.as_bytes(), "txt", &options).unwrap();
        layout.write(&result, &options.render).unwrap();
    }

    // A record without its page is skipped.
    fs::write(layout.json_path("c-orphan"), r#"{"paper_id":"c-orphan","title":"Orphan"}"#).unwrap();
    // An unreadable record is skipped.
    fs::write(layout.json_path("d-broken"), "{ not json").unwrap();

    let catalog = Catalog::scan(&layout).unwrap();
    let ids: Vec<&str> = catalog.entries.iter().map(|e| e.id.as_str()).collect();
    assert_eq!(ids, vec!["a-paper", "b-paper"]);
    assert_eq!(catalog.entries[0].section_count, 1);
    assert_eq!(catalog.warnings.len(), 2);

    let path = catalog.write_papers_data(&layout).unwrap();
    let js = fs::read_to_string(path).unwrap();
    assert!(js.contains("const AVAILABLE_PAPERS = [\n"));
    assert!(js.contains(
        "    {\n        id: 'b-paper',\n        name: 'Don\\'t Panic',\n        url: 'papers_html/b-paper.html'\n    }\n];\n"
    ));
    assert!(js.contains("url: 'papers_html/a-paper.html'\n    },\n    {\n"));
}
