//! DOM segmentation of saved full-text HTML pages.
//!
//! The page is expected to carry a content wrapper
//! (`div[data-core-wrapper="content"]`) holding an abstract section
//! (`section#summary-abstract`) and the body matter (`section#bodymatter`).
//! Missing anchors are recoverable: the result is left empty or partial
//! and the anomaly is recorded as a diagnostic.

use scraper::{ElementRef, Html};

use crate::model::{
    filename_from_src, ContentItem, ImageRef, SectionDescriptor, SegmentedPaper, SourceKind,
    TableRef, SECTION_LEVEL, SUBSECTION_LEVEL,
};

use super::query::{
    attr_eq, attr_starts_with, child_tag, descendant_elements, document_title, find_descendant,
    find_tag, is_tag, stripped_text,
};
use super::ParseOptions;

/// Title given to the synthetic abstract section.
pub const ABSTRACT_SECTION: &str = "Abstract";

/// Segments a parsed HTML document into typed content items.
pub struct DomSegmenter<'a> {
    options: &'a ParseOptions,
}

impl<'a> DomSegmenter<'a> {
    /// Create a segmenter using the given options.
    pub fn new(options: &'a ParseOptions) -> Self {
        Self { options }
    }

    /// Parse and segment an HTML string.
    pub fn segment_html(&self, html: &str) -> SegmentedPaper {
        let doc = Html::parse_document(html);
        self.segment_document(&doc)
    }

    /// Segment a parsed document.
    pub fn segment_document(&self, doc: &Html) -> SegmentedPaper {
        let mut paper = SegmentedPaper::new(SourceKind::SavedHtml);
        paper.title = document_title(doc);

        let wrapper = find_descendant(doc.root_element(), |el| {
            is_tag(el, "div") && attr_eq(el, "data-core-wrapper", "content")
        });
        let Some(wrapper) = wrapper else {
            paper.diagnose("content wrapper div[data-core-wrapper=\"content\"] not found");
            return paper;
        };

        self.extract_abstract(wrapper, &mut paper);

        let body = find_descendant(wrapper, |el| {
            is_tag(el, "section") && attr_eq(el, "id", "bodymatter")
        });
        match body {
            Some(body) => self.segment_body(body, &mut paper),
            None => paper.diagnose("body matter section#bodymatter not found"),
        }

        log::debug!(
            "Segmented HTML: {} items, {} images, {} tables, {} sections",
            paper.content.len(),
            paper.images.len(),
            paper.tables.len(),
            paper.sections.len()
        );

        paper
    }

    /// Pull the abstract paragraph and register the abstract section ahead
    /// of all body sections.
    fn extract_abstract(&self, wrapper: ElementRef<'_>, paper: &mut SegmentedPaper) {
        let section = find_descendant(wrapper, |el| {
            is_tag(el, "section") && attr_eq(el, "id", "summary-abstract")
        });
        let paragraph = section.and_then(|s| {
            find_descendant(s, |el| is_tag(el, "div") && attr_eq(el, "role", "paragraph"))
        });

        if let Some(paragraph) = paragraph {
            let text = stripped_text(&paragraph);
            if !text.is_empty() {
                paper.abstract_text = Some(text);
            }
            paper
                .sections
                .insert(0, SectionDescriptor::untiered(ABSTRACT_SECTION));
        }
    }

    /// Walk the body-matter subtree and classify its nodes in document order.
    pub fn segment_body(&self, body: ElementRef<'_>, paper: &mut SegmentedPaper) {
        for el in descendant_elements(body) {
            match el.value().name() {
                "section" if attr_starts_with(&el, "id", "sec-") => {
                    self.classify_section(el, paper);
                }
                "figure" => self.classify_figure(el, paper),
                "div" if attr_eq(&el, "role", "paragraph") => {
                    let text = stripped_text(&el);
                    if text.chars().count() > self.options.dom_paragraph_chars {
                        paper.content.push(ContentItem::paragraph(text));
                    }
                }
                _ => {}
            }
        }
    }

    fn classify_section(&self, el: ElementRef<'_>, paper: &mut SegmentedPaper) {
        if let Some(h2) = child_tag(el, "h2") {
            let title = stripped_text(&h2);
            log::debug!("Section: {}", title);
            paper
                .sections
                .push(SectionDescriptor::new(title.clone(), SECTION_LEVEL));
            paper.content.push(ContentItem::section(title));
        }

        if let Some(h3) = child_tag(el, "h3") {
            let title = stripped_text(&h3);
            log::debug!("Subsection: {}", title);
            paper
                .sections
                .push(SectionDescriptor::new(title.clone(), SUBSECTION_LEVEL));
            paper.content.push(ContentItem::subsection(title));
        }
    }

    /// Tables take precedence: a figure holding both a table and an image
    /// is a table.
    fn classify_figure(&self, el: ElementRef<'_>, paper: &mut SegmentedPaper) {
        let caption = find_tag(el, "figcaption")
            .map(|c| stripped_text(&c))
            .unwrap_or_default();

        if let Some(table) = find_tag(el, "table") {
            let html = table.html();
            paper.tables.push(TableRef {
                caption: caption.clone(),
                html: html.clone(),
            });
            paper.content.push(ContentItem::Table { caption, html });
            return;
        }

        let src = find_tag(el, "img").and_then(|img| img.value().attr("src"));
        match src {
            Some(src) => {
                let filename = filename_from_src(src);
                log::debug!("Image: {}", filename);
                paper.images.push(ImageRef {
                    src: src.to_string(),
                    filename: filename.clone(),
                    caption: caption.clone(),
                });
                paper.content.push(ContentItem::Image {
                    src: src.to_string(),
                    filename,
                    caption,
                });
            }
            None => {
                let id = el.value().attr("id").unwrap_or("<no id>");
                paper.diagnose(format!("figure {} has no table or image source", id));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(abstract_html: &str, body_html: &str) -> String {
        format!(
            r#"<html><head><title>Widgets in the Wild | CHI EA '25 | ACM</title></head>
<body><div data-core-wrapper="content">
<section id="summary-abstract">{}</section>
<section id="bodymatter">{}</section>
</div></body></html>"#,
            abstract_html, body_html
        )
    }

    fn segment(html: &str) -> SegmentedPaper {
        let options = ParseOptions::default();
        DomSegmenter::new(&options).segment_html(html)
    }

    #[test]
    fn test_sections_paragraphs_and_abstract() {
        let html = page(
            r#"<h2>Abstract</h2><div role="paragraph">We study widgets in the wild.</div>"#,
            r#"<section id="sec-1"><h2>Introduction</h2>
                 <div role="paragraph">Widgets are everywhere and deserve careful study.</div>
                 <section id="sec-1-1"><h3>Motivation</h3>
                   <div role="paragraph">Short one.</div>
                 </section>
               </section>"#,
        );
        let paper = segment(&html);

        assert_eq!(paper.source, SourceKind::SavedHtml);
        assert_eq!(paper.title.as_deref(), Some("Widgets in the Wild"));
        assert_eq!(
            paper.abstract_text.as_deref(),
            Some("We study widgets in the wild.")
        );
        assert_eq!(
            paper.section_titles().collect::<Vec<_>>(),
            vec!["Abstract", "Introduction", "Motivation"]
        );
        assert_eq!(paper.sections[0].level, None);
        assert_eq!(paper.sections[2].level, Some(3));
        assert_eq!(
            paper.content,
            vec![
                ContentItem::section("Introduction"),
                ContentItem::paragraph("Widgets are everywhere and deserve careful study."),
                ContentItem::subsection("Motivation"),
            ]
        );
        assert!(paper.diagnostics.is_empty());
    }

    #[test]
    fn test_section_with_both_h2_and_h3() {
        let html = page(
            "",
            r#"<section id="sec-2"><h2>Method</h2><h3>Participants</h3></section>"#,
        );
        let paper = segment(&html);
        assert_eq!(
            paper.content,
            vec![
                ContentItem::section("Method"),
                ContentItem::subsection("Participants")
            ]
        );
    }

    #[test]
    fn test_sections_without_sec_prefix_ignored() {
        let html = page("", r#"<section id="appendix"><h2>Appendix</h2></section>"#);
        let paper = segment(&html);
        assert!(paper.content.is_empty());
    }

    #[test]
    fn test_figure_with_table_and_image_is_table() {
        let html = page(
            "",
            r#"<figure id="tab1"><img src="/cms/tab1-preview.png"/>
                 <table><tr><td>42</td></tr></table>
                 <figcaption>Table 1: Results overview</figcaption></figure>"#,
        );
        let paper = segment(&html);

        assert_eq!(paper.content.len(), 1);
        match &paper.content[0] {
            ContentItem::Table { caption, html } => {
                assert_eq!(caption, "Table 1: Results overview");
                assert_eq!(html, "<table><tbody><tr><td>42</td></tr></tbody></table>");
            }
            other => panic!("expected table, got {:?}", other),
        }
        assert!(paper.images.is_empty());
        assert_eq!(paper.tables.len(), 1);
    }

    #[test]
    fn test_figure_with_image() {
        let html = page(
            "",
            r#"<figure id="fig1"><img src="/cms/10.1145/3706599/assets/chiea25-1-fig1.jpg"/>
                 <figcaption> Figure 1: A widget </figcaption></figure>"#,
        );
        let paper = segment(&html);

        assert_eq!(
            paper.content,
            vec![ContentItem::Image {
                src: "/cms/10.1145/3706599/assets/chiea25-1-fig1.jpg".to_string(),
                filename: "chiea25-1-fig1.jpg".to_string(),
                caption: "Figure 1: A widget".to_string(),
            }]
        );
        assert_eq!(paper.images[0].filename, "chiea25-1-fig1.jpg");
    }

    #[test]
    fn test_figure_without_source_is_diagnosed() {
        let html = page("", r#"<figure id="fig9"><img alt="missing"/></figure>"#);
        let paper = segment(&html);
        assert!(paper.content.is_empty());
        assert_eq!(paper.diagnostics.len(), 1);
        assert!(paper.diagnostics[0].contains("fig9"));
    }

    #[test]
    fn test_missing_wrapper_is_recoverable() {
        let paper = segment("<html><head><title>Lonely</title></head><body></body></html>");
        assert!(paper.content.is_empty());
        assert!(paper.sections.is_empty());
        assert_eq!(paper.diagnostics.len(), 1);
        assert_eq!(paper.title.as_deref(), Some("Lonely"));
    }

    #[test]
    fn test_missing_body_keeps_abstract() {
        let html = r#"<html><body><div data-core-wrapper="content">
            <section id="summary-abstract"><div role="paragraph">Only an abstract.</div></section>
            </div></body></html>"#;
        let paper = segment(html);
        assert_eq!(paper.abstract_text.as_deref(), Some("Only an abstract."));
        assert_eq!(paper.section_titles().collect::<Vec<_>>(), vec!["Abstract"]);
        assert!(paper.content.is_empty());
        assert_eq!(paper.diagnostics.len(), 1);
    }

    #[test]
    fn test_paragraph_threshold_is_thirty_chars() {
        let thirty = "a".repeat(30);
        let thirty_one = "b".repeat(31);
        let html = page(
            "",
            &format!(
                r#"<div role="paragraph">{}</div><div role="paragraph">{}</div>"#,
                thirty, thirty_one
            ),
        );
        let paper = segment(&html);
        assert_eq!(paper.content, vec![ContentItem::paragraph(thirty_one)]);
    }
}
