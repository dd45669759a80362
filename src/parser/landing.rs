//! Segmentation of digital library landing pages.
//!
//! Landing pages carry citation metadata (`h1.citation__title`, author
//! links, an abstract block) and, for open-access papers, a full-text body
//! under `div.article__body` or `div.hlFld-Fulltext`.

use scraper::{ElementRef, Html};

use crate::model::{
    filename_from_src, ContentItem, ImageRef, SectionDescriptor, SegmentedPaper, SourceKind,
    SECTION_LEVEL, SUBSECTION_LEVEL,
};

use super::query::{
    descendant_elements, find_descendant, find_tag, has_class, has_class_containing, is_tag,
    stripped_text,
};
use super::ParseOptions;

/// Segments a landing page into metadata and content items.
pub struct LandingSegmenter<'a> {
    options: &'a ParseOptions,
}

impl<'a> LandingSegmenter<'a> {
    /// Create a segmenter using the given options.
    pub fn new(options: &'a ParseOptions) -> Self {
        Self { options }
    }

    /// Parse and segment an HTML string.
    pub fn segment_html(&self, html: &str) -> SegmentedPaper {
        let doc = Html::parse_document(html);
        self.segment_document(&doc)
    }

    /// Segment a parsed landing page.
    pub fn segment_document(&self, doc: &Html) -> SegmentedPaper {
        let mut paper = SegmentedPaper::new(SourceKind::LandingPage);
        let root = doc.root_element();

        paper.title = find_descendant(root, |el| {
            is_tag(el, "h1") && has_class(el, "citation__title")
        })
        .map(|el| stripped_text(&el))
        .filter(|t| !t.is_empty());

        if let Some(authors) =
            find_descendant(root, |el| is_tag(el, "div") && has_class(el, "authors-section"))
        {
            paper.authors = descendant_elements(authors)
                .filter(|el| is_tag(el, "a") && has_class(el, "author-name"))
                .map(|el| stripped_text(&el))
                .collect();
        }

        paper.abstract_text =
            find_descendant(root, |el| is_tag(el, "div") && has_class(el, "abstractSection"))
                .and_then(|section| find_tag(section, "p"))
                .map(|p| stripped_text(&p))
                .filter(|t| !t.is_empty());

        paper.sections = descendant_elements(root)
            .filter(|el| is_heading(el) && has_class_containing(el, "section__title"))
            .map(|el| SectionDescriptor::new(stripped_text(&el), heading_level(&el)))
            .collect();

        paper.publication =
            find_descendant(root, |el| is_tag(el, "div") && has_class(el, "issue-item__detail"))
                .map(|el| stripped_text(&el))
                .filter(|t| !t.is_empty());

        let body = find_descendant(root, |el| is_tag(el, "div") && has_class(el, "article__body"))
            .or_else(|| {
                find_descendant(root, |el| is_tag(el, "div") && has_class(el, "hlFld-Fulltext"))
            });
        match body {
            Some(body) => self.segment_body(body, &mut paper),
            None => paper.diagnose("main content area not found on landing page"),
        }

        log::debug!(
            "Segmented landing page: {} items, {} sections",
            paper.content.len(),
            paper.sections.len()
        );

        paper
    }

    fn segment_body(&self, body: ElementRef<'_>, paper: &mut SegmentedPaper) {
        for el in descendant_elements(body) {
            match el.value().name() {
                "h2" | "h3" => {
                    let level = heading_level(&el);
                    paper.content.push(ContentItem::Section {
                        text: stripped_text(&el),
                        level,
                    });
                }
                "p" => {
                    let text = stripped_text(&el);
                    if text.chars().count() > self.options.landing_paragraph_chars {
                        paper.content.push(ContentItem::paragraph(text));
                    }
                }
                "figure" => {
                    let caption = find_tag(el, "figcaption")
                        .map(|c| stripped_text(&c))
                        .unwrap_or_default();
                    if let Some(src) = find_tag(el, "img").and_then(|img| img.value().attr("src"))
                    {
                        push_image(paper, src, caption);
                    }
                }
                // Images inside a figure were taken with the figure.
                "img" if !inside_figure(&el, body) => {
                    if let Some(src) = el.value().attr("src") {
                        push_image(paper, src, String::new());
                    }
                }
                _ => {}
            }
        }
    }
}

fn push_image(paper: &mut SegmentedPaper, src: &str, caption: String) {
    let filename = filename_from_src(src);
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

fn is_heading(el: &ElementRef<'_>) -> bool {
    is_tag(el, "h2") || is_tag(el, "h3")
}

fn heading_level(el: &ElementRef<'_>) -> u8 {
    if is_tag(el, "h3") {
        SUBSECTION_LEVEL
    } else {
        SECTION_LEVEL
    }
}

fn inside_figure(el: &ElementRef<'_>, stop: ElementRef<'_>) -> bool {
    el.ancestors()
        .take_while(|node| node.id() != stop.id())
        .filter_map(ElementRef::wrap)
        .any(|a| is_tag(&a, "figure"))
}
