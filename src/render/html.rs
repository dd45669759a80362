//! Single-column HTML rendering for the reading experiment.
//!
//! Every section header carries `data-section` with its title and every
//! other block carries `data-in-section` with the title of its enclosing
//! section. The estimated boundaries are embedded as a JSON data block; a
//! small client script replaces them with measured pixel offsets once the
//! page is laid out.

use crate::error::{Error, Result};
use crate::model::{ContentItem, PaperMetadata, SUBSECTION_LEVEL};
use crate::parser::ABSTRACT_SECTION;

use super::visitor::{DefaultVisitor, DocumentVisitor, VisitorAction};
use super::{ExtractionStats, RenderOptions, RenderResult};

/// Id of the element holding the rendered paper.
pub const CONTENT_ELEMENT_ID: &str = "paper-content";

/// Id of the embedded boundary estimate.
pub const BOUNDARY_DATA_ID: &str = "section-boundaries";

const MEASURE_SCRIPT: &str = r#"    <script>
    (function () {
        var estimate = {};
        var data = document.getElementById('section-boundaries');
        if (data) {
            try { estimate = JSON.parse(data.textContent); } catch (e) { estimate = {}; }
        }
        window.estimatedSectionBoundaries = estimate;
        window.sectionBoundaries = estimate;

        window.addEventListener('DOMContentLoaded', function () {
            var boundaries = {};
            var sections = document.querySelectorAll('[data-section]');
            var container = document.getElementById('paper-content');

            sections.forEach(function (section, index) {
                var name = section.getAttribute('data-section');
                var start = section.offsetTop;
                var end = (index < sections.length - 1)
                    ? sections[index + 1].offsetTop
                    : container.scrollHeight;
                boundaries[name] = { start: start, end: end };
            });

            window.sectionBoundaries = boundaries;
        });
    })();
    </script>
"#;

/// Render a paper page with default visitor behavior.
pub fn to_html(
    metadata: &PaperMetadata,
    items: &[ContentItem],
    options: &RenderOptions,
) -> Result<RenderResult> {
    HtmlRenderer::new(options.clone()).render(metadata, items)
}

/// HTML page renderer.
pub struct HtmlRenderer {
    options: RenderOptions,
    stats: ExtractionStats,
    visitor: Box<dyn DocumentVisitor>,
}

impl HtmlRenderer {
    /// Create a new renderer.
    pub fn new(options: RenderOptions) -> Self {
        Self {
            options,
            stats: ExtractionStats::new(),
            visitor: Box::new(DefaultVisitor),
        }
    }

    /// Use a visitor to customize paragraphs, images and tables.
    pub fn with_visitor<V: DocumentVisitor + 'static>(mut self, visitor: V) -> Self {
        self.visitor = Box::new(visitor);
        self
    }

    /// Render the page for a paper.
    ///
    /// `metadata.paper_id` names the image directory and is embedded in
    /// the page; `metadata.section_boundaries` is embedded as the estimate.
    pub fn render(mut self, metadata: &PaperMetadata, items: &[ContentItem]) -> Result<RenderResult> {
        let body = self.render_body(metadata, items);
        let boundaries = self.boundary_data(metadata)?;

        let mut page = String::with_capacity(body.len() + 4096);
        page.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
        page.push_str("    <meta charset=\"UTF-8\">\n");
        page.push_str(
            "    <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n",
        );
        page.push_str(&format!(
            "    <title>{}</title>\n",
            escape_html(metadata.display_title())
        ));
        if let Some(url) = &self.options.stylesheet_url {
            page.push_str(&format!("    <script src=\"{}\"></script>\n", escape_html(url)));
        }
        page.push_str("</head>\n<body class=\"bg-gray-50 p-8\">\n");

        page.push_str(&format!("    <!-- Paper ID: {} -->\n", comment_safe(&metadata.paper_id)));
        if let Some(source) = &metadata.source {
            page.push_str(&format!("    <!-- Source: {} -->\n", comment_safe(source)));
        }
        if let Some(doi) = &metadata.doi {
            page.push_str(&format!("    <!-- DOI: {} -->\n", comment_safe(doi)));
        }

        page.push_str("\n    <div class=\"max-w-4xl mx-auto bg-white shadow-xl rounded-lg p-12\">\n");
        page.push_str(&format!(
            "        <div class=\"prose max-w-none\" id=\"{}\" data-paper-id=\"{}\">\n",
            CONTENT_ELEMENT_ID,
            escape_html(&metadata.paper_id)
        ));
        page.push_str(&body);
        page.push_str("        </div>\n    </div>\n");

        if self.options.review_panel {
            page.push_str(&review_panel(metadata, items));
        }

        page.push_str(&format!(
            "\n    <script type=\"application/json\" id=\"{}\">{}</script>\n",
            BOUNDARY_DATA_ID, boundaries
        ));
        if self.options.boundary_script {
            page.push_str(MEASURE_SCRIPT);
        }
        page.push_str("</body>\n</html>\n");

        log::debug!(
            "Rendered {}: {} bytes, {} sections",
            metadata.paper_id,
            page.len(),
            self.stats.section_count + self.stats.subsection_count
        );

        Ok(RenderResult::new(page, metadata.clone(), self.stats))
    }

    fn boundary_data(&self, metadata: &PaperMetadata) -> Result<String> {
        let json = serde_json::to_string(&metadata.section_boundaries)
            .map_err(|e| Error::Render(format!("boundary serialization error: {}", e)))?;
        // Keep the data block from closing early.
        Ok(json.replace("</", "<\\/"))
    }

    fn render_body(&mut self, metadata: &PaperMetadata, items: &[ContentItem]) -> String {
        let mut out = String::new();
        let indent = "            ";

        if let Some(title) = metadata.title.as_deref().filter(|t| !t.is_empty()) {
            self.stats.count_text(title);
            out.push_str(&format!(
                "{}<h1 class=\"text-4xl font-bold mb-4\">{}</h1>\n",
                indent,
                escape_html(title)
            ));
        }

        if !metadata.authors.is_empty() {
            let byline: Vec<String> = metadata.authors.iter().map(|a| escape_html(a)).collect();
            out.push_str(&format!(
                "{}<p class=\"text-gray-600 mb-2\" data-role=\"authors\">{}</p>\n",
                indent,
                byline.join("<br/>")
            ));
        }

        if let Some(publication) = &metadata.publication {
            out.push_str(&format!(
                "{}<p class=\"text-sm text-gray-500 mb-8\" data-role=\"publication\">{}</p>\n",
                indent,
                escape_html(publication)
            ));
        }

        if let Some(abstract_text) = metadata.abstract_if_any() {
            self.stats.count_text(abstract_text);
            out.push_str(&format!(
                "{}<h2 class=\"text-2xl font-bold mb-4 mt-8\" data-section=\"{}\">{}</h2>\n",
                indent, ABSTRACT_SECTION, ABSTRACT_SECTION
            ));
            out.push_str(&format!(
                "{}<p class=\"mb-4 text-justify\" data-in-section=\"{}\">{}</p>\n",
                indent,
                ABSTRACT_SECTION,
                escape_html(abstract_text)
            ));
        }

        let mut current: Option<&str> = if metadata.abstract_if_any().is_some() {
            Some(ABSTRACT_SECTION)
        } else {
            None
        };

        for item in items {
            match item {
                ContentItem::Section { text, level } => {
                    self.visitor.on_section_start(text, *level);
                    self.stats.count_text(text);
                    let (tag, class) = if *level >= SUBSECTION_LEVEL {
                        self.stats.add_subsection();
                        ("h3", "text-xl font-bold mb-3 mt-6")
                    } else {
                        self.stats.add_section();
                        ("h2", "text-2xl font-bold mb-4 mt-8")
                    };
                    let escaped = escape_html(text);
                    out.push_str(&format!(
                        "{}<{tag} class=\"{}\" data-section=\"{}\">{}</{tag}>\n",
                        indent,
                        class,
                        escaped,
                        escaped,
                        tag = tag
                    ));
                    current = Some(text.as_str());
                }
                ContentItem::Paragraph { text } => {
                    let action = self.visitor.visit_paragraph(text, current);
                    if self.apply(&mut out, indent, action) {
                        continue;
                    }
                    self.stats.add_paragraph();
                    self.stats.count_text(text);
                    out.push_str(&format!(
                        "{}<p class=\"mb-4 text-justify\"{}>{}</p>\n",
                        indent,
                        in_section(current),
                        escape_html(text)
                    ));
                }
                ContentItem::Image {
                    filename, caption, ..
                } => {
                    let action = self.visitor.visit_image(filename, caption);
                    if self.apply(&mut out, indent, action) {
                        continue;
                    }
                    self.stats.add_image();
                    self.stats.count_text(caption);
                    let src = self.options.image_path(&metadata.paper_id, filename);
                    out.push_str(&format!(
                        "{}<div class=\"my-8 p-4 bg-gray-50 rounded-lg\"{}>\n",
                        indent,
                        in_section(current)
                    ));
                    out.push_str(&format!(
                        "{}    <img src=\"{}\" class=\"max-w-full mx-auto shadow-lg rounded\" alt=\"{}\" />\n",
                        indent,
                        escape_html(&src),
                        escape_html(caption)
                    ));
                    push_caption(&mut out, indent, caption);
                    out.push_str(&format!("{}</div>\n", indent));
                }
                ContentItem::Table { caption, html } => {
                    let action = self.visitor.visit_table(caption, html);
                    if self.apply(&mut out, indent, action) {
                        continue;
                    }
                    self.stats.add_table();
                    self.stats.count_text(caption);
                    out.push_str(&format!(
                        "{}<div class=\"my-8 overflow-x-auto\" data-role=\"table\"{}>\n",
                        indent,
                        in_section(current)
                    ));
                    out.push_str(&format!("{}    {}\n", indent, html));
                    push_caption(&mut out, indent, caption);
                    out.push_str(&format!("{}</div>\n", indent));
                }
            }
        }

        out
    }

    /// Apply a non-continue visitor action. Returns true when the item was
    /// handled and default rendering must not run.
    fn apply(&self, out: &mut String, indent: &str, action: VisitorAction) -> bool {
        match action {
            VisitorAction::Continue => false,
            VisitorAction::Skip => true,
            VisitorAction::Replace(markup) => {
                out.push_str(&format!("{}{}\n", indent, markup));
                true
            }
        }
    }
}

fn in_section(section: Option<&str>) -> String {
    match section {
        Some(title) => format!(" data-in-section=\"{}\"", escape_html(title)),
        None => String::new(),
    }
}

fn push_caption(out: &mut String, indent: &str, caption: &str) {
    if !caption.is_empty() {
        out.push_str(&format!(
            "{}    <p class=\"text-sm text-gray-600 text-center mt-2 italic\">{}</p>\n",
            indent,
            escape_html(caption)
        ));
    }
}

fn review_panel(metadata: &PaperMetadata, items: &[ContentItem]) -> String {
    let sections = metadata.section_titles();
    let sections = if sections.is_empty() {
        "Check manually".to_string()
    } else {
        sections
            .iter()
            .map(|s| escape_html(s))
            .collect::<Vec<_>>()
            .join(", ")
    };
    let images = items
        .iter()
        .filter(|i| matches!(i, ContentItem::Image { .. }))
        .count();

    let mut out = String::new();
    out.push_str("\n    <div class=\"max-w-4xl mx-auto mt-8 p-6 bg-blue-50 rounded-lg\" id=\"review-panel\">\n");
    out.push_str("        <h4 class=\"font-bold mb-2\">Review Checklist</h4>\n");
    out.push_str("        <ul class=\"text-sm space-y-1\">\n");
    out.push_str(&format!(
        "            <li>Title: {}</li>\n",
        escape_html(metadata.display_title())
    ));
    out.push_str(&format!("            <li>Sections: {}</li>\n", sections));
    out.push_str(&format!("            <li>Images: {} found</li>\n", images));
    out.push_str("        </ul>\n");
    if let (Some(doi), Some(url)) = (&metadata.doi, &metadata.url) {
        out.push_str(&format!(
            "        <p class=\"mt-4 pt-4 border-t text-xs text-gray-600\"><strong>DOI:</strong> <a href=\"{}\" class=\"text-blue-600 hover:underline\" target=\"_blank\">{}</a></p>\n",
            escape_html(url),
            escape_html(doi)
        ));
    }
    out.push_str("    </div>\n");
    out
}

/// Escape text for HTML element content and attribute values.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

fn comment_safe(text: &str) -> String {
    text.replace("--", "- -")
}
