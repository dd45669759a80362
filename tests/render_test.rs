//! Integration tests for page rendering.

use paperseg::model::{ContentItem, PaperMetadata, SectionBoundary};
use paperseg::render::visitor::{DocumentVisitor, VisitorAction};
use paperseg::render::{to_html, HtmlRenderer, RenderOptions, BOUNDARY_DATA_ID};
use scraper::{ElementRef, Html, Selector};

const TABLE_HTML: &str = "<table><tbody><tr><td>42 &amp; 7</td></tr></tbody></table>";

fn items() -> Vec<ContentItem> {
    vec![
        ContentItem::section("Introduction & Motivation"),
        ContentItem::paragraph("Widgets <really> matter, say \"experts\" & 'users'."),
        ContentItem::subsection("Prior Work"),
        ContentItem::image("/cms/asset/fig1.png", "Figure 1: a <widget>"),
        ContentItem::table("Table 1: Counts & totals", TABLE_HTML),
        ContentItem::paragraph("A closing paragraph long enough to keep."),
    ]
}

fn metadata() -> PaperMetadata {
    let mut meta = PaperMetadata::new("chi25-widgets");
    meta.title = Some("Widgets & Gadgets".to_string());
    meta.section_boundaries
        .insert("Introduction & Motivation".to_string(), SectionBoundary::new(0, 120));
    meta
}

fn sel(selector: &str) -> Selector {
    Selector::parse(selector).unwrap()
}

fn text_of(el: ElementRef<'_>) -> String {
    el.text().collect::<String>().trim().to_string()
}

/// Re-extract content items from the rendered page by tag.
fn extract_items(page: &str) -> Vec<ContentItem> {
    let doc = Html::parse_document(page);
    let content = doc.select(&sel("#paper-content")).next().unwrap();
    let caption = sel("p");
    let img = sel("img");
    let table = sel("table");

    content
        .children()
        .filter_map(ElementRef::wrap)
        .filter_map(|el| match el.value().name() {
            "h2" => Some(ContentItem::section(text_of(el))),
            "h3" => Some(ContentItem::subsection(text_of(el))),
            "p" => Some(ContentItem::paragraph(text_of(el))),
            "div" if el.value().attr("data-role") == Some("table") => {
                let caption = el.select(&caption).next().map(text_of).unwrap_or_default();
                let html = el.select(&table).next().map(|t| t.html()).unwrap_or_default();
                Some(ContentItem::table(caption, html))
            }
            "div" => {
                let image = el.select(&img).next()?;
                let src = image.value().attr("src")?.to_string();
                let caption = image.value().attr("alt").unwrap_or_default().to_string();
                Some(ContentItem::image(src, caption))
            }
            _ => None,
        })
        .collect()
}

#[test]
fn test_render_round_trip() {
    let meta = PaperMetadata::new("chi25-widgets");
    let result = to_html(&meta, &items(), &RenderOptions::default()).unwrap();

    let extracted = extract_items(&result.content);
    let expected: Vec<ContentItem> = items()
        .into_iter()
        .map(|item| match item {
            // Images are re-rooted under the paper's image directory.
            ContentItem::Image { filename, caption, .. } => ContentItem::image(
                format!("../papers_images/chi25-widgets/{}", filename),
                caption,
            ),
            other => other,
        })
        .collect();
    assert_eq!(extracted, expected);
}

#[test]
fn test_blocks_tagged_with_section() {
    let result = to_html(&metadata(), &items(), &RenderOptions::default()).unwrap();
    let doc = Html::parse_document(&result.content);

    let headers: Vec<String> = doc
        .select(&sel("#paper-content [data-section]"))
        .map(|h| h.value().attr("data-section").unwrap_or_default().to_string())
        .collect();
    assert_eq!(headers, vec!["Introduction & Motivation", "Prior Work"]);

    let tagged: Vec<&str> = doc
        .select(&sel("#paper-content [data-in-section]"))
        .filter_map(|el| el.value().attr("data-in-section"))
        .collect();
    assert_eq!(
        tagged,
        vec!["Introduction & Motivation", "Prior Work", "Prior Work", "Prior Work"]
    );
}

#[test]
fn test_boundary_estimate_embedded() {
    let result = to_html(&metadata(), &items(), &RenderOptions::default()).unwrap();
    let doc = Html::parse_document(&result.content);

    let data = doc
        .select(&sel(&format!("script#{}", BOUNDARY_DATA_ID)))
        .next()
        .unwrap();
    let json: serde_json::Value = serde_json::from_str(&data.inner_html()).unwrap();
    assert_eq!(json["Introduction & Motivation"]["start"], 0);
    assert_eq!(json["Introduction & Motivation"]["end"], 120);
    assert!(result.content.contains("estimatedSectionBoundaries"));
}

#[test]
fn test_options_toggle_page_parts() {
    let options = RenderOptions::new()
        .without_stylesheet()
        .with_boundary_script(false)
        .with_review_panel(true);
    let result = to_html(&metadata(), &items(), &options).unwrap();

    assert!(!result.content.contains("cdn.tailwindcss.com"));
    assert!(!result.content.contains("estimatedSectionBoundaries"));
    assert!(result.content.contains("id=\"review-panel\""));
    assert!(result.content.contains("<title>Widgets &amp; Gadgets</title>"));
}

#[test]
fn test_stats() {
    let result = to_html(&metadata(), &items(), &RenderOptions::default()).unwrap();
    assert_eq!(result.stats.section_count, 1);
    assert_eq!(result.stats.subsection_count, 1);
    assert_eq!(result.stats.paragraph_count, 2);
    assert_eq!(result.stats.image_count, 1);
    assert_eq!(result.stats.table_count, 1);
}

struct NumberedFigures {
    seen: usize,
}

impl DocumentVisitor for NumberedFigures {
    fn visit_image(&mut self, filename: &str, _caption: &str) -> VisitorAction {
        self.seen += 1;
        VisitorAction::Replace(format!("<p>[figure {}: {}]</p>", self.seen, filename))
    }
}

#[test]
fn test_custom_visitor() {
    let result = HtmlRenderer::new(RenderOptions::default())
        .with_visitor(NumberedFigures { seen: 0 })
        .render(&metadata(), &items())
        .unwrap();

    assert!(result.content.contains("<p>[figure 1: fig1.png]</p>"));
    assert!(!result.content.contains("<img"));
    assert_eq!(result.stats.image_count, 0);
}
