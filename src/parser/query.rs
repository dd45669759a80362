//! Small DOM query helpers over `scraper` element references.
//!
//! Queries are by tag name, attribute equality, attribute prefix and
//! class membership, in document order.

use scraper::{ElementRef, Html};

/// Descendant elements of `root` in document order, excluding `root`.
pub fn descendant_elements<'a>(root: ElementRef<'a>) -> impl Iterator<Item = ElementRef<'a>> {
    root.descendants().skip(1).filter_map(ElementRef::wrap)
}

/// First descendant element matching a predicate.
pub fn find_descendant<'a, F>(root: ElementRef<'a>, mut pred: F) -> Option<ElementRef<'a>>
where
    F: FnMut(&ElementRef<'a>) -> bool,
{
    descendant_elements(root).find(|el| pred(el))
}

/// First descendant element with the given tag name.
pub fn find_tag<'a>(root: ElementRef<'a>, tag: &str) -> Option<ElementRef<'a>> {
    find_descendant(root, |el| is_tag(el, tag))
}

/// First direct child element with the given tag name.
pub fn child_tag<'a>(root: ElementRef<'a>, tag: &str) -> Option<ElementRef<'a>> {
    root.children()
        .filter_map(ElementRef::wrap)
        .find(|el| is_tag(el, tag))
}

/// Check an element's tag name.
pub fn is_tag(el: &ElementRef<'_>, tag: &str) -> bool {
    el.value().name() == tag
}

/// Check that an attribute equals a value.
pub fn attr_eq(el: &ElementRef<'_>, name: &str, value: &str) -> bool {
    el.value().attr(name) == Some(value)
}

/// Check that an attribute starts with a prefix.
pub fn attr_starts_with(el: &ElementRef<'_>, name: &str, prefix: &str) -> bool {
    el.value()
        .attr(name)
        .map(|v| v.starts_with(prefix))
        .unwrap_or(false)
}

/// Check that the element carries a class.
pub fn has_class(el: &ElementRef<'_>, class: &str) -> bool {
    el.value().classes().any(|c| c == class)
}

/// Check that one of the element's classes contains a fragment.
pub fn has_class_containing(el: &ElementRef<'_>, fragment: &str) -> bool {
    el.value().classes().any(|c| c.contains(fragment))
}

/// Text of all descendant text nodes, each stripped, joined without separator.
pub fn stripped_text(el: &ElementRef<'_>) -> String {
    el.text()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect()
}

/// Text of all descendant text nodes, verbatim.
pub fn raw_text(el: &ElementRef<'_>) -> String {
    el.text().collect()
}

/// Text of the document `<title>`, cut at the first `|` and trimmed.
pub fn document_title(doc: &Html) -> Option<String> {
    let title_el = find_tag(doc.root_element(), "title")?;
    let text = raw_text(&title_el);
    let title = text.split('|').next().unwrap_or("").trim();
    if title.is_empty() {
        None
    } else {
        Some(title.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stripped_text_joins_without_separator() {
        let doc = Html::parse_fragment("<div> Hello <b>big</b>\n world </div>");
        let div = find_tag(doc.root_element(), "div").unwrap();
        assert_eq!(stripped_text(&div), "Hellobigworld");
        assert_eq!(raw_text(&div), " Hello big\n world ");
    }

    #[test]
    fn test_child_tag_is_direct_only() {
        let doc = Html::parse_fragment("<section><div><h2>Nested</h2></div><h3>Direct</h3></section>");
        let section = find_tag(doc.root_element(), "section").unwrap();
        assert!(child_tag(section, "h2").is_none());
        assert_eq!(stripped_text(&child_tag(section, "h3").unwrap()), "Direct");
    }

    #[test]
    fn test_attribute_queries() {
        let doc = Html::parse_fragment(
            r#"<section id="sec-3" class="core-section section__title"></section>"#,
        );
        let section = find_tag(doc.root_element(), "section").unwrap();
        assert!(attr_starts_with(&section, "id", "sec-"));
        assert!(!attr_starts_with(&section, "role", "sec-"));
        assert!(attr_eq(&section, "id", "sec-3"));
        assert!(has_class(&section, "core-section"));
        assert!(has_class_containing(&section, "section__"));
    }

    #[test]
    fn test_document_title() {
        let doc = Html::parse_document(
            "<html><head><title> Widgets at Scale | Proceedings | ACM DL</title></head></html>",
        );
        assert_eq!(document_title(&doc).as_deref(), Some("Widgets at Scale"));

        let untitled = Html::parse_document("<html><body><p>x</p></body></html>");
        assert!(document_title(&untitled).is_none());
    }
}
