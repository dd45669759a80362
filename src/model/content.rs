//! Content items and section descriptors.

use serde::{Deserialize, Serialize};

/// Heading level of a top-level section.
pub const SECTION_LEVEL: u8 = 2;

/// Heading level of a subsection.
pub const SUBSECTION_LEVEL: u8 = 3;

/// One classified unit of paper content, in document order.
///
/// Order is the only position signal: items carry no offsets into the
/// source format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentItem {
    /// Section or subsection header.
    Section {
        /// Header text
        text: String,
        /// Heading level (2 = section, 3 = subsection)
        level: u8,
    },

    /// Body paragraph.
    Paragraph {
        /// Paragraph text
        text: String,
    },

    /// Figure with an image.
    Image {
        /// Image source as found in the document
        src: String,
        /// Final path segment of `src`
        filename: String,
        /// Figure caption (may be empty)
        caption: String,
    },

    /// Figure with a table.
    Table {
        /// Table caption (may be empty)
        caption: String,
        /// Table markup serialized from the parsed tree.
        ///
        /// The parser normalizes the fragment, so it is not byte-identical
        /// to the source: a missing `<tbody>` is inserted and attributes
        /// are requoted. The renderer inserts it without escaping.
        html: String,
    },
}

impl ContentItem {
    /// Create a top-level section header.
    pub fn section(text: impl Into<String>) -> Self {
        ContentItem::Section {
            text: text.into(),
            level: SECTION_LEVEL,
        }
    }

    /// Create a subsection header.
    pub fn subsection(text: impl Into<String>) -> Self {
        ContentItem::Section {
            text: text.into(),
            level: SUBSECTION_LEVEL,
        }
    }

    /// Create a paragraph.
    pub fn paragraph(text: impl Into<String>) -> Self {
        ContentItem::Paragraph { text: text.into() }
    }

    /// Create an image item; the filename is derived from `src`.
    pub fn image(src: impl Into<String>, caption: impl Into<String>) -> Self {
        let src = src.into();
        ContentItem::Image {
            filename: filename_from_src(&src),
            src,
            caption: caption.into(),
        }
    }

    /// Create a table item.
    pub fn table(caption: impl Into<String>, html: impl Into<String>) -> Self {
        ContentItem::Table {
            caption: caption.into(),
            html: html.into(),
        }
    }

    /// Header text if this item is a section or subsection.
    pub fn section_title(&self) -> Option<&str> {
        match self {
            ContentItem::Section { text, .. } => Some(text),
            _ => None,
        }
    }

    /// Check if this item is a section or subsection header.
    pub fn is_section(&self) -> bool {
        matches!(self, ContentItem::Section { .. })
    }

    /// The human-readable text of the item (caption for figures).
    pub fn text(&self) -> &str {
        match self {
            ContentItem::Section { text, .. } | ContentItem::Paragraph { text } => text,
            ContentItem::Image { caption, .. } | ContentItem::Table { caption, .. } => caption,
        }
    }
}

/// Final path segment of an image source, ignoring any query or fragment.
pub fn filename_from_src(src: &str) -> String {
    let path = src.split(['?', '#']).next().unwrap_or(src);
    path.rsplit('/')
        .find(|segment| !segment.is_empty())
        .unwrap_or("")
        .to_string()
}

/// Image found by a segmenter (side list of figures).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRef {
    /// Image source as found in the document
    pub src: String,
    /// Final path segment of `src`
    pub filename: String,
    /// Figure caption
    pub caption: String,
}

/// Table found by a segmenter (side list of figures).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableRef {
    /// Table caption
    pub caption: String,
    /// Table markup serialized from the parsed tree
    pub html: String,
}

/// Range of content-item indices covered by a section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemSpan {
    /// Index of the section's header item
    pub start: usize,
    /// One past the last item of the section
    pub end: usize,
}

/// A recorded section title and heading level.
///
/// Descriptors are collected in the order headers are encountered and
/// are not deduplicated: two sections may share a title.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionDescriptor {
    /// Section title
    pub title: String,

    /// Heading level; `None` for synthetic top-level entries like the abstract
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<u8>,

    /// Item range, when the segmenter tracks it
    #[serde(flatten)]
    pub items: Option<ItemSpan>,
}

impl SectionDescriptor {
    /// Create a descriptor with a heading level.
    pub fn new(title: impl Into<String>, level: u8) -> Self {
        Self {
            title: title.into(),
            level: Some(level),
            items: None,
        }
    }

    /// Create a descriptor without a heading level.
    pub fn untiered(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            level: None,
            items: None,
        }
    }

    /// Attach a content-item range.
    pub fn with_items(mut self, start: usize, end: usize) -> Self {
        self.items = Some(ItemSpan { start, end });
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filename_from_src() {
        assert_eq!(
            filename_from_src("/cms/attachment/abc/chiea25-1-fig1.jpg"),
            "chiea25-1-fig1.jpg"
        );
        assert_eq!(filename_from_src("fig.png?v=2"), "fig.png");
        assert_eq!(filename_from_src("images/"), "images");
        assert_eq!(filename_from_src(""), "");
    }

    #[test]
    fn test_content_item_serde_tag() {
        let item = ContentItem::subsection("Participants");
        let json = serde_json::to_string(&item).unwrap();
        assert_eq!(json, r#"{"type":"section","text":"Participants","level":3}"#);

        let back: ContentItem = serde_json::from_str(&json).unwrap();
        assert_eq!(back, item);
    }

    #[test]
    fn test_image_constructor_derives_filename() {
        let item = ContentItem::image("https://dl.acm.org/a/b/fig2.png", "Figure 2");
        match item {
            ContentItem::Image { filename, .. } => assert_eq!(filename, "fig2.png"),
            other => panic!("unexpected item: {:?}", other),
        }
    }

    #[test]
    fn test_descriptor_serialization_omits_absent_fields() {
        let abstract_desc = SectionDescriptor::untiered("Abstract");
        assert_eq!(
            serde_json::to_string(&abstract_desc).unwrap(),
            r#"{"title":"Abstract"}"#
        );

        let spanned = SectionDescriptor::new("Introduction", 2).with_items(2, 5);
        assert_eq!(
            serde_json::to_string(&spanned).unwrap(),
            r#"{"title":"Introduction","level":2,"start":2,"end":5}"#
        );
    }
}
