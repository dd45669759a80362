//! Visitor pattern for customizing paper rendering.
//!
//! A visitor sees each paragraph, image and table before it is rendered
//! and can keep, replace or drop it. Section headers always render, since
//! the boundary measurement depends on them.
//!
//! # Example
//!
//! ```
//! use paperseg::render::visitor::{DocumentVisitor, VisitorAction};
//!
//! struct NoTables;
//!
//! impl DocumentVisitor for NoTables {
//!     fn visit_table(&mut self, caption: &str, _html: &str) -> VisitorAction {
//!         VisitorAction::Replace(format!("<p>[table omitted: {}]</p>", caption))
//!     }
//! }
//! ```

/// Action returned by visitor methods to control rendering behavior.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum VisitorAction {
    /// Continue with default rendering.
    #[default]
    Continue,

    /// Replace the element with custom markup, inserted verbatim.
    Replace(String),

    /// Skip this element entirely (produce no output).
    Skip,
}

/// Trait for visiting content items during rendering.
///
/// All methods return `VisitorAction::Continue` by default.
pub trait DocumentVisitor: Send + Sync {
    /// Called before rendering a paragraph.
    ///
    /// # Arguments
    /// * `text` - Paragraph text (unescaped)
    /// * `section` - Title of the enclosing section, if any
    fn visit_paragraph(&mut self, text: &str, section: Option<&str>) -> VisitorAction {
        let _ = (text, section);
        VisitorAction::Continue
    }

    /// Called before rendering an image.
    ///
    /// # Arguments
    /// * `filename` - Image file name under the paper's image directory
    /// * `caption` - Figure caption (may be empty)
    fn visit_image(&mut self, filename: &str, caption: &str) -> VisitorAction {
        let _ = (filename, caption);
        VisitorAction::Continue
    }

    /// Called before rendering a table.
    ///
    /// # Arguments
    /// * `caption` - Table caption (may be empty)
    /// * `html` - Raw table markup
    fn visit_table(&mut self, caption: &str, html: &str) -> VisitorAction {
        let _ = (caption, html);
        VisitorAction::Continue
    }

    /// Called when a section header opens a new section.
    fn on_section_start(&mut self, title: &str, level: u8) {
        let _ = (title, level);
    }
}

/// Default visitor that performs no customization.
#[derive(Debug, Clone, Default)]
pub struct DefaultVisitor;

impl DocumentVisitor for DefaultVisitor {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_visitor_action_default() {
        assert_eq!(VisitorAction::default(), VisitorAction::Continue);
    }

    #[test]
    fn test_default_visitor_continues() {
        let mut visitor = DefaultVisitor;
        assert_eq!(
            visitor.visit_paragraph("Some text.", Some("Introduction")),
            VisitorAction::Continue
        );
        assert_eq!(visitor.visit_image("fig1.png", ""), VisitorAction::Continue);
        assert_eq!(visitor.visit_table("", "<table></table>"), VisitorAction::Continue);
    }
}
