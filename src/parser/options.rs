//! Segmentation options and configuration.

use super::SectionKeywords;

/// Options for segmenting papers.
#[derive(Debug, Clone)]
pub struct ParseOptions {
    /// Error handling mode for source extraction
    pub error_mode: ErrorMode,

    /// Section header vocabulary for flat text
    pub keywords: SectionKeywords,

    /// Number of leading lines scanned for title and authors
    pub title_scan_lines: usize,

    /// Lines shorter than this are treated as rendering noise
    pub min_line_chars: usize,

    /// A title candidate must be longer than this
    pub min_title_chars: usize,

    /// A text line must be longer than this to become a paragraph
    pub text_paragraph_chars: usize,

    /// A saved-HTML paragraph must be longer than this
    pub dom_paragraph_chars: usize,

    /// A landing-page paragraph must be longer than this
    pub landing_paragraph_chars: usize,

    /// Text lines starting with any of these are never paragraphs
    pub skip_prefixes: Vec<String>,

    /// Substrings that mark an author line in the title scan
    pub author_markers: Vec<String>,
}

impl ParseOptions {
    /// Create new parse options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set error mode.
    pub fn with_error_mode(mut self, mode: ErrorMode) -> Self {
        self.error_mode = mode;
        self
    }

    /// Enable lenient mode (skip unreadable pages).
    pub fn lenient(mut self) -> Self {
        self.error_mode = ErrorMode::Lenient;
        self
    }

    /// Replace the section keyword set.
    pub fn with_keywords(mut self, keywords: SectionKeywords) -> Self {
        self.keywords = keywords;
        self
    }

    /// Set how many leading lines are scanned for title and authors.
    pub fn with_title_scan_lines(mut self, lines: usize) -> Self {
        self.title_scan_lines = lines;
        self
    }

    /// Set the paragraph threshold for flat text.
    pub fn with_text_paragraph_chars(mut self, chars: usize) -> Self {
        self.text_paragraph_chars = chars;
        self
    }

    /// Set the paragraph threshold for saved HTML.
    pub fn with_dom_paragraph_chars(mut self, chars: usize) -> Self {
        self.dom_paragraph_chars = chars;
        self
    }

    /// Add a prefix that disqualifies a text line from being a paragraph.
    pub fn with_skip_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.skip_prefixes.push(prefix.into());
        self
    }

    /// Check if a line starts with one of the skip prefixes.
    pub fn is_skipped(&self, line: &str) -> bool {
        self.skip_prefixes.iter().any(|p| line.starts_with(p.as_str()))
    }

    /// Check if a line looks like an author or affiliation line.
    pub fn is_author_line(&self, line: &str) -> bool {
        self.author_markers.iter().any(|m| line.contains(m.as_str()))
    }
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            error_mode: ErrorMode::Strict,
            keywords: SectionKeywords::default(),
            title_scan_lines: 20,
            min_line_chars: 3,
            min_title_chars: 10,
            text_paragraph_chars: 20,
            dom_paragraph_chars: 30,
            landing_paragraph_chars: 20,
            skip_prefixes: vec!["arXiv:".to_string()],
            author_markers: vec![
                "@".to_string(),
                "University".to_string(),
                "Institute".to_string(),
            ],
        }
    }
}

/// Error handling mode during source extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorMode {
    /// Fail on any error
    #[default]
    Strict,
    /// Skip unreadable pages and continue
    Lenient,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_options_builder() {
        let options = ParseOptions::new()
            .lenient()
            .with_title_scan_lines(10)
            .with_skip_prefix("doi:");

        assert_eq!(options.error_mode, ErrorMode::Lenient);
        assert_eq!(options.title_scan_lines, 10);
        assert!(options.is_skipped("doi:10.1145/1"));
        assert!(options.is_skipped("arXiv:2401.00001v1 [cs.HC] 1 Jan 2024"));
    }

    #[test]
    fn test_default_options() {
        let options = ParseOptions::default();
        assert_eq!(options.error_mode, ErrorMode::Strict);
        assert_eq!(options.title_scan_lines, 20);
        assert_eq!(options.text_paragraph_chars, 20);
        assert_eq!(options.dom_paragraph_chars, 30);
        assert!(options.is_author_line("Carnegie Mellon University"));
        assert!(!options.is_author_line("university of nowhere"));
    }
}
