//! Text-stream segmentation of flat PDF text dumps.

use crate::model::{ContentItem, SectionDescriptor, SegmentedPaper, SourceKind, SECTION_LEVEL};

use super::keywords::title_case;
use super::ParseOptions;

/// Segments an ordered sequence of text lines into sections and paragraphs.
///
/// Lines are classified one at a time. Only keyword headers open
/// sections, so the quality of the result is bounded by the keyword set.
pub struct TextSegmenter<'a> {
    options: &'a ParseOptions,
}

impl<'a> TextSegmenter<'a> {
    /// Create a segmenter using the given options.
    pub fn new(options: &'a ParseOptions) -> Self {
        Self { options }
    }

    /// Segment a whole text dump, splitting it into lines.
    pub fn segment_text(&self, text: &str) -> SegmentedPaper {
        let lines: Vec<&str> = text.split('\n').collect();
        self.segment(&lines)
    }

    /// Segment an ordered list of raw lines.
    pub fn segment<S: AsRef<str>>(&self, lines: &[S]) -> SegmentedPaper {
        let mut paper = SegmentedPaper::new(SourceKind::PdfText);

        let (title, authors) = self.scan_front_matter(lines);
        paper.title = title;
        paper.authors = authors;

        let mut open: Option<(String, usize)> = None;

        for raw in lines {
            let line = raw.as_ref().trim();
            if char_len(line) < self.options.min_line_chars {
                continue;
            }

            if let Some(keyword) = self.options.keywords.match_header(line) {
                if let Some((title, start)) = open.take() {
                    paper.sections.push(
                        SectionDescriptor::new(title, SECTION_LEVEL)
                            .with_items(start, paper.content.len()),
                    );
                }

                let title = title_case(keyword);
                log::debug!("Section header: {}", title);
                open = Some((title.clone(), paper.content.len()));
                paper.content.push(ContentItem::section(title));
            } else if char_len(line) > self.options.text_paragraph_chars
                && !self.options.is_skipped(line)
            {
                paper.content.push(ContentItem::paragraph(line));
            }
        }

        if let Some((title, start)) = open {
            paper.sections.push(
                SectionDescriptor::new(title, SECTION_LEVEL).with_items(start, paper.content.len()),
            );
        }

        if paper.sections.is_empty() {
            paper.diagnose("no section headers recognized in text stream");
        }

        paper
    }

    /// Find the title and author lines among the leading lines.
    ///
    /// The first sufficiently long line that mentions no section keyword
    /// is the title. Lines after it that carry an author marker are
    /// collected as authors; the title line itself is not.
    fn scan_front_matter<S: AsRef<str>>(&self, lines: &[S]) -> (Option<String>, Vec<String>) {
        let mut title = None;
        let mut authors = Vec::new();

        for raw in lines.iter().take(self.options.title_scan_lines) {
            let line = raw.as_ref().trim();
            if char_len(line) < self.options.min_line_chars {
                continue;
            }

            if title.is_none()
                && char_len(line) > self.options.min_title_chars
                && !self.options.keywords.mentioned_in(line)
            {
                title = Some(line.to_string());
                continue;
            }

            if self.options.is_author_line(line) {
                authors.push(line.to_string());
            }
        }

        (title, authors)
    }
}

fn char_len(s: &str) -> usize {
    s.chars().count()
}
