//! Reading-position boundary estimation.
//!
//! Boundaries are synthetic: they approximate how far into the rendered
//! page each section starts and ends, so a viewer has something to work
//! with before the real layout is measured client-side.

use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::model::{ContentItem, SectionBoundaries, SectionBoundary, SegmentedPaper, SourceKind};
use crate::parser::ABSTRACT_SECTION;

/// Per-item weights for the length-weighted strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LengthWeights {
    /// Weight per character of title, header and paragraph text
    pub char_weight: u64,
    /// Fixed padding added to the abstract
    pub abstract_padding: u64,
    /// Fixed extent of an image
    pub image_weight: u64,
    /// Fixed extent of a table
    pub table_weight: u64,
}

impl Default for LengthWeights {
    fn default() -> Self {
        Self {
            char_weight: 2,
            abstract_padding: 100,
            image_weight: 500,
            table_weight: 0,
        }
    }
}

/// Default extent per section for the fixed-increment strategy.
pub const DEFAULT_FIXED_STEP: u64 = 600;

/// How boundaries are estimated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundaryStrategy {
    /// Walk the content and accumulate weighted lengths.
    LengthWeighted(LengthWeights),
    /// Give every section the same extent, in order.
    FixedIncrement {
        /// Extent per section
        step: u64,
    },
}

impl BoundaryStrategy {
    /// Length-weighted strategy with default weights.
    pub fn length_weighted() -> Self {
        BoundaryStrategy::LengthWeighted(LengthWeights::default())
    }

    /// Fixed-increment strategy with the default step.
    pub fn fixed() -> Self {
        BoundaryStrategy::FixedIncrement {
            step: DEFAULT_FIXED_STEP,
        }
    }

    /// Strategy used for a source when none is requested.
    ///
    /// Only saved full-text HTML has content rich enough for the
    /// length-weighted estimate.
    pub fn for_source(source: SourceKind) -> Self {
        match source {
            SourceKind::SavedHtml => Self::length_weighted(),
            SourceKind::PdfText | SourceKind::LandingPage => Self::fixed(),
        }
    }

    /// Short name of the strategy.
    pub fn name(&self) -> &'static str {
        match self {
            BoundaryStrategy::LengthWeighted(_) => "length",
            BoundaryStrategy::FixedIncrement { .. } => "fixed",
        }
    }
}

impl Default for BoundaryStrategy {
    fn default() -> Self {
        Self::length_weighted()
    }
}

impl fmt::Display for BoundaryStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for BoundaryStrategy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "length" | "length-weighted" | "weighted" => Ok(Self::length_weighted()),
            "fixed" | "fixed-increment" => Ok(Self::fixed()),
            other => Err(Error::Config(format!(
                "unknown boundary strategy '{}' (expected 'length' or 'fixed')",
                other
            ))),
        }
    }
}

/// Computes section boundaries with a chosen strategy.
#[derive(Debug, Clone, Copy, Default)]
pub struct BoundaryCalculator {
    strategy: BoundaryStrategy,
}

impl BoundaryCalculator {
    /// Create a calculator for a strategy.
    pub fn new(strategy: BoundaryStrategy) -> Self {
        Self { strategy }
    }

    /// Calculator with the default strategy for a source kind.
    pub fn for_source(source: SourceKind) -> Self {
        Self::new(BoundaryStrategy::for_source(source))
    }

    /// The active strategy.
    pub fn strategy(&self) -> BoundaryStrategy {
        self.strategy
    }

    /// Compute boundaries for a segmented paper.
    pub fn compute(&self, paper: &SegmentedPaper) -> SectionBoundaries {
        match self.strategy {
            BoundaryStrategy::LengthWeighted(weights) => compute_length(
                &weights,
                &paper.content,
                paper.title.as_deref(),
                paper.abstract_text.as_deref(),
            ),
            BoundaryStrategy::FixedIncrement { step } => {
                compute_fixed(step, paper.section_titles())
            }
        }
    }
}

struct OpenSection {
    title: String,
    start: u64,
    content_length: u64,
}

/// Length-weighted boundaries over a content list.
///
/// A running cursor starts at the weighted title length. A non-empty
/// abstract opens the first section. Each header closes the open section
/// at the cursor and opens a new one; paragraphs, images and tables
/// advance the cursor and grow the open section. The last section closes
/// at the final cursor, so consecutive sections always abut.
pub fn compute_length(
    weights: &LengthWeights,
    items: &[ContentItem],
    title: Option<&str>,
    abstract_text: Option<&str>,
) -> SectionBoundaries {
    let weigh = |text: &str| text.chars().count() as u64 * weights.char_weight;

    let mut boundaries = SectionBoundaries::new();
    let mut cursor: u64 = title.map(weigh).unwrap_or(0);
    let mut open: Option<OpenSection> = None;

    if let Some(text) = abstract_text.filter(|a| !a.is_empty()) {
        let length = weigh(text) + weights.abstract_padding;
        open = Some(OpenSection {
            title: ABSTRACT_SECTION.to_string(),
            start: cursor,
            content_length: length,
        });
        cursor += length;
    }

    for item in items {
        let advance = match item {
            ContentItem::Section { text, .. } => {
                if let Some(section) = open.take() {
                    boundaries.push(section.title, SectionBoundary::new(section.start, cursor));
                }
                let length = weigh(text);
                open = Some(OpenSection {
                    title: text.clone(),
                    start: cursor,
                    content_length: length,
                });
                cursor += length;
                continue;
            }
            ContentItem::Paragraph { text } => weigh(text),
            ContentItem::Image { .. } => weights.image_weight,
            ContentItem::Table { .. } => weights.table_weight,
        };

        if let Some(section) = open.as_mut() {
            section.content_length += advance;
        }
        cursor += advance;
    }

    if let Some(section) = open {
        log::trace!(
            "Closing last section '{}' with content length {}",
            section.title,
            section.content_length
        );
        boundaries.push(section.title, SectionBoundary::new(section.start, cursor));
    }

    boundaries
}

/// Fixed-increment boundaries: section `i` spans `[i * step, (i + 1) * step)`.
pub fn compute_fixed<I, S>(step: u64, titles: I) -> SectionBoundaries
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut boundaries = SectionBoundaries::new();
    for (i, title) in titles.into_iter().enumerate() {
        let i = i as u64;
        boundaries.push(title, SectionBoundary::new(i * step, (i + 1) * step));
    }
    boundaries
}

#[cfg(test)]
mod tests {
    use super::*;

    fn weights() -> LengthWeights {
        LengthWeights::default()
    }

    #[test]
    fn test_length_weighted_walk() {
        // title 5 chars -> cursor 10
        // abstract 10 chars -> [10, 130)
        // "Intro" -> opens at 130, cursor 140; paragraph 20 chars -> 180; image -> 680
        // "Method" -> opens at 680, cursor 692; table -> 692
        let items = vec![
            ContentItem::section("Intro"),
            ContentItem::paragraph("a".repeat(20)),
            ContentItem::image("/x/fig1.png", ""),
            ContentItem::section("Method"),
            ContentItem::table("", "<table></table>"),
        ];
        let b = compute_length(&weights(), &items, Some("Title"), Some("0123456789"));

        let entries: Vec<_> = b
            .iter()
            .map(|e| (e.title.as_str(), e.boundary.start, e.boundary.end))
            .collect();
        assert_eq!(
            entries,
            vec![
                ("Abstract", 10, 130),
                ("Intro", 130, 680),
                ("Method", 680, 692),
            ]
        );
    }

    #[test]
    fn test_length_weighted_sections_abut() {
        let items = vec![
            ContentItem::paragraph("Preamble before any section header."),
            ContentItem::section("One"),
            ContentItem::paragraph("First paragraph text."),
            ContentItem::subsection("One point one"),
            ContentItem::image("a.png", "cap"),
            ContentItem::section("Two"),
            ContentItem::section("Three"),
            ContentItem::paragraph("Last words."),
        ];
        let b = compute_length(&weights(), &items, Some("A Title"), None);
        let entries = b.entries();

        for pair in entries.windows(2) {
            assert_eq!(pair[0].boundary.end, pair[1].boundary.start);
        }
        for e in entries {
            assert!(e.boundary.start <= e.boundary.end);
        }

        let expected_cursor: u64 = 2 * 7
            + 2 * "Preamble before any section header.".len() as u64
            + 2 * 3
            + 2 * "First paragraph text.".len() as u64
            + 2 * "One point one".len() as u64
            + 500
            + 2 * 3
            + 2 * 5
            + 2 * "Last words.".len() as u64;
        assert_eq!(b.total_extent(), expected_cursor);
    }

    #[test]
    fn test_length_counts_characters() {
        let items = vec![ContentItem::section("Résumé")];
        let b = compute_length(&weights(), &items, None, None);
        assert_eq!(b.get("Résumé"), Some(SectionBoundary::new(0, 12)));
    }

    #[test]
    fn test_empty_abstract_opens_no_section() {
        let b = compute_length(&weights(), &[], Some("T"), Some(""));
        assert!(b.is_empty());
    }

    #[test]
    fn test_fixed_increment() {
        let b = compute_fixed(600, ["Abstract", "Introduction", "Results"]);
        for (i, e) in b.iter().enumerate() {
            let i = i as u64;
            assert_eq!(e.boundary, SectionBoundary::new(600 * i, 600 * (i + 1)));
        }
        assert_eq!(b.total_extent(), 1800);
    }

    #[test]
    fn test_duplicate_titles_last_write_wins() {
        let b = compute_fixed(600, ["Abstract", "Results", "Discussion", "Results"]);
        assert_eq!(b.len(), 4);

        let map = b.to_map();
        assert_eq!(map.len(), 3);
        assert_eq!(map["Results"], SectionBoundary::new(1800, 2400));
        let keys: Vec<_> = map.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["Abstract", "Results", "Discussion"]);
    }

    #[test]
    fn test_calculator_uses_paper_sections_for_fixed() {
        let mut paper = SegmentedPaper::new(SourceKind::PdfText);
        paper.content.push(ContentItem::section("Introduction"));
        paper
            .sections
            .push(crate::model::SectionDescriptor::new("Introduction", 2));
        let b = BoundaryCalculator::for_source(paper.source).compute(&paper);
        assert_eq!(b.get("Introduction"), Some(SectionBoundary::new(0, 600)));
    }

    #[test]
    fn test_strategy_parsing() {
        assert_eq!(
            "length".parse::<BoundaryStrategy>().unwrap(),
            BoundaryStrategy::length_weighted()
        );
        assert_eq!(
            "FIXED".parse::<BoundaryStrategy>().unwrap(),
            BoundaryStrategy::fixed()
        );
        assert!(matches!(
            "pixels".parse::<BoundaryStrategy>(),
            Err(Error::Config(_))
        ));
        assert_eq!(
            BoundaryStrategy::for_source(SourceKind::SavedHtml).name(),
            "length"
        );
    }
}
