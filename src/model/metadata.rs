//! Paper metadata and section boundary types.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::SectionDescriptor;

/// Synthetic reading-position extent of a section.
///
/// Not a byte or character offset into any real rendering: it is an
/// estimate that a viewer compares against an accumulated scroll metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionBoundary {
    /// Start of the extent
    pub start: u64,
    /// End of the extent (exclusive)
    pub end: u64,
}

impl SectionBoundary {
    /// Create a new boundary.
    pub fn new(start: u64, end: u64) -> Self {
        Self { start, end }
    }

    /// Length of the extent.
    pub fn len(&self) -> u64 {
        self.end.saturating_sub(self.start)
    }

    /// Check if the extent is empty.
    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }

    /// Check if a position falls inside this extent.
    pub fn contains(&self, position: u64) -> bool {
        position >= self.start && position < self.end
    }
}

/// A single computed boundary, keyed by section title.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoundaryEntry {
    /// Section title
    pub title: String,
    /// Computed extent
    pub boundary: SectionBoundary,
}

/// Ordered boundaries of every section, duplicates included.
///
/// The title-keyed mapping persisted in metadata cannot hold two sections
/// with the same title. [`SectionBoundaries::to_map`] resolves that with
/// last-write-wins: a repeated title keeps the position of its first
/// occurrence and the extent of its last one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionBoundaries {
    entries: Vec<BoundaryEntry>,
}

impl SectionBoundaries {
    /// Create an empty boundary list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a boundary.
    pub fn push(&mut self, title: impl Into<String>, boundary: SectionBoundary) {
        self.entries.push(BoundaryEntry {
            title: title.into(),
            boundary,
        });
    }

    /// All entries in section order.
    pub fn entries(&self) -> &[BoundaryEntry] {
        &self.entries
    }

    /// Iterate over entries in section order.
    pub fn iter(&self) -> impl Iterator<Item = &BoundaryEntry> {
        self.entries.iter()
    }

    /// Number of sections (duplicates counted).
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if there are no sections.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Boundary for a title; the last section with that title wins.
    pub fn get(&self, title: &str) -> Option<SectionBoundary> {
        self.entries
            .iter()
            .rev()
            .find(|e| e.title == title)
            .map(|e| e.boundary)
    }

    /// End of the last section, or 0 when empty.
    pub fn total_extent(&self) -> u64 {
        self.entries.last().map(|e| e.boundary.end).unwrap_or(0)
    }

    /// Section containing a position, by index order.
    pub fn section_at(&self, position: u64) -> Option<&BoundaryEntry> {
        self.entries.iter().find(|e| e.boundary.contains(position))
    }

    /// Title-keyed mapping with last-write-wins semantics.
    pub fn to_map(&self) -> IndexMap<String, SectionBoundary> {
        let mut map = IndexMap::with_capacity(self.entries.len());
        for entry in &self.entries {
            map.insert(entry.title.clone(), entry.boundary);
        }
        map
    }
}

/// Side-car record of one converted paper.
///
/// Constructed once per source document and persisted as JSON next to
/// the rendered page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PaperMetadata {
    /// Caller-supplied document identifier
    pub paper_id: String,

    /// Paper title
    pub title: Option<String>,

    /// Author lines, in order
    #[serde(default)]
    pub authors: Vec<String>,

    /// Abstract text
    #[serde(rename = "abstract", default)]
    pub abstract_text: Option<String>,

    /// Sections in the order they were encountered
    #[serde(default)]
    pub sections: Vec<SectionDescriptor>,

    /// Estimated boundaries keyed by section title
    #[serde(default)]
    pub section_boundaries: IndexMap<String, SectionBoundary>,

    /// Source the paper was segmented from (`pdf_text`, `saved_html`, `landing_page`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,

    /// DOI, when known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doi: Option<String>,

    /// Source URL, when fetched
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    /// Publication venue line
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publication: Option<String>,

    /// File name of the source document
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_file: Option<String>,
}

impl PaperMetadata {
    /// Create empty metadata for a paper id.
    pub fn new(paper_id: impl Into<String>) -> Self {
        Self {
            paper_id: paper_id.into(),
            ..Default::default()
        }
    }

    /// Titles of all sections, in order.
    pub fn section_titles(&self) -> Vec<&str> {
        self.sections.iter().map(|s| s.title.as_str()).collect()
    }

    /// Title with a fallback for display.
    pub fn display_title(&self) -> &str {
        match self.title.as_deref() {
            Some(t) if !t.is_empty() => t,
            _ => "Academic Paper",
        }
    }

    /// Abstract text if present and non-empty.
    pub fn abstract_if_any(&self) -> Option<&str> {
        self.abstract_text.as_deref().filter(|a| !a.is_empty())
    }
}
