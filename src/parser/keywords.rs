//! Section header vocabulary.
//!
//! The keyword set acts as the grammar for section boundaries in flat
//! text. It is configuration: venues with other header vocabularies can
//! extend it without touching the segmenter.

use std::path::Path;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{Error, Result};

/// Header keywords recognized by default, in match priority order.
pub const DEFAULT_SECTION_KEYWORDS: &[&str] = &[
    "ABSTRACT",
    "INTRODUCTION",
    "BACKGROUND",
    "RELATED WORK",
    "LITERATURE REVIEW",
    "METHODOLOGY",
    "METHOD",
    "METHODS",
    "APPROACH",
    "RESEARCH CONTEXT",
    "RESEARCH CONTEXT AND APPROACH",
    "RESULTS",
    "FINDINGS",
    "DISCUSSION",
    "CONCLUSION",
    "CONCLUSIONS",
    "FUTURE WORK",
    "LIMITATIONS",
    "REFERENCES",
    "ACKNOWLEDGMENTS",
    "ACKNOWLEDGEMENTS",
];

/// "1. INTRODUCTION", "2 RESULTS": leading number, optional period, whitespace.
static NUMBERED_HEADER: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d+\.?\s+(.*?)\s*$").unwrap());

/// Ordered set of upper-case section header keywords.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionKeywords {
    keywords: Vec<String>,
}

impl SectionKeywords {
    /// Create a keyword set; entries are upper-cased and trimmed, blanks ignored.
    pub fn new<I, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = Self {
            keywords: Vec::new(),
        };
        for kw in keywords {
            set.push(kw.as_ref());
        }
        set
    }

    /// Load keywords from a file: one per line, `#` starts a comment.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let set = Self::parse(&text);
        if set.is_empty() {
            return Err(Error::Config(format!(
                "keyword file {} contains no keywords",
                path.display()
            )));
        }
        Ok(set)
    }

    /// Parse a newline-separated keyword list.
    pub fn parse(text: &str) -> Self {
        Self::new(
            text.lines()
                .map(|line| line.split('#').next().unwrap_or(""))
                .filter(|line| !line.trim().is_empty()),
        )
    }

    /// Add a keyword at the lowest priority.
    pub fn with_keyword(mut self, keyword: impl AsRef<str>) -> Self {
        self.push(keyword.as_ref());
        self
    }

    /// Add several keywords at the lowest priority.
    pub fn extend<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for kw in keywords {
            self.push(kw.as_ref());
        }
        self
    }

    fn push(&mut self, keyword: &str) {
        let keyword = keyword.trim().to_uppercase();
        if !keyword.is_empty() && !self.keywords.contains(&keyword) {
            self.keywords.push(keyword);
        }
    }

    /// Keywords in priority order.
    pub fn as_slice(&self) -> &[String] {
        &self.keywords
    }

    /// Number of keywords.
    pub fn len(&self) -> usize {
        self.keywords.len()
    }

    /// Check if the set is empty.
    pub fn is_empty(&self) -> bool {
        self.keywords.is_empty()
    }

    /// Match a stripped line as a section header.
    ///
    /// A line is a header when its upper-cased form equals a keyword, or
    /// equals a leading number, an optional period and whitespace followed
    /// by a keyword. Returns the matched keyword (upper case).
    pub fn match_header(&self, line: &str) -> Option<&str> {
        let upper = line.to_uppercase();
        let numbered = NUMBERED_HEADER
            .captures(&upper)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str());

        self.keywords
            .iter()
            .find(|kw| upper == **kw || numbered == Some(kw.as_str()))
            .map(String::as_str)
    }

    /// Check if any keyword occurs in the line, case-insensitively.
    ///
    /// Used to exclude title candidates. This also rejects a real title
    /// that merely contains a word like "Introduction".
    pub fn mentioned_in(&self, line: &str) -> bool {
        let upper = line.to_uppercase();
        self.keywords.iter().any(|kw| upper.contains(kw.as_str()))
    }
}

impl Default for SectionKeywords {
    fn default() -> Self {
        Self::new(DEFAULT_SECTION_KEYWORDS)
    }
}

/// Title-case a keyword the way headers are displayed ("RELATED WORK" -> "Related Work").
///
/// Every run of letters starts upper case and continues lower case.
pub fn title_case(keyword: &str) -> String {
    let mut out = String::with_capacity(keyword.len());
    let mut prev_is_letter = false;
    for ch in keyword.chars() {
        if ch.is_alphabetic() {
            if prev_is_letter {
                out.extend(ch.to_lowercase());
            } else {
                out.extend(ch.to_uppercase());
            }
            prev_is_letter = true;
        } else {
            out.push(ch);
            prev_is_letter = false;
        }
    }
    out
}
