//! DOI handling for digital library papers.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{Error, Result};

/// Base URL of DOI landing pages in the ACM Digital Library.
pub const ACM_DOI_BASE: &str = "https://dl.acm.org/doi/";

static DOI_IN_URL: Lazy<Regex> = Lazy::new(|| Regex::new(r"doi/(10\.\d+/[\d.]+)").unwrap());

/// A paper reference: DOI plus the page URL it resolves to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaperRef {
    /// The DOI, e.g. `10.1145/3706599.3719940`
    pub doi: String,
    /// Landing page URL
    pub url: String,
}

impl PaperRef {
    /// Parse a bare DOI or a landing page URL.
    ///
    /// Inputs starting with `http` are treated as URLs and must contain a
    /// `doi/10.NNNN/...` path; anything else is taken as a DOI.
    pub fn parse(input: &str) -> Result<Self> {
        let input = input.trim();
        if input.starts_with("http") {
            let doi = extract_doi_from_url(input)
                .ok_or_else(|| Error::InvalidDoi(input.to_string()))?;
            Ok(Self {
                doi,
                url: input.to_string(),
            })
        } else if input.is_empty() {
            Err(Error::InvalidDoi(input.to_string()))
        } else {
            Ok(Self {
                doi: input.to_string(),
                url: format!("{}{}", ACM_DOI_BASE, input),
            })
        }
    }

    /// Default paper id for this reference.
    pub fn paper_id(&self) -> String {
        paper_id_from_doi(&self.doi)
    }
}

/// Extract the DOI from a landing page URL.
pub fn extract_doi_from_url(url: &str) -> Option<String> {
    DOI_IN_URL
        .captures(url)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// Derive a paper id from a DOI: `/` and `.` become `-`.
pub fn paper_id_from_doi(doi: &str) -> String {
    doi.replace(['/', '.'], "-")
}
