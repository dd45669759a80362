//! Experiment catalog built from the converted papers.
//!
//! The experiment front end loads `papers-data.js`, which defines
//! `AVAILABLE_PAPERS`. Only papers with both a metadata record and a
//! rendered page are listed.

use std::fs;
use std::path::PathBuf;

use serde::Serialize;

use crate::error::Result;
use crate::layout::{OutputLayout, HTML_DIR};
use crate::render::from_json;

/// Title used when a record has none.
const UNKNOWN_TITLE: &str = "Unknown Title";

/// One catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatalogEntry {
    /// Paper id
    pub id: String,
    /// Display name (the paper title)
    pub name: String,
    /// Page URL relative to the project root
    pub url: String,
    /// Number of sections in the record
    pub section_count: usize,
}

/// Papers available to the experiment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Catalog {
    /// Entries sorted by metadata file name
    pub entries: Vec<CatalogEntry>,
    /// Problems found while scanning (missing pages, unreadable records)
    pub warnings: Vec<String>,
}

impl Catalog {
    /// Scan the metadata directory of a layout.
    ///
    /// A missing metadata directory yields an empty catalog.
    pub fn scan(layout: &OutputLayout) -> Result<Self> {
        let mut catalog = Catalog::default();
        let json_dir = layout.json_dir();
        if !json_dir.is_dir() {
            catalog.warn(format!("{} not found", json_dir.display()));
            return Ok(catalog);
        }

        let mut files: Vec<PathBuf> = fs::read_dir(&json_dir)?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|p| p.extension().and_then(|e| e.to_str()) == Some("json"))
            .collect();
        files.sort();

        for file in files {
            let stem = file
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or_default()
                .to_string();

            let metadata = match fs::read_to_string(&file)
                .map_err(crate::Error::from)
                .and_then(|json| from_json(&json))
            {
                Ok(metadata) => metadata,
                Err(e) => {
                    catalog.warn(format!("error reading {}: {}", file.display(), e));
                    continue;
                }
            };

            let id = if metadata.paper_id.is_empty() {
                stem
            } else {
                metadata.paper_id.clone()
            };

            let html = layout.html_path(&id);
            if !html.exists() {
                catalog.warn(format!("HTML not found for {}: expected {}", id, html.display()));
                continue;
            }

            catalog.entries.push(CatalogEntry {
                url: format!("{}/{}.html", HTML_DIR, id),
                name: metadata
                    .title
                    .clone()
                    .filter(|t| !t.is_empty())
                    .unwrap_or_else(|| UNKNOWN_TITLE.to_string()),
                section_count: metadata.sections.len(),
                id,
            });
        }

        Ok(catalog)
    }

    fn warn(&mut self, message: String) {
        log::warn!("{}", message);
        self.warnings.push(message);
    }

    /// Number of listed papers.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if no paper is listed.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Render the `papers-data.js` script.
    pub fn to_papers_data_js(&self) -> String {
        let mut js = String::from(
            "/**\n * Available papers for the experiment\n * This file is auto-generated from papers_json/\n * Run: paperseg catalog --write\n */\n\nconst AVAILABLE_PAPERS = [\n",
        );

        let items: Vec<String> = self
            .entries
            .iter()
            .map(|e| {
                format!(
                    "    {{\n        id: '{}',\n        name: '{}',\n        url: '{}'\n    }}",
                    js_single_quoted(&e.id),
                    js_single_quoted(&e.name),
                    js_single_quoted(&e.url)
                )
            })
            .collect();
        js.push_str(&items.join(",\n"));
        if !items.is_empty() {
            js.push('\n');
        }
        js.push_str("];\n");
        js
    }

    /// Write `papers-data.js` into the layout root.
    pub fn write_papers_data(&self, layout: &OutputLayout) -> Result<PathBuf> {
        let path = layout.papers_data_path();
        fs::write(&path, self.to_papers_data_js())?;
        log::info!("Wrote {} ({} papers)", path.display(), self.len());
        Ok(path)
    }
}

/// Escape text for a single-quoted JavaScript string literal.
///
/// Line terminators and other control characters become escapes, and `</`
/// is split so the file stays safe to inline in a `<script>` element.
fn js_single_quoted(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '<' if chars.peek() == Some(&'/') => out.push_str("<\\"),
            '\u{2028}' | '\u{2029}' => out.push_str(&format!("\\u{:04x}", c as u32)),
            c if c.is_control() => out.push_str(&format!("\\u{:04x}", c as u32)),
            c => out.push(c),
        }
    }
    out
}
