//! Output directory layout.
//!
//! ```text
//! {root}/papers_html/{id}.html
//! {root}/papers_json/{id}.json
//! {root}/papers_images/{id}/{filename}
//! {root}/papers-data.js
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use crate::convert::ConvertResult;
use crate::error::Result;
use crate::render::to_json;
use crate::render::RenderOptions;

/// Directory of rendered pages.
pub const HTML_DIR: &str = "papers_html";

/// Directory of metadata records.
pub const JSON_DIR: &str = "papers_json";

/// Directory of per-paper image directories.
pub const IMAGES_DIR: &str = "papers_images";

/// Generated experiment catalog script.
pub const PAPERS_DATA_FILE: &str = "papers-data.js";

/// Files written for one paper.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenPaper {
    /// Rendered page
    pub html: PathBuf,
    /// Metadata record
    pub json: PathBuf,
    /// Image directory
    pub images: PathBuf,
}

/// Output layout rooted at a project directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputLayout {
    root: PathBuf,
}

impl OutputLayout {
    /// Create a layout rooted at a directory.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory of rendered pages.
    pub fn html_dir(&self) -> PathBuf {
        self.root.join(HTML_DIR)
    }

    /// Directory of metadata records.
    pub fn json_dir(&self) -> PathBuf {
        self.root.join(JSON_DIR)
    }

    /// Rendered page of a paper.
    pub fn html_path(&self, paper_id: &str) -> PathBuf {
        self.html_dir().join(format!("{}.html", paper_id))
    }

    /// Metadata record of a paper.
    pub fn json_path(&self, paper_id: &str) -> PathBuf {
        self.json_dir().join(format!("{}.json", paper_id))
    }

    /// Image directory of a paper.
    pub fn image_dir(&self, paper_id: &str) -> PathBuf {
        self.root.join(IMAGES_DIR).join(paper_id)
    }

    /// Catalog script path.
    pub fn papers_data_path(&self) -> PathBuf {
        self.root.join(PAPERS_DATA_FILE)
    }

    /// Create the directories for a paper.
    pub fn ensure_dirs(&self, paper_id: &str) -> Result<()> {
        fs::create_dir_all(self.html_dir())?;
        fs::create_dir_all(self.json_dir())?;
        fs::create_dir_all(self.image_dir(paper_id))?;
        Ok(())
    }

    /// Write the page and metadata record of a converted paper.
    pub fn write(&self, result: &ConvertResult, options: &RenderOptions) -> Result<WrittenPaper> {
        self.ensure_dirs(&result.paper_id)?;

        let written = WrittenPaper {
            html: self.html_path(&result.paper_id),
            json: self.json_path(&result.paper_id),
            images: self.image_dir(&result.paper_id),
        };

        fs::write(&written.html, &result.html)?;
        let json = to_json(&result.metadata, options.json_format)?;
        fs::write(&written.json, json)?;

        log::info!(
            "Wrote {} and {}",
            written.html.display(),
            written.json.display()
        );
        Ok(written)
    }
}

impl Default for OutputLayout {
    fn default() -> Self {
        Self::new(".")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths() {
        let layout = OutputLayout::new("/srv/experiment");
        assert_eq!(
            layout.html_path("chi25-a"),
            PathBuf::from("/srv/experiment/papers_html/chi25-a.html")
        );
        assert_eq!(
            layout.json_path("chi25-a"),
            PathBuf::from("/srv/experiment/papers_json/chi25-a.json")
        );
        assert_eq!(
            layout.image_dir("chi25-a"),
            PathBuf::from("/srv/experiment/papers_images/chi25-a")
        );
        assert_eq!(
            layout.papers_data_path(),
            PathBuf::from("/srv/experiment/papers-data.js")
        );
    }

    #[test]
    fn test_ensure_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let layout = OutputLayout::new(dir.path());
        layout.ensure_dirs("p1").unwrap();
        assert!(layout.html_dir().is_dir());
        assert!(layout.json_dir().is_dir());
        assert!(layout.image_dir("p1").is_dir());
    }
}
