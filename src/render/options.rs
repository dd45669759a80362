//! Rendering options and configuration.

use super::JsonFormat;

/// Default relative prefix of per-paper image directories.
pub const DEFAULT_IMAGE_PREFIX: &str = "../papers_images";

/// Default stylesheet (Tailwind play CDN).
pub const DEFAULT_STYLESHEET_URL: &str = "https://cdn.tailwindcss.com";

/// Options for rendering a paper page.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Prefix for image paths; images resolve to `{prefix}/{paper_id}/{filename}`
    pub image_prefix: String,

    /// Stylesheet script URL, or none for an unstyled page
    pub stylesheet_url: Option<String>,

    /// Append a review panel listing detected sections and images
    pub review_panel: bool,

    /// Embed the client-side boundary measurement script
    pub boundary_script: bool,

    /// Format of the metadata JSON record
    pub json_format: JsonFormat,
}

impl RenderOptions {
    /// Create new render options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the image path prefix.
    pub fn with_image_prefix(mut self, prefix: impl Into<String>) -> Self {
        let prefix = prefix.into();
        self.image_prefix = prefix.trim_end_matches('/').to_string();
        self
    }

    /// Set the stylesheet URL.
    pub fn with_stylesheet(mut self, url: impl Into<String>) -> Self {
        self.stylesheet_url = Some(url.into());
        self
    }

    /// Render without a stylesheet.
    pub fn without_stylesheet(mut self) -> Self {
        self.stylesheet_url = None;
        self
    }

    /// Enable or disable the review panel.
    pub fn with_review_panel(mut self, enabled: bool) -> Self {
        self.review_panel = enabled;
        self
    }

    /// Enable or disable the boundary measurement script.
    pub fn with_boundary_script(mut self, enabled: bool) -> Self {
        self.boundary_script = enabled;
        self
    }

    /// Set the metadata JSON format.
    pub fn with_json_format(mut self, format: JsonFormat) -> Self {
        self.json_format = format;
        self
    }

    /// Relative image path for a paper.
    pub fn image_path(&self, paper_id: &str, filename: &str) -> String {
        if self.image_prefix.is_empty() {
            format!("{}/{}", paper_id, filename)
        } else {
            format!("{}/{}/{}", self.image_prefix, paper_id, filename)
        }
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            image_prefix: DEFAULT_IMAGE_PREFIX.to_string(),
            stylesheet_url: Some(DEFAULT_STYLESHEET_URL.to_string()),
            review_panel: false,
            boundary_script: true,
            json_format: JsonFormat::Pretty,
        }
    }
}
