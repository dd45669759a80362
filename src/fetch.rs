//! ACM Digital Library fetching (feature `fetch`).
//!
//! Downloads a landing page by DOI, segments it, downloads the figure
//! images into the paper's image directory and writes the page and the
//! metadata record into an [`OutputLayout`].
//!
//! Requests are blocking and sequential. The page request has no timeout;
//! each image request has its own timeout and is followed by a short delay.

use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::thread;
use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::Url;

use crate::convert::{assemble_with, ConvertOptions, ConvertResult};
use crate::doi::PaperRef;
use crate::error::{Error, Result};
use crate::layout::OutputLayout;
use crate::model::{ContentItem, SegmentedPaper};
use crate::parser::LandingSegmenter;

/// User agent sent with every request.
pub const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

/// Delay after each downloaded image.
pub const DEFAULT_IMAGE_DELAY: Duration = Duration::from_millis(500);

/// Per-image request timeout.
pub const DEFAULT_IMAGE_TIMEOUT: Duration = Duration::from_secs(10);

/// Blocking fetcher for ACM landing pages and their figures.
#[derive(Debug, Clone)]
pub struct AcmFetcher {
    client: Client,
    image_delay: Duration,
    image_timeout: Duration,
}

impl AcmFetcher {
    /// Create a fetcher with the default delays.
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(None::<Duration>)
            .build()?;

        Ok(Self {
            client,
            image_delay: DEFAULT_IMAGE_DELAY,
            image_timeout: DEFAULT_IMAGE_TIMEOUT,
        })
    }

    /// Set the delay after each image download.
    pub fn with_image_delay(mut self, delay: Duration) -> Self {
        self.image_delay = delay;
        self
    }

    /// Set the per-image timeout.
    pub fn with_image_timeout(mut self, timeout: Duration) -> Self {
        self.image_timeout = timeout;
        self
    }

    /// Download the landing page of a paper.
    pub fn fetch_page(&self, paper: &PaperRef) -> Result<String> {
        log::info!("Fetching {}", paper.url);
        let response = self.client.get(&paper.url).send()?.error_for_status()?;
        Ok(response.text()?)
    }

    /// Download one image into `dir`, returning the stored file name.
    ///
    /// An existing file with the same name is reused without a request.
    pub fn download_image(&self, url: &Url, dir: &Path) -> Result<String> {
        let filename = image_filename(url, dir);
        let path = dir.join(&filename);
        if path.exists() {
            log::debug!("Image already present: {}", path.display());
            return Ok(filename);
        }

        let bytes = self
            .client
            .get(url.clone())
            .timeout(self.image_timeout)
            .send()?
            .error_for_status()?
            .bytes()?;
        fs::write(&path, &bytes)?;
        log::info!("Downloaded image: {}", filename);

        thread::sleep(self.image_delay);
        Ok(filename)
    }

    /// Fetch, segment and write a paper.
    ///
    /// `input` is a bare DOI or a URL containing one. The paper id comes
    /// from the options when set, otherwise from the DOI.
    pub fn fetch(
        &self,
        input: &str,
        layout: &OutputLayout,
        options: &ConvertOptions,
    ) -> Result<ConvertResult> {
        let paper_ref = PaperRef::parse(input)?;
        let paper_id = options
            .paper_id
            .clone()
            .unwrap_or_else(|| paper_ref.paper_id());
        layout.ensure_dirs(&paper_id)?;

        let html = self.fetch_page(&paper_ref)?;
        let mut paper = LandingSegmenter::new(&options.parse).segment_html(&html);
        let base = Url::parse(&paper_ref.url)
            .map_err(|e| Error::InvalidDoi(format!("{}: {}", paper_ref.url, e)))?;
        self.download_images(&mut paper, &base, &layout.image_dir(&paper_id));

        let result = assemble_with(paper, &paper_id, options, |metadata| {
            metadata.doi = Some(paper_ref.doi.clone());
            metadata.url = Some(paper_ref.url.clone());
        })?;
        layout.write(&result, &options.render)?;
        Ok(result)
    }

    /// Download every image item; items whose download fails are dropped.
    fn download_images(&self, paper: &mut SegmentedPaper, base: &Url, dir: &Path) {
        localize_images(paper, |src| {
            resolve_image_url(base, src).and_then(|url| self.download_image(&url, dir))
        });
    }
}

/// Point image items and the image side list at stored files.
///
/// `store` returns the local file name for an image source. Images it
/// fails on are removed from both lists and recorded as diagnostics.
pub fn localize_images<F>(paper: &mut SegmentedPaper, mut store: F)
where
    F: FnMut(&str) -> Result<String>,
{
    let mut stored: HashMap<String, String> = HashMap::new();
    let mut failed: Vec<String> = Vec::new();
    let mut content = Vec::with_capacity(paper.content.len());

    for item in paper.content.drain(..) {
        let ContentItem::Image { src, caption, .. } = item else {
            content.push(item);
            continue;
        };

        let outcome = match stored.get(&src) {
            Some(filename) => Ok(filename.clone()),
            None => store(&src),
        };
        match outcome {
            Ok(filename) => {
                stored.insert(src.clone(), filename.clone());
                content.push(ContentItem::Image {
                    src,
                    filename,
                    caption,
                });
            }
            Err(e) => {
                log::warn!("Failed to download image {}: {}", src, e);
                failed.push(src);
            }
        }
    }

    paper.content = content;
    paper.images.retain(|image| !failed.contains(&image.src));
    for image in &mut paper.images {
        if let Some(filename) = stored.get(&image.src) {
            image.filename = filename.clone();
        }
    }
    for src in failed {
        paper.diagnose(format!("image not downloaded: {}", src));
    }
}

/// Resolve an image source against the page URL.
pub fn resolve_image_url(base: &Url, src: &str) -> Result<Url> {
    base.join(src)
        .map_err(|e| Error::Other(format!("invalid image source {}: {}", src, e)))
}

/// File name for a downloaded image: the last URL path segment, or
/// `image_{n}.png` where `n` counts the files already in `dir`.
pub fn image_filename(url: &Url, dir: &Path) -> String {
    url.path_segments()
        .and_then(|mut segments| segments.next_back())
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| {
            let count = fs::read_dir(dir).map(|entries| entries.count()).unwrap_or(0);
            format!("image_{}.png", count)
        })
}
