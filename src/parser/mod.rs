//! Segmenters that turn raw paper sources into content items.

mod dom;
mod keywords;
mod landing;
mod options;
pub(crate) mod query;
mod text;

pub use dom::{DomSegmenter, ABSTRACT_SECTION};
pub use keywords::{title_case, SectionKeywords, DEFAULT_SECTION_KEYWORDS};
pub use landing::LandingSegmenter;
pub use options::{ErrorMode, ParseOptions};
pub use text::TextSegmenter;
