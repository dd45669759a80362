//! Rendering of segmented papers into the experiment page and metadata record.

mod html;
mod json;
mod options;
mod result;
pub mod visitor;

pub use html::{escape_html, to_html, HtmlRenderer, BOUNDARY_DATA_ID, CONTENT_ELEMENT_ID};
pub use json::{from_json, to_json, JsonFormat};
pub use options::{RenderOptions, DEFAULT_IMAGE_PREFIX, DEFAULT_STYLESHEET_URL};
pub use result::{ExtractionStats, RenderResult};
pub use visitor::{DefaultVisitor, DocumentVisitor, VisitorAction};
