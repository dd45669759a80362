//! Document model types for segmented papers.
//!
//! This module defines the intermediate representation shared by the
//! segmenters, the boundary calculator and the renderer. It does not
//! depend on any source format.

mod content;
mod metadata;
mod paper;

pub use content::{
    filename_from_src, ContentItem, ImageRef, ItemSpan, SectionDescriptor, TableRef,
    SECTION_LEVEL, SUBSECTION_LEVEL,
};
pub use metadata::{BoundaryEntry, PaperMetadata, SectionBoundaries, SectionBoundary};
pub use paper::{SegmentedPaper, SourceKind};
