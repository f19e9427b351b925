//! Document model types.
//!
//! Two layers live here: the raw per-page representation delivered by a
//! content extractor, and the structured output (normalized pages plus a
//! section forest) produced by [`crate::structure`].

mod document;
mod page;
mod raw;
mod section;

pub use document::{parse_pdf_date, Metadata, StructureStats, StructuredDocument};
pub use page::{OutputBlock, Page};
pub use raw::{
    Bbox, ImageItem, LinkItem, RawBlock, RawDocument, RawMetadata, RawPage, Span, TextBlock,
    TocEntry,
};
pub use section::{walk_sections, SectionBlock, SectionNode};
