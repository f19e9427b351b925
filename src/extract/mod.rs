//! The boundary with the content extractor.
//!
//! Binary document decoding is delegated to a [`ContentExtractor`]. This
//! module selects pages, collects the raw pages and metadata, and applies the
//! best-effort title/author detection.

mod json;
mod pages;
mod title;

pub use json::JsonExtractor;
pub use pages::PageSelection;
pub use title::{detect_title, enrich_metadata, DetectedTitle};

use crate::error::Result;
use crate::model::{Metadata, RawMetadata, RawPage, TocEntry};
use crate::options::{ErrorMode, ParseOptions};

/// A source of raw per-page content.
pub trait ContentExtractor {
    /// Total number of pages in the source document.
    fn page_count(&self) -> u32;

    /// Extract one page by 0-based index.
    fn extract_page(&self, index: u32) -> Result<RawPage>;

    /// Document information.
    fn metadata(&self) -> Result<RawMetadata>;

    /// Authoritative outline; empty when the document has none.
    fn outline(&self) -> Result<Vec<TocEntry>>;
}

/// Extract the selected pages and the document metadata.
///
/// Page failures propagate in [`ErrorMode::Strict`] and are skipped in
/// [`ErrorMode::Lenient`]. An unreadable outline is treated as no outline.
pub fn extract_document<E: ContentExtractor + ?Sized>(
    extractor: &E,
    options: &ParseOptions,
) -> Result<(Vec<RawPage>, Metadata)> {
    let numbers = options
        .pages
        .resolve(extractor.page_count(), options.max_pages);

    let mut pages = Vec::with_capacity(numbers.len());
    for number in numbers {
        match extractor.extract_page(number - 1) {
            Ok(page) => pages.push(page),
            Err(e) => {
                if options.error_mode == ErrorMode::Strict {
                    return Err(e);
                }
                log::warn!("Skipping page {}: {}", number, e);
            }
        }
    }

    let raw = extractor.metadata()?;
    let toc = extractor.outline().unwrap_or_else(|e| {
        log::warn!("Ignoring unreadable outline: {}", e);
        Vec::new()
    });

    let mut meta = Metadata::from_raw(raw, toc, pages.len() as u32);
    if options.detect_title {
        if let Some(first) = pages.first() {
            enrich_metadata(&mut meta, first);
        }
    }

    Ok((pages, meta))
}
