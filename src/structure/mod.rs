//! Structure reconstruction: page normalization, section tree building and
//! content placement.
//!
//! The pipeline runs in three phases:
//!
//! 1. every raw page is normalized against its own median font size
//!    ([`normalize_page`]); pages are independent, so this phase may run in
//!    parallel,
//! 2. a section forest is built from the outline, or inferred from the
//!    detected headings when there is none ([`build_sections`]),
//! 3. each block, image and link is attached to the deepest section whose
//!    page span contains it ([`place_content`]).

mod heading;
mod normalize;
mod placer;
mod stats;
mod tree;

pub use heading::{classify, HeadingConfig, HeadingLevel};
pub use normalize::{collapse_whitespace, normalize_page};
pub use placer::{locate, place_block, place_content, place_image, place_link, PlacementReport};
pub use stats::{median, FontStatistics};
pub use tree::{build_sections, SectionSource, SectionTreeBuilder};

use rayon::prelude::*;

use crate::model::{Metadata, Page, RawPage, StructuredDocument};

/// Assembles a [`StructuredDocument`] from raw pages and metadata.
#[derive(Debug, Clone)]
pub struct StructureBuilder {
    heading: HeadingConfig,
    parallel: bool,
}

impl StructureBuilder {
    /// Create a builder with default heading thresholds.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set heading configuration.
    pub fn with_heading_config(mut self, config: HeadingConfig) -> Self {
        self.heading = config;
        self
    }

    /// Enable or disable parallel page normalization.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Normalize all pages, preserving input order.
    pub fn normalize_pages(&self, pages: &[RawPage]) -> Vec<Page> {
        if self.parallel && pages.len() > 1 {
            pages
                .par_iter()
                .map(|page| normalize_page(page, &self.heading))
                .collect()
        } else {
            pages
                .iter()
                .map(|page| normalize_page(page, &self.heading))
                .collect()
        }
    }

    /// Run the full pipeline.
    ///
    /// `meta.pages` is overwritten with the number of pages processed.
    pub fn build(&self, pages: &[RawPage], mut meta: Metadata) -> StructuredDocument {
        let pages = self.normalize_pages(pages);
        meta.pages = pages.len() as u32;

        let (mut sections, source) = build_sections(&meta.toc, &pages);
        let report = place_content(&mut sections, &pages);
        log::debug!(
            "Placed {} items into {} top-level sections ({:?}); {} unplaced",
            report.placed,
            sections.len(),
            source,
            report.dropped
        );

        StructuredDocument {
            meta,
            pages,
            sections,
        }
    }
}

impl Default for StructureBuilder {
    fn default() -> Self {
        Self {
            heading: HeadingConfig::default(),
            parallel: true,
        }
    }
}

/// Structure raw pages with default settings.
pub fn build_structure(pages: &[RawPage], meta: Metadata) -> StructuredDocument {
    StructureBuilder::new().build(pages, meta)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Span, TextBlock, TocEntry};

    fn sample_pages() -> Vec<RawPage> {
        (1..=4)
            .map(|n| {
                let mut page = RawPage::letter(n);
                if n % 2 == 1 {
                    page.add_text(TextBlock::from_spans(vec![Span::new(
                        format!("Chapter {}", n),
                        20.0,
                    )]));
                }
                for i in 0..3 {
                    page.add_text(TextBlock::from_spans(vec![Span::new(
                        format!("Paragraph {}.{}", n, i),
                        10.0,
                    )]));
                }
                page
            })
            .collect()
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let pages = sample_pages();
        let parallel = StructureBuilder::new().build(&pages, Metadata::default());
        let sequential = StructureBuilder::new()
            .with_parallel(false)
            .build(&pages, Metadata::default());
        assert_eq!(parallel, sequential);
    }

    #[test]
    fn test_meta_pages_overwritten() {
        let meta = Metadata {
            pages: 99,
            ..Default::default()
        };
        let doc = build_structure(&sample_pages(), meta);
        assert_eq!(doc.meta.pages, 4);
    }

    #[test]
    fn test_inferred_sections_receive_content() {
        let doc = build_structure(&sample_pages(), Metadata::default());
        assert_eq!(doc.sections.len(), 2);
        assert_eq!(doc.sections[0].title, "Chapter 1");
        assert_eq!(doc.sections[0].page_end, Some(2));
        // heading + 3 paragraphs on page 1, 3 paragraphs on page 2
        assert_eq!(doc.sections[0].blocks.len(), 7);
    }

    #[test]
    fn test_outline_takes_precedence_over_headings() {
        let meta = Metadata {
            toc: vec![TocEntry::new(1, "Everything", 1)],
            ..Default::default()
        };
        let doc = build_structure(&sample_pages(), meta);
        assert_eq!(doc.sections.len(), 1);
        assert_eq!(doc.sections[0].title, "Everything");
        assert_eq!(doc.sections[0].page_end, Some(4));
        assert_eq!(doc.stats().unplaced(), 0);
    }

    #[test]
    fn test_empty_document() {
        let doc = build_structure(&[], Metadata::default());
        assert!(doc.is_empty());
        assert!(doc.sections.is_empty());
        assert_eq!(doc.meta.pages, 0);
    }
}
