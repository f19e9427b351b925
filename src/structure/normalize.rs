//! Turn raw page blocks into classified output blocks.

use super::heading::HeadingConfig;
use super::stats::FontStatistics;
use crate::model::{OutputBlock, Page, RawPage};

/// Collapse every whitespace run (newlines included) into a single space and trim.
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Normalize one page against its own font median.
///
/// Empty text blocks are dropped; the remaining blocks keep extractor order.
/// Images and links pass through unchanged.
pub fn normalize_page(page: &RawPage, config: &HeadingConfig) -> Page {
    let stats = FontStatistics::for_page(page, config.default_font_size);
    log::debug!(
        "Page {}: median font size {:.2} over {} spans",
        page.number,
        stats.median_size,
        stats.sample_count
    );

    let blocks = page
        .text_blocks()
        .filter_map(|block| {
            let text = collapse_whitespace(&block.text);
            if text.is_empty() {
                return None;
            }
            let size = stats.block_size(block);
            Some(match config.classify(size, stats.median_size) {
                Some(level) => OutputBlock::heading(level.get(), text, block.bbox),
                None => OutputBlock::paragraph(text, block.bbox),
            })
        })
        .collect();

    Page {
        number: page.number,
        width: page.width,
        height: page.height,
        blocks,
        images: page.images.clone(),
        links: page.links.clone(),
    }
}
