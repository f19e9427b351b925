//! Font size statistics used as the reference scale for heading detection.

use crate::model::{RawPage, TextBlock};

/// Median of a slice of sizes; `None` when empty.
///
/// Even counts average the two middle values.
pub fn median(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));

    let n = sorted.len();
    if n % 2 == 1 {
        Some(sorted[n / 2])
    } else {
        Some((sorted[n / 2 - 1] + sorted[n / 2]) / 2.0)
    }
}

/// Font statistics for one page.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FontStatistics {
    /// Median span size on the page, or the fallback when nothing is sized
    pub median_size: f64,
    /// Number of sized spans observed
    pub sample_count: usize,
}

impl FontStatistics {
    /// Compute the statistics of a page's text blocks.
    ///
    /// A zero median is treated like a missing one.
    pub fn for_page(page: &RawPage, fallback: f64) -> Self {
        let sizes: Vec<f64> = page.text_blocks().flat_map(TextBlock::span_sizes).collect();
        let median_size = median(&sizes).filter(|m| *m != 0.0).unwrap_or(fallback);
        Self {
            median_size,
            sample_count: sizes.len(),
        }
    }

    /// Representative size of a block: the median of its own spans, or the
    /// page median when the block has no sized span.
    pub fn block_size(&self, block: &TextBlock) -> f64 {
        let sizes: Vec<f64> = block.span_sizes().collect();
        median(&sizes)
            .filter(|m| *m != 0.0)
            .unwrap_or(self.median_size)
    }
}
