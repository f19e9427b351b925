//! OCR fallback for pages without a usable text layer.
//!
//! A page selected for OCR gains a single synthetic text block covering the
//! whole page. The structure builder then treats it like any other block:
//! its one span has size 10, which is also the page median, so the
//! recognized text lands as a paragraph.
//!
//! Recognition itself is delegated to an [`OcrEngine`]. Failures never abort
//! the document: they are logged and the page is left as it was.

mod command;

pub use command::CommandOcr;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::model::{RawPage, Span, TextBlock};

/// Font name given to recognized text.
pub const OCR_FONT: &str = "OCR";

/// Font size given to recognized text.
pub const OCR_FONT_SIZE: f64 = 10.0;

/// When to run OCR on a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OcrMode {
    /// Never run OCR
    #[default]
    Never,
    /// Only on pages with no meaningful text
    IfNeeded,
    /// On every page
    Always,
}

impl OcrMode {
    /// Whether `page` should be sent to the OCR engine under this mode.
    pub fn wants(&self, page: &RawPage) -> bool {
        match self {
            OcrMode::Never => false,
            OcrMode::IfNeeded => !page.has_meaningful_text(),
            OcrMode::Always => true,
        }
    }
}

/// A text recognizer for rendered pages.
pub trait OcrEngine: Send + Sync {
    /// Recognize the text of `page` rendered at `dpi`.
    fn recognize(&self, page: &RawPage, dpi: u32) -> Result<String>;
}

/// Build the synthetic block appended to an OCR'd page.
pub fn ocr_block(page: &RawPage, text: String) -> TextBlock {
    let bbox = [0.0, 0.0, page.width, page.height];
    let mut span = Span::new(text.clone(), OCR_FONT_SIZE)
        .with_font(OCR_FONT)
        .with_bbox(bbox);
    span.flags = Some(0);
    TextBlock {
        text,
        bbox: Some(bbox),
        spans: vec![span],
    }
}

/// Run `engine` over the pages selected by `mode`.
///
/// Returns the number of pages that received recognized text.
pub fn apply_ocr(pages: &mut [RawPage], engine: &dyn OcrEngine, mode: OcrMode, dpi: u32) -> usize {
    let mut recognized = 0;
    for page in pages.iter_mut().filter(|p| mode.wants(p)) {
        match engine.recognize(page, dpi) {
            Ok(text) => {
                log::debug!("OCR page {}: {} chars", page.number, text.trim().len());
                let block = ocr_block(page, text);
                page.add_text(block);
                recognized += 1;
            }
            Err(e) => {
                log::warn!("OCR failed for page {}: {}", page.number, e);
            }
        }
    }
    recognized
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    struct FixedOcr;

    impl OcrEngine for FixedOcr {
        fn recognize(&self, page: &RawPage, _dpi: u32) -> Result<String> {
            if page.number == 2 {
                Err(Error::Ocr("unreadable scan".into()))
            } else {
                Ok(format!("scanned text {}", page.number))
            }
        }
    }

    fn pages() -> Vec<RawPage> {
        let mut with_text = RawPage::letter(1);
        with_text.add_text(TextBlock::from_spans(vec![Span::new("Body", 10.0)]));
        vec![with_text, RawPage::letter(2), RawPage::letter(3)]
    }

    #[test]
    fn test_mode_selection() {
        let pages = pages();
        assert!(!OcrMode::Never.wants(&pages[1]));
        assert!(!OcrMode::IfNeeded.wants(&pages[0]));
        assert!(OcrMode::IfNeeded.wants(&pages[1]));
        assert!(OcrMode::Always.wants(&pages[0]));
    }

    #[test]
    fn test_if_needed_skips_text_pages_and_survives_failures() {
        let mut pages = pages();
        let before = pages.clone();
        let count = apply_ocr(&mut pages, &FixedOcr, OcrMode::IfNeeded, 300);

        assert_eq!(count, 1);
        assert_eq!(pages[0], before[0]);
        assert_eq!(pages[1], before[1]);
        assert_eq!(pages[2].raw_blocks.len(), 1);
    }

    #[test]
    fn test_ocr_block_shape() {
        let page = RawPage::new(1, 600.0, 800.0);
        let block = ocr_block(&page, "hello".to_string());
        assert_eq!(block.bbox, Some([0.0, 0.0, 600.0, 800.0]));
        assert_eq!(block.spans.len(), 1);

        let span = &block.spans[0];
        assert_eq!(span.text, "hello");
        assert_eq!(span.size, Some(10.0));
        assert_eq!(span.font.as_deref(), Some("OCR"));
        assert_eq!(span.flags, Some(0));
    }

    #[test]
    fn test_always_appends_after_existing_blocks() {
        let mut pages = pages();
        apply_ocr(&mut pages[..1], &FixedOcr, OcrMode::Always, 300);
        assert_eq!(pages[0].raw_blocks.len(), 2);
        let last = pages[0].raw_blocks[1].as_text().unwrap();
        assert_eq!(last.text, "scanned text 1");
    }
}
