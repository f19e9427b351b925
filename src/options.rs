//! Parsing options and configuration.

use crate::extract::PageSelection;
use crate::ocr::OcrMode;
use crate::structure::HeadingConfig;

/// Default OCR rendering resolution.
pub const DEFAULT_OCR_DPI: u32 = 300;

/// Options for turning an extracted document into structure.
#[derive(Debug, Clone)]
pub struct ParseOptions {
    /// Error handling mode for page extraction
    pub error_mode: ErrorMode,

    /// When to run the OCR fallback
    pub ocr_mode: OcrMode,

    /// Rendering resolution handed to the OCR engine
    pub ocr_dpi: u32,

    /// Page selection (which pages to process)
    pub pages: PageSelection,

    /// Maximum number of pages to process, applied after selection
    pub max_pages: Option<usize>,

    /// Whether to normalize pages in parallel
    pub parallel: bool,

    /// Heading detection thresholds
    pub heading: HeadingConfig,

    /// Guess title/authors from the first page when metadata lacks them
    pub detect_title: bool,
}

impl ParseOptions {
    /// Create new parse options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set error mode.
    pub fn with_error_mode(mut self, mode: ErrorMode) -> Self {
        self.error_mode = mode;
        self
    }

    /// Enable lenient mode (skip pages that fail to extract).
    pub fn lenient(mut self) -> Self {
        self.error_mode = ErrorMode::Lenient;
        self
    }

    /// Set OCR mode.
    pub fn with_ocr(mut self, mode: OcrMode) -> Self {
        self.ocr_mode = mode;
        self
    }

    /// Set OCR resolution.
    pub fn with_ocr_dpi(mut self, dpi: u32) -> Self {
        self.ocr_dpi = dpi;
        self
    }

    /// Set page selection.
    pub fn with_pages(mut self, pages: PageSelection) -> Self {
        self.pages = pages;
        self
    }

    /// Limit the number of processed pages.
    pub fn with_max_pages(mut self, max: usize) -> Self {
        self.max_pages = Some(max);
        self
    }

    /// Enable or disable parallel processing.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Disable parallel processing.
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }

    /// Set heading configuration.
    pub fn with_heading_config(mut self, config: HeadingConfig) -> Self {
        self.heading = config;
        self
    }

    /// Enable or disable title/author detection.
    pub fn with_title_detection(mut self, detect: bool) -> Self {
        self.detect_title = detect;
        self
    }
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            error_mode: ErrorMode::Strict,
            ocr_mode: OcrMode::Never,
            ocr_dpi: DEFAULT_OCR_DPI,
            pages: PageSelection::All,
            max_pages: None,
            parallel: true,
            heading: HeadingConfig::default(),
            detect_title: true,
        }
    }
}

/// Error handling mode during extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorMode {
    /// Fail on any page error
    #[default]
    Strict,
    /// Skip failing pages and continue
    Lenient,
}
