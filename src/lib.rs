//! # pdfstruct
//!
//! Document structure reconstruction from flat per-page PDF extractions.
//!
//! A content extractor delivers positioned text runs, images and links for
//! every page. This library turns that flat stream into:
//!
//! - per-page blocks classified as headings (levels 1-3) or paragraphs,
//!   using font size relative to the page median,
//! - a section hierarchy taken from the document outline, or inferred from
//!   the detected headings when there is no outline,
//! - a resolved page span for every section,
//! - every block, image and link attached to the deepest section covering
//!   its page.
//!
//! ## Quick Start
//!
//! ```no_run
//! use pdfstruct::{parse_file, render};
//!
//! fn main() -> pdfstruct::Result<()> {
//!     // Structure a raw extraction dump
//!     let doc = parse_file("extraction.json")?;
//!
//!     println!("{}", render::to_outline(&doc.sections));
//!     let json = render::to_json(&doc, render::JsonFormat::Pretty)?;
//!     std::fs::write("structured.json", json)?;
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Outline first**: the authoritative outline always wins over inferred headings
//! - **Parallel processing**: pages are normalized with Rayon
//! - **OCR fallback**: pluggable [`ocr::OcrEngine`] for pages without a text layer
//! - **Refinement**: optional [`refine::Refiner`] pass, `refine` feature for an
//!   OpenAI-compatible backend

pub mod error;
pub mod extract;
pub mod model;
pub mod ocr;
pub mod options;
pub mod refine;
pub mod render;
pub mod structure;

// Re-export commonly used types
pub use error::{Error, Result};
pub use extract::{ContentExtractor, JsonExtractor, PageSelection};
pub use model::{
    Bbox, ImageItem, LinkItem, Metadata, OutputBlock, Page, RawBlock, RawDocument, RawMetadata,
    RawPage, SectionBlock, SectionNode, Span, StructureStats, StructuredDocument, TextBlock,
    TocEntry,
};
pub use ocr::{CommandOcr, OcrEngine, OcrMode};
pub use options::{ErrorMode, ParseOptions};
pub use refine::Refiner;
pub use render::JsonFormat;
pub use structure::{build_structure, HeadingConfig, StructureBuilder};

use std::io::Read;
use std::path::Path;

/// Structure a raw extraction dump stored as JSON.
///
/// # Example
///
/// ```no_run
/// use pdfstruct::parse_file;
///
/// let doc = parse_file("extraction.json").unwrap();
/// println!("Sections: {}", doc.sections.len());
/// ```
pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<StructuredDocument> {
    Structurer::new().parse_file(path)
}

/// Structure a raw extraction dump with custom options.
///
/// # Example
///
/// ```no_run
/// use pdfstruct::{parse_file_with_options, PageSelection, ParseOptions};
///
/// let options = ParseOptions::new()
///     .lenient()
///     .with_pages(PageSelection::parse("1-10"));
/// let doc = parse_file_with_options("extraction.json", options).unwrap();
/// ```
pub fn parse_file_with_options<P: AsRef<Path>>(
    path: P,
    options: ParseOptions,
) -> Result<StructuredDocument> {
    Structurer::new().with_options(options).parse_file(path)
}

/// Structure a raw extraction dump held in memory.
pub fn parse_bytes(data: &[u8]) -> Result<StructuredDocument> {
    Structurer::new().parse_bytes(data)
}

/// Structure a raw extraction dump read from `reader`.
pub fn parse_reader<R: Read>(reader: R) -> Result<StructuredDocument> {
    Structurer::new().parse_reader(reader)
}

/// Structure a raw extraction dump and render it as JSON.
///
/// # Example
///
/// ```no_run
/// use pdfstruct::{to_json, JsonFormat};
///
/// let json = to_json("extraction.json", JsonFormat::Pretty).unwrap();
/// std::fs::write("structured.json", json).unwrap();
/// ```
pub fn to_json<P: AsRef<Path>>(path: P, format: JsonFormat) -> Result<String> {
    let doc = parse_file(path)?;
    render::to_json(&doc, format)
}

/// Builder running the whole pipeline: extraction, OCR, structuring and
/// refinement.
///
/// # Example
///
/// ```no_run
/// use pdfstruct::{CommandOcr, OcrMode, Structurer};
///
/// let doc = Structurer::new()
///     .lenient()
///     .with_ocr(CommandOcr::new("ocr-page").arg("{page}"), OcrMode::IfNeeded)
///     .parse_file("extraction.json")?;
/// # Ok::<(), pdfstruct::Error>(())
/// ```
pub struct Structurer {
    options: ParseOptions,
    ocr: Option<Box<dyn OcrEngine>>,
    refiner: Option<Box<dyn Refiner>>,
}

impl Structurer {
    /// Create a builder with default options and no collaborators.
    pub fn new() -> Self {
        Self {
            options: ParseOptions::default(),
            ocr: None,
            refiner: None,
        }
    }

    /// Replace all parse options.
    pub fn with_options(mut self, options: ParseOptions) -> Self {
        self.options = options;
        self
    }

    /// Enable lenient extraction.
    pub fn lenient(mut self) -> Self {
        self.options = self.options.lenient();
        self
    }

    /// Disable parallel processing.
    pub fn sequential(mut self) -> Self {
        self.options = self.options.sequential();
        self
    }

    /// Set page selection.
    pub fn with_pages(mut self, pages: PageSelection) -> Self {
        self.options = self.options.with_pages(pages);
        self
    }

    /// Limit the number of processed pages.
    pub fn with_max_pages(mut self, max: usize) -> Self {
        self.options = self.options.with_max_pages(max);
        self
    }

    /// Set heading thresholds.
    pub fn with_heading_config(mut self, config: HeadingConfig) -> Self {
        self.options = self.options.with_heading_config(config);
        self
    }

    /// Enable or disable title/author detection.
    pub fn with_title_detection(mut self, detect: bool) -> Self {
        self.options = self.options.with_title_detection(detect);
        self
    }

    /// Use `engine` for pages selected by `mode`.
    pub fn with_ocr(mut self, engine: impl OcrEngine + 'static, mode: OcrMode) -> Self {
        self.ocr = Some(Box::new(engine));
        self.options = self.options.with_ocr(mode);
        self
    }

    /// Set the OCR rendering resolution.
    pub fn with_ocr_dpi(mut self, dpi: u32) -> Self {
        self.options = self.options.with_ocr_dpi(dpi);
        self
    }

    /// Refine the finished document with `refiner`.
    pub fn with_refiner(mut self, refiner: impl Refiner + 'static) -> Self {
        self.refiner = Some(Box::new(refiner));
        self
    }

    /// Current parse options.
    pub fn options(&self) -> &ParseOptions {
        &self.options
    }

    /// Run the pipeline against any content extractor.
    pub fn structure<E: ContentExtractor + ?Sized>(&self, extractor: &E) -> Result<StructuredDocument> {
        let (mut pages, meta) = extract::extract_document(extractor, &self.options)?;

        if self.options.ocr_mode != OcrMode::Never {
            match &self.ocr {
                Some(engine) => {
                    let count = ocr::apply_ocr(
                        &mut pages,
                        engine.as_ref(),
                        self.options.ocr_mode,
                        self.options.ocr_dpi,
                    );
                    log::info!("OCR added text to {} pages", count);
                }
                None => log::warn!("OCR requested but no engine configured"),
            }
        }

        let doc = StructureBuilder::new()
            .with_heading_config(self.options.heading.clone())
            .with_parallel(self.options.parallel)
            .build(&pages, meta);

        Ok(match &self.refiner {
            Some(refiner) => refine::refine_or_keep(doc, refiner.as_ref()),
            None => doc,
        })
    }

    /// Structure a raw extraction dump file.
    pub fn parse_file<P: AsRef<Path>>(&self, path: P) -> Result<StructuredDocument> {
        self.structure(&JsonExtractor::open(path)?)
    }

    /// Structure a raw extraction dump held in memory.
    pub fn parse_bytes(&self, data: &[u8]) -> Result<StructuredDocument> {
        self.structure(&JsonExtractor::from_bytes(data)?)
    }

    /// Structure a raw extraction dump read from `reader`.
    pub fn parse_reader<R: Read>(&self, reader: R) -> Result<StructuredDocument> {
        self.structure(&JsonExtractor::from_reader(reader)?)
    }
}

impl Default for Structurer {
    fn default() -> Self {
        Self::new()
    }
}
