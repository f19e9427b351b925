//! Error types for pdfstruct.

use std::io;
use thiserror::Error;

/// Result type alias for pdfstruct operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while extracting or structuring a document.
///
/// Structuring itself never fails; these errors come from the collaborators
/// around it (extractor input, OCR, refinement, rendering).
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON (de)serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Input does not match the raw extraction contract.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Page index is out of range.
    #[error("Page {0} is out of range (document has {1} pages)")]
    PageOutOfRange(u32, u32),

    /// The content extractor failed.
    #[error("Extraction error: {0}")]
    Extract(String),

    /// The OCR engine failed.
    #[error("OCR error: {0}")]
    Ocr(String),

    /// The refinement service failed or returned an unusable document.
    #[error("Refinement error: {0}")]
    Refine(String),

    /// Error during rendering.
    #[error("Rendering error: {0}")]
    Render(String),

    /// Generic error with message.
    #[error("{0}")]
    Other(String),
}

#[cfg(feature = "refine")]
impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::Refine(err.to_string())
    }
}
