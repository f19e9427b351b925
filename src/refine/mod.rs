//! Optional refinement of a structured document by an external service.
//!
//! A [`Refiner`] receives the finished document and may return an improved
//! one in the same schema. Refinement is strictly best-effort: whatever goes
//! wrong, [`refine_or_keep`] hands back the original document untouched.

#[cfg(feature = "refine")]
mod openai;

#[cfg(feature = "refine")]
pub use openai::{OpenAiRefiner, DEFAULT_MODEL, MAX_PAYLOAD_BYTES};

use crate::error::{Error, Result};
use crate::model::StructuredDocument;

/// A service that can rewrite a structured document.
pub trait Refiner: Send + Sync {
    /// Short name used in log messages.
    fn name(&self) -> &str;

    /// Return a refined copy of `doc`.
    fn refine(&self, doc: &StructuredDocument) -> Result<StructuredDocument>;
}

/// Refine `doc`, falling back to it unchanged on any failure.
pub fn refine_or_keep(doc: StructuredDocument, refiner: &dyn Refiner) -> StructuredDocument {
    match refiner.refine(&doc) {
        Ok(refined) => {
            log::debug!("Document refined by {}", refiner.name());
            refined
        }
        Err(e) => {
            log::warn!("Refinement by {} failed, keeping original: {}", refiner.name(), e);
            doc
        }
    }
}

/// Strip a Markdown code fence around a model reply, if there is one.
pub fn strip_code_fence(text: &str) -> &str {
    let Some((_, rest)) = text.split_once("```") else {
        return text.trim();
    };
    let body = rest.split_once("```").map_or(rest, |(inner, _)| inner);
    let body = body.trim_start();
    match body.strip_prefix("json") {
        Some(tagged) => tagged.split_once('\n').map_or(tagged, |(_, json)| json).trim(),
        None => body.trim(),
    }
}

/// Parse a model reply into a document.
pub fn parse_refined_response(text: &str) -> Result<StructuredDocument> {
    serde_json::from_str(strip_code_fence(text))
        .map_err(|e| Error::Refine(format!("response is not a structured document: {}", e)))
}
