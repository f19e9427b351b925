//! Extractor over a raw extraction dump stored as JSON.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use super::ContentExtractor;
use crate::error::{Error, Result};
use crate::model::{RawDocument, RawMetadata, RawPage, TocEntry};

/// Serves pages from a [`RawDocument`] previously written by an extractor.
///
/// The expected JSON shape is
/// `{ "metadata": {...}, "toc": [...], "pages": [{ "number", "width", "height",
/// "raw_blocks", "images", "links" }] }`.
#[derive(Debug, Clone)]
pub struct JsonExtractor {
    doc: RawDocument,
}

impl JsonExtractor {
    /// Open a raw extraction dump.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path.as_ref())?;
        Self::from_reader(BufReader::new(file))
    }

    /// Load a dump from bytes.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        let doc = serde_json::from_slice(data).map_err(invalid)?;
        Ok(Self::from_document(doc))
    }

    /// Load a dump from a reader.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let doc = serde_json::from_reader(reader).map_err(invalid)?;
        Ok(Self::from_document(doc))
    }

    /// Wrap an in-memory document.
    pub fn from_document(doc: RawDocument) -> Self {
        Self { doc }
    }

    /// Borrow the underlying document.
    pub fn document(&self) -> &RawDocument {
        &self.doc
    }
}

fn invalid(err: serde_json::Error) -> Error {
    if err.is_io() {
        Error::Json(err)
    } else {
        Error::InvalidInput(format!("not a raw extraction dump: {}", err))
    }
}

impl ContentExtractor for JsonExtractor {
    fn page_count(&self) -> u32 {
        self.doc.pages.len() as u32
    }

    fn extract_page(&self, index: u32) -> Result<RawPage> {
        self.doc
            .pages
            .get(index as usize)
            .cloned()
            .ok_or(Error::PageOutOfRange(index + 1, self.page_count()))
    }

    fn metadata(&self) -> Result<RawMetadata> {
        Ok(self.doc.metadata.clone())
    }

    fn outline(&self) -> Result<Vec<TocEntry>> {
        Ok(self.doc.toc.clone())
    }
}
