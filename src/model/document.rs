//! Document-level types.

use super::{walk_sections, OutputBlock, Page, RawMetadata, SectionNode, TocEntry};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The structured result: metadata, normalized pages and the section forest.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StructuredDocument {
    /// Document metadata
    pub meta: Metadata,

    /// Every processed page, independent of section placement
    pub pages: Vec<Page>,

    /// Section forest with content attached
    pub sections: Vec<SectionNode>,
}

impl StructuredDocument {
    /// Get the number of pages in the document.
    pub fn page_count(&self) -> u32 {
        self.pages.len() as u32
    }

    /// Get a page by number (1-indexed).
    pub fn get_page(&self, number: u32) -> Option<&Page> {
        self.pages.iter().find(|p| p.number == number)
    }

    /// Check if the document has any pages.
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Get plain text content of the entire document.
    pub fn plain_text(&self) -> String {
        self.pages
            .iter()
            .map(Page::plain_text)
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    /// Collect content and placement counts.
    pub fn stats(&self) -> StructureStats {
        let mut stats = StructureStats {
            pages: self.page_count(),
            ..Default::default()
        };

        for page in &self.pages {
            for block in &page.blocks {
                match block {
                    OutputBlock::Heading { .. } => stats.headings += 1,
                    OutputBlock::Paragraph { .. } => stats.paragraphs += 1,
                }
            }
            stats.images += page.images.len();
            stats.links += page.links.len();
        }

        walk_sections(&self.sections, &mut |node, _| {
            stats.sections += 1;
            stats.placed_blocks += node.blocks.len();
            stats.placed_images += node.images.len();
            stats.placed_links += node.links.len();
        });

        stats
    }
}

/// Document metadata.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Metadata {
    /// Document title
    pub title: Option<String>,

    /// Authors, in source order
    #[serde(default)]
    pub authors: Vec<String>,

    /// Creator application
    pub creator: Option<String>,

    /// PDF producer
    pub producer: Option<String>,

    /// Creation date as stored in the document
    pub creation_date: Option<String>,

    /// Last modification date as stored in the document
    pub mod_date: Option<String>,

    /// Number of processed pages
    pub pages: u32,

    /// Authoritative outline, possibly empty
    #[serde(default)]
    pub toc: Vec<TocEntry>,
}

impl Metadata {
    /// Build metadata from extractor information.
    pub fn from_raw(raw: RawMetadata, toc: Vec<TocEntry>, pages: u32) -> Self {
        let authors = raw.authors();
        Self {
            title: raw.title.filter(|t| !t.is_empty()),
            authors,
            creator: raw.creator,
            producer: raw.producer,
            creation_date: raw.creation_date,
            mod_date: raw.mod_date,
            pages,
            toc,
        }
    }

    /// Parsed creation date.
    pub fn created(&self) -> Option<DateTime<Utc>> {
        self.creation_date.as_deref().and_then(parse_pdf_date)
    }

    /// Parsed modification date.
    pub fn modified(&self) -> Option<DateTime<Utc>> {
        self.mod_date.as_deref().and_then(parse_pdf_date)
    }
}

/// Counts describing a structured document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructureStats {
    /// Number of pages
    pub pages: u32,
    /// Heading blocks across all pages
    pub headings: usize,
    /// Paragraph blocks across all pages
    pub paragraphs: usize,
    /// Images across all pages
    pub images: usize,
    /// Links across all pages
    pub links: usize,
    /// Section nodes in the forest
    pub sections: usize,
    /// Blocks attached to some section
    pub placed_blocks: usize,
    /// Images attached to some section
    pub placed_images: usize,
    /// Links attached to some section
    pub placed_links: usize,
}

impl StructureStats {
    /// Items that exist on pages but were claimed by no section.
    pub fn unplaced(&self) -> usize {
        (self.headings + self.paragraphs + self.images + self.links)
            .saturating_sub(self.placed_blocks + self.placed_images + self.placed_links)
    }
}

/// Parse a PDF date string (`D:YYYYMMDDHHmmSS...`).
///
/// Missing trailing components default to the start of their range; the
/// timezone suffix is ignored.
pub fn parse_pdf_date(s: &str) -> Option<DateTime<Utc>> {
    let s = s.strip_prefix("D:").unwrap_or(s);

    // At minimum we need YYYY
    if s.len() < 4 {
        return None;
    }

    let year: i32 = s.get(0..4)?.parse().ok()?;
    let month: u32 = s.get(4..6).and_then(|m| m.parse().ok()).unwrap_or(1);
    let day: u32 = s.get(6..8).and_then(|d| d.parse().ok()).unwrap_or(1);
    let hour: u32 = s.get(8..10).and_then(|h| h.parse().ok()).unwrap_or(0);
    let minute: u32 = s.get(10..12).and_then(|m| m.parse().ok()).unwrap_or(0);
    let second: u32 = s.get(12..14).and_then(|s| s.parse().ok()).unwrap_or(0);

    chrono::NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|date| date.and_hms_opt(hour, minute, second))
        .map(|dt| DateTime::from_naive_utc_and_offset(dt, Utc))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn test_metadata_keys() {
        let meta = Metadata {
            creation_date: Some("D:20240115103045".to_string()),
            pages: 3,
            ..Default::default()
        };
        let json = serde_json::to_value(&meta).unwrap();
        for key in [
            "title",
            "authors",
            "creator",
            "producer",
            "creationDate",
            "modDate",
            "pages",
            "toc",
        ] {
            assert!(json.get(key).is_some(), "missing key {}", key);
        }
        assert_eq!(json["pages"], 3);
    }

    #[test]
    fn test_metadata_from_raw() {
        let raw = RawMetadata {
            title: Some("  ".to_string()),
            author: Some("A. Author;B. Author".to_string()),
            producer: Some("TeX".to_string()),
            ..Default::default()
        };
        let meta = Metadata::from_raw(raw, vec![TocEntry::new(1, "Intro", 1)], 4);
        assert_eq!(meta.title.as_deref(), Some("  "));
        assert_eq!(meta.authors.len(), 2);
        assert_eq!(meta.producer.as_deref(), Some("TeX"));
        assert_eq!(meta.pages, 4);
        assert_eq!(meta.toc.len(), 1);

        let untitled = RawMetadata {
            title: Some(String::new()),
            ..Default::default()
        };
        assert_eq!(Metadata::from_raw(untitled, Vec::new(), 1).title, None);
    }

    #[test]
    fn test_parse_pdf_date() {
        let date = parse_pdf_date("D:20240115103045+09'00'").unwrap();
        assert_eq!(date.year(), 2024);
        assert_eq!(date.month(), 1);
        assert_eq!(date.day(), 15);
        assert_eq!(date.hour(), 10);
    }

    #[test]
    fn test_parse_pdf_date_minimal() {
        let date = parse_pdf_date("D:2024").unwrap();
        assert_eq!(date.year(), 2024);
        assert_eq!(date.month(), 1);
        assert_eq!(date.day(), 1);
        assert!(parse_pdf_date("D:20").is_none());
        assert!(parse_pdf_date("yesterday").is_none());
    }

    #[test]
    fn test_stats_counts_unplaced() {
        let mut page = Page::new(1, 612.0, 792.0);
        page.blocks.push(OutputBlock::paragraph("orphan", None));
        let doc = StructuredDocument {
            meta: Metadata::default(),
            pages: vec![page],
            sections: Vec::new(),
        };
        let stats = doc.stats();
        assert_eq!(stats.paragraphs, 1);
        assert_eq!(stats.sections, 0);
        assert_eq!(stats.unplaced(), 1);
    }
}
