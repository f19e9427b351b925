//! Page-level output types.

use super::{Bbox, ImageItem, LinkItem};
use serde::{Deserialize, Serialize};

/// A single normalized page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page {
    /// Page number (1-indexed)
    pub number: u32,

    /// Page width in points (1 point = 1/72 inch)
    pub width: f32,

    /// Page height in points
    pub height: f32,

    /// Classified content blocks, in extractor order
    pub blocks: Vec<OutputBlock>,

    /// Embedded images, passed through unchanged
    pub images: Vec<ImageItem>,

    /// Link rectangles, passed through unchanged
    pub links: Vec<LinkItem>,
}

impl Page {
    /// Create a new page with the given dimensions.
    pub fn new(number: u32, width: f32, height: f32) -> Self {
        Self {
            number,
            width,
            height,
            blocks: Vec::new(),
            images: Vec::new(),
            links: Vec::new(),
        }
    }

    /// Iterate over heading blocks with their levels.
    pub fn headings(&self) -> impl Iterator<Item = (u8, &str)> {
        self.blocks.iter().filter_map(|b| match b {
            OutputBlock::Heading { level, text, .. } => Some((*level, text.as_str())),
            OutputBlock::Paragraph { .. } => None,
        })
    }

    /// Get plain text content of the page.
    pub fn plain_text(&self) -> String {
        self.blocks
            .iter()
            .map(OutputBlock::text)
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    /// Check if the page has no content blocks.
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}

/// A classified text block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum OutputBlock {
    /// A heading (levels 1-3)
    Heading {
        /// Heading level, 1 being the most prominent
        level: u8,
        /// Whitespace-collapsed text
        text: String,
        /// Source block bounding box
        bbox: Option<Bbox>,
    },

    /// A regular paragraph
    Paragraph {
        /// Whitespace-collapsed text
        text: String,
        /// Source block bounding box
        bbox: Option<Bbox>,
    },
}

impl OutputBlock {
    /// Create a heading block.
    pub fn heading(level: u8, text: impl Into<String>, bbox: Option<Bbox>) -> Self {
        OutputBlock::Heading {
            level,
            text: text.into(),
            bbox,
        }
    }

    /// Create a paragraph block.
    pub fn paragraph(text: impl Into<String>, bbox: Option<Bbox>) -> Self {
        OutputBlock::Paragraph {
            text: text.into(),
            bbox,
        }
    }

    /// Block text.
    pub fn text(&self) -> &str {
        match self {
            OutputBlock::Heading { text, .. } | OutputBlock::Paragraph { text, .. } => text,
        }
    }

    /// Heading level, or `None` for paragraphs.
    pub fn level(&self) -> Option<u8> {
        match self {
            OutputBlock::Heading { level, .. } => Some(*level),
            OutputBlock::Paragraph { .. } => None,
        }
    }

    /// Check if this block is a heading.
    pub fn is_heading(&self) -> bool {
        matches!(self, OutputBlock::Heading { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_serialization_shape() {
        let heading = OutputBlock::heading(2, "Methods", Some([0.0, 0.0, 1.0, 1.0]));
        let json = serde_json::to_value(&heading).unwrap();
        assert_eq!(json["type"], "heading");
        assert_eq!(json["level"], 2);
        assert_eq!(json["text"], "Methods");

        let para = OutputBlock::paragraph("Body", None);
        let json = serde_json::to_value(&para).unwrap();
        assert_eq!(json["type"], "paragraph");
        assert!(json.get("level").is_none());
        assert!(json["bbox"].is_null());
    }

    #[test]
    fn test_page_headings() {
        let mut page = Page::new(1, 612.0, 792.0);
        assert!(page.is_empty());
        page.blocks.push(OutputBlock::heading(1, "Intro", None));
        page.blocks.push(OutputBlock::paragraph("Text", None));

        let headings: Vec<_> = page.headings().collect();
        assert_eq!(headings, vec![(1, "Intro")]);
        assert_eq!(page.plain_text(), "Intro\n\nText");
    }
}
