//! Raw extractor output: positioned text runs, images and links per page.

use serde::{Deserialize, Serialize};

/// A bounding box `[x0, y0, x1, y1]` in page points.
pub type Bbox = [f32; 4];

/// A styled run of text as delivered by the extractor.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Span {
    /// The text content
    #[serde(default)]
    pub text: String,

    /// Font size in points (absent for unsized runs)
    #[serde(default)]
    pub size: Option<f64>,

    /// Font name (e.g., "Helvetica-Bold")
    #[serde(default)]
    pub font: Option<String>,

    /// Style flags as reported by the extractor
    #[serde(default)]
    pub flags: Option<u32>,

    /// Span bounding box
    #[serde(default)]
    pub bbox: Option<Bbox>,
}

impl Span {
    /// Create a sized span with no font information.
    pub fn new(text: impl Into<String>, size: f64) -> Self {
        Self {
            text: text.into(),
            size: Some(size),
            ..Default::default()
        }
    }

    /// Set the font name.
    pub fn with_font(mut self, font: impl Into<String>) -> Self {
        self.font = Some(font.into());
        self
    }

    /// Set the bounding box.
    pub fn with_bbox(mut self, bbox: Bbox) -> Self {
        self.bbox = Some(bbox);
        self
    }

    /// Font size usable for statistics. Zero and missing sizes are skipped.
    pub fn usable_size(&self) -> Option<f64> {
        self.size.filter(|s| s.is_finite() && *s != 0.0)
    }
}

/// A text block: joined text plus its constituent spans.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TextBlock {
    /// Joined block text (may contain newlines)
    #[serde(default)]
    pub text: String,

    /// Block bounding box
    #[serde(default)]
    pub bbox: Option<Bbox>,

    /// Spans in extractor order
    #[serde(default)]
    pub spans: Vec<Span>,
}

impl TextBlock {
    /// Create a text block from spans, joining their text with newlines.
    pub fn from_spans(spans: Vec<Span>) -> Self {
        let text = spans
            .iter()
            .map(|s| s.text.as_str())
            .collect::<Vec<_>>()
            .join("\n");
        Self {
            text,
            bbox: None,
            spans,
        }
    }

    /// Set the bounding box.
    pub fn with_bbox(mut self, bbox: Bbox) -> Self {
        self.bbox = Some(bbox);
        self
    }

    /// Sizes of all sized spans in this block.
    pub fn span_sizes(&self) -> impl Iterator<Item = f64> + '_ {
        self.spans.iter().filter_map(Span::usable_size)
    }

    /// Largest span size, if any span is sized.
    pub fn max_size(&self) -> Option<f64> {
        self.span_sizes().fold(None, |acc, s| match acc {
            Some(m) if m >= s => Some(m),
            _ => Some(s),
        })
    }
}

/// A block as delivered by the extractor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum RawBlock {
    /// A block of text runs
    Text(TextBlock),

    /// An image placement inside the text flow
    Image {
        /// Image bounding box
        #[serde(default)]
        bbox: Option<Bbox>,
    },
}

impl RawBlock {
    /// Borrow the text block, if this is one.
    pub fn as_text(&self) -> Option<&TextBlock> {
        match self {
            RawBlock::Text(t) => Some(t),
            RawBlock::Image { .. } => None,
        }
    }
}

/// An embedded image on a page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImageItem {
    /// Stable identifier, if the extractor assigned one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Object number inside the source document
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub xref: Option<u32>,

    /// Placement on the page
    #[serde(default)]
    pub bbox: Option<Bbox>,

    /// Path of the saved image file, if the extractor wrote one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,

    /// Alternative text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alt: Option<String>,
}

/// A hyperlink rectangle on a page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LinkItem {
    /// Clickable area
    #[serde(default)]
    pub bbox: Option<Bbox>,

    /// External URI
    #[serde(default)]
    pub uri: Option<String>,

    /// Internal target page (1-indexed)
    #[serde(default)]
    pub target_page: Option<u32>,

    /// Anchor text
    #[serde(default)]
    pub text: Option<String>,
}

impl LinkItem {
    /// Create a link to an external URI.
    pub fn uri(uri: impl Into<String>) -> Self {
        Self {
            uri: Some(uri.into()),
            ..Default::default()
        }
    }

    /// Create an intra-document link.
    pub fn to_page(page: u32) -> Self {
        Self {
            target_page: Some(page),
            ..Default::default()
        }
    }
}

/// A single extracted page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawPage {
    /// Page number (1-indexed)
    pub number: u32,

    /// Page width in points
    #[serde(default)]
    pub width: f32,

    /// Page height in points
    #[serde(default)]
    pub height: f32,

    /// Blocks in extractor delivery order
    #[serde(default)]
    pub raw_blocks: Vec<RawBlock>,

    /// Embedded images
    #[serde(default)]
    pub images: Vec<ImageItem>,

    /// Link rectangles
    #[serde(default)]
    pub links: Vec<LinkItem>,
}

impl RawPage {
    /// Create an empty page with the given dimensions.
    pub fn new(number: u32, width: f32, height: f32) -> Self {
        Self {
            number,
            width,
            height,
            raw_blocks: Vec::new(),
            images: Vec::new(),
            links: Vec::new(),
        }
    }

    /// Create an empty US Letter page.
    pub fn letter(number: u32) -> Self {
        Self::new(number, 612.0, 792.0)
    }

    /// Append a text block.
    pub fn add_text(&mut self, block: TextBlock) {
        self.raw_blocks.push(RawBlock::Text(block));
    }

    /// Iterate over the text blocks of the page.
    pub fn text_blocks(&self) -> impl Iterator<Item = &TextBlock> {
        self.raw_blocks.iter().filter_map(RawBlock::as_text)
    }

    /// Whether any text block carries non-whitespace text.
    pub fn has_meaningful_text(&self) -> bool {
        self.text_blocks().any(|b| !b.text.trim().is_empty())
    }
}

/// An entry of the document's authoritative outline.
///
/// Extractors report entries without a destination as page -1 and may leave
/// fields null; such levels and pages read as 1 and a null title as empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TocEntry {
    /// Nesting level (1 = top level)
    #[serde(default = "one", deserialize_with = "deserialize_position")]
    pub level: u32,

    /// Entry title
    #[serde(default, deserialize_with = "deserialize_title")]
    pub title: String,

    /// Target page (1-indexed)
    #[serde(default = "one", deserialize_with = "deserialize_position")]
    pub page: u32,
}

fn one() -> u32 {
    1
}

/// Read a 1-based level or page; null, zero, negative and non-numeric values become 1.
fn deserialize_position<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde_json::Value;

    let value = Value::deserialize(deserializer)?;
    let number = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    Ok(match number {
        Some(n) if n.is_finite() && n >= 1.0 => n.min(f64::from(u32::MAX)) as u32,
        _ => 1,
    })
}

fn deserialize_title<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

impl TocEntry {
    /// Create a new outline entry.
    pub fn new(level: u32, title: impl Into<String>, page: u32) -> Self {
        Self {
            level,
            title: title.into(),
            page,
        }
    }
}

/// Document information as reported by the extractor.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawMetadata {
    /// Document title
    #[serde(default)]
    pub title: Option<String>,

    /// Author string, `;`-separated when several
    #[serde(default)]
    pub author: Option<String>,

    /// Creator application
    #[serde(default)]
    pub creator: Option<String>,

    /// PDF producer
    #[serde(default)]
    pub producer: Option<String>,

    /// Creation date as stored in the document
    #[serde(default)]
    pub creation_date: Option<String>,

    /// Modification date as stored in the document
    #[serde(default)]
    pub mod_date: Option<String>,
}

impl RawMetadata {
    /// Split the author string on `;`, dropping empty entries.
    pub fn authors(&self) -> Vec<String> {
        self.author
            .as_deref()
            .unwrap_or_default()
            .split(';')
            .map(str::trim)
            .filter(|a| !a.is_empty())
            .map(str::to_string)
            .collect()
    }
}

/// A complete raw extraction: metadata, outline and pages.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawDocument {
    /// Document information
    #[serde(default)]
    pub metadata: RawMetadata,

    /// Authoritative outline, empty when the document has none
    #[serde(default)]
    pub toc: Vec<TocEntry>,

    /// Extracted pages
    #[serde(default)]
    pub pages: Vec<RawPage>,
}
