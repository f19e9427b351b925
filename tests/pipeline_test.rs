//! Integration tests for the extraction, OCR and refinement pipeline.

use std::io::Write;

use pdfstruct::refine::refine_or_keep;
use pdfstruct::render::{to_json, to_outline};
use pdfstruct::{
    parse_bytes, parse_file, ContentExtractor, Error, JsonExtractor, JsonFormat, OcrEngine, OcrMode,
    PageSelection, ParseOptions, RawDocument, RawMetadata, RawPage, Refiner, Result, Span,
    StructuredDocument, Structurer, TextBlock, TocEntry,
};

/// Builds a small document: a title page, a chapter heading on page 2 and an
/// image-only page 3.
fn sample_document() -> RawDocument {
    let mut title_page = RawPage::letter(1);
    title_page.add_text(
        TextBlock::from_spans(vec![Span::new("Structured Things", 24.0)])
            .with_bbox([72.0, 72.0, 500.0, 100.0]),
    );
    title_page.add_text(
        TextBlock::from_spans(vec![Span::new("Grace Hopper and Alan Kay", 11.0)])
            .with_bbox([72.0, 110.0, 500.0, 125.0]),
    );
    for i in 0..3 {
        title_page.add_text(TextBlock::from_spans(vec![Span::new(format!("Abstract {}", i), 10.0)]));
    }

    let mut chapter = RawPage::letter(2);
    chapter.add_text(TextBlock::from_spans(vec![Span::new("Chapter One", 18.0)]));
    for i in 0..4 {
        chapter.add_text(TextBlock::from_spans(vec![Span::new(format!("Body {}", i), 10.0)]));
    }

    let scanned = RawPage::letter(3);

    RawDocument {
        metadata: RawMetadata {
            creation_date: Some("D:20240315120000Z".into()),
            ..Default::default()
        },
        toc: Vec::new(),
        pages: vec![title_page, chapter, scanned],
    }
}

fn write_dump(doc: &RawDocument) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(serde_json::to_string(doc).unwrap().as_bytes())
        .unwrap();
    file
}

struct StubOcr;

impl OcrEngine for StubOcr {
    fn recognize(&self, page: &RawPage, dpi: u32) -> Result<String> {
        Ok(format!("scanned page {} at {} dpi", page.number, dpi))
    }
}

struct BrokenOcr;

impl OcrEngine for BrokenOcr {
    fn recognize(&self, _page: &RawPage, _dpi: u32) -> Result<String> {
        Err(Error::Ocr("engine crashed".into()))
    }
}

struct OfflineRefiner;

impl Refiner for OfflineRefiner {
    fn name(&self) -> &str {
        "offline"
    }

    fn refine(&self, _doc: &StructuredDocument) -> Result<StructuredDocument> {
        Err(Error::Refine("connection refused".into()))
    }
}

struct GarbageRefiner;

impl Refiner for GarbageRefiner {
    fn name(&self) -> &str {
        "garbage"
    }

    fn refine(&self, _doc: &StructuredDocument) -> Result<StructuredDocument> {
        pdfstruct::refine::parse_refined_response("```json\n{\"not\": \"a document\"}\n```")
    }
}

/// Extractor whose outline cannot be read.
struct NoOutline(JsonExtractor);

impl ContentExtractor for NoOutline {
    fn page_count(&self) -> u32 {
        self.0.page_count()
    }

    fn extract_page(&self, index: u32) -> Result<RawPage> {
        self.0.extract_page(index)
    }

    fn metadata(&self) -> Result<RawMetadata> {
        self.0.metadata()
    }

    fn outline(&self) -> Result<Vec<TocEntry>> {
        Err(Error::Extract("corrupt outline".into()))
    }
}

#[test]
fn test_parse_file_end_to_end() {
    let file = write_dump(&sample_document());
    let doc = parse_file(file.path()).unwrap();

    assert_eq!(doc.meta.pages, 3);
    assert_eq!(doc.meta.title.as_deref(), Some("Structured Things"));
    assert_eq!(doc.meta.authors, vec!["Grace Hopper", "Alan Kay"]);
    assert!(doc.meta.created().is_some());

    let titles: Vec<&str> = doc.sections.iter().map(|s| s.title.as_str()).collect();
    assert_eq!(titles, vec!["Structured Things", "Chapter One"]);
    assert_eq!(doc.sections[1].page_end, Some(3));
}

#[test]
fn test_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = parse_file(dir.path().join("missing.json")).unwrap_err();
    assert!(matches!(err, Error::Io(_)));
}

#[test]
fn test_page_selection_and_limit() {
    let extractor = JsonExtractor::from_document(sample_document());
    let doc = Structurer::new()
        .with_pages(PageSelection::parse("2-3"))
        .with_max_pages(1)
        .structure(&extractor)
        .unwrap();

    assert_eq!(doc.meta.pages, 1);
    assert_eq!(doc.pages[0].number, 2);
    assert_eq!(doc.meta.title.as_deref(), Some("Chapter One"));
}

#[test]
fn test_out_of_bounds_selection_falls_back_to_all_pages() {
    let extractor = JsonExtractor::from_document(sample_document());
    let doc = Structurer::new()
        .with_pages(PageSelection::parse("40-50, nonsense"))
        .structure(&extractor)
        .unwrap();
    assert_eq!(doc.meta.pages, 3);
}

#[test]
fn test_ocr_if_needed_only_touches_empty_pages() {
    let extractor = JsonExtractor::from_document(sample_document());
    let doc = Structurer::new()
        .with_ocr(StubOcr, OcrMode::IfNeeded)
        .with_ocr_dpi(200)
        .structure(&extractor)
        .unwrap();

    let scanned = doc.get_page(3).unwrap();
    assert_eq!(scanned.blocks.len(), 1);
    assert_eq!(scanned.blocks[0].text(), "scanned page 3 at 200 dpi");
    assert_eq!(doc.get_page(2).unwrap().blocks.len(), 5);

    // recognized text is placed like any other paragraph
    let chapter = &doc.sections[1];
    assert!(chapter.blocks.iter().any(|b| b.page == 3));
}

#[test]
fn test_ocr_failure_leaves_pages_unchanged() {
    let extractor = JsonExtractor::from_document(sample_document());
    let with_failure = Structurer::new()
        .with_ocr(BrokenOcr, OcrMode::Always)
        .structure(&extractor)
        .unwrap();
    let without = Structurer::new().structure(&extractor).unwrap();
    assert_eq!(with_failure, without);
}

#[test]
fn test_refinement_failure_is_byte_identical() {
    let extractor = JsonExtractor::from_document(sample_document());
    let plain = Structurer::new().structure(&extractor).unwrap();
    let expected = to_json(&plain, JsonFormat::Compact).unwrap();

    for refined in [
        Structurer::new()
            .with_refiner(OfflineRefiner)
            .structure(&extractor)
            .unwrap(),
        Structurer::new()
            .with_refiner(GarbageRefiner)
            .structure(&extractor)
            .unwrap(),
        refine_or_keep(plain.clone(), &OfflineRefiner),
    ] {
        assert_eq!(to_json(&refined, JsonFormat::Compact).unwrap(), expected);
    }
}

#[test]
fn test_unreadable_outline_falls_back_to_headings() {
    let mut raw = sample_document();
    raw.toc = vec![TocEntry::new(1, "Ignored", 1)];
    let extractor = NoOutline(JsonExtractor::from_document(raw));

    let doc = Structurer::new().structure(&extractor).unwrap();
    assert!(doc.meta.toc.is_empty());
    assert_eq!(doc.sections.len(), 2);
}

#[test]
fn test_outline_entries_without_destination_are_kept() {
    let dump = r#"{
        "toc": [
            {"level": 1, "title": "Cover", "page": -1},
            {"level": null, "title": "Methods", "page": 2},
            {"level": 2, "title": null, "page": null}
        ],
        "pages": [
            {"number": 1, "width": 612, "height": 792, "raw_blocks": [
                {"type": "text", "text": "Front matter", "spans": [{"text": "Front matter", "size": 10}]}
            ]},
            {"number": 2, "width": 612, "height": 792, "raw_blocks": [
                {"type": "text", "text": "Method body", "spans": [{"text": "Method body", "size": 10}]}
            ]}
        ]
    }"#;

    let doc = parse_bytes(dump.as_bytes()).unwrap();
    assert_eq!(
        doc.meta.toc,
        vec![
            TocEntry::new(1, "Cover", 1),
            TocEntry::new(1, "Methods", 2),
            TocEntry::new(2, "", 1),
        ]
    );
    assert_eq!(doc.sections.len(), 2);
    assert_eq!(doc.sections[0].title, "Cover");
    assert_eq!(doc.sections[0].page_start, 1);
    assert_eq!(doc.sections[1].title, "Methods");
    assert_eq!(doc.sections[1].children.len(), 1);
}

#[test]
fn test_outline_render() {
    let mut raw = sample_document();
    raw.toc = vec![
        TocEntry::new(1, "Front", 1),
        TocEntry::new(1, "Body", 2),
        TocEntry::new(2, "Scans", 3),
    ];
    let doc = Structurer::new()
        .structure(&JsonExtractor::from_document(raw))
        .unwrap();
    assert_eq!(
        to_outline(&doc.sections),
        "- Front (pp. 1-1)\n- Body (pp. 2-3)\n  - Scans (pp. 3-3)\n"
    );
}

#[test]
fn test_lenient_options_round_trip_through_builder() {
    let options = ParseOptions::new().lenient().sequential();
    let extractor = JsonExtractor::from_document(sample_document());
    let doc = Structurer::new()
        .with_options(options)
        .structure(&extractor)
        .unwrap();
    assert_eq!(doc.page_count(), 3);
}
