//! Best-effort title and author detection from the first page.
//!
//! This is a heuristic enrichment of document metadata, used only when the
//! extractor reports no title or authors. It picks the block set in the
//! largest type as the title and splits the first short block just below it
//! into author names.

use std::sync::OnceLock;

use regex::Regex;

use crate::model::{Metadata, RawPage, TextBlock};
use crate::structure::collapse_whitespace;

/// Vertical window below the title searched for an author line, in points.
const AUTHOR_WINDOW: f32 = 120.0;

/// Title and authors guessed from page layout.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DetectedTitle {
    /// Guessed title
    pub title: Option<String>,
    /// Guessed author names
    pub authors: Vec<String>,
}

fn author_separator() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\s*(?:,| and )\s*").unwrap())
}

fn char_len(s: &str) -> usize {
    s.chars().count()
}

/// Detect a title and author line on `page`.
pub fn detect_title(page: &RawPage) -> DetectedTitle {
    let mut best: Option<(f64, &TextBlock, String)> = None;
    for block in page.text_blocks() {
        let Some(size) = block.max_size() else {
            continue;
        };
        let text = collapse_whitespace(&block.text);
        let len = char_len(&text);
        if !(3..=200).contains(&len) {
            continue;
        }
        if best.as_ref().map_or(true, |(max, _, _)| size > *max) {
            best = Some((size, block, text));
        }
    }

    let Some((_, title_block, title)) = best else {
        return DetectedTitle::default();
    };

    let authors = title_block
        .bbox
        .map(|bbox| detect_authors(page, bbox[3]))
        .unwrap_or_default();

    DetectedTitle {
        title: Some(title),
        authors,
    }
}

fn detect_authors(page: &RawPage, title_bottom: f32) -> Vec<String> {
    let candidate = page.text_blocks().find_map(|block| {
        let top = block.bbox?[1];
        if top < title_bottom || top > title_bottom + AUTHOR_WINDOW {
            return None;
        }
        let text = collapse_whitespace(&block.text);
        (2..=200).contains(&char_len(&text)).then_some(text)
    });

    candidate
        .map(|line| {
            author_separator()
                .split(&line)
                .filter(|name| (2..=80).contains(&char_len(name)))
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

/// Fill in a missing title and missing authors from `page`.
pub fn enrich_metadata(meta: &mut Metadata, page: &RawPage) {
    if meta.title.is_some() && !meta.authors.is_empty() {
        return;
    }
    let detected = detect_title(page);
    if meta.title.is_none() {
        meta.title = detected.title;
    }
    if meta.authors.is_empty() {
        meta.authors = detected.authors;
    }
}
