//! Page selection (e.g. `"1-5,8,10-12"`).

use std::ops::RangeInclusive;

/// Which pages to process (1-indexed).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum PageSelection {
    /// Process all pages
    #[default]
    All,
    /// Process pages falling in any of these inclusive ranges
    Ranges(Vec<RangeInclusive<u32>>),
}

impl PageSelection {
    /// Select a single inclusive range.
    pub fn range(start: u32, end: u32) -> Self {
        PageSelection::Ranges(vec![start..=end])
    }

    /// Select individual pages.
    pub fn pages(pages: &[u32]) -> Self {
        PageSelection::Ranges(pages.iter().map(|&p| p..=p).collect())
    }

    /// Check if a page number should be included.
    pub fn includes(&self, page: u32) -> bool {
        match self {
            PageSelection::All => true,
            PageSelection::Ranges(ranges) => ranges.iter().any(|r| r.contains(&page)),
        }
    }

    /// Parse a page selection string (e.g., `"1-10"`, `"1,3,5,7-10"`).
    ///
    /// Parsing is lenient: malformed parts are skipped with a warning and
    /// never fail the whole selection. An empty string or `"all"` selects
    /// every page.
    pub fn parse(s: &str) -> Self {
        let s = s.trim();
        if s.is_empty() || s.eq_ignore_ascii_case("all") {
            return PageSelection::All;
        }

        let mut ranges = Vec::new();
        for part in s.split(',').map(str::trim).filter(|p| !p.is_empty()) {
            let parsed = match part.split_once('-') {
                Some((start, end)) => start
                    .trim()
                    .parse::<u32>()
                    .ok()
                    .zip(end.trim().parse::<u32>().ok())
                    .map(|(start, end)| start..=end),
                None => part.parse::<u32>().ok().map(|p| p..=p),
            };
            match parsed {
                Some(range) => ranges.push(range),
                None => log::warn!("Ignoring malformed page range part {:?}", part),
            }
        }
        PageSelection::Ranges(ranges)
    }

    /// Resolve to sorted, deduplicated page numbers within `1..=page_count`.
    ///
    /// Out-of-bounds pages are dropped. When nothing remains, every page is
    /// selected. `max_pages` truncates the final list.
    pub fn resolve(&self, page_count: u32, max_pages: Option<usize>) -> Vec<u32> {
        let mut pages: Vec<u32> = (1..=page_count).filter(|&p| self.includes(p)).collect();
        if pages.is_empty() {
            pages = (1..=page_count).collect();
        }
        if let Some(max) = max_pages {
            pages.truncate(max);
        }
        pages
    }
}
