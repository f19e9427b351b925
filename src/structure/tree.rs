//! Section forest construction from an outline or from detected headings.

use crate::model::{Page, SectionNode, TocEntry};

/// Where a section forest came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionSource {
    /// Built from the document's authoritative outline
    Outline,
    /// Inferred from detected heading blocks
    Headings,
}

struct PendingNode {
    node: SectionNode,
    children: Vec<usize>,
}

/// Builds a section forest from a flat sequence of (title, level, page) entries.
///
/// Nodes are kept in an arena in insertion order, which is also the forest's
/// pre-order. An explicit stack holds the currently open ancestors: a new entry
/// closes every open node whose level is the same or deeper, then becomes a
/// child of whatever remains on top.
#[derive(Default)]
pub struct SectionTreeBuilder {
    nodes: Vec<PendingNode>,
    roots: Vec<usize>,
    stack: Vec<usize>,
}

impl SectionTreeBuilder {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from outline entries in delivered order.
    ///
    /// Levels and pages below 1 are treated as 1.
    pub fn from_toc(toc: &[TocEntry]) -> Self {
        let mut builder = Self::new();
        for entry in toc {
            builder.push(entry.title.clone(), entry.level.max(1), entry.page.max(1));
        }
        builder
    }

    /// Build from heading blocks, in page order then block order.
    pub fn from_headings(pages: &[Page]) -> Self {
        let mut builder = Self::new();
        for page in pages {
            for (level, text) in page.headings() {
                builder.push(text, u32::from(level), page.number);
            }
        }
        builder
    }

    /// Open a new section.
    pub fn push(&mut self, title: impl Into<String>, level: u32, page_start: u32) {
        while let Some(&top) = self.stack.last() {
            if self.nodes[top].node.level >= level {
                self.stack.pop();
            } else {
                break;
            }
        }

        let idx = self.nodes.len();
        self.nodes.push(PendingNode {
            node: SectionNode::new(title, level, page_start),
            children: Vec::new(),
        });

        match self.stack.last() {
            Some(&parent) => {
                debug_assert!(self.nodes[parent].node.level < level);
                self.nodes[parent].children.push(idx);
            }
            None => self.roots.push(idx),
        }
        self.stack.push(idx);
    }

    /// Number of sections pushed so far.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether no section has been pushed.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Resolve page spans and hand out the owned forest.
    ///
    /// `last_page` is the number of the document's last page; sections that are
    /// never closed run until it.
    pub fn build(mut self, last_page: Option<u32>) -> Vec<SectionNode> {
        self.resolve_page_spans(last_page);

        let mut built: Vec<Option<SectionNode>> = Vec::with_capacity(self.nodes.len());
        let mut children_of = Vec::with_capacity(self.nodes.len());
        for pending in self.nodes {
            built.push(Some(pending.node));
            children_of.push(pending.children);
        }

        // Children always come after their parent, so filling back to front
        // finds every child already complete.
        for idx in (0..built.len()).rev() {
            let children: Vec<SectionNode> = children_of[idx]
                .iter()
                .filter_map(|&c| built[c].take())
                .collect();
            if let Some(node) = built[idx].as_mut() {
                node.children = children;
            }
        }

        self.roots
            .iter()
            .filter_map(|&r| built[r].take())
            .collect()
    }

    /// Each section ends one page before the next section, in `(page_start, level)`
    /// order, whose level is the same or shallower.
    fn resolve_page_spans(&mut self, last_page: Option<u32>) {
        let mut order: Vec<usize> = (0..self.nodes.len()).collect();
        order.sort_by_key(|&i| (self.nodes[i].node.page_start, self.nodes[i].node.level));

        for (pos, &i) in order.iter().enumerate() {
            let node = &self.nodes[i].node;
            let closing = order[pos + 1..]
                .iter()
                .map(|&j| &self.nodes[j].node)
                .find(|next| next.level <= node.level);

            let end = match closing {
                Some(next) => next.page_start.saturating_sub(1),
                None => last_page.unwrap_or(node.page_start),
            };
            let end = end.max(node.page_start);
            self.nodes[i].node.page_end = Some(end);
        }
    }
}

/// Build the section forest: outline-driven when `toc` is non-empty,
/// heading-inferred otherwise.
pub fn build_sections(toc: &[TocEntry], pages: &[Page]) -> (Vec<SectionNode>, SectionSource) {
    let (builder, source) = if toc.is_empty() {
        (SectionTreeBuilder::from_headings(pages), SectionSource::Headings)
    } else {
        (SectionTreeBuilder::from_toc(toc), SectionSource::Outline)
    };
    log::debug!("Building {} sections from {:?}", builder.len(), source);

    let last_page = pages.last().map(|p| p.number);
    (builder.build(last_page), source)
}
