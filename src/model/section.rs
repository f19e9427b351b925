//! Section hierarchy nodes.

use super::{ImageItem, LinkItem, OutputBlock};
use serde::{Deserialize, Serialize};

/// A node of the reconstructed section hierarchy.
///
/// Children are owned exclusively by their parent and always have a strictly
/// greater `level`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionNode {
    /// Section title
    pub title: String,

    /// Nesting level (1 = top level)
    pub level: u32,

    /// First page covered (1-indexed)
    pub page_start: u32,

    /// Last page covered, inclusive; `None` until spans are resolved
    pub page_end: Option<u32>,

    /// Nested sections in document order
    pub children: Vec<SectionNode>,

    /// Blocks placed in this section
    pub blocks: Vec<SectionBlock>,

    /// Images placed in this section
    pub images: Vec<ImageItem>,

    /// Links placed in this section
    pub links: Vec<LinkItem>,
}

impl SectionNode {
    /// Create an empty section starting on `page_start`.
    pub fn new(title: impl Into<String>, level: u32, page_start: u32) -> Self {
        Self {
            title: title.into(),
            level,
            page_start,
            page_end: None,
            children: Vec::new(),
            blocks: Vec::new(),
            images: Vec::new(),
            links: Vec::new(),
        }
    }

    /// Whether `page` falls inside this section's span.
    ///
    /// An unresolved end is treated as covering the page itself.
    pub fn contains(&self, page: u32) -> bool {
        self.page_start <= page && page <= self.page_end.unwrap_or(page)
    }

    /// Total number of nodes in this subtree, including `self`.
    pub fn total_nodes(&self) -> usize {
        1 + self.children.iter().map(SectionNode::total_nodes).sum::<usize>()
    }

    /// Total number of placed items (blocks, images, links) in this subtree.
    pub fn total_items(&self) -> usize {
        self.blocks.len()
            + self.images.len()
            + self.links.len()
            + self
                .children
                .iter()
                .map(SectionNode::total_items)
                .sum::<usize>()
    }
}

/// A block placed in a section, tagged with its page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionBlock {
    /// Page the block came from
    pub page: u32,

    /// The block itself
    pub block: OutputBlock,
}

/// Visit every node in document (pre-)order.
pub fn walk_sections<'a>(sections: &'a [SectionNode], f: &mut impl FnMut(&'a SectionNode, usize)) {
    let mut stack: Vec<(&SectionNode, usize)> = sections.iter().rev().map(|n| (n, 0)).collect();
    while let Some((node, depth)) = stack.pop() {
        f(node, depth);
        stack.extend(node.children.iter().rev().map(|c| (c, depth + 1)));
    }
}
