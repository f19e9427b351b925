//! Attach page content to the deepest enclosing section.

use crate::model::{ImageItem, LinkItem, OutputBlock, Page, SectionBlock, SectionNode};

/// Counts of what a placement pass attached and dropped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlacementReport {
    /// Items attached to some section
    pub placed: usize,
    /// Items no section claimed
    pub dropped: usize,
}

impl PlacementReport {
    fn record(&mut self, placed: bool) {
        if placed {
            self.placed += 1;
        } else {
            self.dropped += 1;
        }
    }
}

/// Find the placement target for `page` as a path of child indices.
///
/// Siblings are scanned last-declared first. The first sibling whose span
/// contains the page claims it; the search then continues among that
/// sibling's children only, and stops at the deepest claimant. Earlier
/// siblings are never consulted once a later one matches, even when their
/// spans overlap.
pub fn locate(sections: &[SectionNode], page: u32) -> Option<Vec<usize>> {
    let mut path = Vec::new();
    let mut candidates = sections;
    while let Some(idx) = candidates.iter().rposition(|node| node.contains(page)) {
        path.push(idx);
        candidates = candidates[idx].children.as_slice();
    }
    if path.is_empty() {
        None
    } else {
        Some(path)
    }
}

fn node_at_mut<'a>(sections: &'a mut [SectionNode], path: &[usize]) -> Option<&'a mut SectionNode> {
    let (first, rest) = path.split_first()?;
    let mut node = sections.get_mut(*first)?;
    for &idx in rest {
        node = node.children.get_mut(idx)?;
    }
    Some(node)
}

fn target<'a>(sections: &'a mut [SectionNode], page: u32) -> Option<&'a mut SectionNode> {
    let path = locate(sections, page)?;
    node_at_mut(sections, &path)
}

/// Place every block, image and link of every page, in that order.
///
/// Unclaimed items are dropped from the tree; they stay visible in the
/// per-page output.
pub fn place_content(sections: &mut [SectionNode], pages: &[Page]) -> PlacementReport {
    let mut report = PlacementReport::default();
    if sections.is_empty() {
        report.dropped = pages
            .iter()
            .map(|p| p.blocks.len() + p.images.len() + p.links.len())
            .sum();
        return report;
    }

    for page in pages {
        for block in &page.blocks {
            let placed = place_block(sections, page.number, block.clone());
            report.record(placed);
        }
        for image in &page.images {
            let placed = place_image(sections, page.number, image.clone());
            report.record(placed);
        }
        for link in &page.links {
            let placed = place_link(sections, page.number, link.clone());
            report.record(placed);
        }
    }
    report
}

/// Attach a block found on `page`. Returns whether a section claimed it.
pub fn place_block(sections: &mut [SectionNode], page: u32, block: OutputBlock) -> bool {
    match target(sections, page) {
        Some(node) => {
            node.blocks.push(SectionBlock { page, block });
            true
        }
        None => false,
    }
}

/// Attach an image found on `page`. Returns whether a section claimed it.
pub fn place_image(sections: &mut [SectionNode], page: u32, image: ImageItem) -> bool {
    match target(sections, page) {
        Some(node) => {
            node.images.push(image);
            true
        }
        None => false,
    }
}

/// Attach a link found on `page`. Returns whether a section claimed it.
pub fn place_link(sections: &mut [SectionNode], page: u32, link: LinkItem) -> bool {
    match target(sections, page) {
        Some(node) => {
            node.links.push(link);
            true
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(title: &str, level: u32, start: u32, end: u32) -> SectionNode {
        let mut n = SectionNode::new(title, level, start);
        n.page_end = Some(end);
        n
    }

    #[test]
    fn test_deepest_section_wins() {
        let mut methods = node("Methods", 1, 3, 6);
        methods.children.push(node("Data", 2, 4, 6));
        let mut forest = vec![node("Intro", 1, 1, 2), methods];

        assert_eq!(locate(&forest, 1), Some(vec![0]));
        assert_eq!(locate(&forest, 3), Some(vec![1]));
        assert_eq!(locate(&forest, 5), Some(vec![1, 0]));
        assert_eq!(locate(&forest, 7), None);

        assert!(place_block(&mut forest, 5, OutputBlock::paragraph("x", None)));
        assert_eq!(forest[1].children[0].blocks.len(), 1);
        assert_eq!(forest[1].children[0].blocks[0].page, 5);
    }

    #[test]
    fn test_later_sibling_wins_on_overlap() {
        let forest = vec![node("First", 1, 1, 4), node("Second", 1, 2, 3)];
        assert_eq!(locate(&forest, 2), Some(vec![1]));
        assert_eq!(locate(&forest, 4), Some(vec![0]));
    }

    #[test]
    fn test_no_descent_into_earlier_sibling() {
        let mut first = node("First", 1, 1, 4);
        first.children.push(node("Child", 2, 2, 2));
        let forest = vec![first, node("Second", 1, 2, 3)];
        // "Second" claims page 2 before "First"'s child is considered.
        assert_eq!(locate(&forest, 2), Some(vec![1]));
    }

    #[test]
    fn test_parent_keeps_item_when_no_child_matches() {
        let mut parent = node("Parent", 1, 1, 5);
        parent.children.push(node("Child", 2, 3, 5));
        let mut forest = vec![parent];

        assert!(place_image(&mut forest, 1, ImageItem::default()));
        assert!(place_link(&mut forest, 4, LinkItem::to_page(1)));
        assert_eq!(forest[0].images.len(), 1);
        assert_eq!(forest[0].children[0].links.len(), 1);
    }

    #[test]
    fn test_place_content_order_and_drop() {
        let mut page1 = Page::new(1, 612.0, 792.0);
        page1.blocks.push(OutputBlock::paragraph("before", None));
        let mut page2 = Page::new(2, 612.0, 792.0);
        page2.blocks.push(OutputBlock::heading(1, "H", None));
        page2.blocks.push(OutputBlock::paragraph("after", None));
        page2.images.push(ImageItem::default());

        let mut forest = vec![node("H", 1, 2, 2)];
        let report = place_content(&mut forest, &[page1, page2]);

        assert_eq!(report, PlacementReport { placed: 3, dropped: 1 });
        let texts: Vec<_> = forest[0].blocks.iter().map(|b| b.block.text()).collect();
        assert_eq!(texts, vec!["H", "after"]);
    }

    #[test]
    fn test_empty_forest_drops_everything() {
        let mut page = Page::new(1, 612.0, 792.0);
        page.blocks.push(OutputBlock::paragraph("a", None));
        page.links.push(LinkItem::uri("x"));
        let report = place_content(&mut [], &[page]);
        assert_eq!(report, PlacementReport { placed: 0, dropped: 2 });
    }
}
