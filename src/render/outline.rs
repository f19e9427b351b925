//! Indented text outline of a section forest.

use crate::model::{walk_sections, SectionNode};

/// Format one outline line for `node` at `depth`.
pub fn outline_line(node: &SectionNode, depth: usize) -> String {
    let end = node.page_end.unwrap_or(node.page_start);
    format!(
        "{}- {} (pp. {}-{})",
        "  ".repeat(depth),
        node.title,
        node.page_start,
        end
    )
}

/// Render `sections` as one line per node, children indented by two spaces.
pub fn to_outline(sections: &[SectionNode]) -> String {
    let mut out = String::new();
    walk_sections(sections, &mut |node, depth| {
        out.push_str(&outline_line(node, depth));
        out.push('\n');
    });
    out
}
