//! ERROR / MISSING node inspection.

use tree_sitter::Node;

/// Position of the first syntax error and the total error node count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ErrorSummary {
    /// 1-based line of the first error node.
    pub line: u32,
    /// 1-based column of the first error node.
    pub column: u32,
    pub count: u32,
}

/// Summarize ERROR and MISSING nodes, or `None` for a clean tree.
pub fn summarize_errors(root: Node<'_>) -> Option<ErrorSummary> {
    if !root.has_error() {
        return None;
    }
    let mut count = 0u32;
    let mut first = None;
    collect_errors(root, &mut count, &mut first);
    let (line, column) = first.unwrap_or((1, 1));
    Some(ErrorSummary { line, column, count: count.max(1) })
}

fn collect_errors(node: Node<'_>, count: &mut u32, first: &mut Option<(u32, u32)>) {
    if node.is_error() || node.is_missing() {
        *count += 1;
        if first.is_none() {
            let pos = node.start_position();
            *first = Some((pos.row as u32 + 1, pos.column as u32 + 1));
        }
    }
    if !node.has_error() {
        return;
    }
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        collect_errors(child, count, first);
    }
}
