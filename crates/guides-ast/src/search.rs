//! Tree searches over node sequences.

use crate::AstNode;

/// Collect every node whose string field `key` equals `value`.
///
/// Traversal is depth-first pre-order through `children`, so results come back
/// in document order. A matching node's own children are searched as well.
#[must_use]
pub fn find_all<'a>(nodes: &'a [AstNode], key: &str, value: &str) -> Vec<&'a AstNode> {
    fn search<'a>(node: &'a AstNode, key: &str, value: &str, results: &mut Vec<&'a AstNode>) {
        if node.field(key) == Some(value) {
            results.push(node);
        }
        for child in &node.children {
            search(child, key, value, results);
        }
    }

    let mut results = Vec::new();
    for node in nodes {
        search(node, key, value, &mut results);
    }
    results
}

/// Concatenate the text of every node with a `value`, in document order.
///
/// Used to turn title node sequences (headings, page titles) into plain strings.
#[must_use]
pub fn plaintext(nodes: &[AstNode]) -> String {
    fn collect(node: &AstNode, out: &mut String) {
        if let Some(value) = &node.value {
            out.push_str(value);
        }
        for child in &node.children {
            collect(child, out);
        }
    }

    let mut out = String::new();
    for node in nodes {
        collect(node, &mut out);
    }
    out
}
