//! `cssclass` node normalization.
//!
//! The parser emits a `cssclass` directive as an empty marker placed *before*
//! the node it annotates. Normalization moves that following sibling into the
//! marker's children so renderers can treat the class like any other wrapper.

use guides_ast::AstNode;

/// Directive name of class-annotation markers.
pub const CSS_CLASS_DIRECTIVE: &str = "cssclass";

/// Fold each childless `cssclass` node together with its next sibling.
///
/// Single top-to-bottom pass: when a childless `cssclass` node has a following
/// sibling, that sibling is removed from the sequence and becomes the marker's
/// only child. The absorbed node is then processed as part of the marker's
/// children and is never considered again at its old level. Markers with no
/// following sibling, or that already have children, are left as they are,
/// which makes the transform idempotent.
///
/// Takes ownership of the tree, so no other reference to the un-normalized
/// nodes can outlive the call.
///
/// # Example
///
/// ```
/// use guides_ast::AstNode;
/// use guides_renderer::normalize_css_classes;
///
/// let nodes = vec![
///     AstNode::directive("cssclass"),
///     AstNode::new("paragraph"),
///     AstNode::new("paragraph"),
/// ];
///
/// let normalized = normalize_css_classes(nodes);
/// assert_eq!(normalized.len(), 2);
/// assert!(normalized[0].children[0].is_type("paragraph"));
/// ```
#[must_use]
pub fn normalize_css_classes(nodes: Vec<AstNode>) -> Vec<AstNode> {
    let mut output = Vec::with_capacity(nodes.len());
    let mut remaining = nodes.into_iter();

    while let Some(mut node) = remaining.next() {
        if node.is_named(CSS_CLASS_DIRECTIVE)
            && node.children.is_empty()
            && let Some(next) = remaining.next()
        {
            node.children.push(next);
        }
        node.children = normalize_css_classes(std::mem::take(&mut node.children));
        output.push(node);
    }

    output
}
