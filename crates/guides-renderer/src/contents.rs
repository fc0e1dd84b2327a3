//! Table of contents for the `contents` directive.
//!
//! Headings are nested by *section depth*: the number of `section` nodes
//! enclosing them. Depth-1 headings are page titles and never listed. Anything
//! inside a `step` directive is skipped, whatever its depth.

use guides_ast::AstNode;

/// Directive name of the table of contents.
pub const CONTENTS_DIRECTIVE: &str = "contents";

/// Directive name whose subtree never contributes headings.
const STEP_DIRECTIVE: &str = "step";

/// A heading listed in the table of contents.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct HeadingEntry {
    /// Anchor id of the heading.
    pub id: String,
    /// Title nodes (the heading's children).
    pub title: Vec<AstNode>,
    /// Section depth of the heading (at least 2).
    pub depth: usize,
    /// Deeper headings nested under this one.
    pub children: Vec<HeadingEntry>,
}

/// Options of a `contents` directive.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ContentsOptions {
    /// Maximum heading level to list, counted from the page's first sublevel.
    /// `None` lists every level.
    pub depth: Option<usize>,
    /// Extra class for the container.
    pub class: Option<String>,
    /// Whether the table is local to the current section.
    pub local: bool,
}

impl ContentsOptions {
    /// Read options from a directive node.
    ///
    /// A non-numeric `depth` is ignored. `local` counts as set when present,
    /// unless it is literally `false`.
    #[must_use]
    pub fn from_node(node: &AstNode) -> Self {
        let depth = node
            .options
            .get("depth")
            .and_then(serde_json::Value::as_u64)
            .and_then(|depth| usize::try_from(depth).ok());
        let local = node
            .options
            .get("local")
            .is_some_and(|value| value.as_bool() != Some(false));

        Self {
            depth,
            class: node.option_str("class").map(str::to_owned),
            local,
        }
    }
}

/// Build the heading forest for `nodes` (the page's top-level children).
///
/// A heading is listed when its section depth is greater than 1 and, with
/// `max_depth` set, when `depth - 1 <= max_depth`. Each new entry is compared
/// with the most recent entry of the current level only: a deeper heading nests
/// under it (recursively), anything else becomes its sibling.
///
/// # Example
///
/// ```
/// use guides_ast::AstNode;
/// use guides_renderer::build_toc;
///
/// let heading = |id: &str| AstNode::new("heading").with_id(id);
/// let page = vec![AstNode::new("section").with_children(vec![
///     heading("title"),
///     AstNode::new("section").with_children(vec![
///         heading("install"),
///         AstNode::new("section").with_children(vec![heading("linux")]),
///     ]),
/// ])];
///
/// let toc = build_toc(&page, None);
/// assert_eq!(toc.len(), 1);
/// assert_eq!(toc[0].id, "install");
/// assert_eq!(toc[0].children[0].id, "linux");
/// ```
#[must_use]
pub fn build_toc(nodes: &[AstNode], max_depth: Option<usize>) -> Vec<HeadingEntry> {
    let mut entries = Vec::new();
    for node in nodes {
        collect_headings(node, 0, max_depth, &mut entries);
    }
    entries
}

fn collect_headings(
    node: &AstNode,
    depth: usize,
    max_depth: Option<usize>,
    entries: &mut Vec<HeadingEntry>,
) {
    if node.is_type("heading") && depth > 1 && max_depth.is_none_or(|max| depth - 1 <= max) {
        if let Some(id) = &node.id {
            insert_entry(
                entries,
                HeadingEntry {
                    id: id.clone(),
                    title: node.children.clone(),
                    depth,
                    children: Vec::new(),
                },
            );
        } else {
            tracing::debug!(depth, "Heading without id left out of contents");
        }
    }

    if node.is_named(STEP_DIRECTIVE) {
        return;
    }

    let child_depth = if node.is_type("section") {
        depth + 1
    } else {
        depth
    };
    for child in &node.children {
        collect_headings(child, child_depth, max_depth, entries);
    }
}

fn insert_entry(entries: &mut Vec<HeadingEntry>, entry: HeadingEntry) {
    match entries.last_mut() {
        Some(last) if entry.depth > last.depth => insert_entry(&mut last.children, entry),
        _ => entries.push(entry),
    }
}

/// A resolved `contents` directive ready to render.
#[derive(Clone, Debug, PartialEq)]
pub struct Contents {
    /// Display title from the directive argument.
    pub title: Option<String>,
    /// Directive options.
    pub options: ContentsOptions,
    /// Heading forest, never empty.
    pub entries: Vec<HeadingEntry>,
}

impl Contents {
    /// Resolve a `contents` directive against the page.
    ///
    /// Returns `None` when no heading qualifies, in which case nothing should
    /// be rendered at all.
    #[must_use]
    pub fn build(directive: &AstNode, page_nodes: &[AstNode]) -> Option<Self> {
        let options = ContentsOptions::from_node(directive);
        let entries = build_toc(page_nodes, options.depth);
        if entries.is_empty() {
            return None;
        }

        let title = directive
            .argument
            .first()
            .and_then(|node| node.value.clone());

        Some(Self {
            title,
            options,
            entries,
        })
    }
}
