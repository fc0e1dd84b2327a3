//! Tabset naming.

use guides_ast::AstNode;

/// Option holding a tab's id.
const TAB_ID_OPTION: &str = "tabid";

/// Separator between tab ids in anonymous tabset names.
const ANONYMOUS_SEPARATOR: &str = "/";

/// Get the id of a `tab` node.
#[must_use]
pub fn tab_id(node: &AstNode) -> Option<&str> {
    node.option_str(TAB_ID_OPTION)
}

/// Name a tabset that has no explicit `tabset` option.
///
/// Ids are sorted lexicographically (byte order) and joined with `/`. Two tab
/// groups with the same set of ids therefore share a name, and with it their
/// selection. Changing either the ordering or the separator breaks that
/// synchronization, so both are fixed.
///
/// # Example
///
/// ```
/// use guides_renderer::anonymous_tabset_name;
///
/// assert_eq!(anonymous_tabset_name(&["shell", "python", "java"]), "java/python/shell");
/// ```
#[must_use]
pub fn anonymous_tabset_name<S: AsRef<str>>(tab_ids: &[S]) -> String {
    let mut sorted: Vec<&str> = tab_ids.iter().map(AsRef::as_ref).collect();
    sorted.sort_unstable();
    sorted.join(ANONYMOUS_SEPARATOR)
}
