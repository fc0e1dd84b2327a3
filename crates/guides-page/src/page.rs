//! Page context as produced by the upstream build.

use guides_ast::{AstNode, PathKey, get_at_path, plaintext};
use serde_json::{Map, Value};

use crate::PageError;

/// Lookup key of the root page in `slugToTitle`.
const INDEX_SLUG: &str = "index";

/// One page of a guide: its slug, parsed node tree and site metadata.
///
/// Every piece is optional in the input. Missing pieces resolve to empty
/// values, never to errors.
#[derive(Debug, Clone, Default)]
pub struct PageContext {
    slug: String,
    nodes: Vec<AstNode>,
    options: Map<String, Value>,
    metadata: Value,
}

impl PageContext {
    /// Parse a page from its JSON text.
    ///
    /// # Example
    ///
    /// ```
    /// use guides_page::PageContext;
    ///
    /// let page = PageContext::from_json(r#"{
    ///     "slug": "server/install",
    ///     "page": {"ast": {"children": [{"type": "text", "value": "Hi"}]}},
    ///     "metadata": {"slugToTitle": {"server/install": [{"type": "text", "value": "Install"}]}}
    /// }"#).unwrap();
    ///
    /// assert_eq!(page.slug(), "server/install");
    /// assert_eq!(page.page_title().as_deref(), Some("Install"));
    /// ```
    pub fn from_json(text: &str) -> Result<Self, PageError> {
        let value: Value = serde_json::from_str(text)?;
        Self::from_value(&value)
    }

    /// Build a page from an already parsed JSON value.
    ///
    /// Fails only when the node tree is present but isn't a sequence of nodes.
    /// `null` counts as absent.
    pub fn from_value(value: &Value) -> Result<Self, PageError> {
        let root = Some(value);

        let slug = get_at_path(&path(&["slug"]), root)
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_owned();

        let nodes = match get_at_path(&path(&["page", "ast", "children"]), root) {
            Some(children) if !children.is_null() => serde_json::from_value(children.clone())?,
            _ => Vec::new(),
        };

        let options = get_at_path(&path(&["page", "ast", "options"]), root)
            .and_then(Value::as_object)
            .cloned()
            .unwrap_or_default();

        let metadata = get_at_path(&path(&["metadata"]), root)
            .cloned()
            .unwrap_or(Value::Null);

        tracing::debug!(slug = %slug, nodes = nodes.len(), "Parsed page");
        Ok(Self {
            slug,
            nodes,
            options,
            metadata,
        })
    }

    /// Page slug, `/` for the root page.
    #[must_use]
    pub fn slug(&self) -> &str {
        &self.slug
    }

    /// Top-level nodes of the page.
    #[must_use]
    pub fn nodes(&self) -> &[AstNode] {
        &self.nodes
    }

    /// Page-level options from the AST root.
    #[must_use]
    pub fn options(&self) -> &Map<String, Value> {
        &self.options
    }

    /// Plain-text title of this page from `slugToTitle`.
    ///
    /// The root page (slug `/`) is looked up as `index`.
    #[must_use]
    pub fn page_title(&self) -> Option<String> {
        let lookup = if self.slug == "/" {
            INDEX_SLUG
        } else {
            self.slug.as_str()
        };
        let title = get_at_path(&path(&["slugToTitle", lookup]), Some(&self.metadata))?;
        let nodes: Vec<AstNode> = serde_json::from_value(title.clone()).ok()?;
        let text = plaintext(&nodes);
        (!text.is_empty()).then_some(text)
    }

    /// Site title from metadata, or `fallback` when the page carries none.
    #[must_use]
    pub fn site_title<'a>(&'a self, fallback: &'a str) -> &'a str {
        get_at_path(&path(&["title"]), Some(&self.metadata))
            .and_then(Value::as_str)
            .filter(|title| !title.is_empty())
            .unwrap_or(fallback)
    }

    /// Take the node tree out of the context.
    pub(crate) fn take_nodes(&mut self) -> Vec<AstNode> {
        std::mem::take(&mut self.nodes)
    }
}

fn path(keys: &[&str]) -> Vec<PathKey> {
    keys.iter().map(|&key| key.into()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_empty_object() {
        let page = PageContext::from_value(&json!({})).unwrap();
        assert_eq!(page.slug(), "");
        assert!(page.nodes().is_empty());
        assert!(page.options().is_empty());
        assert_eq!(page.page_title(), None);
        assert_eq!(page.site_title("Fallback"), "Fallback");
    }

    #[test]
    fn test_nodes_and_options() {
        let page = PageContext::from_value(&json!({
            "page": {"ast": {
                "children": [{"type": "section", "children": [{"type": "text", "value": "x"}]}],
                "options": {"languages": ["python"]}
            }}
        }))
        .unwrap();

        assert_eq!(page.nodes().len(), 1);
        assert_eq!(page.nodes()[0].children.len(), 1);
        assert_eq!(page.options().get("languages"), Some(&json!(["python"])));
    }

    #[test]
    fn test_malformed_children_fail() {
        let result = PageContext::from_value(&json!({"page": {"ast": {"children": "nope"}}}));
        assert!(matches!(result, Err(PageError::Json(_))));
    }

    #[test]
    fn test_null_fields_are_absent() {
        let page = PageContext::from_value(&json!({"page": {"ast": {
            "children": [{"type": "section", "options": null, "children": [
                {"type": "text", "value": "x", "children": null}
            ]}],
            "options": null
        }}}))
        .unwrap();

        assert_eq!(page.nodes().len(), 1);
        assert!(page.nodes()[0].options.is_empty());
        assert!(page.options().is_empty());

        let empty = PageContext::from_value(&json!({"page": {"ast": {"children": null}}})).unwrap();
        assert!(empty.nodes().is_empty());
    }

    #[test]
    fn test_invalid_json_text() {
        assert!(matches!(PageContext::from_json("{"), Err(PageError::Json(_))));
    }

    #[test]
    fn test_root_page_title_uses_index() {
        let page = PageContext::from_value(&json!({
            "slug": "/",
            "metadata": {"slugToTitle": {
                "index": [{"type": "text", "value": "Welcome"}],
                "/": [{"type": "text", "value": "Wrong"}]
            }}
        }))
        .unwrap();

        assert_eq!(page.page_title().as_deref(), Some("Welcome"));
    }

    #[test]
    fn test_page_title_flattens_nodes() {
        let page = PageContext::from_value(&json!({
            "slug": "drivers",
            "metadata": {"slugToTitle": {"drivers": [
                {"type": "text", "value": "Use "},
                {"type": "literal", "children": [{"type": "text", "value": "mongosh"}]}
            ]}}
        }))
        .unwrap();

        assert_eq!(page.page_title().as_deref(), Some("Use mongosh"));
    }

    #[test]
    fn test_page_title_missing_entry() {
        let page = PageContext::from_value(&json!({
            "slug": "other",
            "metadata": {"slugToTitle": {"drivers": []}}
        }))
        .unwrap();

        assert_eq!(page.page_title(), None);
    }

    #[test]
    fn test_site_title_from_metadata() {
        let page = PageContext::from_value(&json!({"metadata": {"title": "Atlas Guides"}})).unwrap();
        assert_eq!(page.site_title("Fallback"), "Atlas Guides");
    }
}
