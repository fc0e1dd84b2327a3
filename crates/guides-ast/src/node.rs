//! The document node type.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// A node of the parsed document tree.
///
/// Nodes own their children, so a tree built from `AstNode`s can never contain
/// a node with two parents. Fields the renderer doesn't interpret (source
/// positions, domains, ...) are preserved in [`extra`](Self::extra) so that a
/// transformed tree serializes back without loss.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AstNode {
    /// Node kind (`section`, `heading`, `text`, `directive`, `footnote`, ...).
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub node_type: Option<String>,
    /// Directive or role name (`tabs`, `contents`, `cssclass`, `step`, ...).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Anchor id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Name of the target this node refers to (footnote references).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refname: Option<String>,
    /// Directive options.
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "Map::is_empty"
    )]
    pub options: Map<String, Value>,
    /// Directive argument nodes.
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub argument: Vec<AstNode>,
    /// Child nodes in document order.
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub children: Vec<AstNode>,
    /// Literal text of text-like nodes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    /// Fields not modelled above.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Read an explicit `null` the same way as a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl AstNode {
    /// Create a node of the given type.
    #[must_use]
    pub fn new(node_type: &str) -> Self {
        Self {
            node_type: Some(node_type.to_owned()),
            ..Self::default()
        }
    }

    /// Create a text node.
    #[must_use]
    pub fn text(value: &str) -> Self {
        Self {
            value: Some(value.to_owned()),
            ..Self::new("text")
        }
    }

    /// Create a directive node with the given name.
    #[must_use]
    pub fn directive(name: &str) -> Self {
        Self {
            name: Some(name.to_owned()),
            ..Self::new("directive")
        }
    }

    /// Set the node id.
    #[must_use]
    pub fn with_id(mut self, id: &str) -> Self {
        self.id = Some(id.to_owned());
        self
    }

    /// Set the node refname.
    #[must_use]
    pub fn with_refname(mut self, refname: &str) -> Self {
        self.refname = Some(refname.to_owned());
        self
    }

    /// Set the node name.
    #[must_use]
    pub fn with_name(mut self, name: &str) -> Self {
        self.name = Some(name.to_owned());
        self
    }

    /// Add an option.
    #[must_use]
    pub fn with_option(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.options.insert(key.to_owned(), value.into());
        self
    }

    /// Replace the argument nodes.
    #[must_use]
    pub fn with_argument(mut self, argument: Vec<AstNode>) -> Self {
        self.argument = argument;
        self
    }

    /// Replace the child nodes.
    #[must_use]
    pub fn with_children(mut self, children: Vec<AstNode>) -> Self {
        self.children = children;
        self
    }

    /// Whether the node has the given `type`.
    #[must_use]
    pub fn is_type(&self, node_type: &str) -> bool {
        self.node_type.as_deref() == Some(node_type)
    }

    /// Whether the node has the given `name`.
    #[must_use]
    pub fn is_named(&self, name: &str) -> bool {
        self.name.as_deref() == Some(name)
    }

    /// Look up a string-valued field by its serialized key.
    ///
    /// Modelled fields are checked first, then [`extra`](Self::extra). Non-string
    /// values yield `None`.
    #[must_use]
    pub fn field(&self, key: &str) -> Option<&str> {
        match key {
            "type" => self.node_type.as_deref(),
            "name" => self.name.as_deref(),
            "id" => self.id.as_deref(),
            "refname" => self.refname.as_deref(),
            "value" => self.value.as_deref(),
            _ => self.extra.get(key).and_then(Value::as_str),
        }
    }

    /// Get a string option.
    #[must_use]
    pub fn option_str(&self, key: &str) -> Option<&str> {
        self.options.get(key).and_then(Value::as_str)
    }

    /// Whether an option key is present, regardless of its value.
    #[must_use]
    pub fn has_option(&self, key: &str) -> bool {
        self.options.contains_key(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_deserialize_missing_collections_default_to_empty() {
        let node: AstNode = serde_json::from_value(json!({"type": "text", "value": "hi"})).unwrap();

        assert!(node.children.is_empty());
        assert!(node.argument.is_empty());
        assert!(node.options.is_empty());
        assert_eq!(node.value.as_deref(), Some("hi"));
    }

    #[test]
    fn test_deserialize_null_collections_as_empty() {
        let node: AstNode = serde_json::from_value(json!({
            "type": "section",
            "options": null,
            "argument": null,
            "children": [{"type": "text", "value": "x", "children": null}]
        }))
        .unwrap();

        assert!(node.options.is_empty());
        assert!(node.argument.is_empty());
        assert_eq!(node.children.len(), 1);
        assert!(node.children[0].children.is_empty());
    }

    #[test]
    fn test_unknown_fields_round_trip() {
        let source = json!({
            "type": "heading",
            "id": "setup",
            "position": {"start": {"line": 4}},
            "children": [{"type": "text", "value": "Setup"}]
        });

        let node: AstNode = serde_json::from_value(source.clone()).unwrap();
        assert!(node.extra.contains_key("position"));

        let back = serde_json::to_value(&node).unwrap();
        assert_eq!(back, source);
    }

    #[test]
    fn test_field_lookup() {
        let mut node = AstNode::new("footnote_reference")
            .with_id("id1")
            .with_refname("note");
        node.extra.insert("domain".to_owned(), json!("std"));
        node.extra.insert("level".to_owned(), json!(2));

        assert_eq!(node.field("type"), Some("footnote_reference"));
        assert_eq!(node.field("refname"), Some("note"));
        assert_eq!(node.field("domain"), Some("std"));
        assert_eq!(node.field("level"), None);
        assert_eq!(node.field("name"), None);
    }

    #[test]
    fn test_options() {
        let node = AstNode::directive("tabs")
            .with_option("tabset", "drivers")
            .with_option("hidden", true);

        assert_eq!(node.option_str("tabset"), Some("drivers"));
        assert_eq!(node.option_str("hidden"), None);
        assert!(node.has_option("hidden"));
        assert!(node.is_named("tabs"));
        assert!(node.is_type("directive"));
    }
}
