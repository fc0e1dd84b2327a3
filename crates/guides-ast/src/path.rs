//! Path lookups through loosely-typed JSON.

use serde_json::Value;

/// One step of a lookup path: an object key or a sequence index.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PathKey {
    /// Object member name.
    Key(String),
    /// Sequence position (0-based).
    Index(usize),
}

impl From<&str> for PathKey {
    fn from(key: &str) -> Self {
        Self::Key(key.to_owned())
    }
}

impl From<String> for PathKey {
    fn from(key: String) -> Self {
        Self::Key(key)
    }
}

impl From<usize> for PathKey {
    fn from(index: usize) -> Self {
        Self::Index(index)
    }
}

/// Walk `path` from `root`, returning the value at the end of it.
///
/// Returns `None` as soon as a step is missing: an absent root, a missing key,
/// an index past the end, or a step that doesn't fit the container (a key on
/// a sequence, an index on an object, anything on a scalar). An empty path
/// returns the root itself.
///
/// # Example
///
/// ```
/// use guides_ast::{PathKey, get_at_path};
/// use serde_json::json;
///
/// let page = json!({"ast": {"children": [{"value": "Hello"}]}});
/// let path: [PathKey; 4] = ["ast".into(), "children".into(), 0.into(), "value".into()];
/// assert_eq!(get_at_path(&path, Some(&page)), Some(&json!("Hello")));
///
/// let missing: [PathKey; 3] = ["ast".into(), "options".into(), "selectors".into()];
/// assert_eq!(get_at_path(&missing, Some(&page)), None);
/// ```
#[must_use]
pub fn get_at_path<'a>(path: &[PathKey], root: Option<&'a Value>) -> Option<&'a Value> {
    path.iter().try_fold(root?, |current, key| match (key, current) {
        (PathKey::Key(key), Value::Object(map)) => map.get(key),
        (PathKey::Index(index), Value::Array(items)) => items.get(*index),
        _ => None,
    })
}
