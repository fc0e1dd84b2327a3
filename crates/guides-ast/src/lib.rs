//! Document tree types for Guides.
//!
//! Pages arrive from an upstream parse stage as a JSON tree of nodes. This crate
//! provides the typed [`AstNode`] view of that tree along with the lookup helpers
//! every other crate builds on:
//!
//! - [`get_at_path`]: walk a path through loosely-typed JSON, yielding `None` as
//!   soon as any step is absent
//! - [`find_all`]: collect every node whose field matches a value, in document order
//! - [`plaintext`]: flatten the text nodes of a subtree into a string
//!
//! # Example
//!
//! ```
//! use guides_ast::{AstNode, find_all};
//!
//! let nodes: Vec<AstNode> = serde_json::from_str(r#"[
//!     {"type": "section", "children": [
//!         {"type": "heading", "id": "intro", "children": [{"type": "text", "value": "Intro"}]}
//!     ]}
//! ]"#).unwrap();
//!
//! let headings = find_all(&nodes, "type", "heading");
//! assert_eq!(headings.len(), 1);
//! assert_eq!(headings[0].id.as_deref(), Some("intro"));
//! ```

mod node;
mod path;
mod search;

pub use node::AstNode;
pub use path::{PathKey, get_at_path};
pub use search::{find_all, plaintext};
