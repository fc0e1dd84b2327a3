//! Page transforms and HTML rendering for guide documents.
//!
//! Works on an already-parsed [`AstNode`](guides_ast::AstNode) forest:
//!
//! - [`normalize_css_classes`]: attaches empty `cssclass` directives to the
//!   sibling that follows them
//! - [`FootnoteIndex`]: numbers footnotes and pairs them with references
//! - [`Contents`]: builds the "on this page" table for a `contents` directive
//! - [`tabs`]: tab groups sharing a [`TabSelectionStore`], with analytics
//!   reporting through an [`AnalyticsSink`]
//! - [`HtmlRenderer`]: draws the page with all of the above
//!
//! # Example
//!
//! ```
//! use guides_ast::AstNode;
//! use guides_renderer::{FootnoteIndex, HtmlRenderer, TabSelectionStore, normalize_css_classes};
//!
//! let page = normalize_css_classes(vec![
//!     AstNode::directive("cssclass").with_argument(vec![AstNode::text("note")]),
//!     AstNode::new("paragraph").with_children(vec![AstNode::text("Hi")]),
//! ]);
//! let footnotes = FootnoteIndex::resolve(&page);
//! let store = TabSelectionStore::new();
//!
//! let html = HtmlRenderer::new(&page, &footnotes, &store).render().unwrap();
//! assert_eq!(html, r#"<div class="note"><p>Hi</p></div>"#);
//! ```

mod contents;
mod cssclass;
mod footnotes;
mod html;
pub mod tabs;

pub use contents::{CONTENTS_DIRECTIVE, Contents, ContentsOptions, HeadingEntry, build_toc};
pub use cssclass::{CSS_CLASS_DIRECTIVE, normalize_css_classes};
pub use footnotes::{FootnoteEntry, FootnoteIndex};
pub use html::{HtmlRenderer, RenderError, escape_html};
pub use tabs::{
    AnalyticsSink, MemorySink, NullSink, SelectionChange, SelectionReceiver, TABS_DIRECTIVE,
    TabSelected, TabSelectionStore, Tabset, TabsetError, TracingSink, anonymous_tabset_name,
    tab_id,
};
