//! HTML rendering of a normalized page.
//!
//! Draws the derived structures (contents, footnote labels, tab selection)
//! next to a small set of structural nodes. Unknown nodes render their
//! children only.

use std::fmt::Write;

use guides_ast::{AstNode, plaintext};

use crate::contents::{CONTENTS_DIRECTIVE, Contents, HeadingEntry};
use crate::cssclass::CSS_CLASS_DIRECTIVE;
use crate::footnotes::FootnoteIndex;
use crate::tabs::{TABS_DIRECTIVE, TabSelectionStore, Tabset, TabsetError, tab_id};

/// Error returned when a page can't be rendered.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// Malformed tab group.
    #[error("invalid tab group: {0}")]
    Tabset(#[from] TabsetError),
}

/// Escape text for use in HTML content and attribute values.
#[must_use]
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

/// Renders page nodes to HTML.
///
/// Tab groups are mounted against the shared store while rendering, so the
/// output reflects the current selection (or the default one for tabsets seen
/// for the first time).
///
/// # Example
///
/// ```
/// use guides_ast::AstNode;
/// use guides_renderer::{FootnoteIndex, HtmlRenderer, TabSelectionStore};
///
/// let page = vec![AstNode::new("paragraph").with_children(vec![AstNode::text("a < b")])];
/// let footnotes = FootnoteIndex::resolve(&page);
/// let store = TabSelectionStore::new();
///
/// let html = HtmlRenderer::new(&page, &footnotes, &store).render().unwrap();
/// assert_eq!(html, "<p>a &lt; b</p>");
/// ```
pub struct HtmlRenderer<'a> {
    page: &'a [AstNode],
    footnotes: &'a FootnoteIndex,
    store: &'a TabSelectionStore,
    section_depth: usize,
    next_group_id: usize,
}

impl<'a> HtmlRenderer<'a> {
    /// Create a renderer for a normalized page.
    #[must_use]
    pub fn new(
        page: &'a [AstNode],
        footnotes: &'a FootnoteIndex,
        store: &'a TabSelectionStore,
    ) -> Self {
        Self {
            page,
            footnotes,
            store,
            section_depth: 0,
            next_group_id: 0,
        }
    }

    /// Render the whole page.
    pub fn render(mut self) -> Result<String, RenderError> {
        let mut out = String::new();
        self.render_nodes(self.page, &mut out)?;
        Ok(out)
    }

    fn render_nodes(&mut self, nodes: &'a [AstNode], out: &mut String) -> Result<(), RenderError> {
        for node in nodes {
            self.render_node(node, out)?;
        }
        Ok(())
    }

    fn render_node(&mut self, node: &'a AstNode, out: &mut String) -> Result<(), RenderError> {
        match node.node_type.as_deref() {
            Some("text") => {
                if let Some(value) = &node.value {
                    out.push_str(&escape_html(value));
                }
            }
            Some("section") => {
                self.section_depth += 1;
                out.push_str("<section>");
                self.render_nodes(&node.children, out)?;
                out.push_str("</section>");
                self.section_depth -= 1;
            }
            Some("heading") => {
                let level = self.section_depth.clamp(1, 6);
                let _ = write!(out, "<h{level}");
                if let Some(id) = &node.id {
                    let _ = write!(out, r#" id="{}""#, escape_html(id));
                }
                out.push('>');
                self.render_nodes(&node.children, out)?;
                let _ = write!(out, "</h{level}>");
            }
            Some("paragraph") => self.wrap("p", &node.children, out)?,
            Some("emphasis") => self.wrap("em", &node.children, out)?,
            Some("strong") => self.wrap("strong", &node.children, out)?,
            Some("literal") => self.wrap("code", &node.children, out)?,
            Some("footnote") => self.render_footnote(node, out)?,
            Some("footnote_reference") => self.render_footnote_reference(node, out),
            _ => match node.name.as_deref() {
                Some(CONTENTS_DIRECTIVE) => {
                    if let Some(contents) = Contents::build(node, self.page) {
                        Self::render_contents(&contents, out);
                    }
                }
                Some(TABS_DIRECTIVE) => self.render_tabs(node, out)?,
                Some(CSS_CLASS_DIRECTIVE) => {
                    let class = plaintext(&node.argument);
                    let _ = write!(out, r#"<div class="{}">"#, escape_html(class.trim()));
                    self.render_nodes(&node.children, out)?;
                    out.push_str("</div>");
                }
                _ => self.render_nodes(&node.children, out)?,
            },
        }
        Ok(())
    }

    fn wrap(&mut self, tag: &str, children: &'a [AstNode], out: &mut String) -> Result<(), RenderError> {
        let _ = write!(out, "<{tag}>");
        self.render_nodes(children, out)?;
        let _ = write!(out, "</{tag}>");
        Ok(())
    }

    fn render_contents(contents: &Contents, out: &mut String) {
        let mut classes = vec!["contents", "topic"];
        if let Some(class) = contents.options.class.as_deref() {
            classes.push(class);
        }
        if contents.options.local {
            classes.push("local");
        }

        let _ = write!(
            out,
            r#"<div class="{}" id="on-this-page">"#,
            escape_html(&classes.join(" "))
        );
        if let Some(title) = &contents.title {
            let _ = write!(out, r#"<p class="topic-title first">{}</p>"#, escape_html(title));
        }
        Self::render_heading_list(&contents.entries, Some("simple"), out);
        out.push_str("</div>");
    }

    fn render_heading_list(entries: &[HeadingEntry], class: Option<&str>, out: &mut String) {
        match class {
            Some(class) => {
                let _ = write!(out, r#"<ul class="{class}">"#);
            }
            None => out.push_str("<ul>"),
        }
        for entry in entries {
            let _ = write!(out, r##"<li><a href="#{}">"##, escape_html(&entry.id));
            for node in &entry.title {
                Self::render_inline(node, out);
            }
            out.push_str("</a>");
            if !entry.children.is_empty() {
                Self::render_heading_list(&entry.children, None, out);
            }
            out.push_str("</li>");
        }
        out.push_str("</ul>");
    }

    /// Render title nodes, which are owned by the heading entry rather than the page.
    fn render_inline(node: &AstNode, out: &mut String) {
        let tag = match node.node_type.as_deref() {
            Some("text") => {
                if let Some(value) = &node.value {
                    out.push_str(&escape_html(value));
                }
                return;
            }
            Some("emphasis") => Some("em"),
            Some("strong") => Some("strong"),
            Some("literal") => Some("code"),
            _ => None,
        };
        if let Some(tag) = tag {
            let _ = write!(out, "<{tag}>");
        }
        for child in &node.children {
            Self::render_inline(child, out);
        }
        if let Some(tag) = tag {
            let _ = write!(out, "</{tag}>");
        }
    }

    fn render_tabs(&mut self, node: &'a AstNode, out: &mut String) -> Result<(), RenderError> {
        let tabset = Tabset::from_node(node)?;
        tabset.mount(self.store);

        if tabset.is_hidden() {
            return self.render_nodes(tabset.visible_content(self.store), out);
        }

        let group_id = self.next_group_id;
        self.next_group_id += 1;
        let active = tabset.active_index(self.store).unwrap_or(0);

        let _ = write!(
            out,
            r#"<div class="tabs" id="tabs-{group_id}" data-tabset="{}">"#,
            escape_html(tabset.name())
        );

        out.push_str(r#"<div class="tabs-buttons" role="tablist">"#);
        for (idx, tab) in tabset.tabs().iter().enumerate() {
            let selected = idx == active;
            let _ = write!(
                out,
                r#"<button role="tab" id="tab-{group_id}-{idx}" aria-controls="panel-{group_id}-{idx}" aria-selected="{selected}" tabindex="{}">"#,
                if selected { "0" } else { "-1" },
            );
            if tab.argument.is_empty() {
                out.push_str(&escape_html(tab_id(tab).unwrap_or_default()));
            } else {
                self.render_nodes(&tab.argument, out)?;
            }
            out.push_str("</button>");
        }
        out.push_str("</div>");

        for (idx, tab) in tabset.tabs().iter().enumerate() {
            let hidden = if idx == active { "" } else { " hidden" };
            let _ = write!(
                out,
                r#"<div role="tabpanel" id="panel-{group_id}-{idx}" aria-labelledby="tab-{group_id}-{idx}"{hidden}>"#
            );
            self.render_nodes(&tab.children, out)?;
            out.push_str("</div>");
        }

        out.push_str("</div>");
        Ok(())
    }

    fn render_footnote(&mut self, node: &'a AstNode, out: &mut String) -> Result<(), RenderError> {
        let key = node.name.as_deref().or(node.id.as_deref());
        let entry = key.and_then(|key| self.footnotes.get(key));

        out.push_str(r#"<aside class="footnote""#);
        if let Some(key) = key {
            let _ = write!(out, r#" id="{}""#, escape_html(key));
        }
        out.push('>');
        if let Some(entry) = entry {
            let _ = write!(out, r#"<span class="footnote-label">[{}]</span>"#, entry.label);
            for reference in &entry.references {
                let _ = write!(
                    out,
                    r##"<a class="footnote-backref" href="#{}">↩</a>"##,
                    escape_html(reference)
                );
            }
        }
        self.render_nodes(&node.children, out)?;
        out.push_str("</aside>");
        Ok(())
    }

    fn render_footnote_reference(&self, node: &AstNode, out: &mut String) {
        let Some((key, entry)) = node
            .id
            .as_deref()
            .and_then(|id| self.footnotes.for_reference(id))
        else {
            tracing::debug!(id = ?node.id, "Footnote reference without footnote");
            return;
        };

        out.push_str(r#"<a class="footnote-reference""#);
        if let Some(id) = &node.id {
            let _ = write!(out, r#" id="{}""#, escape_html(id));
        }
        let _ = write!(out, r##" href="#{}">[{}]</a>"##, escape_html(key), entry.label);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::NullSink;
    use pretty_assertions::assert_eq;

    fn render(page: &[AstNode], store: &TabSelectionStore) -> String {
        let footnotes = FootnoteIndex::resolve(page);
        HtmlRenderer::new(page, &footnotes, store).render().unwrap()
    }

    fn section(children: Vec<AstNode>) -> AstNode {
        AstNode::new("section").with_children(children)
    }

    fn heading(id: &str, text: &str) -> AstNode {
        AstNode::new("heading")
            .with_id(id)
            .with_children(vec![AstNode::text(text)])
    }

    fn tab(id: &str, content: &str) -> AstNode {
        AstNode::directive("tab")
            .with_option("tabid", id)
            .with_children(vec![AstNode::new("paragraph").with_children(vec![AstNode::text(content)])])
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html(r#"<a href="x">&'"#), "&lt;a href=&quot;x&quot;&gt;&amp;&#x27;");
    }

    #[test]
    fn test_heading_levels_follow_sections() {
        let page = vec![section(vec![
            heading("title", "Title"),
            section(vec![heading("sub", "Sub")]),
        ])];

        let html = render(&page, &TabSelectionStore::new());

        assert_eq!(
            html,
            r#"<section><h1 id="title">Title</h1><section><h2 id="sub">Sub</h2></section></section>"#
        );
    }

    #[test]
    fn test_contents_directive() {
        let page = vec![section(vec![
            heading("title", "Title"),
            AstNode::directive("contents")
                .with_argument(vec![AstNode::text("On this page")])
                .with_option("class", "singlecol")
                .with_option("local", true),
            section(vec![heading("install", "Install"), section(vec![heading("linux", "Linux")])]),
        ])];

        let html = render(&page, &TabSelectionStore::new());

        assert!(html.contains(r#"<div class="contents topic singlecol local" id="on-this-page">"#));
        assert!(html.contains(r#"<p class="topic-title first">On this page</p>"#));
        assert!(html.contains(
            r##"<ul class="simple"><li><a href="#install">Install</a><ul><li><a href="#linux">Linux</a></li></ul></li></ul>"##
        ));
    }

    #[test]
    fn test_empty_contents_renders_nothing() {
        let page = vec![section(vec![
            heading("title", "Title"),
            AstNode::directive("contents"),
        ])];

        let html = render(&page, &TabSelectionStore::new());

        assert!(!html.contains("contents"));
        assert!(!html.contains("<ul"));
    }

    #[test]
    fn test_tabs_default_selection() {
        let page = vec![AstNode::directive("tabs").with_children(vec![tab("shell", "Shell"), tab("compass", "Compass")])];
        let store = TabSelectionStore::new();

        let html = render(&page, &store);

        assert_eq!(store.get("compass/shell").as_deref(), Some("shell"));
        assert!(html.contains(r#"role="tablist""#));
        assert!(html.contains(r#"aria-selected="true" tabindex="0">shell</button>"#));
        assert!(html.contains(r#"aria-selected="false" tabindex="-1">compass</button>"#));
        assert!(html.contains(r#"aria-labelledby="tab-0-0"><p>Shell</p></div>"#));
        assert!(html.contains(r#"aria-labelledby="tab-0-1" hidden><p>Compass</p></div>"#));
    }

    #[test]
    fn test_tabs_reflect_existing_selection() {
        let page = vec![AstNode::directive("tabs").with_children(vec![tab("shell", "Shell"), tab("compass", "Compass")])];
        let store = TabSelectionStore::new();
        Tabset::from_node(&page[0])
            .unwrap()
            .select(1, &store, &NullSink)
            .unwrap();

        let html = render(&page, &store);

        assert!(html.contains(r#"aria-labelledby="tab-0-0" hidden><p>Shell</p></div>"#));
        assert!(html.contains(r#"aria-labelledby="tab-0-1"><p>Compass</p></div>"#));
    }

    #[test]
    fn test_tab_title_from_argument() {
        let titled = tab("py", "Code").with_argument(vec![AstNode::text("Python 3")]);
        let page = vec![AstNode::directive("tabs").with_children(vec![titled])];

        let html = render(&page, &TabSelectionStore::new());

        assert!(html.contains(">Python 3</button>"));
    }

    #[test]
    fn test_hidden_tabs_render_active_content_only() {
        let page = vec![
            AstNode::directive("tabs")
                .with_option("tabset", "platforms")
                .with_option("hidden", true)
                .with_children(vec![tab("windows", "Win"), tab("linux", "Lin")]),
        ];
        let store = TabSelectionStore::new();
        store.set("platforms", "linux");

        let html = render(&page, &store);

        assert_eq!(html, "<p>Lin</p>");
    }

    #[test]
    fn test_multiple_groups_get_distinct_ids() {
        let group = AstNode::directive("tabs").with_children(vec![tab("a", "A"), tab("b", "B")]);
        let page = vec![group.clone(), group];

        let html = render(&page, &TabSelectionStore::new());

        assert!(html.contains(r#"id="tabs-0""#));
        assert!(html.contains(r#"id="tabs-1""#));
    }

    #[test]
    fn test_malformed_tabs_fail() {
        let page = vec![AstNode::directive("tabs").with_children(vec![AstNode::directive("tab")])];
        let footnotes = FootnoteIndex::default();
        let store = TabSelectionStore::new();

        let result = HtmlRenderer::new(&page, &footnotes, &store).render();

        assert!(matches!(
            result,
            Err(RenderError::Tabset(TabsetError::MissingTabId { index: 0 }))
        ));
    }

    #[test]
    fn test_cssclass_wrapper() {
        let page = vec![
            AstNode::directive("cssclass")
                .with_argument(vec![AstNode::text("button")])
                .with_children(vec![AstNode::new("paragraph").with_children(vec![AstNode::text("Go")])]),
        ];

        let html = render(&page, &TabSelectionStore::new());

        assert_eq!(html, r#"<div class="button"><p>Go</p></div>"#);
    }

    #[test]
    fn test_footnotes() {
        let page = vec![
            AstNode::new("paragraph").with_children(vec![
                AstNode::text("See"),
                AstNode::new("footnote_reference").with_id("ref-1").with_refname("note"),
            ]),
            AstNode::new("footnote")
                .with_id("fn-1")
                .with_name("note")
                .with_children(vec![AstNode::text("Details.")]),
        ];

        let html = render(&page, &TabSelectionStore::new());

        assert!(html.contains(r##"<a class="footnote-reference" id="ref-1" href="#note">[1]</a>"##));
        assert!(html.contains(r#"<aside class="footnote" id="note"><span class="footnote-label">[1]</span>"#));
        assert!(html.contains(r##"href="#ref-1">↩</a>Details.</aside>"##));
    }

    #[test]
    fn test_unknown_nodes_render_children() {
        let page = vec![AstNode::directive("note").with_children(vec![AstNode::text("inside")])];
        assert_eq!(render(&page, &TabSelectionStore::new()), "inside");
    }
}
