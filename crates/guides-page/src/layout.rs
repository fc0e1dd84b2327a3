//! Page layout pipeline.
//!
//! A [`PageLayout`] owns the normalized tree of one page. Normalization,
//! footnote resolution and seeding of the tab selection from the page's
//! `selectors` option run once, on construction; the table of contents and
//! HTML are derived on demand.

use std::sync::Arc;

use guides_ast::{AstNode, find_all};
use serde_json::{Map, Value};
use guides_renderer::{
    AnalyticsSink, FootnoteIndex, HeadingEntry, HtmlRenderer, TABS_DIRECTIVE, TabSelectionStore,
    Tabset, TabsetError, build_toc, normalize_css_classes,
};

use crate::{PageContext, PageError};

/// Page option listing the tabsets used on the page and their choices.
const SELECTORS_OPTION: &str = "selectors";

/// A page ready to render.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
///
/// use guides_page::{PageContext, PageLayout};
/// use guides_renderer::{NullSink, TabSelectionStore};
///
/// let context = PageContext::from_json(r#"{"page": {"ast": {"children": [
///     {"type": "paragraph", "children": [{"type": "text", "value": "Hello"}]}
/// ]}}}"#).unwrap();
///
/// let layout = PageLayout::new(context, TabSelectionStore::new(), Arc::new(NullSink));
/// assert_eq!(layout.render_html().unwrap(), "<p>Hello</p>");
/// ```
pub struct PageLayout {
    context: PageContext,
    nodes: Vec<AstNode>,
    footnotes: FootnoteIndex,
    store: TabSelectionStore,
    analytics: Arc<dyn AnalyticsSink>,
}

impl PageLayout {
    /// Normalize the page tree and resolve its footnotes.
    ///
    /// `store` holds the tab selection for this page; pass a fresh store (or
    /// clear the previous one) when moving to another page. Tabsets named in
    /// the page's `selectors` option start on their first choice unless the
    /// store already has a selection for them.
    pub fn new(
        mut context: PageContext,
        store: TabSelectionStore,
        analytics: Arc<dyn AnalyticsSink>,
    ) -> Self {
        seed_selectors(context.options(), &store);
        let nodes = normalize_css_classes(context.take_nodes());
        let footnotes = FootnoteIndex::resolve(&nodes);
        tracing::debug!(
            slug = context.slug(),
            footnotes = footnotes.len(),
            "Prepared page layout"
        );

        Self {
            context,
            nodes,
            footnotes,
            store,
            analytics,
        }
    }

    /// Page slug and metadata.
    #[must_use]
    pub fn context(&self) -> &PageContext {
        &self.context
    }

    /// Normalized page tree.
    #[must_use]
    pub fn nodes(&self) -> &[AstNode] {
        &self.nodes
    }

    /// Footnotes of the page.
    #[must_use]
    pub fn footnotes(&self) -> &FootnoteIndex {
        &self.footnotes
    }

    /// Tab selection shared by the page's tab groups.
    #[must_use]
    pub fn store(&self) -> &TabSelectionStore {
        &self.store
    }

    /// Every tab group on the page, in document order.
    pub fn tabsets(&self) -> Result<Vec<Tabset<'_>>, TabsetError> {
        find_all(&self.nodes, "name", TABS_DIRECTIVE)
            .into_iter()
            .map(Tabset::from_node)
            .collect()
    }

    /// Select a tab as if the reader had clicked it.
    ///
    /// Returns `false` when no group of `tabset` has a tab with that id.
    pub fn select_tab(&self, tabset: &str, tab_id: &str) -> Result<bool, PageError> {
        for group in self.tabsets()? {
            if group.name() != tabset {
                continue;
            }
            if group
                .select_id(tab_id, &self.store, self.analytics.as_ref())?
                .is_some()
            {
                return Ok(true);
            }
        }

        tracing::warn!(tabset, tab_id, "No such tab on page");
        Ok(false)
    }

    /// Table of contents of the whole page.
    #[must_use]
    pub fn toc(&self, max_depth: Option<usize>) -> Vec<HeadingEntry> {
        build_toc(&self.nodes, max_depth)
    }

    /// Render the page body to HTML.
    pub fn render_html(&self) -> Result<String, PageError> {
        let html = HtmlRenderer::new(&self.nodes, &self.footnotes, &self.store).render()?;
        Ok(html)
    }
}

/// Select the first choice of every tabset in `selectors` that has no selection yet.
///
/// Choices are either an object keyed by tab id (in document order) or a
/// sequence of tab ids.
fn seed_selectors(options: &Map<String, Value>, store: &TabSelectionStore) {
    let Some(selectors) = options.get(SELECTORS_OPTION).and_then(Value::as_object) else {
        return;
    };

    for (tabset, choices) in selectors {
        let first = match choices {
            Value::Object(choices) => choices.keys().next().map(String::as_str),
            Value::Array(choices) => choices.first().and_then(Value::as_str),
            _ => None,
        };
        if let Some(tab_id) = first
            && store.get(tabset).is_none()
        {
            tracing::debug!(tabset = %tabset, tab_id, "Seeding tab selection");
            store.set(tabset, tab_id);
        }
    }
}
