//! Tab groups and their selection state machine.
//!
//! Every tab group resolves to a tabset name, either configured through the
//! `tabset` option or derived from its tab ids. The active tab lives in the
//! shared [`TabSelectionStore`] under that name, so groups with the same name
//! always show the same tab.

use guides_ast::AstNode;

use super::analytics::{AnalyticsSink, TabSelected};
use super::identity::{anonymous_tabset_name, tab_id};
use super::store::TabSelectionStore;

/// Directive name of tab groups.
pub const TABS_DIRECTIVE: &str = "tabs";

/// Malformed tab group.
///
/// These point at authoring errors upstream and should fail the build rather
/// than render a silently broken page.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum TabsetError {
    /// The group contains no tabs.
    #[error("tab group has no tabs")]
    Empty,
    /// A tab lacks a string `tabid` option.
    #[error("tab {index} has no tabid")]
    MissingTabId {
        /// Position of the tab in the group.
        index: usize,
    },
    /// Selection of a tab that doesn't exist.
    #[error("tab index {index} out of range for tabset '{tabset}' with {len} tabs")]
    IndexOutOfRange {
        /// Tabset name.
        tabset: String,
        /// Requested index.
        index: usize,
        /// Number of tabs.
        len: usize,
    },
}

/// A tab group bound to its tabset name.
///
/// # Example
///
/// ```
/// use guides_ast::AstNode;
/// use guides_renderer::{NullSink, TabSelectionStore, Tabset};
///
/// let tab = |id: &str| AstNode::directive("tab").with_option("tabid", id);
/// let group = AstNode::directive("tabs").with_children(vec![tab("shell"), tab("compass")]);
///
/// let store = TabSelectionStore::new();
/// let tabset = Tabset::from_node(&group).unwrap();
/// assert_eq!(tabset.name(), "compass/shell");
///
/// // Mounting selects the first tab when nothing is selected yet.
/// tabset.mount(&store);
/// assert_eq!(tabset.active(&store).as_deref(), Some("shell"));
///
/// tabset.select(1, &store, &NullSink).unwrap();
/// assert_eq!(tabset.active(&store).as_deref(), Some("compass"));
/// ```
#[derive(Debug)]
pub struct Tabset<'a> {
    name: String,
    tabs: &'a [AstNode],
    tab_ids: Vec<&'a str>,
    hidden: bool,
}

impl<'a> Tabset<'a> {
    /// Bind a `tabs` directive node.
    ///
    /// A missing or empty `tabset` option names the group after its tab ids.
    /// The group is hidden when its `hidden` option is present, unless the
    /// option is literally `false`.
    pub fn from_node(node: &'a AstNode) -> Result<Self, TabsetError> {
        if node.children.is_empty() {
            return Err(TabsetError::Empty);
        }

        let tab_ids = node
            .children
            .iter()
            .enumerate()
            .map(|(index, tab)| tab_id(tab).ok_or(TabsetError::MissingTabId { index }))
            .collect::<Result<Vec<_>, _>>()?;

        let name = node
            .option_str("tabset")
            .filter(|name| !name.is_empty())
            .map_or_else(|| anonymous_tabset_name(&tab_ids), str::to_owned);

        let hidden = node
            .options
            .get("hidden")
            .is_some_and(|value| value.as_bool() != Some(false));

        Ok(Self {
            name,
            tabs: &node.children,
            tab_ids,
            hidden,
        })
    }

    /// Tabset name shared by every group with the same identity.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Tab ids in document order.
    #[must_use]
    pub fn tab_ids(&self) -> &[&'a str] {
        &self.tab_ids
    }

    /// Tab nodes in document order.
    #[must_use]
    pub fn tabs(&self) -> &'a [AstNode] {
        self.tabs
    }

    /// Whether the group renders without a tab selector.
    #[must_use]
    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    /// Apply the default selection for a freshly mounted group.
    ///
    /// Selects the first tab when the tabset has no selection yet, or when the
    /// selected id isn't one of this group's tabs. A valid selection is never
    /// overridden. Returns the tab id selected here, if any.
    pub fn mount(&self, store: &TabSelectionStore) -> Option<&'a str> {
        let current = store.get(&self.name);
        if current
            .as_deref()
            .is_some_and(|id| self.tab_ids.iter().any(|&tab| tab == id))
        {
            return None;
        }

        // `from_node` guarantees at least one tab.
        let first = *self.tab_ids.first()?;
        tracing::debug!(tabset = %self.name, tab_id = first, "Selecting default tab");
        store.set(&self.name, first);
        Some(first)
    }

    /// Active tab id of this tabset.
    #[must_use]
    pub fn active(&self, store: &TabSelectionStore) -> Option<String> {
        store.get(&self.name)
    }

    /// Position of the active tab within this group.
    #[must_use]
    pub fn active_index(&self, store: &TabSelectionStore) -> Option<usize> {
        let active = store.get(&self.name)?;
        self.tab_ids.iter().position(|&id| id == active)
    }

    /// Select the tab at `index` on behalf of the reader.
    ///
    /// Updates the shared store and reports the choice to `analytics`.
    pub fn select(
        &self,
        index: usize,
        store: &TabSelectionStore,
        analytics: &dyn AnalyticsSink,
    ) -> Result<&'a str, TabsetError> {
        let tab_id = *self
            .tab_ids
            .get(index)
            .ok_or_else(|| TabsetError::IndexOutOfRange {
                tabset: self.name.clone(),
                index,
                len: self.tab_ids.len(),
            })?;

        store.set(&self.name, tab_id);
        analytics.tab_selected(&TabSelected {
            tab_id: tab_id.to_owned(),
            tab_set: self.name.clone(),
        });
        Ok(tab_id)
    }

    /// Select a tab by id on behalf of the reader.
    ///
    /// Returns `Ok(None)` when this group has no tab with that id.
    pub fn select_id(
        &self,
        tab_id: &str,
        store: &TabSelectionStore,
        analytics: &dyn AnalyticsSink,
    ) -> Result<Option<&'a str>, TabsetError> {
        match self.tab_ids.iter().position(|&id| id == tab_id) {
            Some(index) => self.select(index, store, analytics).map(Some),
            None => Ok(None),
        }
    }

    /// Content nodes to render for a hidden tabset.
    ///
    /// Only the children of the active tab are returned; every other tab
    /// contributes nothing.
    #[must_use]
    pub fn visible_content(&self, store: &TabSelectionStore) -> &'a [AstNode] {
        let tabs = self.tabs;
        self.active_index(store)
            .and_then(|index| tabs.get(index))
            .map(|tab| tab.children.as_slice())
            .unwrap_or_default()
    }
}
