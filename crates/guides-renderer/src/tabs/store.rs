//! Page-scoped tab selection state.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError, RwLock, mpsc};

/// A change of the store's selections.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SelectionChange {
    /// The active tab of one tabset changed.
    Selected {
        /// Tabset name.
        tabset: String,
        /// Newly active tab id.
        tab_id: String,
    },
    /// Every selection was forgotten.
    Cleared,
}

/// Receiver for selection changes.
///
/// Obtained from [`TabSelectionStore::subscribe`]. Only changes made after
/// subscribing are delivered.
pub struct SelectionReceiver {
    rx: mpsc::Receiver<SelectionChange>,
}

impl SelectionReceiver {
    /// Try to receive a change without blocking.
    #[must_use]
    pub fn try_recv(&self) -> Option<SelectionChange> {
        self.rx.try_recv().ok()
    }

    /// Drain every change received so far.
    pub fn drain(&self) -> impl Iterator<Item = SelectionChange> + '_ {
        self.rx.try_iter()
    }
}

/// Active tab per tabset name, shared by every tab group on a page.
///
/// Cloning yields another handle to the same state: a selection made through
/// one handle is visible to all others on the next read. Create one store per
/// page and [`clear`](Self::clear) it on navigation.
///
/// # Example
///
/// ```
/// use guides_renderer::TabSelectionStore;
///
/// let store = TabSelectionStore::new();
/// let other = store.clone();
///
/// store.set("platforms", "linux");
/// assert_eq!(other.get("platforms").as_deref(), Some("linux"));
/// ```
#[derive(Clone, Default)]
pub struct TabSelectionStore {
    active: Arc<RwLock<HashMap<String, String>>>,
    subscribers: Arc<Mutex<Vec<mpsc::Sender<SelectionChange>>>>,
}

impl TabSelectionStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the active tab id of a tabset.
    #[must_use]
    pub fn get(&self, tabset: &str) -> Option<String> {
        self.active
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(tabset)
            .cloned()
    }

    /// Make `tab_id` the active tab of `tabset`.
    ///
    /// Subscribers are notified only when the active tab actually changes.
    /// Returns `true` in that case.
    pub fn set(&self, tabset: &str, tab_id: &str) -> bool {
        {
            let mut active = self.active.write().unwrap_or_else(PoisonError::into_inner);
            if active.get(tabset).map(String::as_str) == Some(tab_id) {
                return false;
            }
            active.insert(tabset.to_owned(), tab_id.to_owned());
        }

        tracing::debug!(tabset, tab_id, "Active tab changed");
        self.notify(&SelectionChange::Selected {
            tabset: tabset.to_owned(),
            tab_id: tab_id.to_owned(),
        });
        true
    }

    /// Subscribe to selection changes.
    #[must_use]
    pub fn subscribe(&self) -> SelectionReceiver {
        let (tx, rx) = mpsc::channel();
        self.subscribers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(tx);
        SelectionReceiver { rx }
    }

    /// Forget every selection.
    ///
    /// Subscribers receive [`SelectionChange::Cleared`] when there was
    /// anything to forget.
    pub fn clear(&self) {
        {
            let mut active = self.active.write().unwrap_or_else(PoisonError::into_inner);
            if active.is_empty() {
                return;
            }
            active.clear();
        }

        tracing::debug!("Tab selections cleared");
        self.notify(&SelectionChange::Cleared);
    }

    /// Copy of the current selections.
    #[must_use]
    pub fn snapshot(&self) -> HashMap<String, String> {
        self.active
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn notify(&self, change: &SelectionChange) {
        let mut subscribers = self
            .subscribers
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        // Dropped receivers are pruned here.
        subscribers.retain(|tx| tx.send(change.clone()).is_ok());
    }
}
