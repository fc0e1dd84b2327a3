//! Analytics reporting for tab selections.

use std::sync::{Mutex, PoisonError};

/// Event emitted when a reader picks a tab.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(rename_all = "camelCase"))]
pub struct TabSelected {
    /// Chosen tab id.
    pub tab_id: String,
    /// Name of the tabset the tab belongs to.
    pub tab_set: String,
}

impl TabSelected {
    /// Event name used by analytics backends.
    pub const NAME: &'static str = "Tab Selected";
}

/// Destination for analytics events.
///
/// Transport and storage are up to the implementation.
pub trait AnalyticsSink: Send + Sync {
    /// Report a tab selection.
    fn tab_selected(&self, event: &TabSelected);
}

/// Sink that records events as structured log entries.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl AnalyticsSink for TracingSink {
    fn tab_selected(&self, event: &TabSelected) {
        tracing::info!(
            target: "guides::analytics",
            event = TabSelected::NAME,
            tab_id = %event.tab_id,
            tab_set = %event.tab_set,
        );
    }
}

/// Sink that drops every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl AnalyticsSink for NullSink {
    fn tab_selected(&self, _event: &TabSelected) {}
}

/// Sink that keeps events in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    events: Mutex<Vec<TabSelected>>,
}

impl MemorySink {
    /// Create an empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Events reported so far, oldest first.
    #[must_use]
    pub fn events(&self) -> Vec<TabSelected> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl AnalyticsSink for MemorySink {
    fn tab_selected(&self, event: &TabSelected) {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(event.clone());
    }
}
