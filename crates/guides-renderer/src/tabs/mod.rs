//! Tab groups with synchronized selection.
//!
//! A page may contain many `tabs` directives. Groups that resolve to the same
//! tabset name share one active tab through a [`TabSelectionStore`]:
//!
//! ```text
//! .. tabs::            .. tabs::
//!    tab: shell           tab: compass     -> both named "compass/shell"
//!    tab: compass         tab: shell
//! ```
//!
//! # Architecture
//!
//! - [`anonymous_tabset_name`] derives a name from tab ids when none is configured
//! - [`TabSelectionStore`] holds the active tab per name and notifies subscribers
//! - [`Tabset`] binds one group to its name and implements default selection,
//!   reader selection (reported through an [`AnalyticsSink`]) and hidden tabsets

mod analytics;
mod identity;
mod store;
mod tabset;

pub use analytics::{AnalyticsSink, MemorySink, NullSink, TabSelected, TracingSink};
pub use identity::{anonymous_tabset_name, tab_id};
pub use store::{SelectionChange, SelectionReceiver, TabSelectionStore};
pub use tabset::{TABS_DIRECTIVE, Tabset, TabsetError};
