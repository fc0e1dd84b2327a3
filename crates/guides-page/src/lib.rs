//! Page loading and layout for Guides.
//!
//! Turns the JSON a build emits for one page into rendered output:
//!
//! 1. [`DeferredPage`] reads the file asynchronously and reports "not ready"
//!    until it has
//! 2. [`PageContext`] exposes the slug, node tree and titles
//! 3. [`PageLayout`] normalizes the tree once, resolves footnotes and renders
//!    HTML or a table of contents on demand

mod error;
mod layout;
mod loader;
mod page;

pub use error::PageError;
pub use layout::PageLayout;
pub use loader::DeferredPage;
pub use page::PageContext;
