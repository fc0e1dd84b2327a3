//! Deferred page loading.

use std::path::{Path, PathBuf};

use tokio::sync::OnceCell;

use crate::{PageContext, PageError};

/// A page file that is read on first use.
///
/// Until [`load`](Self::load) has completed, [`get`](Self::get) reports the
/// page as not ready. Concurrent loads share a single read.
#[derive(Debug)]
pub struct DeferredPage {
    path: PathBuf,
    context: OnceCell<PageContext>,
}

impl DeferredPage {
    /// Create a loader for the page JSON at `path`. Nothing is read yet.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            context: OnceCell::new(),
        }
    }

    /// Path of the page file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The loaded page, or `None` while it isn't ready.
    #[must_use]
    pub fn get(&self) -> Option<&PageContext> {
        self.context.get()
    }

    /// Read and parse the page, once.
    ///
    /// A failed load leaves the page not ready, so it can be retried.
    pub async fn load(&self) -> Result<&PageContext, PageError> {
        self.context
            .get_or_try_init(|| async {
                tracing::debug!(path = %self.path.display(), "Loading page");
                let text = tokio::fs::read_to_string(&self.path)
                    .await
                    .map_err(|source| PageError::Io {
                        path: self.path.clone(),
                        source,
                    })?;
                PageContext::from_json(&text)
            })
            .await
    }

    /// Take the loaded page, if any.
    #[must_use]
    pub fn into_inner(self) -> Option<PageContext> {
        self.context.into_inner()
    }
}
