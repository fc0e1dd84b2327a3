//! Page error types.

use std::path::PathBuf;

use guides_renderer::{RenderError, TabsetError};

/// Error returned when a page can't be loaded or rendered.
#[derive(Debug, thiserror::Error)]
pub enum PageError {
    /// Page file couldn't be read.
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        /// Path of the page file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// Page JSON is malformed.
    #[error("Invalid page JSON: {0}")]
    Json(#[from] serde_json::Error),
    /// Tab group on the page is malformed.
    #[error("Invalid tab group: {0}")]
    Tabset(#[from] TabsetError),
    /// Rendering failed.
    #[error(transparent)]
    Render(#[from] RenderError),
}
