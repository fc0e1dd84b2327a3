//! CLI error types.

use guides_config::ConfigError;
use guides_page::PageError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Page(#[from] PageError),

    #[error("{0}")]
    Json(#[from] serde_json::Error),
}
