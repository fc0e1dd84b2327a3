//! CLI command implementations.

pub(crate) mod footnotes;
pub(crate) mod render;
pub(crate) mod toc;

use std::path::Path;

use guides_page::{DeferredPage, PageContext};

use crate::error::CliError;

pub(crate) use footnotes::FootnotesArgs;
pub(crate) use render::RenderArgs;
pub(crate) use toc::TocArgs;

/// Read and parse a page JSON file.
async fn load_page(path: &Path) -> Result<PageContext, CliError> {
    let page = DeferredPage::new(path);
    page.load().await?;
    // A successful load leaves the page ready.
    Ok(page.into_inner().unwrap_or_default())
}
