//! `guides toc` command implementation.

use std::path::PathBuf;
use std::sync::Arc;

use clap::Args;
use guides_page::PageLayout;
use guides_renderer::{NullSink, TabSelectionStore};

use super::load_page;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the toc command.
#[derive(Args)]
pub(crate) struct TocArgs {
    /// Page JSON produced by the build.
    page: PathBuf,

    /// Maximum heading level to list (default: all levels).
    #[arg(short, long)]
    depth: Option<usize>,
}

impl TocArgs {
    /// Execute the toc command.
    ///
    /// # Errors
    ///
    /// Returns an error if the page fails to load.
    pub(crate) async fn execute(self, output: &Output) -> Result<(), CliError> {
        let context = load_page(&self.page).await?;
        let layout = PageLayout::new(context, TabSelectionStore::new(), Arc::new(NullSink));

        let toc = layout.toc(self.depth);
        output.result(&serde_json::to_string_pretty(&toc)?)?;
        Ok(())
    }
}
