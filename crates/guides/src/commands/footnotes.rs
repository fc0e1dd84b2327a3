//! `guides footnotes` command implementation.

use std::path::PathBuf;
use std::sync::Arc;

use clap::Args;
use guides_page::PageLayout;
use guides_renderer::{FootnoteIndex, NullSink, TabSelectionStore};
use serde_json::{Value, json};

use super::load_page;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the footnotes command.
#[derive(Args)]
pub(crate) struct FootnotesArgs {
    /// Page JSON produced by the build.
    page: PathBuf,
}

impl FootnotesArgs {
    /// Execute the footnotes command.
    ///
    /// # Errors
    ///
    /// Returns an error if the page fails to load.
    pub(crate) async fn execute(self, output: &Output) -> Result<(), CliError> {
        let context = load_page(&self.page).await?;
        let layout = PageLayout::new(context, TabSelectionStore::new(), Arc::new(NullSink));

        let listing = footnotes_json(layout.footnotes());
        output.result(&serde_json::to_string_pretty(&listing)?)?;
        Ok(())
    }
}

/// Footnotes as a JSON array ordered by label.
fn footnotes_json(index: &FootnoteIndex) -> Value {
    index
        .iter_by_label()
        .map(|(key, entry)| {
            json!({
                "key": key,
                "label": entry.label,
                "references": entry.references,
            })
        })
        .collect()
}
