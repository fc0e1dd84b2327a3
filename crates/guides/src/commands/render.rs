//! `guides render` command implementation.

use std::path::PathBuf;
use std::sync::Arc;

use clap::Args;
use guides_config::{CliSettings, Config};
use guides_page::PageLayout;
use guides_renderer::{AnalyticsSink, NullSink, TabSelectionStore, TracingSink};

use super::load_page;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the render command.
#[derive(Args)]
pub(crate) struct RenderArgs {
    /// Page JSON produced by the build.
    page: PathBuf,

    /// Path to configuration file (default: auto-discover guides.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Pre-select a tab, as TABSET=TABID. May be repeated.
    #[arg(short, long = "select", value_name = "TABSET=TABID", value_parser = parse_selection)]
    selections: Vec<(String, String)>,

    /// Disable analytics reporting.
    #[arg(long)]
    no_analytics: bool,
}

impl RenderArgs {
    /// Execute the render command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration or the page fails to load, or the
    /// page can't be rendered.
    pub(crate) async fn execute(self, output: &Output) -> Result<(), CliError> {
        let cli_settings = CliSettings {
            analytics_enabled: self.no_analytics.then_some(false),
            ..CliSettings::default()
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;

        let context = load_page(&self.page).await?;
        tracing::info!(
            slug = context.slug(),
            title = context.page_title().as_deref().unwrap_or_default(),
            site = context.site_title(&config.site.title),
            prefix = %config.site.path_prefix(),
            "Rendering page"
        );

        let analytics: Arc<dyn AnalyticsSink> = if config.analytics.enabled {
            Arc::new(TracingSink)
        } else {
            Arc::new(NullSink)
        };
        let layout = PageLayout::new(context, TabSelectionStore::new(), analytics);

        for (tabset, tab_id) in &self.selections {
            if !layout.select_tab(tabset, tab_id)? {
                output.warning(&format!("No tab '{tab_id}' in tabset '{tabset}'"));
            }
        }

        output.result(&layout.render_html()?)?;
        Ok(())
    }
}

/// Parse a `TABSET=TABID` pair.
fn parse_selection(value: &str) -> Result<(String, String), String> {
    match value.split_once('=') {
        Some((tabset, tab_id)) if !tabset.is_empty() && !tab_id.is_empty() => {
            Ok((tabset.to_owned(), tab_id.to_owned()))
        }
        _ => Err(format!("expected TABSET=TABID, got '{value}'")),
    }
}
