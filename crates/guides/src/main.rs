//! Guides CLI - page renderer.
//!
//! Provides commands for:
//! - `render`: Render a page to HTML
//! - `toc`: Print the table of contents of a page
//! - `footnotes`: Print the footnote index of a page

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{FootnotesArgs, RenderArgs, TocArgs};
use error::CliError;
use output::Output;

/// Guides - page renderer.
#[derive(Parser)]
#[command(name = "guides", version, about)]
struct Cli {
    /// Enable verbose output (pipeline steps and analytics events).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a page to HTML.
    Render(RenderArgs),
    /// Print the table of contents of a page as JSON.
    Toc(TocArgs),
    /// Print the footnotes of a page as JSON.
    Footnotes(FootnotesArgs),
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if cli.verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    if let Err(err) = run(cli.command, &output) {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}

fn run(command: Commands, output: &Output) -> Result<(), CliError> {
    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(async {
        match command {
            Commands::Render(args) => args.execute(output).await,
            Commands::Toc(args) => args.execute(output).await,
            Commands::Footnotes(args) => args.execute(output).await,
        }
    })
}
