mod catalog;
mod cli;
mod error;
mod logging;
mod model;
mod orchestrator;
mod store;
mod text_summary;
#[cfg(feature = "tui")]
mod tui;

use anyhow::Result;
use clap::Parser;
use logging::LogDestination;

#[tokio::main]
async fn main() -> Result<()> {
    let args = cli::Cli::parse();

    let destination = match (args.log_file.as_deref(), args.is_headless()) {
        (Some(path), _) => LogDestination::File(path),
        (None, true) => LogDestination::Stderr,
        // The TUI owns the terminal.
        (None, false) => LogDestination::Off,
    };
    logging::init(destination, &args.log_level)?;

    cli::run(args).await
}
