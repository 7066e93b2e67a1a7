//! Diagnostic logging setup.
//!
//! Headless modes log to stderr. The TUI owns the terminal, so it only logs
//! when a file is given.

use anyhow::{Context, Result};
use std::fs::File;
use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

pub enum LogDestination<'a> {
    Stderr,
    File(&'a Path),
    Off,
}

/// `RUST_LOG` wins over the CLI level when set.
fn build_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level))
}

pub fn init(destination: LogDestination<'_>, level: &str) -> Result<()> {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(build_filter(level))
        .with_target(false);

    match destination {
        LogDestination::Off => Ok(()),
        LogDestination::Stderr => builder
            .with_writer(std::io::stderr)
            .try_init()
            .map_err(|e| anyhow::anyhow!("install stderr logger: {e}")),
        LogDestination::File(path) => {
            let file = File::create(path)
                .with_context(|| format!("create log file {}", path.display()))?;
            builder
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .try_init()
                .map_err(|e| anyhow::anyhow!("install file logger: {e}"))
        }
    }
}
