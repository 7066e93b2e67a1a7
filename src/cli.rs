use crate::catalog::seeded_event_log;
use crate::model::StoreChange;
use crate::orchestrator::{run_command_loop, RunController, UiCommand};
use crate::store::{EventLog, LabStore};
use anyhow::{Context, Result};
use clap::Parser;
use std::io::Write;
use tokio::sync::mpsc;

/// Output line routing for stdout/stderr writer.
enum OutputLine {
    Stdout(String),
    Stderr(String),
}

/// Spawn a blocking writer for stdout/stderr to avoid blocking async tasks.
fn spawn_output_writer() -> (
    mpsc::UnboundedSender<OutputLine>,
    tokio::task::JoinHandle<()>,
) {
    let (tx, mut rx) = mpsc::unbounded_channel::<OutputLine>();
    let handle = tokio::task::spawn_blocking(move || {
        let stdout = std::io::stdout();
        let stderr = std::io::stderr();
        let mut out = std::io::LineWriter::new(stdout.lock());
        let mut err = std::io::LineWriter::new(stderr.lock());

        while let Some(line) = rx.blocking_recv() {
            match line {
                OutputLine::Stdout(msg) => {
                    let _ = writeln!(out, "{}", msg);
                }
                OutputLine::Stderr(msg) => {
                    let _ = writeln!(err, "{}", msg);
                }
            }
        }

        let _ = out.flush();
        let _ = err.flush();
    });
    (tx, handle)
}

#[derive(Debug, Parser, Clone)]
#[command(
    name = "strategy-lab",
    version,
    about = "AI Strategy Lab dashboard with a simulated strategy run"
)]
pub struct Cli {
    /// Run the strategy once and print the final console and notifications as JSON (no TUI)
    #[arg(long, conflicts_with = "text")]
    pub json: bool,

    /// Run the strategy once, streaming console lines, then print a text summary (no TUI)
    #[arg(long)]
    pub text: bool,

    /// Start with an empty console and no notifications
    #[arg(long)]
    pub empty: bool,

    /// Start a strategy run as soon as the dashboard opens
    #[arg(long)]
    pub run_on_launch: bool,

    /// Write diagnostics to this file
    #[arg(long)]
    pub log_file: Option<std::path::PathBuf>,

    /// Diagnostic level filter (overridden by RUST_LOG)
    #[arg(long, default_value = "warn")]
    pub log_level: String,
}

impl Cli {
    pub fn is_headless(&self) -> bool {
        self.json || self.text || cfg!(not(feature = "tui"))
    }
}

/// Build the session store, seeded with demo entries unless `--empty`.
pub fn build_store(args: &Cli) -> LabStore {
    let log = if args.empty {
        EventLog::new()
    } else {
        seeded_event_log()
    };
    LabStore::new(log)
}

pub async fn run(args: Cli) -> Result<()> {
    if args.json {
        return run_json(args).await;
    }
    if !args.text {
        #[cfg(feature = "tui")]
        {
            return crate::tui::run(args).await;
        }
    }
    run_text(args).await
}

async fn run_json(args: Cli) -> Result<()> {
    let ctrl = RunController::new(build_store(&args));
    ctrl.run().await;

    let out = serde_json::to_string_pretty(&ctrl.store().snapshot())
        .context("encode store snapshot")?;
    println!("{out}");
    Ok(())
}

/// Print console entries newer than `printed`, oldest first.
fn emit_new_logs(store: &LabStore, printed: &mut u64, out_tx: &mpsc::UnboundedSender<OutputLine>) {
    let fresh: Vec<_> = store
        .logs()
        .into_iter()
        .filter(|e| e.id > *printed)
        .collect();
    for entry in fresh.iter().rev() {
        let _ = out_tx.send(OutputLine::Stderr(entry.to_line()));
    }
    if let Some(newest) = fresh.first() {
        *printed = newest.id;
    }
}

fn run_banner(total: std::time::Duration) -> String {
    format!("Running strategy validation ({:.1}s)", total.as_secs_f64())
}

async fn run_text(args: Cli) -> Result<()> {
    let store = build_store(&args);
    let mut changes = store.subscribe();
    let ctrl = RunController::new(store.clone());
    let (out_tx, out_handle) = spawn_output_writer();

    let mut printed = store.read(|log| log.logs().map(|e| e.id).max().unwrap_or(0));

    let _ = out_tx.send(OutputLine::Stderr(run_banner(ctrl.timings().total())));
    let (cmd_tx, cmd_rx) = mpsc::unbounded_channel::<UiCommand>();
    let _ = cmd_tx.send(UiCommand::Start);
    let _ = cmd_tx.send(UiCommand::Quit);
    let mut loop_handle = tokio::spawn(run_command_loop(ctrl, cmd_rx));

    let loop_res = loop {
        tokio::select! {
            Some(change) = changes.recv() => {
                if change == StoreChange::Logs {
                    emit_new_logs(&store, &mut printed, &out_tx);
                }
            }
            res = &mut loop_handle => break res,
        }
    };
    loop_res.context("command loop task failed")?;
    emit_new_logs(&store, &mut printed, &out_tx);

    let summary = crate::text_summary::build_text_summary(&store.snapshot());
    for line in summary.lines {
        let _ = out_tx.send(OutputLine::Stdout(line));
    }
    drop(out_tx);
    let _ = out_handle.await;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        let argv = std::iter::once("strategy-lab").chain(args.iter().copied());
        Cli::try_parse_from(argv).expect("valid args")
    }

    #[test]
    fn defaults_open_seeded_dashboard() {
        let args = parse(&[]);
        assert!(!args.json && !args.text && !args.empty && !args.run_on_launch);
        assert_eq!(args.log_level, "warn");
        assert_eq!(build_store(&args).logs().len(), 3);
    }

    #[test]
    fn banner_names_validation_and_duration() {
        let total = RunController::new(LabStore::default()).timings().total();
        assert_eq!(run_banner(total), "Running strategy validation (3.5s)");
    }

    #[test]
    fn empty_flag_starts_blank() {
        let store = build_store(&parse(&["--empty"]));
        assert!(store.logs().is_empty());
        assert!(store.notifications().is_empty());
    }

    #[test]
    fn json_and_text_conflict() {
        let res = Cli::try_parse_from(["strategy-lab", "--json", "--text"]);
        assert!(res.is_err());
    }

    #[test]
    fn headless_modes() {
        assert!(parse(&["--json"]).is_headless());
        assert!(parse(&["--text"]).is_headless());
    }

    #[test]
    fn emit_prints_only_new_lines_in_order() {
        let store = LabStore::default();
        let (tx, mut rx) = mpsc::unbounded_channel();
        let first = store.log(crate::model::LogKind::Info, "one");
        let mut printed = first;
        store.log(crate::model::LogKind::Info, "two");
        store.log(crate::model::LogKind::Success, "three");

        emit_new_logs(&store, &mut printed, &tx);
        let mut lines = Vec::new();
        while let Ok(OutputLine::Stderr(l)) = rx.try_recv() {
            lines.push(l);
        }
        assert_eq!(lines.len(), 2);
        assert!(lines[0].ends_with("INFO: two"));
        assert!(lines[1].ends_with("SUCCESS: three"));

        emit_new_logs(&store, &mut printed, &tx);
        assert!(rx.try_recv().is_err());
    }
}
