//! Application-level orchestration.
//!
//! This module owns the run lifecycle (the busy flag and the timed strategy
//! run) and the command loop that presentation layers talk to. UI code never
//! spawns runs itself; it sends a [`UiCommand`] and watches the store.

mod controller;

pub(crate) use controller::{Delay, RunController};

use crate::error::ExecutionFault;
use crate::model::LogKind;
use std::fmt;
use tokio::sync::mpsc::UnboundedReceiver;
use tokio::task::JoinHandle;
use tracing::{debug, error, info};

/// Stage of a strategy run at which a suspension happens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunPhase {
    Optimizing,
    Executing,
}

impl fmt::Display for RunPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunPhase::Optimizing => f.write_str("weight optimization"),
            RunPhase::Executing => f.write_str("strategy execution"),
        }
    }
}

/// Commands emitted by UI layers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum UiCommand {
    Start,
    Quit,
}

/// Serve UI commands until `Quit` (or the sender drops).
///
/// Quit waits for an in-flight run to finish so its entries still land in
/// the store; runs cannot be cancelled.
pub(crate) async fn run_command_loop<D: Delay>(
    ctrl: RunController<D>,
    mut cmd_rx: UnboundedReceiver<UiCommand>,
) {
    let mut in_flight: Option<JoinHandle<()>> = None;
    let mut quit_pending = false;

    loop {
        tokio::select! {
            cmd = cmd_rx.recv(), if !quit_pending => {
                match cmd {
                    Some(UiCommand::Start) => {
                        if let Some(handle) = ctrl.start() {
                            info!("run requested");
                            in_flight = Some(handle);
                        }
                    }
                    Some(UiCommand::Quit) | None => {
                        debug!(in_flight = in_flight.is_some(), "quit requested");
                        if in_flight.is_none() {
                            return;
                        }
                        quit_pending = true;
                    }
                }
            }
            // Keep the handle in place until this branch wins so completion is
            // never missed when the command branch is chosen instead.
            done = async {
                match in_flight.as_mut() {
                    Some(h) => h.await,
                    None => futures::future::pending().await,
                }
            } => {
                in_flight = None;
                if let Err(e) = done {
                    let fault = ExecutionFault::TaskJoin(e.to_string());
                    error!(error = %fault, "run task did not complete");
                    ctrl.store().log(LogKind::Error, "Execution failed.");
                }
                if quit_pending {
                    return;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::LabStore;
    use tokio::sync::mpsc;
    use tokio::time::Duration;

    /// Panics at the first suspension.
    struct PanicDelay;

    impl Delay for PanicDelay {
        async fn pause(&self, phase: RunPhase, _duration: Duration) -> Result<(), ExecutionFault> {
            panic!("timer wheel gone during {phase}");
        }
    }

    #[tokio::test(start_paused = true)]
    async fn start_then_quit_waits_for_the_run() {
        let ctrl = RunController::new(LabStore::default());
        let (tx, rx) = mpsc::unbounded_channel();
        let loop_handle = tokio::spawn(run_command_loop(ctrl.clone(), rx));

        tx.send(UiCommand::Start).unwrap();
        tx.send(UiCommand::Start).unwrap();
        tx.send(UiCommand::Quit).unwrap();

        loop_handle.await.unwrap();
        assert!(!ctrl.is_busy());
        assert_eq!(ctrl.store().logs().len(), 3);
        assert_eq!(ctrl.store().notifications().len(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn dropping_sender_when_idle_exits() {
        let ctrl = RunController::new(LabStore::default());
        let (tx, rx) = mpsc::unbounded_channel::<UiCommand>();
        drop(tx);
        run_command_loop(ctrl.clone(), rx).await;
        assert!(ctrl.store().logs().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn second_start_after_completion_runs_again() {
        let ctrl = RunController::new(LabStore::default());
        let (tx, rx) = mpsc::unbounded_channel();
        let loop_handle = tokio::spawn(run_command_loop(ctrl.clone(), rx));

        tx.send(UiCommand::Start).unwrap();
        let settle = Duration::from_millis(10);
        tokio::time::sleep(ctrl.timings().total() + settle).await;
        assert!(!ctrl.is_busy());
        tx.send(UiCommand::Start).unwrap();
        tx.send(UiCommand::Quit).unwrap();
        loop_handle.await.unwrap();

        assert_eq!(ctrl.store().logs().len(), 6);
        assert_eq!(ctrl.store().notifications().len(), 4);
    }

    #[tokio::test(start_paused = true)]
    async fn panicked_run_releases_slot_and_logs_failure() {
        let ctrl = RunController::with_delay(LabStore::default(), PanicDelay);
        let (tx, rx) = mpsc::unbounded_channel();
        let loop_handle = tokio::spawn(run_command_loop(ctrl.clone(), rx));

        tx.send(UiCommand::Start).unwrap();
        tx.send(UiCommand::Quit).unwrap();
        loop_handle.await.unwrap();

        assert!(!ctrl.is_busy());
        let messages: Vec<String> = ctrl
            .store()
            .logs()
            .into_iter()
            .map(|e| e.message)
            .collect();
        assert_eq!(messages, ["Execution failed.", "Starting strategy validation..."]);
        assert!(ctrl.store().notifications().is_empty());
    }

    #[test]
    fn phases_render_for_fault_messages() {
        let fault = ExecutionFault::Suspend {
            phase: RunPhase::Executing,
            reason: "timer dropped".into(),
        };
        assert_eq!(
            fault.to_string(),
            "suspension failed during strategy execution: timer dropped"
        );
    }
}
