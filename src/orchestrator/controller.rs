//! Run lifecycle controller.
//!
//! Owns the busy flag and drives the two-stage simulated strategy run,
//! writing console entries and notifications into the shared store.

use super::RunPhase;
use crate::error::ExecutionFault;
use crate::model::{LogKind, NotificationKind};
use crate::store::LabStore;
use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::task::JoinHandle;
use tokio::time::Duration;
use tracing::{debug, error, info};

/// Fixed suspension lengths between run stages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunTimings {
    pub optimize: Duration,
    pub execute: Duration,
}

impl Default for RunTimings {
    fn default() -> Self {
        Self {
            optimize: Duration::from_millis(2000),
            execute: Duration::from_millis(1500),
        }
    }
}

impl RunTimings {
    pub fn total(&self) -> Duration {
        self.optimize + self.execute
    }
}

/// Suspension point used between run stages.
pub trait Delay: Send + Sync + 'static {
    fn pause(
        &self,
        phase: RunPhase,
        duration: Duration,
    ) -> impl Future<Output = Result<(), ExecutionFault>> + Send;
}

/// Production delay backed by the Tokio timer.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioDelay;

impl Delay for TokioDelay {
    async fn pause(&self, _phase: RunPhase, duration: Duration) -> Result<(), ExecutionFault> {
        tokio::time::sleep(duration).await;
        Ok(())
    }
}

/// Single-slot in-flight token. Releases the busy flag when dropped,
/// whichever way the run ends.
struct BusyGuard {
    busy: Arc<AtomicBool>,
}

impl BusyGuard {
    fn acquire(busy: &Arc<AtomicBool>) -> Option<Self> {
        busy.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self { busy: busy.clone() })
    }
}

impl Drop for BusyGuard {
    fn drop(&mut self) {
        self.busy.store(false, Ordering::Release);
        debug!("run slot released");
    }
}

pub struct RunController<D: Delay = TokioDelay> {
    store: LabStore,
    busy: Arc<AtomicBool>,
    timings: RunTimings,
    delay: Arc<D>,
}

impl<D: Delay> Clone for RunController<D> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            busy: self.busy.clone(),
            timings: self.timings,
            delay: self.delay.clone(),
        }
    }
}

impl RunController<TokioDelay> {
    pub fn new(store: LabStore) -> Self {
        Self::with_delay(store, TokioDelay)
    }
}

impl<D: Delay> RunController<D> {
    pub fn with_delay(store: LabStore, delay: D) -> Self {
        Self {
            store,
            busy: Arc::new(AtomicBool::new(false)),
            timings: RunTimings::default(),
            delay: Arc::new(delay),
        }
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    pub fn store(&self) -> &LabStore {
        &self.store
    }

    pub fn timings(&self) -> RunTimings {
        self.timings
    }

    /// Start a run in the background. Returns `None` without touching the
    /// store when a run is already in flight.
    ///
    /// The busy flag is set before this returns.
    pub fn start(&self) -> Option<JoinHandle<()>> {
        let Some(guard) = BusyGuard::acquire(&self.busy) else {
            debug!("start ignored: run already in progress");
            return None;
        };
        let ctrl = self.clone();
        Some(tokio::spawn(async move { ctrl.execute(guard).await }))
    }

    /// Run the sequence inline. Returns `false` if another run held the slot.
    pub async fn run(&self) -> bool {
        match BusyGuard::acquire(&self.busy) {
            Some(guard) => {
                self.execute(guard).await;
                true
            }
            None => {
                debug!("run ignored: run already in progress");
                false
            }
        }
    }

    async fn execute(&self, guard: BusyGuard) {
        info!("strategy run started");
        match self.sequence().await {
            Ok(()) => info!("strategy run finished"),
            Err(e) => {
                error!(error = %e, "strategy run faulted");
                self.store.log(LogKind::Error, "Execution failed.");
            }
        }
        drop(guard);
    }

    async fn sequence(&self) -> Result<(), ExecutionFault> {
        self.store.log(LogKind::Info, "Starting strategy validation...");

        self.delay
            .pause(RunPhase::Optimizing, self.timings.optimize)
            .await?;

        self.store.log(LogKind::Success, "Neural weights optimized.");
        self.store.notify(
            "Optimization Complete",
            "Neural weights optimized.",
            NotificationKind::Success,
        );

        self.delay
            .pause(RunPhase::Executing, self.timings.execute)
            .await?;

        self.store.log(LogKind::Success, "Strategy execution completed.");
        self.store.notify(
            "Simulation Finished",
            "Backtest passed all parameters.",
            NotificationKind::Info,
        );
        Ok(())
    }
}
