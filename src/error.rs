use thiserror::Error;

use crate::orchestrator::RunPhase;

/// Fault raised while a simulated run is executing.
///
/// Faults are caught inside the controller and surface only as an
/// error-kind console entry.
#[derive(Error, Debug)]
pub enum ExecutionFault {
    #[error("suspension failed during {phase}: {reason}")]
    Suspend { phase: RunPhase, reason: String },

    #[error("run task failed: {0}")]
    TaskJoin(String),
}
