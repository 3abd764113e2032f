//! Error types for scheduler operations.

use thiserror::Error;

use crate::core::replica::{JobId, TaskId};

/// Errors produced by scheduler components.
///
/// Every failure is detected at the boundary of the pure computation and
/// returned to the caller; nothing is retried inside the scheduler.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScheduleError {
    /// The job is not present in the replica.
    #[error("unknown job: {0}")]
    UnknownJob(JobId),
    /// The job has no tasks but peers were requested for it.
    #[error("job {job} has no tasks to place {budget} peers on")]
    EmptyPool {
        /// Job being scheduled.
        job: JobId,
        /// Peers that could not be placed.
        budget: usize,
    },
    /// A task of a percentage-scheduled job carries no percentage.
    #[error("task {task} of job {job} has no percentage")]
    MissingPercentage {
        /// Job being scheduled.
        job: JobId,
        /// Task without a percentage.
        task: TaskId,
    },
    /// Saturation ceilings cannot hold the requested number of peers.
    #[error("over capacity: job {job} can hold {capacity} peers but {requested} were requested")]
    OverCapacity {
        /// Job being scheduled.
        job: JobId,
        /// Peers requested.
        requested: usize,
        /// Sum of the ceilings of the job's tasks.
        capacity: usize,
    },
    /// The remaining tasks all have a zero share while peers are left to place.
    #[error("job {job} has {budget} peers left but its remaining tasks have zero share")]
    ZeroShare {
        /// Job being scheduled.
        job: JobId,
        /// Peers left unplaced.
        budget: usize,
    },
    /// Corrupted replica or scheduler bug; the result must not be used.
    #[error("invariant violated: {0}")]
    InvariantViolation(String),
}

/// Application-facing result using anyhow for higher-level contexts.
pub type AppResult<T> = Result<T, anyhow::Error>;
