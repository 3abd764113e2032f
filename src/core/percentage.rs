//! Percentage task scheduler: each task's share of peers is its configured percentage.

use crate::core::policy::TaskScheduler;
use crate::core::replica::{JobId, ReplicaView, TaskId};
use crate::core::saturation::OverCapacityPolicy;
use crate::core::share::{total_share, Share, TaskShare};
use crate::core::ScheduleError;

/// Splits peers in proportion to `task_percentages`, honoring saturation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PercentageScheduler {
    over_capacity: OverCapacityPolicy,
}

impl PercentageScheduler {
    /// Create a scheduler with the given over-capacity behaviour.
    pub const fn new(over_capacity: OverCapacityPolicy) -> Self {
        Self { over_capacity }
    }
}

impl TaskScheduler for PercentageScheduler {
    fn over_capacity(&self) -> OverCapacityPolicy {
        self.over_capacity
    }

    fn shares<V>(&self, view: &V, job: &JobId, tasks: &[TaskId]) -> Result<Vec<TaskShare>, ScheduleError>
    where
        V: ReplicaView + ?Sized,
    {
        let shares = tasks
            .iter()
            .map(|task| {
                view.task_percentage(job, task)
                    .map(|pct| TaskShare::new(task.clone(), pct))
                    .ok_or_else(|| ScheduleError::MissingPercentage {
                        job: job.clone(),
                        task: task.clone(),
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let total = total_share(&shares);
        if !shares.is_empty() && total != Share::HUNDRED {
            tracing::error!("job {}: task percentages sum to {}", job, total);
            return Err(ScheduleError::InvariantViolation(format!(
                "job {job}: task percentages sum to {total}, expected 100%"
            )));
        }
        Ok(shares)
    }
}
