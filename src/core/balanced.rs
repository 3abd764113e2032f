//! Balanced task scheduler: every task gets an equal share of the job's peers.

use crate::core::policy::TaskScheduler;
use crate::core::replica::{JobId, ReplicaView, TaskId};
use crate::core::saturation::OverCapacityPolicy;
use crate::core::share::{Share, TaskShare};
use crate::core::ScheduleError;

/// Splits peers evenly; peers that do not divide evenly go to the lowest task ids.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BalancedScheduler {
    over_capacity: OverCapacityPolicy,
}

impl BalancedScheduler {
    /// Create a scheduler with the given over-capacity behaviour.
    pub const fn new(over_capacity: OverCapacityPolicy) -> Self {
        Self { over_capacity }
    }
}

impl TaskScheduler for BalancedScheduler {
    fn over_capacity(&self) -> OverCapacityPolicy {
        self.over_capacity
    }

    fn shares<V>(&self, _view: &V, _job: &JobId, tasks: &[TaskId]) -> Result<Vec<TaskShare>, ScheduleError>
    where
        V: ReplicaView + ?Sized,
    {
        let count = tasks.len() as u128;
        Ok(tasks
            .iter()
            .map(|task| TaskShare::new(task.clone(), Share::new(100, count)))
            .collect())
    }
}
