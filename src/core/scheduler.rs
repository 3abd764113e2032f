//! Policy dispatch: route each job to the task scheduler named by its policy tag.

use std::collections::BTreeMap;

use crate::core::balanced::BalancedScheduler;
use crate::core::percentage::PercentageScheduler;
use crate::core::policy::{TaskScheduler, TaskSchedulerPolicy};
use crate::core::replica::{JobId, PeerId, ReplicaView, TaskId};
use crate::core::saturation::OverCapacityPolicy;
use crate::core::ScheduleError;

/// Entry point used by the coordinator.
///
/// Stateless apart from its configuration, so one instance can serve every
/// snapshot and be shared across threads.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Scheduler {
    default_policy: TaskSchedulerPolicy,
    balanced: BalancedScheduler,
    percentage: PercentageScheduler,
}

impl Scheduler {
    /// Create a dispatcher.
    pub const fn new(default_policy: TaskSchedulerPolicy, over_capacity: OverCapacityPolicy) -> Self {
        Self {
            default_policy,
            balanced: BalancedScheduler::new(over_capacity),
            percentage: PercentageScheduler::new(over_capacity),
        }
    }

    /// Policy applied to jobs that carry no policy tag.
    pub const fn default_policy(&self) -> TaskSchedulerPolicy {
        self.default_policy
    }

    /// Policy that applies to `job` in `view`.
    pub fn policy_for<V>(&self, view: &V, job: &JobId) -> TaskSchedulerPolicy
    where
        V: ReplicaView + ?Sized,
    {
        view.task_scheduler(job).unwrap_or(self.default_policy)
    }

    /// Number of peers each task of `job` should have out of `n`.
    pub fn distribute<V>(&self, view: &V, job: &JobId, n: usize) -> Result<BTreeMap<TaskId, usize>, ScheduleError>
    where
        V: ReplicaView + ?Sized,
    {
        match self.policy_for(view, job) {
            TaskSchedulerPolicy::Balanced => self.balanced.distribute(view, job, n),
            TaskSchedulerPolicy::Percentage => self.percentage.distribute(view, job, n),
        }
    }

    /// Peers to revoke so `job` shrinks by `n`.
    pub fn select_drops<V>(&self, view: &V, job: &JobId, n: usize) -> Result<Vec<PeerId>, ScheduleError>
    where
        V: ReplicaView + ?Sized,
    {
        match self.policy_for(view, job) {
            TaskSchedulerPolicy::Balanced => self.balanced.select_drops(view, job, n),
            TaskSchedulerPolicy::Percentage => self.percentage.select_drops(view, job, n),
        }
    }
}
