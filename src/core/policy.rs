//! Task scheduling policies and the operations every policy provides.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::core::replica::{JobId, PeerId, ReplicaView, TaskId};
use crate::core::saturation::{resolve_saturation, OverCapacityPolicy};
use crate::core::share::{TaskAllocation, TaskShare};
use crate::core::ScheduleError;

/// Task scheduler policy tag carried by a job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskSchedulerPolicy {
    /// Equal shares for every task.
    Balanced,
    /// Shares taken from the job's task percentages.
    #[default]
    Percentage,
}

/// A strategy for splitting a job's peers among its tasks.
///
/// Implementations only decide each task's share of the job; pinning at
/// saturation ceilings, distribution and drop selection are shared.
pub trait TaskScheduler {
    /// Behaviour when ceilings cannot hold the whole budget.
    fn over_capacity(&self) -> OverCapacityPolicy;

    /// Shares of `tasks` within `job`. They are rescaled before use, so they
    /// only need to be in the right proportions.
    fn shares<V>(&self, view: &V, job: &JobId, tasks: &[TaskId]) -> Result<Vec<TaskShare>, ScheduleError>
    where
        V: ReplicaView + ?Sized;

    /// Saturation-aware allocation of `budget` peers across all of `job`'s
    /// tasks, ordered by task id.
    fn allocate<V>(&self, view: &V, job: &JobId, budget: usize) -> Result<Vec<TaskAllocation>, ScheduleError>
    where
        V: ReplicaView + ?Sized,
    {
        let tasks = view
            .tasks(job)
            .ok_or_else(|| ScheduleError::UnknownJob(job.clone()))?;
        if tasks.is_empty() && budget > 0 {
            return Err(ScheduleError::EmptyPool {
                job: job.clone(),
                budget,
            });
        }
        let shares = self.shares(view, job, tasks)?;
        resolve_saturation(
            job,
            shares,
            budget,
            |task| view.task_saturation(job, task),
            self.over_capacity(),
        )
    }

    /// Number of peers each task of `job` should have out of `n`.
    fn distribute<V>(&self, view: &V, job: &JobId, n: usize) -> Result<BTreeMap<TaskId, usize>, ScheduleError>
    where
        V: ReplicaView + ?Sized,
    {
        let distribution: BTreeMap<TaskId, usize> = self
            .allocate(view, job, n)?
            .into_iter()
            .map(|a| (a.task, a.allocation))
            .collect();
        tracing::info!("job {}: distributed {} peers over {} tasks", job, n, distribution.len());
        Ok(distribution)
    }

    /// Peers to revoke so `job` shrinks by `n`, keeping the remaining peers
    /// in proportion.
    ///
    /// Each task gives up the most recently added peers beyond its target for
    /// the reduced budget. At most `n` peers are returned, fewer only when the
    /// job holds fewer than `n`. When some tasks sit below their target the
    /// other tasks' surplus exceeds `n`; it is then taken from the largest
    /// surplus first, lower task ids winning ties.
    fn select_drops<V>(&self, view: &V, job: &JobId, n: usize) -> Result<Vec<PeerId>, ScheduleError>
    where
        V: ReplicaView + ?Sized,
    {
        let tasks = view
            .tasks(job)
            .ok_or_else(|| ScheduleError::UnknownJob(job.clone()))?;
        let current: BTreeMap<&TaskId, &[PeerId]> = tasks
            .iter()
            .map(|task| (task, view.task_peers(job, task)))
            .collect();
        let total: usize = current.values().map(|peers| peers.len()).sum();
        let to_drop = n.min(total);
        if to_drop == 0 {
            return Ok(Vec::new());
        }

        let target: BTreeMap<TaskId, usize> = self
            .allocate(view, job, total - to_drop)?
            .into_iter()
            .map(|a| (a.task, a.allocation))
            .collect();

        let mut surplus: Vec<(&TaskId, usize)> = current
            .iter()
            .map(|(task, peers)| {
                let keep = target.get(*task).copied().unwrap_or(0);
                (*task, peers.len().saturating_sub(keep))
            })
            .filter(|(_, extra)| *extra > 0)
            .collect();
        surplus.sort_by(|(a_task, a_extra), (b_task, b_extra)| {
            b_extra.cmp(a_extra).then_with(|| a_task.cmp(b_task))
        });

        let mut left = to_drop;
        let mut counts: BTreeMap<&TaskId, usize> = BTreeMap::new();
        for (task, extra) in surplus {
            if left == 0 {
                break;
            }
            let take = extra.min(left);
            counts.insert(task, take);
            left -= take;
        }
        if left != 0 {
            return Err(ScheduleError::InvariantViolation(format!(
                "job {job}: only {} of {to_drop} peers could be selected for dropping",
                to_drop - left
            )));
        }

        let dropped: Vec<PeerId> = counts
            .into_iter()
            .flat_map(|(task, count)| {
                let peers = current.get(task).copied().unwrap_or_default();
                peers[peers.len() - count..].iter().cloned()
            })
            .collect();
        tracing::info!("job {}: selected {} of {} peers to drop", job, dropped.len(), total);
        Ok(dropped)
    }
}
