//! Saturation-aware allocation: pin tasks at their ceilings and re-solve the rest.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::core::largest_remainder::largest_remainder;
use crate::core::replica::{JobId, Saturation, TaskId};
use crate::core::rescale::rescale;
use crate::core::share::{total_share, TaskAllocation, TaskShare};
use crate::core::ScheduleError;

/// What to do when saturation ceilings cannot hold the whole peer budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverCapacityPolicy {
    /// Fail with [`ScheduleError::OverCapacity`] or [`ScheduleError::ZeroShare`].
    #[default]
    Reject,
    /// Fill every task to its ceiling and leave the rest of the budget unplaced.
    LeaveUnplaced,
}

/// Allocate `budget` peers across `shares` without exceeding any ceiling.
///
/// Each round rescales the remaining candidates to 100 percent and runs the
/// largest remainder method. Tasks allocated beyond their ceiling are pinned
/// at the ceiling and leave the pool, and the next round splits what is left
/// of the budget among the others. Every round either finishes or removes at
/// least one candidate, so there are at most `shares.len()` rounds.
///
/// `shares` need not sum to 100; they are rescaled on the first round. The
/// result is ordered by task id.
pub fn resolve_saturation<F>(
    job: &JobId,
    shares: Vec<TaskShare>,
    budget: usize,
    ceiling: F,
    policy: OverCapacityPolicy,
) -> Result<Vec<TaskAllocation>, ScheduleError>
where
    F: Fn(&TaskId) -> Saturation,
{
    let mut candidates = shares;
    let mut remaining = budget;
    let mut unplaced = 0;
    let mut placed: Vec<TaskAllocation> = Vec::with_capacity(candidates.len());
    let mut round = 0_usize;

    loop {
        round += 1;
        if remaining == 0 {
            placed.extend(candidates.drain(..).map(|share| TaskAllocation {
                task: share.task,
                pct: share.pct,
                allocation: 0,
            }));
            break;
        }

        if candidates.is_empty() {
            if policy == OverCapacityPolicy::Reject {
                return Err(ScheduleError::OverCapacity {
                    job: job.clone(),
                    requested: budget,
                    capacity: budget - remaining,
                });
            }
            tracing::warn!(
                "job {} saturated: {} of {} peers left unplaced",
                job,
                remaining,
                budget
            );
            unplaced = remaining;
            break;
        }

        if total_share(&candidates).is_zero() {
            if policy == OverCapacityPolicy::Reject {
                return Err(ScheduleError::ZeroShare {
                    job: job.clone(),
                    budget: remaining,
                });
            }
            tracing::warn!(
                "job {}: remaining tasks have zero share, {} peers left unplaced",
                job,
                remaining
            );
            placed.extend(candidates.drain(..).map(|share| TaskAllocation {
                task: share.task,
                pct: share.pct,
                allocation: 0,
            }));
            unplaced = remaining;
            break;
        }

        let scaled = rescale(&candidates)?;
        let (oversaturated, fitting): (Vec<_>, Vec<_>) = largest_remainder(&scaled, remaining)?
            .into_iter()
            .partition(|a| ceiling(&a.task).is_exceeded_by(a.allocation));

        if oversaturated.is_empty() {
            placed.extend(fitting);
            break;
        }

        let mut pinned = BTreeSet::new();
        for mut allocation in oversaturated {
            let Saturation::Bounded(max) = ceiling(&allocation.task) else {
                return Err(ScheduleError::InvariantViolation(format!(
                    "unbounded task {} reported as oversaturated",
                    allocation.task
                )));
            };
            tracing::debug!(
                "job {} round {}: task {} pinned at {} (wanted {})",
                job,
                round,
                allocation.task,
                max,
                allocation.allocation
            );
            allocation.allocation = max;
            remaining = remaining.checked_sub(max).ok_or_else(|| {
                ScheduleError::InvariantViolation(format!(
                    "pinning task {} at {max} overdraws the budget",
                    allocation.task
                ))
            })?;
            pinned.insert(allocation.task.clone());
            placed.push(allocation);
        }
        candidates.retain(|share| !pinned.contains(&share.task));
    }

    let total: usize = placed.iter().map(|a| a.allocation).sum();
    if total + unplaced != budget {
        tracing::error!("job {}: placed {} of {} peers", job, total, budget);
        return Err(ScheduleError::InvariantViolation(format!(
            "job {job}: allocations sum to {total}, expected {}",
            budget - unplaced
        )));
    }
    if let Some(bad) = placed
        .iter()
        .find(|a| ceiling(&a.task).is_exceeded_by(a.allocation))
    {
        tracing::error!("job {}: task {} above its ceiling", job, bad.task);
        return Err(ScheduleError::InvariantViolation(format!(
            "job {job}: task {} allocated {} beyond its ceiling",
            bad.task, bad.allocation
        )));
    }

    placed.sort_by(|a, b| a.task.cmp(&b.task));
    Ok(placed)
}
