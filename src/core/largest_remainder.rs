//! Largest remainder apportionment of a peer budget across task shares.

use std::cmp::Ordering;

use crate::core::share::{total_share, Share, TaskAllocation, TaskShare};
use crate::core::ScheduleError;

/// Apportion `n` peers across `shares`, which must sum to exactly 100 percent.
///
/// Every task first receives the floor of `pct / 100 * n`. The peers left
/// over go, one each, to the tasks with the largest fractional remainders;
/// equal remainders are ordered by task id so the result never depends on the
/// order of `shares`. The returned allocations follow the order of `shares`
/// and sum to exactly `n`.
pub fn largest_remainder(
    shares: &[TaskShare],
    n: usize,
) -> Result<Vec<TaskAllocation>, ScheduleError> {
    if shares.is_empty() && n == 0 {
        return Ok(Vec::new());
    }
    let total = total_share(shares);
    if total != Share::HUNDRED {
        return Err(ScheduleError::InvariantViolation(format!(
            "largest remainder input sums to {total}, expected 100%"
        )));
    }

    let mut allocations = Vec::with_capacity(shares.len());
    let mut remainders = Vec::with_capacity(shares.len());
    for (idx, share) in shares.iter().enumerate() {
        let (whole, remainder) = share.pct.apportion(n);
        allocations.push(TaskAllocation {
            task: share.task.clone(),
            pct: share.pct,
            allocation: whole,
        });
        remainders.push((idx, remainder));
    }

    let floored: usize = allocations.iter().map(|a| a.allocation).sum();
    let leftover = n.checked_sub(floored).ok_or_else(|| {
        ScheduleError::InvariantViolation(format!("floored allocations {floored} exceed budget {n}"))
    })?;
    if leftover > shares.len() {
        return Err(ScheduleError::InvariantViolation(format!(
            "leftover {leftover} exceeds task count {}",
            shares.len()
        )));
    }

    remainders.sort_by(|(a_idx, a_rem), (b_idx, b_rem)| match b_rem.cmp(a_rem) {
        Ordering::Equal => shares[*a_idx].task.cmp(&shares[*b_idx].task),
        other => other,
    });
    for (idx, _) in remainders.into_iter().take(leftover) {
        allocations[idx].allocation += 1;
    }

    Ok(allocations)
}
