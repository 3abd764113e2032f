//! Renormalize a subset of task shares back to 100 percent.

use crate::core::share::{total_share, TaskShare};
use crate::core::ScheduleError;

/// Scale every share by `100 / S`, where `S` is the sum of `shares`.
///
/// Ratios between tasks are preserved exactly. A pool whose shares sum to zero
/// cannot be rescaled; callers short-circuit that case before calling.
pub fn rescale(shares: &[TaskShare]) -> Result<Vec<TaskShare>, ScheduleError> {
    let total = total_share(shares);
    if total.is_zero() {
        return Err(ScheduleError::InvariantViolation(
            "cannot rescale a pool whose shares sum to zero".into(),
        ));
    }
    Ok(shares
        .iter()
        .map(|share| TaskShare {
            task: share.task.clone(),
            pct: share.pct.relative_to(total),
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::replica::Percentage;
    use crate::core::share::Share;

    #[test]
    fn test_rescale_subset() {
        let input = vec![
            TaskShare::new("b", Percentage::whole(25)),
            TaskShare::new("c", Percentage::whole(15)),
        ];
        let result = rescale(&input).unwrap();
        assert_eq!(result[0].pct, Share::new(125, 2));
        assert_eq!(result[1].pct, Share::new(75, 2));
        assert_eq!(total_share(&result), Share::HUNDRED);
    }

    #[test]
    fn test_rescale_full_pool_is_identity() {
        let input = vec![
            TaskShare::new("a", Percentage::whole(60)),
            TaskShare::new("b", Percentage::whole(40)),
        ];
        assert_eq!(rescale(&input).unwrap(), input);
    }

    #[test]
    fn test_rescale_keeps_zero_shares() {
        let input = vec![
            TaskShare::new("a", Percentage::whole(10)),
            TaskShare::new("b", Percentage::ZERO),
        ];
        let result = rescale(&input).unwrap();
        assert_eq!(result[0].pct, Share::HUNDRED);
        assert!(result[1].pct.is_zero());
    }

    #[test]
    fn test_rescale_rejects_zero_total() {
        let input = vec![TaskShare::new("a", Percentage::ZERO)];
        assert!(rescale(&input).is_err());
        assert!(rescale(&[]).is_err());
    }
}
