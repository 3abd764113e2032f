//! Tests for error types

use peer_allocation::core::ScheduleError;

#[test]
fn test_unknown_job_error() {
    let err = ScheduleError::UnknownJob("job-1".into());
    assert_eq!(format!("{}", err), "unknown job: job-1");
}

#[test]
fn test_empty_pool_error() {
    let err = ScheduleError::EmptyPool {
        job: "job-1".into(),
        budget: 4,
    };
    assert_eq!(format!("{}", err), "job job-1 has no tasks to place 4 peers on");
}

#[test]
fn test_over_capacity_error() {
    let err = ScheduleError::OverCapacity {
        job: "job-1".into(),
        requested: 10,
        capacity: 7,
    };
    assert_eq!(
        format!("{}", err),
        "over capacity: job job-1 can hold 7 peers but 10 were requested"
    );
}

#[test]
fn test_invariant_violation_error() {
    let err = ScheduleError::InvariantViolation("sum mismatch".to_string());
    assert_eq!(format!("{}", err), "invariant violated: sum mismatch");
}

#[test]
fn test_errors_convert_to_app_result() {
    fn fails() -> peer_allocation::core::AppResult<()> {
        Err(ScheduleError::UnknownJob("job-1".into()))?;
        Ok(())
    }
    let err = fails().unwrap_err();
    assert!(err.downcast_ref::<ScheduleError>().is_some());
}
