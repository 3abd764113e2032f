//! Tests for the replica snapshot and its JSON form

use peer_allocation::core::{
    JobId, PeerId, Percentage, Replica, ReplicaView, Saturation, TaskId, TaskSchedulerPolicy,
};

const SNAPSHOT: &str = r#"{
    "tasks": { "job": ["in", "map", "out"] },
    "task_percentages": { "job": { "in": 20, "map": "62.5", "out": "17.5" } },
    "task_saturation": { "job": { "in": 1 } },
    "allocations": { "job": { "in": ["p1"], "map": ["p2", "p3"], "out": [] } },
    "task_schedulers": { "job": "percentage" }
}"#;

#[test]
fn test_snapshot_accessors() {
    let replica = Replica::from_json_str(SNAPSHOT).unwrap();
    let job = JobId::from("job");
    assert_eq!(replica.tasks(&job).map(<[TaskId]>::len), Some(3));
    assert_eq!(
        replica.task_percentage(&job, &"map".into()),
        Some(Percentage::from_micros(625_000))
    );
    assert_eq!(replica.task_saturation(&job, &"in".into()), Saturation::Bounded(1));
    assert_eq!(replica.task_saturation(&job, &"map".into()), Saturation::Unbounded);
    assert_eq!(
        replica.task_peers(&job, &"map".into()),
        &[PeerId::from("p2"), PeerId::from("p3")]
    );
    assert_eq!(replica.task_scheduler(&job), Some(TaskSchedulerPolicy::Percentage));
}

#[test]
fn test_snapshot_round_trips_through_json() {
    let replica = Replica::from_json_str(SNAPSHOT).unwrap();
    let json = serde_json::to_string(&replica).unwrap();
    assert_eq!(Replica::from_json_str(&json).unwrap(), replica);
}

#[test]
fn test_bad_saturation_keyword() {
    let json = r#"{ "task_saturation": { "job": { "a": "lots" } } }"#;
    assert!(Replica::from_json_str(json).is_err());
}
