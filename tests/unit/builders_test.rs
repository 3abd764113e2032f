//! Tests for scheduler builders

use peer_allocation::builders::SchedulerBuilder;
use peer_allocation::config::SchedulerConfig;
use peer_allocation::core::{OverCapacityPolicy, TaskSchedulerPolicy};

#[test]
fn test_builder_defaults() {
    let scheduler = SchedulerBuilder::new().build();
    assert_eq!(scheduler.default_policy(), TaskSchedulerPolicy::Percentage);
}

#[test]
fn test_builder_overrides() {
    let builder = SchedulerBuilder::new()
        .with_default_policy(TaskSchedulerPolicy::Balanced)
        .with_over_capacity(OverCapacityPolicy::LeaveUnplaced);
    assert_eq!(builder.config().over_capacity, OverCapacityPolicy::LeaveUnplaced);
    assert_eq!(builder.build().default_policy(), TaskSchedulerPolicy::Balanced);
}

#[test]
fn test_builder_from_config() {
    let config = SchedulerConfig {
        default_policy: TaskSchedulerPolicy::Balanced,
        over_capacity: OverCapacityPolicy::Reject,
    };
    let scheduler = SchedulerBuilder::from_config(config).build();
    assert_eq!(scheduler.default_policy(), TaskSchedulerPolicy::Balanced);
}
