//! Tests for configuration parsing

use peer_allocation::config::{SchedulerConfig, DEFAULT_POLICY_ENV, OVER_CAPACITY_ENV};
use peer_allocation::core::{OverCapacityPolicy, TaskSchedulerPolicy};

#[test]
fn test_default_config() {
    let config = SchedulerConfig::default();
    assert_eq!(config.default_policy, TaskSchedulerPolicy::Percentage);
    assert_eq!(config.over_capacity, OverCapacityPolicy::Reject);
}

#[test]
fn test_config_from_json() {
    let json = r#"{
        "default_policy": "balanced",
        "over_capacity": "leave_unplaced"
    }"#;

    let config = SchedulerConfig::from_json_str(json).unwrap();
    assert_eq!(config.default_policy, TaskSchedulerPolicy::Balanced);
    assert_eq!(config.over_capacity, OverCapacityPolicy::LeaveUnplaced);
}

#[test]
fn test_config_from_partial_json() {
    let config = SchedulerConfig::from_json_str(r#"{ "over_capacity": "leave_unplaced" }"#).unwrap();
    assert_eq!(config.default_policy, TaskSchedulerPolicy::Percentage);
    assert_eq!(config.over_capacity, OverCapacityPolicy::LeaveUnplaced);
}

#[test]
fn test_config_rejects_unknown_policy() {
    assert!(SchedulerConfig::from_json_str(r#"{ "default_policy": "round_robin" }"#).is_err());
}

#[test]
fn test_config_rejects_unknown_field() {
    assert!(SchedulerConfig::from_json_str(r#"{ "max_units": 10 }"#).is_err());
}

#[test]
fn test_config_from_env() {
    // The only test in this binary touching these variables.
    std::env::set_var(DEFAULT_POLICY_ENV, "balanced");
    std::env::set_var(OVER_CAPACITY_ENV, "leave_unplaced");
    let config = SchedulerConfig::from_env().unwrap();
    assert_eq!(config.default_policy, TaskSchedulerPolicy::Balanced);
    assert_eq!(config.over_capacity, OverCapacityPolicy::LeaveUnplaced);

    std::env::set_var(OVER_CAPACITY_ENV, "sometimes");
    assert!(SchedulerConfig::from_env().is_err());

    std::env::remove_var(DEFAULT_POLICY_ENV);
    std::env::remove_var(OVER_CAPACITY_ENV);
}
