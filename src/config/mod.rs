//! Configuration models for the scheduler.

pub mod scheduler;

pub use scheduler::{SchedulerConfig, DEFAULT_POLICY_ENV, OVER_CAPACITY_ENV};
