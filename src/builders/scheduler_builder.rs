//! Builder that turns configuration into a [`Scheduler`].

use anyhow::anyhow;

use crate::config::SchedulerConfig;
use crate::core::{AppResult, OverCapacityPolicy, Scheduler, TaskSchedulerPolicy};

/// Fluent builder for [`Scheduler`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SchedulerBuilder {
    config: SchedulerConfig,
}

impl SchedulerBuilder {
    /// Start from the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing configuration.
    pub const fn from_config(config: SchedulerConfig) -> Self {
        Self { config }
    }

    /// Start from the environment (see [`SchedulerConfig::from_env`]).
    pub fn from_env() -> AppResult<Self> {
        let config = SchedulerConfig::from_env().map_err(|e| anyhow!("scheduler config: {e}"))?;
        Ok(Self::from_config(config))
    }

    /// Policy for jobs that carry no policy tag.
    #[must_use]
    pub const fn with_default_policy(mut self, policy: TaskSchedulerPolicy) -> Self {
        self.config.default_policy = policy;
        self
    }

    /// Behaviour when saturation ceilings cannot hold the peer budget.
    #[must_use]
    pub const fn with_over_capacity(mut self, policy: OverCapacityPolicy) -> Self {
        self.config.over_capacity = policy;
        self
    }

    /// The configuration built so far.
    pub const fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    /// Build the scheduler.
    pub fn build(self) -> Scheduler {
        tracing::debug!(
            "building scheduler: default policy {:?}, over capacity {:?}",
            self.config.default_policy,
            self.config.over_capacity
        );
        Scheduler::new(self.config.default_policy, self.config.over_capacity)
    }
}
