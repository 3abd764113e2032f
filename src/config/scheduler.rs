//! Scheduler configuration structures.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::core::{OverCapacityPolicy, TaskSchedulerPolicy};

/// Environment variable naming the policy for untagged jobs.
pub const DEFAULT_POLICY_ENV: &str = "PEER_SCHEDULER_DEFAULT_POLICY";
/// Environment variable naming the over-capacity behaviour.
pub const OVER_CAPACITY_ENV: &str = "PEER_SCHEDULER_OVER_CAPACITY";

/// Root scheduler configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SchedulerConfig {
    /// Policy for jobs that carry no policy tag.
    pub default_policy: TaskSchedulerPolicy,
    /// Behaviour when saturation ceilings cannot hold the peer budget.
    pub over_capacity: OverCapacityPolicy,
}

impl SchedulerConfig {
    /// Parse scheduler configuration from a JSON string.
    pub fn from_json_str(input: &str) -> Result<Self, String> {
        serde_json::from_str(input).map_err(|e| format!("parse error: {e}"))
    }

    /// Build configuration from the environment, loading a `.env` file first
    /// if one exists. Unset variables keep their defaults.
    pub fn from_env() -> Result<Self, String> {
        // A missing .env file is not an error.
        let _ = dotenvy::dotenv();
        let mut cfg = Self::default();
        if let Some(policy) = env_value(DEFAULT_POLICY_ENV)? {
            cfg.default_policy = policy;
        }
        if let Some(policy) = env_value(OVER_CAPACITY_ENV)? {
            cfg.over_capacity = policy;
        }
        Ok(cfg)
    }
}

fn env_value<T: DeserializeOwned>(key: &str) -> Result<Option<T>, String> {
    match std::env::var(key) {
        Ok(raw) => serde_json::from_value(serde_json::Value::String(raw.trim().to_owned()))
            .map(Some)
            .map_err(|e| format!("{key} invalid: {e}")),
        Err(std::env::VarError::NotPresent) => Ok(None),
        Err(e) => Err(format!("{key} invalid: {e}")),
    }
}
