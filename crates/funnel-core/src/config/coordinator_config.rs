//! Multi-dimension coordinator configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_MAX_WORKERS, DEFAULT_TASK_TIMEOUT_SECS};
use crate::errors::ConfigError;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum ExecutionMode {
    Sequential,
    #[default]
    Parallel,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct CoordinatorConfig {
    pub mode: ExecutionMode,
    /// Worker count. None = `min(available_parallelism, 4)`.
    pub workers: Option<usize>,
    /// Per-dimension budget in seconds.
    pub task_timeout_secs: u64,
}

impl Default for CoordinatorConfig {
    fn default() -> Self {
        Self {
            mode: ExecutionMode::Parallel,
            workers: None,
            task_timeout_secs: DEFAULT_TASK_TIMEOUT_SECS,
        }
    }
}

impl CoordinatorConfig {
    /// Returns the effective worker count, defaulting to `min(available_parallelism, 4)`.
    pub fn effective_workers(&self) -> usize {
        self.workers.unwrap_or_else(|| {
            std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1)
                .min(DEFAULT_MAX_WORKERS)
        })
    }

    pub fn task_timeout(&self) -> Duration {
        Duration::from_secs(self.task_timeout_secs)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.workers == Some(0) {
            return Err(ConfigError::invalid("coordinator.workers", "must be at least 1"));
        }
        if self.task_timeout_secs == 0 {
            return Err(ConfigError::invalid(
                "coordinator.task_timeout_secs",
                "must be at least 1 second",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_workers_bounded() {
        let workers = CoordinatorConfig::default().effective_workers();
        assert!((1..=DEFAULT_MAX_WORKERS).contains(&workers));
    }

    #[test]
    fn test_zero_workers_rejected() {
        let config = CoordinatorConfig {
            workers: Some(0),
            ..CoordinatorConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
