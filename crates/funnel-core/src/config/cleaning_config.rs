//! Record cleaning configuration.

use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;

/// Controls the jump-order filter applied before path building.
///
/// A record "jumps" when a stage at index `k >= jump_check_from` is present
/// while stage `k - 1` is absent.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct CleaningConfig {
    pub drop_jump_orders: bool,
    /// First stage index whose predecessor must be present. Default: 2, so a
    /// record may enter the second stage without the first.
    pub jump_check_from: usize,
}

impl Default for CleaningConfig {
    fn default() -> Self {
        Self {
            drop_jump_orders: true,
            jump_check_from: 2,
        }
    }
}

impl CleaningConfig {
    pub fn validate(&self, stage_count: usize) -> Result<(), ConfigError> {
        if self.jump_check_from == 0 {
            return Err(ConfigError::invalid(
                "cleaning.jump_check_from",
                "the first stage has no predecessor",
            ));
        }
        if self.drop_jump_orders && self.jump_check_from > stage_count {
            tracing::debug!(
                jump_check_from = self.jump_check_from,
                stage_count,
                "jump check starts past the last stage; no record will be dropped"
            );
        }
        Ok(())
    }
}
