//! Removal-effect configuration.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct RemovalConfig {
    /// Leading stages left out of auto-generated candidate nodes. Default: 1,
    /// since nearly every path enters through the first stage.
    pub candidate_skip_stages: usize,
}

impl Default for RemovalConfig {
    fn default() -> Self {
        Self {
            candidate_skip_stages: 1,
        }
    }
}
