//! Path builder result types.

use serde::{Deserialize, Serialize};

use funnel_core::FunnelPath;

/// What became of one record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathOutcome {
    Kept(FunnelPath),
    /// Length outside `[min_path_length, max_path_length]`.
    OutOfBounds { length: usize },
    /// The category label contains the path separator.
    SeparatorCollision { category: String },
}

/// Kept/dropped counters for one batch of records.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildStats {
    pub total: usize,
    pub kept: usize,
    pub out_of_bounds: usize,
    pub separator_collisions: usize,
}

impl BuildStats {
    pub fn dropped(&self) -> usize {
        self.out_of_bounds + self.separator_collisions
    }

    pub(crate) fn record(&mut self, outcome: &PathOutcome) {
        self.total += 1;
        match outcome {
            PathOutcome::Kept(_) => self.kept += 1,
            PathOutcome::OutOfBounds { .. } => self.out_of_bounds += 1,
            PathOutcome::SeparatorCollision { .. } => self.separator_collisions += 1,
        }
    }
}
