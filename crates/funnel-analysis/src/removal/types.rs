//! Removal-effect result types.

use serde::{Deserialize, Serialize};

use crate::absorption::{Absorption, Provenance};

/// Effect of removing one node, in percentage points of conversion probability.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemovalEffect {
    pub node: String,
    /// `round((baseline - post_removal) * 100, 2)`, exact halves to even.
    pub effect_pp: f64,
    pub post_removal_probability: f64,
    pub provenance: Provenance,
}

/// A node whose trial produced no number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailedNode {
    pub node: String,
    pub code: String,
    pub message: String,
}

/// Removal effects for one dimension. Effects carry no ordering guarantee.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RemovalReport {
    /// `None` only when there were no paths to analyse.
    pub baseline: Option<Absorption>,
    pub effects: Vec<RemovalEffect>,
    /// Requested nodes absent from the state universe.
    pub skipped_absent: Vec<String>,
    pub failed_nodes: Vec<FailedNode>,
}

impl RemovalReport {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn effect_for(&self, node: &str) -> Option<&RemovalEffect> {
        self.effects.iter().find(|e| e.node == node)
    }

    /// `(label, pp)` pairs for presentation.
    pub fn pairs(&self) -> Vec<(String, f64)> {
        self.effects
            .iter()
            .map(|e| (e.node.clone(), e.effect_pp))
            .collect()
    }
}
