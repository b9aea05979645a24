//! Absorption solver result types.

use serde::{Deserialize, Serialize};

/// How the fundamental matrix was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "method")]
pub enum Provenance {
    Exact,
    /// Moore-Penrose pseudo-inverse; the result is approximate.
    PseudoInverse,
    /// `(I - Q + epsilon * I)^-1`.
    Regularized { epsilon: f64 },
}

impl Provenance {
    pub fn is_approximate(&self) -> bool {
        !matches!(self, Self::Exact)
    }
}

/// Absorption probabilities from `Start`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Absorption {
    pub conversion_probability: f64,
    pub null_probability: f64,
    pub provenance: Provenance,
    pub n_states: usize,
    pub n_transient: usize,
}
