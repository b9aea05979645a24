//! Absorption solver configuration.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_EPSILON, DEFAULT_SINGULAR_TOLERANCE};
use crate::errors::ConfigError;

/// What to do when `I - Q` is singular or numerically close to it.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum SingularPolicy {
    /// Report no result. Callers must treat absence as undefined, never zero.
    #[default]
    Skip,
    /// Substitute the Moore-Penrose pseudo-inverse; results are approximate.
    PseudoInverse,
    /// Invert `I - Q + epsilon * I` instead.
    Regularize,
}

impl fmt::Display for SingularPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Skip => "skip",
            Self::PseudoInverse => "pseudo_inverse",
            Self::Regularize => "regularize",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SolverConfig {
    pub singular_policy: SingularPolicy,
    /// Diagonal shift used by `SingularPolicy::Regularize`.
    pub epsilon: f64,
    /// Reciprocal condition number below which `I - Q` counts as singular.
    pub singular_tolerance: f64,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            singular_policy: SingularPolicy::Skip,
            epsilon: DEFAULT_EPSILON,
            singular_tolerance: DEFAULT_SINGULAR_TOLERANCE,
        }
    }
}

impl SolverConfig {
    pub fn with_policy(policy: SingularPolicy) -> Self {
        Self {
            singular_policy: policy,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.epsilon.is_finite() || self.epsilon <= 0.0 {
            return Err(ConfigError::invalid("solver.epsilon", "must be finite and positive"));
        }
        if !self.singular_tolerance.is_finite() || self.singular_tolerance < 0.0 {
            return Err(ConfigError::invalid(
                "solver.singular_tolerance",
                "must be finite and non-negative",
            ));
        }
        Ok(())
    }
}
