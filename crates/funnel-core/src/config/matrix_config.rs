//! Transition matrix representation settings.

use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_SPARSE_THRESHOLD;

/// Which transition matrix representation to assemble.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum MatrixBackend {
    /// Dense below `sparse_threshold` states, sparse at or above it.
    #[default]
    Auto,
    Dense,
    Sparse,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct MatrixConfig {
    pub backend: MatrixBackend,
    pub sparse_threshold: usize,
}

impl Default for MatrixConfig {
    fn default() -> Self {
        Self {
            backend: MatrixBackend::Auto,
            sparse_threshold: DEFAULT_SPARSE_THRESHOLD,
        }
    }
}

impl MatrixConfig {
    /// Returns whether a universe of `n_states` should use the sparse representation.
    pub fn use_sparse(&self, n_states: usize) -> bool {
        match self.backend {
            MatrixBackend::Dense => false,
            MatrixBackend::Sparse => true,
            MatrixBackend::Auto => n_states >= self.sparse_threshold,
        }
    }
}
