//! Absorption solver errors.

use super::error_code::{self, FunnelErrorCode};
use crate::config::SingularPolicy;

#[derive(Debug, thiserror::Error)]
pub enum SolverError {
    #[error("I - Q is singular ({size}x{size}, rcond {rcond:e}) under policy {policy}")]
    Singular {
        size: usize,
        rcond: f64,
        policy: SingularPolicy,
    },

    #[error("Start state absent from the transient set")]
    MissingStartState,

    #[error("pseudo-inverse failed: {reason}")]
    PseudoInverseFailed { reason: String },

    #[error("regularized inverse failed with epsilon {epsilon:e}")]
    RegularizationFailed { epsilon: f64 },

    #[error("matrix is {rows}x{cols}, state index has {states} states")]
    DimensionMismatch {
        rows: usize,
        cols: usize,
        states: usize,
    },
}

impl FunnelErrorCode for SolverError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Singular { .. } => error_code::SINGULAR_MATRIX,
            Self::MissingStartState => error_code::MISSING_START_STATE,
            _ => error_code::SOLVER_ERROR,
        }
    }
}
