use super::error_code::{self, FunnelErrorCode};
use super::{ConfigError, InputShapeError, SolverError};

/// Top-level error type for the attribution engine.
/// All subsystem errors convert into this via `From` impls.
#[derive(Debug, thiserror::Error)]
pub enum AttributionError {
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    #[error("input shape error: {0}")]
    InputShape(#[from] InputShapeError),

    #[error("solver error: {0}")]
    Solver(#[from] SolverError),

    #[error("cancelled")]
    Cancelled,

    #[error("dimension {dimension} exceeded its {timeout_secs}s budget")]
    TimedOut { dimension: String, timeout_secs: u64 },

    #[error("worker panicked while evaluating {dimension}")]
    WorkerPanicked { dimension: String },
}

impl FunnelErrorCode for AttributionError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Config(e) => e.error_code(),
            Self::InputShape(e) => e.error_code(),
            Self::Solver(e) => e.error_code(),
            Self::Cancelled => error_code::CANCELLED,
            Self::TimedOut { .. } => error_code::TASK_TIMEOUT,
            Self::WorkerPanicked { .. } => error_code::WORKER_PANICKED,
        }
    }
}

/// Convenience type alias.
pub type AttributionResult<T> = Result<T, AttributionError>;
