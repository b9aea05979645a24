//! Stable, machine-readable error codes.

pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
pub const CONFIG_PARSE_ERROR: &str = "CONFIG_PARSE_ERROR";
pub const INPUT_SHAPE_ERROR: &str = "INPUT_SHAPE_ERROR";
pub const MISSING_COLUMN: &str = "MISSING_COLUMN";
pub const MISSING_START_STATE: &str = "MISSING_START_STATE";
pub const SINGULAR_MATRIX: &str = "SINGULAR_MATRIX";
pub const SOLVER_ERROR: &str = "SOLVER_ERROR";
pub const CANCELLED: &str = "CANCELLED";
pub const TASK_TIMEOUT: &str = "TASK_TIMEOUT";
pub const WORKER_PANICKED: &str = "WORKER_PANICKED";

/// Every engine error maps to one of the codes above.
pub trait FunnelErrorCode {
    fn error_code(&self) -> &'static str;
}
