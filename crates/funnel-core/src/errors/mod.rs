//! Error types, one enum per subsystem, all converging on [`AttributionError`].

pub mod error_code;

mod attribution_error;
mod config_error;
mod input_error;
mod solver_error;

pub use attribution_error::{AttributionError, AttributionResult};
pub use config_error::ConfigError;
pub use input_error::InputShapeError;
pub use solver_error::SolverError;
