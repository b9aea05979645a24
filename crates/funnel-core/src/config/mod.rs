//! Engine configuration.
//!
//! One immutable [`AttributionConfig`] is built up front (defaults, TOML, or
//! code) and passed by reference into every component call.

pub mod cleaning_config;
pub mod coordinator_config;
pub mod matrix_config;
pub mod observability_config;
pub mod path_config;
pub mod removal_config;
pub mod solver_config;

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;

pub use cleaning_config::CleaningConfig;
pub use coordinator_config::{CoordinatorConfig, ExecutionMode};
pub use matrix_config::{MatrixBackend, MatrixConfig};
pub use observability_config::ObservabilityConfig;
pub use path_config::{PathConfig, StageSpec};
pub use removal_config::RemovalConfig;
pub use solver_config::{SingularPolicy, SolverConfig};

/// Top-level configuration aggregating all subsystem configs.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct AttributionConfig {
    pub paths: PathConfig,
    pub cleaning: CleaningConfig,
    pub matrix: MatrixConfig,
    pub solver: SolverConfig,
    pub removal: RemovalConfig,
    pub coordinator: CoordinatorConfig,
    pub observability: ObservabilityConfig,
}

impl AttributionConfig {
    /// Load config from a TOML string, falling back to defaults for missing fields.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(toml_str)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a TOML config file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::from_toml(&raw)
    }

    /// Check cross-field constraints that serde cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.paths.validate()?;
        self.cleaning.validate(self.paths.stages.len())?;
        self.solver.validate()?;
        self.coordinator.validate()?;
        Ok(())
    }
}
