//! Configuration errors.

use super::error_code::{self, FunnelErrorCode};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid config field {field}: {reason}")]
    Invalid { field: String, reason: String },

    #[error("config parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("cannot read config {path}: {message}")]
    Io { path: String, message: String },
}

impl ConfigError {
    pub fn invalid(field: &str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            field: field.to_string(),
            reason: reason.into(),
        }
    }
}

impl FunnelErrorCode for ConfigError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Parse(_) => error_code::CONFIG_PARSE_ERROR,
            _ => error_code::CONFIG_ERROR,
        }
    }
}
