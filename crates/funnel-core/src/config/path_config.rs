//! Path construction configuration.

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_MAX_PATH_LENGTH, DEFAULT_MIN_PATH_LENGTH, DEFAULT_SEPARATOR, DEFAULT_STAGES,
    DEFAULT_UNKNOWN_CATEGORY,
};
use crate::errors::ConfigError;

/// One funnel stage: the source column holding its timestamp and the label
/// used in path tokens.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StageSpec {
    pub column: String,
    pub label: String,
}

impl StageSpec {
    pub fn new(column: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            label: label.into(),
        }
    }
}

/// Configuration for turning records into paths.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PathConfig {
    /// Stages in funnel order. The last stage decides the terminal token.
    pub stages: Vec<StageSpec>,
    /// Joins stage label and category in a token, e.g. `Lock||STORE`.
    pub separator: String,
    /// Label substituted for null, blank, or unmapped categories.
    pub unknown_category: String,
    /// Inclusive bounds on path length, terminal tokens included.
    pub min_path_length: usize,
    pub max_path_length: usize,
}

impl Default for PathConfig {
    fn default() -> Self {
        Self {
            stages: DEFAULT_STAGES
                .iter()
                .map(|(column, label)| StageSpec::new(*column, *label))
                .collect(),
            separator: DEFAULT_SEPARATOR.to_string(),
            unknown_category: DEFAULT_UNKNOWN_CATEGORY.to_string(),
            min_path_length: DEFAULT_MIN_PATH_LENGTH,
            max_path_length: DEFAULT_MAX_PATH_LENGTH,
        }
    }
}

impl PathConfig {
    /// Build the state token for a stage/category pair.
    pub fn token(&self, stage_label: &str, category: &str) -> String {
        format!("{}{}{}", stage_label, self.separator, category)
    }

    /// Stage labels in funnel order.
    pub fn stage_labels(&self) -> impl Iterator<Item = &str> {
        self.stages.iter().map(|s| s.label.as_str())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.stages.is_empty() {
            return Err(ConfigError::invalid("paths.stages", "at least one stage is required"));
        }
        if self.separator.is_empty() {
            return Err(ConfigError::invalid("paths.separator", "separator must not be empty"));
        }
        if self.unknown_category.trim().is_empty() {
            return Err(ConfigError::invalid(
                "paths.unknown_category",
                "unknown sentinel must not be blank",
            ));
        }
        if self.unknown_category.contains(&self.separator) {
            return Err(ConfigError::invalid(
                "paths.unknown_category",
                "unknown sentinel must not contain the separator",
            ));
        }
        if let Some(stage) = self.stages.iter().find(|s| s.label.contains(&self.separator)) {
            return Err(ConfigError::invalid(
                "paths.stages",
                format!("stage label {:?} contains the separator", stage.label),
            ));
        }
        if self.min_path_length < 2 {
            return Err(ConfigError::invalid(
                "paths.min_path_length",
                "a path holds at least Start and a terminal token",
            ));
        }
        if self.min_path_length > self.max_path_length {
            return Err(ConfigError::invalid(
                "paths.max_path_length",
                format!(
                    "max ({}) is below min ({})",
                    self.max_path_length, self.min_path_length
                ),
            ));
        }
        Ok(())
    }
}
