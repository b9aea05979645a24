//! Structural input errors. Fatal for the dimension that hits them.

use super::error_code::{self, FunnelErrorCode};

#[derive(Debug, thiserror::Error)]
pub enum InputShapeError {
    #[error("required column missing: {column}")]
    MissingColumn { column: String },

    #[error("row {row} has {found} stage values, expected {expected}")]
    StageCountMismatch {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("row {row} has {found} category values, expected {expected}")]
    CategoryCountMismatch {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("no stages configured")]
    EmptyStageList,
}

impl FunnelErrorCode for InputShapeError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::MissingColumn { .. } => error_code::MISSING_COLUMN,
            _ => error_code::INPUT_SHAPE_ERROR,
        }
    }
}
