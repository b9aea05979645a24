//! Input records as handed over by the ingestion layer.

use serde::{Deserialize, Serialize};

use crate::config::PathConfig;
use crate::errors::InputShapeError;

/// Stage completion time. Only its presence is read by the engine.
pub type StageTime = chrono::NaiveDateTime;

/// One funnel entity projected onto a single categorical dimension.
///
/// `stages` is in configured funnel order, one slot per stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub stages: Vec<Option<StageTime>>,
    pub category: Option<String>,
}

impl Record {
    pub fn new(stages: Vec<Option<StageTime>>, category: Option<String>) -> Self {
        Self { stages, category }
    }

    /// Presence mask in funnel order.
    pub fn presence(&self) -> impl Iterator<Item = bool> + '_ {
        self.stages.iter().map(Option::is_some)
    }

    pub fn final_stage_reached(&self) -> bool {
        matches!(self.stages.last(), Some(Some(_)))
    }
}

/// A row of the cleaned source table: stage timestamps plus every
/// categorical column the caller may attribute on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunnelRow {
    pub stages: Vec<Option<StageTime>>,
    pub categories: Vec<Option<String>>,
}

impl FunnelRow {
    pub fn new(stages: Vec<Option<StageTime>>, categories: Vec<Option<String>>) -> Self {
        Self { stages, categories }
    }
}

/// Read-only record set shared by every dimension of a run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FunnelTable {
    stage_columns: Vec<String>,
    category_columns: Vec<String>,
    rows: Vec<FunnelRow>,
}

impl FunnelTable {
    pub fn new(stage_columns: Vec<String>, category_columns: Vec<String>) -> Self {
        Self {
            stage_columns,
            category_columns,
            rows: Vec::new(),
        }
    }

    /// Append a row. Rows must match the declared column counts.
    pub fn push_row(&mut self, row: FunnelRow) -> Result<(), InputShapeError> {
        self.check_width(self.rows.len(), &row)?;
        self.rows.push(row);
        Ok(())
    }

    fn check_width(&self, index: usize, row: &FunnelRow) -> Result<(), InputShapeError> {
        if row.stages.len() != self.stage_columns.len() {
            return Err(InputShapeError::StageCountMismatch {
                row: index,
                expected: self.stage_columns.len(),
                found: row.stages.len(),
            });
        }
        if row.categories.len() != self.category_columns.len() {
            return Err(InputShapeError::CategoryCountMismatch {
                row: index,
                expected: self.category_columns.len(),
                found: row.categories.len(),
            });
        }
        Ok(())
    }

    pub fn rows(&self) -> &[FunnelRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn stage_columns(&self) -> &[String] {
        &self.stage_columns
    }

    pub fn category_columns(&self) -> &[String] {
        &self.category_columns
    }

    /// Project every row onto the configured stage order and one categorical column.
    ///
    /// Fails if any configured stage column or the category column is missing,
    /// or if a row's width disagrees with the declared columns.
    pub fn records_for(
        &self,
        config: &PathConfig,
        category_column: &str,
    ) -> Result<Vec<Record>, InputShapeError> {
        if config.stages.is_empty() {
            return Err(InputShapeError::EmptyStageList);
        }

        let stage_positions = config
            .stages
            .iter()
            .map(|stage| {
                self.stage_columns
                    .iter()
                    .position(|c| *c == stage.column)
                    .ok_or_else(|| InputShapeError::MissingColumn {
                        column: stage.column.clone(),
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let category_position = self
            .category_columns
            .iter()
            .position(|c| c == category_column)
            .ok_or_else(|| InputShapeError::MissingColumn {
                column: category_column.to_string(),
            })?;

        // Rows may arrive through serde rather than push_row; widths are
        // rechecked here.
        self.rows
            .iter()
            .enumerate()
            .map(|(index, row)| {
                self.check_width(index, row)?;
                Ok(Record {
                    stages: stage_positions
                        .iter()
                        .map(|&i| row.stages.get(i).copied().flatten())
                        .collect(),
                    category: row.categories.get(category_position).cloned().flatten(),
                })
            })
            .collect()
    }
}
