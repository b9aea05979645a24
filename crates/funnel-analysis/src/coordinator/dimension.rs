//! One dimension's pipeline: project → map → clean → paths → matrix → effects.

use serde::{Deserialize, Serialize};

use funnel_core::config::AttributionConfig;
use funnel_core::{AttributionError, AttributionResult, FunnelErrorCode, FunnelTable};

use crate::cancellation::Cancellation;
use crate::matrix::assemble;
use crate::paths::{drop_jump_orders, BuildStats, CategoryMapper, FunnelSummary, PathBuilder};
use crate::removal::evaluator::evaluate_assembled;
use crate::removal::{candidate_nodes, observed_categories, RemovalEffect, RemovalReport};

/// What to attribute on: a categorical column and how to label its values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DimensionSpec {
    pub name: String,
    pub column: String,
    #[serde(default)]
    pub mapper: CategoryMapper,
    /// Explicit candidates. `None` = every observed category × stage.
    #[serde(default)]
    pub nodes: Option<Vec<String>>,
}

impl DimensionSpec {
    pub fn new(name: impl Into<String>, column: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            column: column.into(),
            mapper: CategoryMapper::Identity,
            nodes: None,
        }
    }

    pub fn with_mapper(mut self, mapper: CategoryMapper) -> Self {
        self.mapper = mapper;
        self
    }

    pub fn with_nodes<I, S>(mut self, nodes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.nodes = Some(nodes.into_iter().map(Into::into).collect());
        self
    }
}

/// Full result for one completed dimension.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DimensionReport {
    pub dimension: String,
    pub column: String,
    pub records: usize,
    /// Records removed by the jump-order filter.
    pub jump_orders: usize,
    pub build: BuildStats,
    pub funnel: FunnelSummary,
    pub candidates: usize,
    pub removal: RemovalReport,
}

/// One entry per requested dimension, whatever happened to it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "status")]
pub enum DimensionOutcome {
    Completed(DimensionReport),
    Failed { code: String, message: String },
    TimedOut { timeout_secs: u64 },
}

impl DimensionOutcome {
    pub fn from_error(error: &AttributionError) -> Self {
        Self::Failed {
            code: error.error_code().to_string(),
            message: error.to_string(),
        }
    }

    pub fn is_completed(&self) -> bool {
        matches!(self, Self::Completed(_))
    }

    pub fn report(&self) -> Option<&DimensionReport> {
        match self {
            Self::Completed(report) => Some(report),
            _ => None,
        }
    }

    /// Effects of a completed dimension; empty otherwise.
    pub fn effects(&self) -> &[RemovalEffect] {
        self.report()
            .map(|r| r.removal.effects.as_slice())
            .unwrap_or_default()
    }
}

/// Run the whole pipeline for one dimension.
///
/// Structural problems (missing column, no `Start`, unsolvable baseline)
/// are returned as errors; per-record and per-node problems are counted in
/// the report.
pub fn analyze_dimension(
    table: &FunnelTable,
    spec: &DimensionSpec,
    config: &AttributionConfig,
    cancel: &Cancellation,
) -> AttributionResult<DimensionReport> {
    let span = tracing::info_span!("dimension", name = %spec.name, column = %spec.column);
    let _guard = span.enter();

    let records = table.records_for(&config.paths, &spec.column)?;
    let records = spec.mapper.apply(records, &config.paths.unknown_category);
    let total = records.len();
    let (records, jump_orders) = drop_jump_orders(records, &config.cleaning);
    let funnel = FunnelSummary::from_records(&records, &config.paths);
    bail_if_cancelled(cancel)?;

    let (paths, build) = PathBuilder::new(&config.paths).build_all(&records);
    bail_if_cancelled(cancel)?;

    let (candidates, removal) = if paths.is_empty() {
        tracing::warn!("no valid paths; dimension yields no effects");
        (0, RemovalReport::empty())
    } else {
        let assembled = assemble(&paths, &config.matrix);
        let nodes = match &spec.nodes {
            Some(nodes) => nodes.clone(),
            None => candidate_nodes(
                &observed_categories(&assembled.index, &config.paths),
                &config.paths,
                &config.removal,
            ),
        };
        let report = evaluate_assembled(&assembled, &nodes, config, cancel)?;
        (nodes.len(), report)
    };

    Ok(DimensionReport {
        dimension: spec.name.clone(),
        column: spec.column.clone(),
        records: total,
        jump_orders,
        build,
        funnel,
        candidates,
        removal,
    })
}

fn bail_if_cancelled(cancel: &Cancellation) -> AttributionResult<()> {
    if cancel.is_cancelled() {
        Err(AttributionError::Cancelled)
    } else {
        Ok(())
    }
}
