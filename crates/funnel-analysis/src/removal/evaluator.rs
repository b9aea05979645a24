//! RemovalEvaluator: excise one node, re-solve, report the drop in conversion.
//!
//! Removal zeroes the node's row and column in a copy of the baseline matrix
//! and renormalizes only the rows that lost mass. Traffic through the node is
//! removed, not redistributed to alternative routes.

use rayon::prelude::*;

use funnel_core::config::AttributionConfig;
use funnel_core::{AttributionError, AttributionResult, FunnelErrorCode, FunnelPath, FxHashSet};

use crate::absorption::{Absorption, AbsorptionSolver, Partition};
use crate::cancellation::Cancellation;
use crate::matrix::{assemble, AssembledMatrix};

use super::types::{FailedNode, RemovalEffect, RemovalReport};

/// Percentage-point drop, rounded to two decimals.
pub fn effect_pp(baseline: f64, post_removal: f64) -> f64 {
    round_pp((baseline - post_removal) * 100.0)
}

/// Two decimals, exact halves to even.
fn round_pp(pp: f64) -> f64 {
    (pp * 100.0).round_ties_even() / 100.0
}

enum Trial {
    Done(RemovalEffect),
    Absent(String),
    Failed(FailedNode),
    Cancelled,
}

pub struct RemovalEvaluator<'a> {
    solver: AbsorptionSolver<'a>,
}

impl<'a> RemovalEvaluator<'a> {
    pub fn new(solver: AbsorptionSolver<'a>) -> Self {
        Self { solver }
    }

    /// Evaluate each candidate against the baseline.
    ///
    /// Absent nodes are listed in `skipped_absent`; per-node solver failures
    /// land in `failed_nodes` without aborting the batch. Only cancellation
    /// aborts, discarding partial results.
    pub fn evaluate(
        &self,
        assembled: &AssembledMatrix,
        partition: &Partition,
        baseline: &Absorption,
        nodes: &[String],
        cancel: &Cancellation,
    ) -> AttributionResult<RemovalReport> {
        let mut seen = FxHashSet::default();
        let unique: Vec<&String> = nodes.iter().filter(|n| seen.insert(n.as_str())).collect();

        let trials: Vec<Trial> = unique
            .par_iter()
            .map(|node| {
                if cancel.is_cancelled() {
                    return Trial::Cancelled;
                }
                self.trial(assembled, partition, baseline, node)
            })
            .collect();

        if cancel.is_cancelled() || trials.iter().any(|t| matches!(t, Trial::Cancelled)) {
            return Err(AttributionError::Cancelled);
        }

        let mut report = RemovalReport {
            baseline: Some(*baseline),
            ..RemovalReport::default()
        };
        for trial in trials {
            match trial {
                Trial::Done(effect) => report.effects.push(effect),
                Trial::Absent(node) => report.skipped_absent.push(node),
                Trial::Failed(failed) => report.failed_nodes.push(failed),
                Trial::Cancelled => {}
            }
        }

        tracing::info!(
            evaluated = report.effects.len(),
            absent = report.skipped_absent.len(),
            failed = report.failed_nodes.len(),
            baseline = baseline.conversion_probability,
            "removal effects computed"
        );
        Ok(report)
    }

    fn trial(
        &self,
        assembled: &AssembledMatrix,
        partition: &Partition,
        baseline: &Absorption,
        node: &str,
    ) -> Trial {
        let Some(idx) = assembled.index.get(node) else {
            tracing::debug!(node, "node not in state universe");
            return Trial::Absent(node.to_string());
        };

        let removed = assembled.matrix.without_node(idx);
        match self.solver.solve_partitioned(&removed, partition) {
            Ok(post) => Trial::Done(RemovalEffect {
                node: node.to_string(),
                effect_pp: effect_pp(
                    baseline.conversion_probability,
                    post.conversion_probability,
                ),
                post_removal_probability: post.conversion_probability,
                provenance: post.provenance,
            }),
            Err(e) => {
                tracing::warn!(node, error = %e, "removal trial produced no result");
                Trial::Failed(FailedNode {
                    node: node.to_string(),
                    code: e.error_code().to_string(),
                    message: e.to_string(),
                })
            }
        }
    }
}

/// Paths → matrix → baseline → removal effects, in one call.
///
/// Empty `paths` yield an empty report. A path set without `Start`, or a
/// baseline that cannot be solved under the configured policy, is an error.
pub fn removal_effects(
    paths: &[FunnelPath],
    nodes: &[String],
    config: &AttributionConfig,
) -> AttributionResult<RemovalReport> {
    evaluate_paths(paths, nodes, config, &Cancellation::new())
}

pub(crate) fn evaluate_paths(
    paths: &[FunnelPath],
    nodes: &[String],
    config: &AttributionConfig,
    cancel: &Cancellation,
) -> AttributionResult<RemovalReport> {
    if paths.is_empty() {
        tracing::warn!("no paths to evaluate");
        return Ok(RemovalReport::empty());
    }
    let assembled = assemble(paths, &config.matrix);
    evaluate_assembled(&assembled, nodes, config, cancel)
}

/// Baseline plus removal trials for an already assembled matrix.
pub(crate) fn evaluate_assembled(
    assembled: &AssembledMatrix,
    nodes: &[String],
    config: &AttributionConfig,
    cancel: &Cancellation,
) -> AttributionResult<RemovalReport> {
    let partition = Partition::new(&assembled.index)?;
    let solver = AbsorptionSolver::new(&config.solver);
    let baseline = solver
        .solve_partitioned(&assembled.matrix, &partition)
        .inspect_err(|e| tracing::error!(error = %e, "baseline absorption failed"))?;

    if cancel.is_cancelled() {
        return Err(AttributionError::Cancelled);
    }
    RemovalEvaluator::new(solver).evaluate(assembled, &partition, &baseline, nodes, cancel)
}
