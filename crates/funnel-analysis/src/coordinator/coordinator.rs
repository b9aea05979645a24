//! Fans dimensions out over the worker pool and collects one outcome each.

use std::collections::BTreeMap;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;
use std::time::{Duration, Instant};

use funnel_core::config::{AttributionConfig, ExecutionMode};
use funnel_core::errors::ConfigError;
use funnel_core::{AttributionError, AttributionResult, FunnelErrorCode, FunnelTable};

use super::dimension::{analyze_dimension, DimensionOutcome, DimensionReport, DimensionSpec};
use super::pool::{TaskOutcome, WorkerPool};
use crate::cancellation::Cancellation;

pub struct Coordinator {
    config: Arc<AttributionConfig>,
    timeout: Duration,
}

impl Coordinator {
    /// Validates `config` up front; an invalid config fails the whole run
    /// before any dimension starts.
    pub fn new(config: AttributionConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let timeout = config.coordinator.task_timeout();
        Ok(Self {
            config: Arc::new(config),
            timeout,
        })
    }

    /// Override the per-dimension budget from the config.
    pub fn with_task_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn config(&self) -> &AttributionConfig {
        &self.config
    }

    /// Analyze every dimension. The result has exactly one entry per distinct
    /// dimension name; a failure in one never affects another.
    pub fn run(
        &self,
        table: Arc<FunnelTable>,
        dimensions: &[DimensionSpec],
    ) -> BTreeMap<String, DimensionOutcome> {
        let specs = dedupe(dimensions);
        let started = Instant::now();
        tracing::info!(
            dimensions = specs.len(),
            mode = ?self.config.coordinator.mode,
            "starting attribution run"
        );

        let results: Vec<(String, DimensionOutcome)> = match self.config.coordinator.mode {
            ExecutionMode::Sequential => self.run_sequential(&table, &specs),
            ExecutionMode::Parallel => self.run_parallel(table, &specs),
        };

        let completed = results.iter().filter(|(_, o)| o.is_completed()).count();
        tracing::info!(
            completed,
            failed = results.len() - completed,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "attribution run finished"
        );

        results.into_iter().collect()
    }

    fn run_sequential(
        &self,
        table: &FunnelTable,
        specs: &[DimensionSpec],
    ) -> Vec<(String, DimensionOutcome)> {
        specs
            .iter()
            .map(|spec| {
                let cancel = Cancellation::with_timeout(self.timeout);
                let result = catch_unwind(AssertUnwindSafe(|| {
                    analyze_dimension(table, spec, &self.config, &cancel)
                }));
                let outcome = match result {
                    Ok(result) => self.settle(spec, result),
                    Err(_) => self.panicked(spec),
                };
                (spec.name.clone(), outcome)
            })
            .collect()
    }

    fn run_parallel(
        &self,
        table: Arc<FunnelTable>,
        specs: &[DimensionSpec],
    ) -> Vec<(String, DimensionOutcome)> {
        let pool = WorkerPool::new(self.config.coordinator.effective_workers(), self.timeout);
        let tasks: Vec<_> = specs
            .iter()
            .map(|spec| {
                let table = Arc::clone(&table);
                let config = Arc::clone(&self.config);
                let spec = spec.clone();
                move |cancel: Cancellation| analyze_dimension(&table, &spec, &config, &cancel)
            })
            .collect();

        pool.run(tasks)
            .into_iter()
            .zip(specs)
            .map(|(outcome, spec)| {
                let outcome = match outcome {
                    TaskOutcome::Finished(result) => self.settle(spec, result),
                    TaskOutcome::TimedOut => self.timed_out(spec),
                    TaskOutcome::Panicked => self.panicked(spec),
                };
                (spec.name.clone(), outcome)
            })
            .collect()
    }

    fn settle(
        &self,
        spec: &DimensionSpec,
        result: AttributionResult<DimensionReport>,
    ) -> DimensionOutcome {
        match result {
            Ok(report) => {
                tracing::info!(
                    dimension = %spec.name,
                    effects = report.removal.effects.len(),
                    failed_nodes = report.removal.failed_nodes.len(),
                    "dimension completed"
                );
                DimensionOutcome::Completed(report)
            }
            Err(AttributionError::Cancelled) => self.timed_out(spec),
            Err(e) => {
                tracing::error!(
                    dimension = %spec.name,
                    code = e.error_code(),
                    error = %e,
                    "dimension failed"
                );
                DimensionOutcome::from_error(&e)
            }
        }
    }

    fn panicked(&self, spec: &DimensionSpec) -> DimensionOutcome {
        let error = AttributionError::WorkerPanicked {
            dimension: spec.name.clone(),
        };
        tracing::error!(
            code = error.error_code(),
            error = %error,
            "dimension worker panicked"
        );
        DimensionOutcome::from_error(&error)
    }

    fn timed_out(&self, spec: &DimensionSpec) -> DimensionOutcome {
        let error = AttributionError::TimedOut {
            dimension: spec.name.clone(),
            timeout_secs: self.timeout.as_secs(),
        };
        tracing::error!(code = error.error_code(), error = %error, "dimension timed out");
        DimensionOutcome::TimedOut {
            timeout_secs: self.timeout.as_secs(),
        }
    }
}

fn dedupe(dimensions: &[DimensionSpec]) -> Vec<DimensionSpec> {
    let mut seen = std::collections::BTreeSet::new();
    dimensions
        .iter()
        .filter(|spec| {
            let fresh = seen.insert(spec.name.as_str());
            if !fresh {
                tracing::warn!(dimension = %spec.name, "duplicate dimension name; keeping the first");
            }
            fresh
        })
        .cloned()
        .collect()
}
