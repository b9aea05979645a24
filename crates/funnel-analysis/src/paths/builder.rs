//! PathBuilder: one record in, one path (or a counted rejection) out.
//!
//! Stage tokens follow funnel order, not timestamp order: a path encodes
//! progress through the funnel. The terminal token depends only on whether
//! the final stage is present.

use std::collections::BTreeSet;

use rayon::prelude::*;

use funnel_core::config::PathConfig;
use funnel_core::constants::{CONVERSION, NULL, START};
use funnel_core::{FunnelPath, Record};

use super::types::{BuildStats, PathOutcome};

/// Builds paths under one immutable [`PathConfig`].
pub struct PathBuilder<'a> {
    config: &'a PathConfig,
}

impl<'a> PathBuilder<'a> {
    pub fn new(config: &'a PathConfig) -> Self {
        Self { config }
    }

    /// Trimmed category, or the unknown sentinel for null/blank input.
    pub fn normalize_category<'r>(&'r self, raw: Option<&'r str>) -> &'r str {
        match raw.map(str::trim) {
            Some(v) if !v.is_empty() => v,
            _ => &self.config.unknown_category,
        }
    }

    /// Build the path for one record.
    pub fn build(&self, record: &Record) -> PathOutcome {
        let category = self.normalize_category(record.category.as_deref());
        if category.contains(&self.config.separator) {
            return PathOutcome::SeparatorCollision {
                category: category.to_string(),
            };
        }

        let mut tokens = Vec::with_capacity(self.config.stages.len() + 2);
        tokens.push(START.to_string());
        for (stage, value) in self.config.stages.iter().zip(&record.stages) {
            if value.is_some() {
                tokens.push(self.config.token(&stage.label, category));
            }
        }

        let final_reached = self
            .config
            .stages
            .len()
            .checked_sub(1)
            .and_then(|last| record.stages.get(last))
            .is_some_and(Option::is_some);
        tokens.push(if final_reached { CONVERSION } else { NULL }.to_string());

        let length = tokens.len();
        if length < self.config.min_path_length || length > self.config.max_path_length {
            return PathOutcome::OutOfBounds { length };
        }
        PathOutcome::Kept(FunnelPath::from_tokens(tokens))
    }

    /// `Some(path)` for records that yield a valid path, `None` otherwise.
    pub fn path_for(&self, record: &Record) -> Option<FunnelPath> {
        match self.build(record) {
            PathOutcome::Kept(path) => Some(path),
            _ => None,
        }
    }

    /// Build paths for a batch in parallel, preserving input order.
    ///
    /// Rejected records are counted, never raised.
    pub fn build_all(&self, records: &[Record]) -> (Vec<FunnelPath>, BuildStats) {
        let outcomes: Vec<PathOutcome> = records.par_iter().map(|r| self.build(r)).collect();

        let mut stats = BuildStats::default();
        let mut collisions = BTreeSet::new();
        let mut paths = Vec::with_capacity(outcomes.len());
        for outcome in outcomes {
            stats.record(&outcome);
            match outcome {
                PathOutcome::Kept(path) => paths.push(path),
                PathOutcome::SeparatorCollision { category } => {
                    collisions.insert(category);
                }
                PathOutcome::OutOfBounds { .. } => {}
            }
        }

        for category in &collisions {
            tracing::warn!(
                category = %category,
                separator = %self.config.separator,
                "category contains the path separator; records excluded"
            );
        }
        tracing::info!(
            kept = stats.kept,
            total = stats.total,
            out_of_bounds = stats.out_of_bounds,
            separator_collisions = stats.separator_collisions,
            "paths built"
        );

        (paths, stats)
    }
}

/// Build paths for `records` with `config`. Empty input yields an empty list.
pub fn build_paths(records: &[Record], config: &PathConfig) -> (Vec<FunnelPath>, BuildStats) {
    PathBuilder::new(config).build_all(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ts() -> Option<funnel_core::types::record::StageTime> {
        chrono::NaiveDate::from_ymd_opt(2023, 1, 1).and_then(|d| d.and_hms_opt(0, 0, 0))
    }

    fn record(mask: &[bool], category: Option<&str>) -> Record {
        Record::new(
            mask.iter().map(|&p| if p { ts() } else { None }).collect(),
            category.map(str::to_string),
        )
    }

    #[test]
    fn test_full_funnel_converts() {
        let config = PathConfig::default();
        let path = PathBuilder::new(&config)
            .path_for(&record(&[true; 6], Some("STORE")))
            .unwrap();
        assert_eq!(
            path.tokens(),
            &[
                "Start",
                "Wish||STORE",
                "Intention||STORE",
                "Deposit||STORE",
                "Lock||STORE",
                "Final||STORE",
                "Delivery||STORE",
                "Conversion"
            ]
        );
    }

    #[test]
    fn test_blank_category_is_unknown() {
        let config = PathConfig::default();
        let path = PathBuilder::new(&config)
            .path_for(&record(&[true, false, false, false, false, false], Some("  ")))
            .unwrap();
        assert_eq!(path.tokens(), &["Start", "Wish||UNKNOWN", "Null"]);
    }

    #[test]
    fn test_no_stages_still_yields_start_and_terminal() {
        let config = PathConfig::default();
        let path = PathBuilder::new(&config)
            .path_for(&record(&[false; 6], None))
            .unwrap();
        assert_eq!(path.tokens(), &["Start", "Null"]);
    }

    #[test]
    fn test_separator_collision_rejected() {
        let config = PathConfig::default();
        let outcome = PathBuilder::new(&config).build(&record(&[true; 6], Some("A||B")));
        assert_eq!(
            outcome,
            PathOutcome::SeparatorCollision {
                category: "A||B".to_string()
            }
        );
    }

    #[test]
    fn test_length_bounds_drop_silently() {
        let config = PathConfig {
            max_path_length: 4,
            ..PathConfig::default()
        };
        let records = vec![
            record(&[true; 6], Some("HQ")),
            record(&[true, true, false, false, false, false], Some("HQ")),
        ];
        let (paths, stats) = build_paths(&records, &config);
        assert_eq!(paths.len(), 1);
        assert_eq!(stats.out_of_bounds, 1);
        assert_eq!(stats.dropped(), 1);
        assert_eq!(stats.total, 2);
    }
}
