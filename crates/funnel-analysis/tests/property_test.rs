//! Property-based tests for path, matrix, and removal invariants.

use proptest::prelude::*;

use chrono::{NaiveDate, NaiveDateTime};

use funnel_analysis::absorption::AbsorptionSolver;
use funnel_analysis::matrix::assemble_with;
use funnel_analysis::paths::build_paths;
use funnel_analysis::removal::removal_effects;
use funnel_core::config::{AttributionConfig, PathConfig};
use funnel_core::{FunnelPath, Record};

const CATEGORIES: [&str; 4] = ["STORE", "HQ", "ONLINE", "  "];

fn ts() -> Option<NaiveDateTime> {
    NaiveDate::from_ymd_opt(2023, 9, 1).and_then(|d| d.and_hms_opt(8, 0, 0))
}

// =============================================================================
// Strategy helpers
// =============================================================================

fn record_strategy() -> impl Strategy<Value = Record> {
    (
        prop::collection::vec(any::<bool>(), 6),
        prop::option::of(0..CATEGORIES.len()),
    )
        .prop_map(|(mask, category)| {
            Record::new(
                mask.into_iter()
                    .map(|p| if p { ts() } else { None })
                    .collect(),
                category.map(|i| CATEGORIES[i].to_string()),
            )
        })
}

fn records_strategy(max: usize) -> impl Strategy<Value = Vec<Record>> {
    prop::collection::vec(record_strategy(), 1..=max)
}

fn paths_of(records: &[Record]) -> Vec<FunnelPath> {
    build_paths(records, &PathConfig::default()).0
}

// =============================================================================
// Paths are well formed
// =============================================================================
proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn prop_paths_well_formed(records in records_strategy(40)) {
        let (paths, stats) = build_paths(&records, &PathConfig::default());
        prop_assert_eq!(stats.total, records.len());
        prop_assert_eq!(stats.kept + stats.dropped(), stats.total);
        for path in &paths {
            prop_assert!(path.starts_at_start());
            prop_assert!(matches!(path.terminal(), Some("Conversion") | Some("Null")));
            prop_assert!(path.len() >= 2 && path.len() <= 8);
            for token in &path.tokens()[1..path.len() - 1] {
                prop_assert_eq!(token.matches("||").count(), 1);
            }
        }
    }
}

// =============================================================================
// Matrix rows are stochastic or zero, in both representations
// =============================================================================
proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn prop_rows_stochastic(records in records_strategy(40), sparse in any::<bool>()) {
        let paths = paths_of(&records);
        let assembled = assemble_with(&paths, sparse);
        for i in 0..assembled.n_states() {
            let sum = assembled.matrix.row_sum(i);
            prop_assert!(sum == 0.0 || (sum - 1.0).abs() < 1e-9);
        }
        for node in 0..assembled.n_states() {
            let removed = assembled.matrix.without_node(node);
            for i in 0..removed.n_states() {
                let sum = removed.row_sum(i);
                prop_assert!(sum == 0.0 || (sum - 1.0).abs() < 1e-9);
            }
        }
    }
}

// =============================================================================
// Dense and sparse give the same absorption
// =============================================================================
proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_backends_agree(records in records_strategy(60)) {
        let paths = paths_of(&records);
        let config = AttributionConfig::default();
        let solver = AbsorptionSolver::new(&config.solver);
        let dense = solver.solve(&assemble_with(&paths, false)).unwrap();
        let sparse = solver.solve(&assemble_with(&paths, true)).unwrap();
        prop_assert!((dense.conversion_probability - sparse.conversion_probability).abs() < 1e-12);
        prop_assert!((dense.conversion_probability + dense.null_probability - 1.0).abs() < 1e-9);
    }
}

// =============================================================================
// Removal effects stay within [baseline - 1, baseline] in probability
// =============================================================================
proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_effects_bounded(records in records_strategy(30)) {
        let paths = paths_of(&records);
        let assembled = assemble_with(&paths, false);
        let nodes: Vec<String> = assembled.index.states().to_vec();
        let report = removal_effects(&paths, &nodes, &AttributionConfig::default()).unwrap();
        let baseline = report.baseline.unwrap().conversion_probability;

        prop_assert!(report.failed_nodes.is_empty());
        for effect in &report.effects {
            prop_assert!((0.0..=1.0).contains(&effect.post_removal_probability));
            prop_assert!(effect.effect_pp <= baseline * 100.0 + 0.005);
            prop_assert!(effect.effect_pp >= (baseline - 1.0) * 100.0 - 0.005);
        }
        // Removing the conversion state itself leaves nothing to convert to.
        if let Some(conversion) = report.effect_for("Conversion") {
            prop_assert_eq!(conversion.post_removal_probability, 0.0);
        }
    }
}
