//! Absorption probabilities and the singular-matrix policies.

use funnel_analysis::absorption::{AbsorptionSolver, Partition, Provenance};
use funnel_analysis::matrix::assemble_with;
use funnel_core::config::{SingularPolicy, SolverConfig};
use funnel_core::errors::SolverError;
use funnel_core::FunnelPath;

fn linear_paths() -> Vec<FunnelPath> {
    vec![
        FunnelPath::from_tokens(["Start", "Wish||A", "Deposit||A", "Conversion"]),
        FunnelPath::from_tokens(["Start", "Wish||A", "Null"]),
        FunnelPath::from_tokens(["Start", "Wish||A", "Deposit||A", "Null"]),
        FunnelPath::from_tokens(["Start", "Wish||B", "Conversion"]),
    ]
}

/// `A` and `B` bounce between each other before reaching `X`; removing `X`
/// leaves a closed class, so `I - Q` becomes singular.
fn cyclic_paths() -> Vec<FunnelPath> {
    vec![
        FunnelPath::from_tokens(["Start", "A", "X", "Conversion"]),
        FunnelPath::from_tokens(["Start", "A", "B", "A", "X", "Null"]),
    ]
}

#[test]
fn probabilities_match_hand_computation() {
    // P = 3/4 * (2/3 * 1/2) + 1/4 * 1 = 1/2.
    for sparse in [false, true] {
        let config = SolverConfig::default();
        let absorption = AbsorptionSolver::new(&config)
            .solve(&assemble_with(&linear_paths(), sparse))
            .unwrap();
        assert!((absorption.conversion_probability - 0.5).abs() < 1e-12);
        assert!((absorption.null_probability - 0.5).abs() < 1e-12);
        assert_eq!(absorption.provenance, Provenance::Exact);
        assert_eq!(absorption.n_states, 6);
        assert_eq!(absorption.n_transient, 4);
    }
}

#[test]
fn cycles_are_solved_exactly() {
    let config = SolverConfig::default();
    let absorption = AbsorptionSolver::new(&config)
        .solve(&assemble_with(&cyclic_paths(), false))
        .unwrap();
    assert!((absorption.conversion_probability - 0.5).abs() < 1e-12);
    assert!(!absorption.provenance.is_approximate());
}

#[test]
fn every_path_converts() {
    let paths = vec![
        FunnelPath::from_tokens(["Start", "Wish||A", "Conversion"]),
        FunnelPath::from_tokens(["Start", "Conversion"]),
    ];
    let config = SolverConfig::default();
    let absorption = AbsorptionSolver::new(&config)
        .solve(&assemble_with(&paths, false))
        .unwrap();
    assert!((absorption.conversion_probability - 1.0).abs() < 1e-12);
    assert_eq!(absorption.null_probability, 0.0);
}

#[test]
fn fundamental_matrix_counts_expected_visits() {
    let assembled = assemble_with(&cyclic_paths(), false);
    let partition = Partition::new(&assembled.index).unwrap();
    let config = SolverConfig::default();
    let (n, provenance) = AbsorptionSolver::new(&config)
        .fundamental_matrix(&assembled.matrix, &partition)
        .unwrap();
    assert_eq!(provenance, Provenance::Exact);

    // Transient order: A, B, Start, X. From Start, A is visited 1.5 times on average.
    let a = partition
        .transient
        .iter()
        .position(|&i| assembled.index.label(i) == Some("A"))
        .unwrap();
    assert!((n[(partition.start, a)] - 1.5).abs() < 1e-12);
}

#[test]
fn singular_system_under_each_policy() {
    let assembled = assemble_with(&cyclic_paths(), false);
    let partition = Partition::new(&assembled.index).unwrap();
    let x = assembled.index.get("X").unwrap();
    let removed = assembled.matrix.without_node(x);

    let skip = SolverConfig::with_policy(SingularPolicy::Skip);
    let err = AbsorptionSolver::new(&skip)
        .solve_partitioned(&removed, &partition)
        .unwrap_err();
    assert!(matches!(err, SolverError::Singular { policy: SingularPolicy::Skip, .. }));

    let pinv = SolverConfig::with_policy(SingularPolicy::PseudoInverse);
    let approx = AbsorptionSolver::new(&pinv)
        .solve_partitioned(&removed, &partition)
        .unwrap();
    assert_eq!(approx.provenance, Provenance::PseudoInverse);
    assert!(approx.conversion_probability.abs() < 1e-9);

    let reg = SolverConfig::with_policy(SingularPolicy::Regularize);
    let regularized = AbsorptionSolver::new(&reg)
        .solve_partitioned(&removed, &partition)
        .unwrap();
    assert_eq!(
        regularized.provenance,
        Provenance::Regularized {
            epsilon: reg.epsilon
        }
    );
    assert!((0.0..=1.0).contains(&regularized.conversion_probability));
}

#[test]
fn regularization_converges_as_epsilon_shrinks() {
    // The shifted system is a discounted chain; shrinking epsilon moves it
    // monotonically toward the exact answer.
    let assembled = assemble_with(&linear_paths(), false);
    let exact = AbsorptionSolver::new(&SolverConfig::default())
        .solve(&assembled)
        .unwrap()
        .conversion_probability;

    let mut last_gap = f64::INFINITY;
    for epsilon in [1e-1, 1e-3, 1e-6] {
        let partition = Partition::new(&assembled.index).unwrap();
        let config = SolverConfig {
            singular_policy: SingularPolicy::Regularize,
            epsilon,
            // Force the fallback path even for this regular system.
            singular_tolerance: 2.0,
        };
        let approx = AbsorptionSolver::new(&config)
            .solve_partitioned(&assembled.matrix, &partition)
            .unwrap();
        let gap = (approx.conversion_probability - exact).abs();
        assert!(gap <= last_gap);
        last_gap = gap;
    }
    assert!(last_gap < 1e-5);
}

#[test]
fn missing_start_is_an_error() {
    let paths = vec![FunnelPath::from_tokens(["Wish||A", "Conversion"])];
    let assembled = assemble_with(&paths, false);
    assert!(matches!(
        Partition::new(&assembled.index),
        Err(SolverError::MissingStartState)
    ));
}
