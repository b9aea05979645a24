//! Removal-effect evaluation, dense vs CSR, at 1K and 10K records.

use chrono::NaiveDate;
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use funnel_analysis::matrix::assemble_with;
use funnel_analysis::paths::build_paths;
use funnel_analysis::removal::{candidate_nodes, observed_categories, removal_effects};
use funnel_core::config::{AttributionConfig, MatrixBackend};
use funnel_core::{FunnelPath, Record};

fn make_records(n: usize, categories: usize) -> Vec<Record> {
    let t = NaiveDate::from_ymd_opt(2023, 1, 1).and_then(|d| d.and_hms_opt(0, 0, 0));
    (0..n)
        .map(|i| {
            let depth = (i * 31 + 7) % 7;
            Record::new(
                (0..6).map(|s| if s < depth { t } else { None }).collect(),
                Some(format!("cat_{}", (i * 17) % categories)),
            )
        })
        .collect()
}

fn setup(n: usize) -> (Vec<FunnelPath>, Vec<String>) {
    let config = AttributionConfig::default();
    let (paths, _) = build_paths(&make_records(n, 40), &config.paths);
    let index = assemble_with(&paths, false).index;
    let nodes = candidate_nodes(
        &observed_categories(&index, &config.paths),
        &config.paths,
        &config.removal,
    );
    (paths, nodes)
}

fn config_for(backend: MatrixBackend) -> AttributionConfig {
    let mut config = AttributionConfig::default();
    config.matrix.backend = backend;
    config
}

fn bench_removal(c: &mut Criterion) {
    let dense = config_for(MatrixBackend::Dense);
    let sparse = config_for(MatrixBackend::Sparse);

    for (label, n) in [("1k", 1_000), ("10k", 10_000)] {
        let (paths, nodes) = setup(n);

        c.bench_function(&format!("removal_dense_{}_records", label), |b| {
            b.iter(|| {
                let report = removal_effects(black_box(&paths), &nodes, &dense);
                black_box(report)
            })
        });

        c.bench_function(&format!("removal_sparse_{}_records", label), |b| {
            b.iter(|| {
                let report = removal_effects(black_box(&paths), &nodes, &sparse);
                black_box(report)
            })
        });
    }
}

criterion_group!(benches, bench_removal);
criterion_main!(benches);
