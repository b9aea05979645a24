//! Auto-generated candidate nodes: `<Stage><sep><Category>` per observed category.

use std::collections::BTreeSet;

use funnel_core::config::{PathConfig, RemovalConfig};

use crate::matrix::StateIndex;

/// Categories appearing in stage tokens of the state universe, sorted.
pub fn observed_categories(index: &StateIndex, config: &PathConfig) -> BTreeSet<String> {
    index
        .states()
        .iter()
        .filter_map(|s| s.split_once(config.separator.as_str()))
        .map(|(_, category)| category.to_string())
        .collect()
}

/// Every category crossed with every stage after the skipped leading ones,
/// category-major.
pub fn candidate_nodes(
    categories: &BTreeSet<String>,
    paths: &PathConfig,
    removal: &RemovalConfig,
) -> Vec<String> {
    categories
        .iter()
        .flat_map(|category| {
            paths
                .stage_labels()
                .skip(removal.candidate_skip_stages)
                .map(move |stage| paths.token(stage, category))
        })
        .collect()
}
