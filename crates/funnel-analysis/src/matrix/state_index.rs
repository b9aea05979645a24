//! Deterministic state bookkeeping for one dimension's run.

use std::collections::BTreeSet;

use serde::Serialize;

use funnel_core::constants::ABSORBING_STATES;
use funnel_core::{FunnelPath, FxHashMap};

/// The state universe: every token across all paths, sorted lexicographically.
///
/// Sorting makes indices, and therefore every downstream float, reproducible
/// for the same path multiset regardless of input order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct StateIndex {
    states: Vec<String>,
    #[serde(skip)]
    index: FxHashMap<String, usize>,
}

impl StateIndex {
    pub fn from_paths(paths: &[FunnelPath]) -> Self {
        let unique: BTreeSet<&str> = paths
            .iter()
            .flat_map(|p| p.tokens().iter().map(String::as_str))
            .collect();
        Self::from_sorted(unique.into_iter().map(str::to_string).collect())
    }

    fn from_sorted(states: Vec<String>) -> Self {
        let index = states
            .iter()
            .enumerate()
            .map(|(i, s)| (s.clone(), i))
            .collect();
        Self { states, index }
    }

    pub fn get(&self, state: &str) -> Option<usize> {
        self.index.get(state).copied()
    }

    pub fn contains(&self, state: &str) -> bool {
        self.index.contains_key(state)
    }

    pub fn states(&self) -> &[String] {
        &self.states
    }

    pub fn label(&self, idx: usize) -> Option<&str> {
        self.states.get(idx).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Indices of every non-absorbing state, in state order.
    pub fn transient_indices(&self) -> Vec<usize> {
        self.states
            .iter()
            .enumerate()
            .filter(|(_, s)| !ABSORBING_STATES.contains(&s.as_str()))
            .map(|(i, _)| i)
            .collect()
    }

    /// Indices of `[Conversion, Null]`; `None` where a terminal never occurs.
    pub fn absorbing_indices(&self) -> [Option<usize>; 2] {
        ABSORBING_STATES.map(|s| self.get(s))
    }
}
