//! Aggregates paths into a transition matrix over the sorted state universe.

use std::collections::BTreeMap;

use nalgebra::DMatrix;

use funnel_core::config::MatrixConfig;
use funnel_core::FunnelPath;

use super::dense::DenseTransitions;
use super::sparse::CsrTransitions;
use super::state_index::StateIndex;

/// Either representation; both answer the same queries identically.
#[derive(Debug, Clone, PartialEq)]
pub enum TransitionMatrix {
    Dense(DenseTransitions),
    Sparse(CsrTransitions),
}

impl TransitionMatrix {
    pub fn n_states(&self) -> usize {
        match self {
            Self::Dense(m) => m.n_states(),
            Self::Sparse(m) => m.n_states(),
        }
    }

    pub fn nnz(&self) -> usize {
        match self {
            Self::Dense(m) => m.nnz(),
            Self::Sparse(m) => m.nnz(),
        }
    }

    pub fn is_sparse(&self) -> bool {
        matches!(self, Self::Sparse(_))
    }

    pub fn get(&self, row: usize, col: usize) -> f64 {
        match self {
            Self::Dense(m) => m.get(row, col),
            Self::Sparse(m) => m.get(row, col),
        }
    }

    pub fn row_sum(&self, row: usize) -> f64 {
        match self {
            Self::Dense(m) => m.row_sum(row),
            Self::Sparse(m) => m.row_sum(row),
        }
    }

    /// Copy with one node's edges removed. The receiver is never mutated.
    pub fn without_node(&self, node: usize) -> Self {
        match self {
            Self::Dense(m) => Self::Dense(m.without_node(node)),
            Self::Sparse(m) => Self::Sparse(m.without_node(node)),
        }
    }

    /// Dense copy of the `rows × cols` block.
    pub fn block(&self, rows: &[usize], cols: &[usize]) -> DMatrix<f64> {
        match self {
            Self::Dense(m) => m.block(rows, cols),
            Self::Sparse(m) => m.block(rows, cols),
        }
    }

    pub fn to_dense(&self) -> DMatrix<f64> {
        match self {
            Self::Dense(m) => m.as_matrix().clone(),
            Self::Sparse(m) => m.to_dense(),
        }
    }
}

/// Matrix plus the state bookkeeping it was built against.
#[derive(Debug, Clone, PartialEq)]
pub struct AssembledMatrix {
    pub matrix: TransitionMatrix,
    pub index: StateIndex,
    /// Total adjacent pairs counted.
    pub edge_count: u64,
}

impl AssembledMatrix {
    pub fn n_states(&self) -> usize {
        self.index.len()
    }
}

/// Assemble, picking the representation from `config`.
pub fn assemble(paths: &[FunnelPath], config: &MatrixConfig) -> AssembledMatrix {
    let index = StateIndex::from_paths(paths);
    let sparse = config.use_sparse(index.len());
    build(paths, index, sparse)
}

/// Assemble with an explicit representation.
pub fn assemble_with(paths: &[FunnelPath], sparse: bool) -> AssembledMatrix {
    build(paths, StateIndex::from_paths(paths), sparse)
}

fn build(paths: &[FunnelPath], index: StateIndex, sparse: bool) -> AssembledMatrix {
    let mut counts: BTreeMap<(usize, usize), u64> = BTreeMap::new();
    let mut edge_count = 0u64;
    for path in paths {
        for (from, to) in path.transitions() {
            // Every token is in the index by construction.
            if let (Some(i), Some(j)) = (index.get(from), index.get(to)) {
                *counts.entry((i, j)).or_insert(0) += 1;
                edge_count += 1;
            }
        }
    }

    let n = index.len();
    let matrix = if sparse {
        TransitionMatrix::Sparse(CsrTransitions::from_counts(n, &counts))
    } else {
        TransitionMatrix::Dense(DenseTransitions::from_counts(n, &counts))
    };

    tracing::debug!(
        states = n,
        edges = edge_count,
        nnz = counts.len(),
        sparse,
        "transition matrix assembled"
    );

    AssembledMatrix {
        matrix,
        index,
        edge_count,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edge_count_is_length_minus_one() {
        let paths = vec![
            FunnelPath::from_tokens(["Start", "Wish||HQ", "Null"]),
            FunnelPath::from_tokens(["Start", "Wish||HQ", "Lock||HQ", "Conversion"]),
        ];
        let assembled = assemble_with(&paths, false);
        assert_eq!(assembled.edge_count, 5);

        let wish = assembled.index.get("Wish||HQ").unwrap();
        let null = assembled.index.get("Null").unwrap();
        assert_eq!(assembled.matrix.get(wish, null), 0.5);
    }

    #[test]
    fn test_empty_paths_yield_empty_matrix() {
        let assembled = assemble(&[], &MatrixConfig::default());
        assert_eq!(assembled.n_states(), 0);
        assert_eq!(assembled.matrix.n_states(), 0);
        assert_eq!(assembled.edge_count, 0);
    }
}
