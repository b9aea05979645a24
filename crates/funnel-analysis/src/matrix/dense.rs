//! Dense transition matrix backed by `nalgebra::DMatrix<f64>`.

use std::collections::BTreeMap;

use nalgebra::DMatrix;

/// Row-stochastic (or all-zero row) dense matrix.
#[derive(Debug, Clone, PartialEq)]
pub struct DenseTransitions {
    data: DMatrix<f64>,
}

impl DenseTransitions {
    /// Build from edge counts keyed by `(from, to)`.
    pub fn from_counts(n: usize, counts: &BTreeMap<(usize, usize), u64>) -> Self {
        let mut totals = vec![0u64; n];
        for (&(from, _), &count) in counts {
            totals[from] += count;
        }

        let mut data = DMatrix::zeros(n, n);
        for (&(from, to), &count) in counts {
            data[(from, to)] = count as f64 / totals[from] as f64;
        }
        Self { data }
    }

    /// Wrap an existing matrix. Rows are expected to sum to 1 or 0.
    pub fn from_matrix(data: DMatrix<f64>) -> Self {
        Self { data }
    }

    pub fn n_states(&self) -> usize {
        self.data.nrows()
    }

    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.data[(row, col)]
    }

    pub fn row_sum(&self, row: usize) -> f64 {
        self.data.row(row).sum()
    }

    pub fn nnz(&self) -> usize {
        self.data.iter().filter(|v| **v != 0.0).count()
    }

    pub fn as_matrix(&self) -> &DMatrix<f64> {
        &self.data
    }

    /// Copy with `node`'s row and column zeroed; rows that lost mass are
    /// renormalized, rows left empty stay zero.
    pub fn without_node(&self, node: usize) -> Self {
        let n = self.n_states();
        let mut data = self.data.clone();
        data.row_mut(node).fill(0.0);

        for row in 0..n {
            if row == node || data[(row, node)] == 0.0 {
                continue;
            }
            data[(row, node)] = 0.0;
            let sum = data.row(row).sum();
            if sum > 0.0 {
                data.row_mut(row).unscale_mut(sum);
            }
        }
        Self { data }
    }

    /// Extract the `rows × cols` block.
    pub fn block(&self, rows: &[usize], cols: &[usize]) -> DMatrix<f64> {
        DMatrix::from_fn(rows.len(), cols.len(), |i, j| self.data[(rows[i], cols[j])])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counts(entries: &[((usize, usize), u64)]) -> BTreeMap<(usize, usize), u64> {
        entries.iter().copied().collect()
    }

    #[test]
    fn test_rows_normalized() {
        let m = DenseTransitions::from_counts(3, &counts(&[((0, 1), 3), ((0, 2), 1), ((1, 2), 2)]));
        assert_eq!(m.get(0, 1), 0.75);
        assert_eq!(m.get(0, 2), 0.25);
        assert_eq!(m.get(1, 2), 1.0);
        assert_eq!(m.row_sum(2), 0.0);
    }

    #[test]
    fn test_without_node_renormalizes_affected_rows() {
        let m = DenseTransitions::from_counts(3, &counts(&[((0, 1), 3), ((0, 2), 1), ((1, 2), 2)]));
        let removed = m.without_node(1);
        assert_eq!(removed.get(0, 1), 0.0);
        assert_eq!(removed.get(0, 2), 1.0);
        assert_eq!(removed.row_sum(1), 0.0);
        // The source matrix is untouched.
        assert_eq!(m.get(0, 1), 0.75);
    }
}
