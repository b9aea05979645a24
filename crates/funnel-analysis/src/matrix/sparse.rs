//! Compressed sparse row transition matrix for large state universes.

use std::collections::BTreeMap;

use nalgebra::DMatrix;

/// CSR layout: row `r` owns `col_idx[row_ptr[r]..row_ptr[r + 1]]`, columns ascending.
#[derive(Debug, Clone, PartialEq)]
pub struct CsrTransitions {
    n: usize,
    row_ptr: Vec<usize>,
    col_idx: Vec<usize>,
    values: Vec<f64>,
}

impl CsrTransitions {
    /// Build from edge counts keyed by `(from, to)`. `BTreeMap` order is CSR order.
    pub fn from_counts(n: usize, counts: &BTreeMap<(usize, usize), u64>) -> Self {
        let mut totals = vec![0u64; n];
        for (&(from, _), &count) in counts {
            totals[from] += count;
        }

        let mut row_ptr = vec![0usize; n + 1];
        let mut col_idx = Vec::with_capacity(counts.len());
        let mut values = Vec::with_capacity(counts.len());
        for (&(from, to), &count) in counts {
            row_ptr[from + 1] += 1;
            col_idx.push(to);
            values.push(count as f64 / totals[from] as f64);
        }
        for r in 0..n {
            row_ptr[r + 1] += row_ptr[r];
        }

        Self {
            n,
            row_ptr,
            col_idx,
            values,
        }
    }

    pub fn n_states(&self) -> usize {
        self.n
    }

    pub fn nnz(&self) -> usize {
        self.values.len()
    }

    /// `(col, value)` pairs of one row.
    pub fn row(&self, row: usize) -> impl Iterator<Item = (usize, f64)> + '_ {
        let span = self.row_ptr[row]..self.row_ptr[row + 1];
        self.col_idx[span.clone()]
            .iter()
            .copied()
            .zip(self.values[span].iter().copied())
    }

    pub fn get(&self, row: usize, col: usize) -> f64 {
        let span = self.row_ptr[row]..self.row_ptr[row + 1];
        match self.col_idx[span.clone()].binary_search(&col) {
            Ok(pos) => self.values[span.start + pos],
            Err(_) => 0.0,
        }
    }

    pub fn row_sum(&self, row: usize) -> f64 {
        self.row(row).map(|(_, v)| v).sum()
    }

    /// Copy without `node`'s row and column; rows that lost an entry are
    /// renormalized, rows left empty stay zero.
    pub fn without_node(&self, node: usize) -> Self {
        let mut row_ptr = Vec::with_capacity(self.n + 1);
        let mut col_idx = Vec::with_capacity(self.nnz());
        let mut values = Vec::with_capacity(self.nnz());
        row_ptr.push(0);

        for row in 0..self.n {
            let start = values.len();
            let mut lost_mass = false;
            if row != node {
                for (col, value) in self.row(row) {
                    if col == node {
                        lost_mass = true;
                        continue;
                    }
                    col_idx.push(col);
                    values.push(value);
                }
            }
            if lost_mass {
                let sum: f64 = values[start..].iter().sum();
                if sum > 0.0 {
                    values[start..].iter_mut().for_each(|v| *v /= sum);
                }
            }
            row_ptr.push(values.len());
        }

        Self {
            n: self.n,
            row_ptr,
            col_idx,
            values,
        }
    }

    /// Densify the `rows × cols` block.
    pub fn block(&self, rows: &[usize], cols: &[usize]) -> DMatrix<f64> {
        let mut position = vec![None; self.n];
        for (j, &c) in cols.iter().enumerate() {
            position[c] = Some(j);
        }

        let mut out = DMatrix::zeros(rows.len(), cols.len());
        for (i, &r) in rows.iter().enumerate() {
            for (c, v) in self.row(r) {
                if let Some(j) = position[c] {
                    out[(i, j)] = v;
                }
            }
        }
        out
    }

    pub fn to_dense(&self) -> DMatrix<f64> {
        let all: Vec<usize> = (0..self.n).collect();
        self.block(&all, &all)
    }
}
