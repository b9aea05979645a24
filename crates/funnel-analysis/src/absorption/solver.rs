//! AbsorptionSolver: conversion probability from `Start` for one matrix.
//!
//! States split into the absorbing set `{Conversion, Null}` and everything
//! else (transient, always including `Start`). With `Q` the transient block
//! and `R` the transient→absorbing block:
//!
//! ```text
//! N = (I - Q)^-1
//! absorption = e_start · N · R      // [P(Conversion), P(Null)]
//! ```

use nalgebra::DMatrix;

use funnel_core::config::SolverConfig;
use funnel_core::constants::START;
use funnel_core::errors::SolverError;

use crate::matrix::{AssembledMatrix, StateIndex, TransitionMatrix};

use super::inverse::invert;
use super::types::{Absorption, Provenance};

/// Transient/absorbing split of a state index.
///
/// Computed once per dimension and reused by every removal trial, since
/// removal never changes the state universe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Partition {
    pub transient: Vec<usize>,
    /// Matrix indices of `[Conversion, Null]`, if they occur.
    pub absorbing: [Option<usize>; 2],
    /// Position of `Start` within `transient`.
    pub start: usize,
    pub n_states: usize,
}

impl Partition {
    pub fn new(index: &StateIndex) -> Result<Self, SolverError> {
        let transient = index.transient_indices();
        let start_idx = index.get(START).ok_or(SolverError::MissingStartState)?;
        let start = transient
            .iter()
            .position(|&i| i == start_idx)
            .ok_or(SolverError::MissingStartState)?;

        Ok(Self {
            transient,
            absorbing: index.absorbing_indices(),
            start,
            n_states: index.len(),
        })
    }
}

/// Solves absorption probabilities under one [`SolverConfig`].
pub struct AbsorptionSolver<'a> {
    config: &'a SolverConfig,
}

impl<'a> AbsorptionSolver<'a> {
    pub fn new(config: &'a SolverConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SolverConfig {
        self.config
    }

    /// Solve for an assembled matrix.
    pub fn solve(&self, assembled: &AssembledMatrix) -> Result<Absorption, SolverError> {
        let partition = Partition::new(&assembled.index)?;
        self.solve_partitioned(&assembled.matrix, &partition)
    }

    /// Solve for `matrix` against a precomputed partition.
    pub fn solve_partitioned(
        &self,
        matrix: &TransitionMatrix,
        partition: &Partition,
    ) -> Result<Absorption, SolverError> {
        if matrix.n_states() != partition.n_states {
            return Err(SolverError::DimensionMismatch {
                rows: matrix.n_states(),
                cols: matrix.n_states(),
                states: partition.n_states,
            });
        }

        let (n, provenance) = self.fundamental_matrix(matrix, partition)?;
        let r = Self::absorbing_block(matrix, partition);
        let absorption = n.row(partition.start) * r;

        Ok(Absorption {
            conversion_probability: absorption[(0, 0)].clamp(0.0, 1.0),
            null_probability: absorption[(0, 1)].clamp(0.0, 1.0),
            provenance,
            n_states: partition.n_states,
            n_transient: partition.transient.len(),
        })
    }

    /// `N = (I - Q)^-1` with its provenance.
    pub fn fundamental_matrix(
        &self,
        matrix: &TransitionMatrix,
        partition: &Partition,
    ) -> Result<(DMatrix<f64>, Provenance), SolverError> {
        let t = partition.transient.len();
        let q = matrix.block(&partition.transient, &partition.transient);
        let i_minus_q = DMatrix::<f64>::identity(t, t) - q;
        invert(&i_minus_q, self.config)
    }

    /// `R`: transient rows × `[Conversion, Null]`, zero columns for absent terminals.
    fn absorbing_block(matrix: &TransitionMatrix, partition: &Partition) -> DMatrix<f64> {
        let mut r = DMatrix::zeros(partition.transient.len(), 2);
        for (k, col) in partition.absorbing.iter().enumerate() {
            if let Some(col) = col {
                let column = matrix.block(&partition.transient, &[*col]);
                r.set_column(k, &column.column(0));
            }
        }
        r
    }
}
