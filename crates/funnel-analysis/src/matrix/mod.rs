//! Transition matrix assembly: paths → row-stochastic State×State matrix.
//!
//! Dense (`nalgebra::DMatrix`) and CSR representations share one interface
//! through [`TransitionMatrix`] and are numerically identical for the same
//! input: both divide integer edge counts by integer row totals.

pub mod assembler;
pub mod dense;
pub mod sparse;
pub mod state_index;

pub use assembler::{assemble, assemble_with, AssembledMatrix, TransitionMatrix};
pub use dense::DenseTransitions;
pub use sparse::CsrTransitions;
pub use state_index::StateIndex;
