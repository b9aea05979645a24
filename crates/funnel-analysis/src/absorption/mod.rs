//! Absorbing Markov chain algebra: `N = (I - Q)^-1`, absorption = `e_start · N · R`.

pub mod inverse;
pub mod solver;
pub mod types;

pub use inverse::invert;
pub use solver::{AbsorptionSolver, Partition};
pub use types::{Absorption, Provenance};
