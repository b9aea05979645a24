//! Removal-effect evaluation: how much conversion probability each node carries.

pub mod candidates;
pub mod evaluator;
pub mod types;

pub use candidates::{candidate_nodes, observed_categories};
pub use evaluator::{removal_effects, RemovalEvaluator};
pub use types::{FailedNode, RemovalEffect, RemovalReport};
