//! Runs the attribution pipeline independently per categorical dimension.

pub mod coordinator;
pub mod dimension;
pub mod pool;

pub use coordinator::Coordinator;
pub use dimension::{analyze_dimension, DimensionOutcome, DimensionReport, DimensionSpec};
pub use pool::{TaskOutcome, WorkerPool};
