//! # funnel-core
//!
//! Foundation crate for the funnel attribution engine.
//! Defines the shared types, errors, config, tracing bootstrap, and constants.
//! The analysis crate depends on this.

pub mod config;
pub mod constants;
pub mod errors;
pub mod tracing;
pub mod types;

// Re-export the most commonly used types at the crate root.
pub use config::AttributionConfig;
pub use errors::error_code::FunnelErrorCode;
pub use errors::{AttributionError, AttributionResult};
pub use types::collections::{FxHashMap, FxHashSet};
pub use types::path::FunnelPath;
pub use types::record::{FunnelRow, FunnelTable, Record};
