//! Record → path construction, category mapping, record cleaning, and funnel summaries.

pub mod builder;
pub mod category;
pub mod cleaning;
pub mod funnel;
pub mod types;

pub use builder::{build_paths, PathBuilder};
pub use category::CategoryMapper;
pub use cleaning::drop_jump_orders;
pub use funnel::{FunnelSummary, StageCount};
pub use types::{BuildStats, PathOutcome};
