//! Reserved tokens and default values shared across the engine.

/// Token every path begins with.
pub const START: &str = "Start";

/// Terminal token for an entity that reached the final stage.
pub const CONVERSION: &str = "Conversion";

/// Terminal token for an entity that dropped out of the funnel.
pub const NULL: &str = "Null";

/// The absorbing set, in the column order used by the absorption solver.
pub const ABSORBING_STATES: [&str; 2] = [CONVERSION, NULL];

pub const DEFAULT_SEPARATOR: &str = "||";
pub const DEFAULT_UNKNOWN_CATEGORY: &str = "UNKNOWN";
pub const DEFAULT_MIN_PATH_LENGTH: usize = 2;
pub const DEFAULT_MAX_PATH_LENGTH: usize = 10;

/// State count at which `MatrixBackend::Auto` switches to the sparse representation.
pub const DEFAULT_SPARSE_THRESHOLD: usize = 256;

pub const DEFAULT_EPSILON: f64 = 1e-6;

/// Reciprocal condition number below which `I - Q` is treated as singular.
pub const DEFAULT_SINGULAR_TOLERANCE: f64 = 1e-12;

pub const DEFAULT_MAX_WORKERS: usize = 4;
pub const DEFAULT_TASK_TIMEOUT_SECS: u64 = 300;

/// Funnel stages as `(source column, display label)`, in funnel order.
pub const DEFAULT_STAGES: [(&str, &str); 6] = [
    ("wish_create_time", "Wish"),
    ("intention_payment_time", "Intention"),
    ("deposit_payment_time", "Deposit"),
    ("lock_time", "Lock"),
    ("final_payment_time", "Final"),
    ("delivery_date", "Delivery"),
];
