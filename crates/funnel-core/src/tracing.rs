//! Tracing bootstrap for binaries and tests that embed the engine.
//!
//! The library itself only emits events; installing a subscriber is the
//! embedding application's call.

use tracing_subscriber::EnvFilter;

use crate::config::ObservabilityConfig;

/// Install a `fmt` subscriber filtered by `RUST_LOG`, falling back to the
/// configured level. Returns `false` if a global subscriber already exists.
pub fn init_tracing(config: &ObservabilityConfig) -> bool {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.effective_log_level()));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init()
        .is_ok()
}
