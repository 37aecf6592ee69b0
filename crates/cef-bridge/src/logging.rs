//! Logging setup for embedders
//!
//! The bridge only emits `tracing` events; installing a subscriber is left to
//! the embedder. [`init`] is a convenience for applications without one.

use tracing_subscriber::EnvFilter;

/// Install a formatted subscriber
///
/// `RUST_LOG` wins when set; otherwise `filter` (typically
/// `Config::log_filter()`) is used. Returns false when a global subscriber
/// was already installed, in which case nothing changes.
pub fn init(filter: &str) -> bool {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_target(false)
        .try_init()
        .is_ok()
}
