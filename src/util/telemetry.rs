//! Telemetry helpers for structured logging and tracing.

use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is unset: scheduler decisions at info level.
pub const DEFAULT_FILTER: &str = "peer_allocation=info";

/// Install a default env-filtered subscriber unless one is already set.
///
/// The scheduler only emits `tracing` events; embedding applications that
/// install their own subscriber can skip this. Set
/// `RUST_LOG=peer_allocation=debug` to see every pinning round.
pub fn init_tracing() {
    if tracing::dispatcher::has_been_set() {
        return;
    }
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init();
}
