//! Logging setup.
//!
//! The library only emits `tracing` events; hosts decide whether to install
//! a subscriber. `RUST_LOG` overrides the default `info` filter, for example
//! `RUST_LOG=vet_insights_core=debug`.

use tracing_subscriber::{fmt, EnvFilter};

/// Install a global fmt subscriber.
///
/// Safe to call more than once; later calls are ignored.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_line_number(true)
        .try_init();
}

/// Debug-level subscriber that writes through the test harness.
pub fn init_test() {
    let _ = fmt()
        .with_env_filter(EnvFilter::new("debug"))
        .with_test_writer()
        .try_init();
}
