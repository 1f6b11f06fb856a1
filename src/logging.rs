//! Diagnostic logging.
//!
//! Logs go to stderr through `tracing-subscriber`, so stdout only carries the
//! planning report. The level is read from `RUST_LOG` (default: `warn`),
//! e.g. `RUST_LOG=prodplan=debug` to see each constraint as it is added.

use tracing_subscriber::{EnvFilter, fmt};

const DEFAULT_FILTER: &str = "warn";

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Install the global subscriber. Call once, at the start of `main`.
pub fn init() {
    fmt()
        .with_env_filter(env_filter())
        .with_writer(std::io::stderr)
        .with_target(true)
        .init();
}

/// Subscriber for tests: verbose, captured by the test harness, and safe to
/// call from every test.
pub fn init_test() {
    let _ = fmt()
        .with_env_filter(EnvFilter::new("debug"))
        .with_test_writer()
        .try_init();
}
