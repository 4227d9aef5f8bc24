//! Logging infrastructure for Lectio.
//!
//! Provides centralized tracing setup for the CLI. Events go to stderr so
//! that stdout carries only the rendered plan.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize logging with sensible defaults
///
/// Default level is WARN, but can be overridden with RUST_LOG env var.
pub fn init() {
    init_with_level("warn")
}

/// Map a `-v` count to a default log level
///
/// 0 -> warn, 1 -> info, 2 -> debug, 3+ -> trace
pub fn level_for_verbosity(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Initialize logging with a specific default level
///
/// # Arguments
/// * `default_level` - Default log level (trace, debug, info, warn, error)
///
/// This can still be overridden by RUST_LOG environment variable.
pub fn init_with_level(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact().with_writer(std::io::stderr))
        .init();
}

/// Initialize logging for testing (captures logs for test output)
#[cfg(test)]
pub fn init_test() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_env_filter(EnvFilter::new("trace"))
        .try_init();
}
