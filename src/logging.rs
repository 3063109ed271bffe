//! Logging configuration for sales-report.
//!
//! Logs go to stderr so that stdout carries nothing but the report.

use tracing_subscriber::EnvFilter;

/// Initializes stderr logging.
///
/// `RUST_LOG` takes precedence over `default_level` when it is set.
pub fn init_stderr_logging(default_level: &str) {
    let filter = build_filter(default_level);

    // A second init (tests, embedding) keeps the first subscriber.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Builds the env filter, falling back to `warn` for an invalid level.
fn build_filter(default_level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .unwrap_or_else(|_| EnvFilter::new("warn"))
}
