//! Logging setup utilities for Pomoroom binaries.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize the tracing subscriber with the specified default log level.
///
/// Both the library crate and the binary log at `default_log_level` unless
/// overridden with the `RUST_LOG` environment variable.
///
/// # Arguments
///
/// * `crate_name` - The library crate emitting most events (e.g., "pomoroom_server")
/// * `binary_name` - The name of the binary (e.g., "pomoroom_server")
/// * `default_log_level` - The default log level (e.g., "debug", "info", "warn", "error")
///
/// # Examples
///
/// ```no_run
/// use pomoroom_shared::logger::setup_logger;
///
/// setup_logger("pomoroom_server", "pomoroom_server", "debug");
/// ```
pub fn setup_logger(crate_name: &str, binary_name: &str, default_log_level: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!(
                    "{}={},{}={},tower_http={}",
                    crate_name.replace('-', "_"),
                    default_log_level,
                    binary_name.replace('-', "_"),
                    default_log_level,
                    default_log_level
                )
                .into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
