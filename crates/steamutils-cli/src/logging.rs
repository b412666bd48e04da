//! Diagnostic output on stderr

use std::io::{self, IsTerminal};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Filter used when neither `--log-level` nor `RUST_LOG` is given
pub const DEFAULT_LOG_LEVEL: &str = "warn";

/// Levels accepted by `--log-level`
pub const LOG_LEVELS: [&str; 5] = ["error", "warn", "info", "debug", "trace"];

/// `--log-level` wins over `RUST_LOG`, which wins over [`DEFAULT_LOG_LEVEL`]
pub fn env_filter(level: Option<&str>) -> EnvFilter {
    match level {
        Some(level) => EnvFilter::new(level),
        None => EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_LEVEL)),
    }
}

/// Install the global subscriber
///
/// Colors are only used when stderr is a terminal.
pub fn setup_logging(level: Option<&str>) {
    tracing_subscriber::registry()
        .with(env_filter(level))
        .with(
            fmt::layer()
                .with_target(false)
                .with_ansi(io::stderr().is_terminal())
                .with_writer(io::stderr),
        )
        .init();
}
