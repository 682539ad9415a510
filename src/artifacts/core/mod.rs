//! Core utilities and shared setup
//!
//! Diagnostics go through `tracing` and are written to stderr so they never
//! mix with command output on stdout.

use anyhow::Context;
use tracing_subscriber::EnvFilter;

/// Crate target the default filter applies to.
pub const LOG_TARGET: &str = "redline_trace";

/// Maps the number of `-v` flags to a level name.
pub fn verbosity_level(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Installs the global subscriber.
///
/// `RUST_LOG` wins over `verbosity` when it is set.
pub fn init_logging(verbosity: u8) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("{LOG_TARGET}={}", verbosity_level(verbosity))));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|err| anyhow::anyhow!(err))
        .context("failed to install the log subscriber")
}
