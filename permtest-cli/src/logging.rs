//! Tracing subscriber setup.
//!
//! Log lines go to stderr so stdout carries only results. `RUST_LOG` overrides
//! the default level.

use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

/// Default filter: `info`, or `warn` when `quiet` is set.
pub fn default_level(quiet: bool) -> &'static str {
    if quiet {
        "warn"
    } else {
        "info"
    }
}

/// Install the global subscriber. A second call is a no-op.
pub fn init_logging(quiet: bool) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level(quiet)));
    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .without_time(),
        )
        .try_init();
}
