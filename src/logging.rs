//! Structured logging setup.
//!
//! Filtering follows `RUST_LOG`; without it the crate logs at `info`.

use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;

const DEFAULT_FILTER: &str = "domino=info";

/// Install the global fmt subscriber.
///
/// Returns false if a subscriber was already installed, which makes repeated
/// calls (tests, embedding hosts) harmless.
pub fn init() -> bool {
    init_with_filter(DEFAULT_FILTER)
}

/// Like [`init`], with `default_filter` used when `RUST_LOG` is unset or
/// invalid.
pub fn init_with_filter(default_filter: &str) -> bool {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_target(true).with_level(true))
        .try_init()
        .is_ok()
}
