//! Tracing subscriber setup.
//!
//! JSON lines outside development, human-readable output locally. `RUST_LOG`
//! overrides the configured filter when set.

use tracing_subscriber::util::TryInitError;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Resolve the filter: `RUST_LOG` first, then the configured directive,
/// then plain `info` if the directive does not parse.
pub fn env_filter(directive: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(directive))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Install the global subscriber.
///
/// # Errors
///
/// Fails if a global subscriber is already installed.
pub fn init_logging(directive: &str, json: bool) -> Result<(), TryInitError> {
    let filter = env_filter(directive);

    if json {
        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .json()
                    .with_target(true)
                    .with_current_span(true)
                    .flatten_event(true),
            )
            .with(filter)
            .try_init()?;
    } else {
        tracing_subscriber::registry()
            .with(fmt::layer().pretty().with_target(true))
            .with(filter)
            .try_init()?;
    }

    tracing::info!(filter = %directive, json, "logging initialized");
    Ok(())
}

#[cfg(test)]
pub fn init_test_logging() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_env_filter("debug")
        .try_init();
}
