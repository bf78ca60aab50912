//! Logging setup for the `standardize-rulesets` binary.
//!
//! Logs go to stderr. An interactive terminal gets human readable output; anything else
//! (CI logs, redirected output) gets one JSON object per line.

use std::io::{self, IsTerminal};

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Environment variable holding the tracing filter directives
pub const LOG_ENV_VAR: &str = "RULESET_STANDARDIZER_LOG";

/// Filter used when [`LOG_ENV_VAR`] is unset or invalid
pub const DEFAULT_LOG_FILTER: &str = "info";

#[cfg(test)]
#[path = "logging_tests.rs"]
mod tests;

/// Builds the event filter from [`LOG_ENV_VAR`], falling back to [`DEFAULT_LOG_FILTER`].
pub fn env_filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER))
}

/// Installs the global tracing subscriber.
///
/// Must be called once, before any event is emitted.
pub fn init_logging() {
    if io::stderr().is_terminal() {
        tracing_subscriber::registry()
            .with(fmt::layer().pretty().with_writer(io::stderr))
            .with(env_filter())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .json()
                    .with_current_span(true)
                    .with_span_list(false)
                    .with_writer(io::stderr),
            )
            .with(env_filter())
            .init();
    }
}
