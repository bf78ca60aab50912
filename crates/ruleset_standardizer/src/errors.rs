use std::{io, path::PathBuf};

use thiserror::Error;

#[cfg(test)]
#[path = "errors_tests.rs"]
mod tests;

/// Errors that stop a ruleset rollout.
///
/// Per-repository failures while applying the ruleset are not represented here; they
/// are logged and counted by the applier and never abort the run.
#[derive(Error, Debug)]
pub enum Error {
    /// The access token environment variable is not set or is empty.
    ///
    /// Raised before any client is built, so no request reaches GitHub.
    #[error("{0} environment variable is required")]
    MissingCredential(String),

    /// Configuration error occurred while loading or parsing configuration.
    ///
    /// This error is returned when the configuration file is missing, cannot be
    /// read, or contains invalid TOML.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The ruleset file could not be read.
    #[error("Failed to load ruleset file {path:?}: {source}")]
    LoadRuleset {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The ruleset file is not valid JSON.
    #[error("Failed to parse ruleset file {path:?}: {source}")]
    ParseRuleset {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A GitHub operation the whole run depends on failed.
    ///
    /// Returned when the client cannot be built or the repository listing fails.
    #[error("GitHub error: {0}")]
    GitHub(#[from] github_client::Error),
}
