//! Configuration for a ruleset rollout.
//!
//! The rollout is driven by a [`StandardizerConfig`]: the organization, the allow-list of
//! repositories, the ruleset file and the API endpoint. Built-in defaults describe the
//! standard rollout; a TOML file and command line flags can override any of them.
//!
//! # Example TOML Configuration
//!
//! ```toml
//! organization = "reichlab"
//! repositories = ["reichlab-python-template", "duck-hub"]
//! ruleset_file = "rulesets/custom.json"
//! api_base_url = "https://api.github.com"
//! token_env_var = "GITHUB_TOKEN"
//! ```

use std::{
    env, fs,
    path::{Path, PathBuf},
};

use serde::Deserialize;
use tracing::debug;

use crate::{errors::Error, ruleset::RulesetDocument};

/// Default organization whose repositories receive the ruleset
pub const DEFAULT_ORGANIZATION: &str = "reichlab";

/// Default environment variable holding the access token
pub const DEFAULT_TOKEN_ENV_VAR: &str = "GITHUB_TOKEN";

/// Repositories opted into ruleset standardization by default.
///
/// Repositories are added here once they are known not to break under the
/// standard protections.
pub const DEFAULT_REPOSITORIES: &[&str] = &["reichlab-python-template", "duck-hub"];

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;

/// Settings for a single ruleset rollout.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct StandardizerConfig {
    /// Organization that owns the repositories
    pub organization: String,

    /// Allow-list of repository names that receive the ruleset, in order
    pub repositories: Vec<String>,

    /// Ruleset JSON file; the built-in default is used when unset
    pub ruleset_file: Option<PathBuf>,

    /// Base URL of the GitHub REST API
    pub api_base_url: String,

    /// Environment variable holding the access token
    pub token_env_var: String,
}

impl Default for StandardizerConfig {
    fn default() -> Self {
        Self {
            organization: DEFAULT_ORGANIZATION.to_string(),
            repositories: DEFAULT_REPOSITORIES.iter().map(|r| r.to_string()).collect(),
            ruleset_file: None,
            api_base_url: github_client::DEFAULT_API_BASE_URL.to_string(),
            token_env_var: DEFAULT_TOKEN_ENV_VAR.to_string(),
        }
    }
}

impl StandardizerConfig {
    /// Loads configuration from a TOML file at the specified path.
    ///
    /// Fields missing from the file keep their built-in defaults. A relative
    /// `ruleset_file` is resolved against the directory containing the
    /// configuration file.
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` if the file does not exist, cannot be read, or
    /// contains invalid TOML.
    pub fn load(path: &Path) -> Result<Self, Error> {
        debug!("Loading configuration from {:?}", path);

        if !path.exists() {
            return Err(Error::Config(format!(
                "Configuration file not found: {:?}",
                path
            )));
        }

        let content = fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("Failed to read configuration file: {}", e)))?;

        let mut config: StandardizerConfig = toml::from_str(&content)
            .map_err(|e| Error::Config(format!("Failed to parse configuration file: {}", e)))?;

        if let Some(ruleset_file) = config.ruleset_file.take() {
            config.ruleset_file = Some(match path.parent() {
                Some(parent) if ruleset_file.is_relative() => parent.join(ruleset_file),
                _ => ruleset_file,
            });
        }

        Ok(config)
    }

    /// Loads the ruleset to apply.
    ///
    /// Reads `ruleset_file` when one is configured and falls back to the ruleset
    /// compiled into the binary otherwise.
    ///
    /// # Errors
    ///
    /// Returns `Error::LoadRuleset` or `Error::ParseRuleset` when the ruleset is unusable.
    pub fn load_ruleset(&self) -> Result<RulesetDocument, Error> {
        match &self.ruleset_file {
            Some(path) => RulesetDocument::load(path),
            None => RulesetDocument::built_in(),
        }
    }

    /// Reads the access token from the configured environment variable.
    ///
    /// An empty value is treated the same as an unset one.
    ///
    /// # Errors
    ///
    /// Returns `Error::MissingCredential` naming the variable when no token is available.
    pub fn token_from_env(&self) -> Result<String, Error> {
        match env::var(&self.token_env_var) {
            Ok(token) if !token.trim().is_empty() => Ok(token),
            _ => Err(Error::MissingCredential(self.token_env_var.clone())),
        }
    }
}
