//! Applies a standard branch-protection ruleset to the allow-listed repositories of a
//! GitHub organization.
//!
//! The rollout is a single sequential pass:
//!
//! 1. read the access token from the environment,
//! 2. load the ruleset document,
//! 3. list the organization's repositories (all pages),
//! 4. keep the allow-listed, non-archived repositories,
//! 5. create the ruleset on each of them and report how many succeeded.

use github_client::{create_token_client, GitHubClient};
use tracing::{info, instrument};

pub mod applier;
pub mod config;
pub mod errors;
pub mod logging;
pub mod ruleset;

pub use applier::{ApplyOutcome, ApplySummary, RulesetApplier};
pub use config::StandardizerConfig;
pub use errors::Error;
pub use ruleset::RulesetDocument;

/// Runs a full ruleset rollout described by `config`.
///
/// The access token is read from the environment before anything else happens; when it
/// is missing the function returns without loading the ruleset or contacting GitHub.
///
/// # Errors
///
/// - `Error::MissingCredential` when the token variable is unset or empty
/// - `Error::LoadRuleset` / `Error::ParseRuleset` when the ruleset file is unusable
/// - `Error::GitHub` when the client cannot be built or the repository listing fails
#[instrument(skip(config), fields(org = %config.organization))]
pub async fn run(config: &StandardizerConfig) -> Result<ApplySummary, Error> {
    let token = config.token_from_env()?;

    let ruleset = config.load_ruleset()?;
    info!(
        path = ?config.ruleset_file,
        built_in = config.ruleset_file.is_none(),
        ruleset = ruleset.name().unwrap_or("<unnamed>"),
        "Loaded ruleset"
    );

    let client = GitHubClient::new(create_token_client(&token, &config.api_base_url)?);
    let applier = RulesetApplier::new(client);

    applier
        .apply(&config.organization, &ruleset, &config.repositories)
        .await
}
