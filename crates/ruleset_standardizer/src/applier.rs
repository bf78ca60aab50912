//! Applies a ruleset across the allow-listed repositories of an organization.
//!
//! This module provides the [`RulesetApplier`] component which lists the organization's
//! repositories, keeps the allow-listed, non-archived ones and creates the ruleset on
//! each of them in turn.

use github_client::{models::Repository, RulesetClient};
use http::StatusCode;
use serde_json::Value;
use tracing::{debug, error, info, warn};

use crate::{errors::Error, ruleset::RulesetDocument};

#[cfg(test)]
#[path = "applier_tests.rs"]
mod tests;

/// Messages GitHub uses when a ruleset with the same name is already present.
const CONFLICT_MARKERS: &[&str] = &["already exists", "must be unique"];

/// Outcome of creating the ruleset on a single repository.
#[derive(Debug, Clone, PartialEq)]
pub enum ApplyOutcome {
    /// GitHub accepted the ruleset.
    Applied,

    /// GitHub rejected the ruleset as unprocessable (HTTP 422).
    ///
    /// `confirmed` is set when the response body says the ruleset already exists.
    AlreadyExists { body: Value, confirmed: bool },

    /// Any other failure. `status` is `None` when no response was received.
    Failed {
        status: Option<StatusCode>,
        body: Value,
    },
}

/// Classifies the result of a ruleset creation request.
///
/// A 422 maps to [`ApplyOutcome::AlreadyExists`] on the status code alone; the body is
/// only inspected to annotate the outcome.
pub fn classify_response(result: Result<Value, github_client::Error>) -> ApplyOutcome {
    match result {
        Ok(_) => ApplyOutcome::Applied,
        Err(github_client::Error::ApiStatus { status, body })
            if status == StatusCode::UNPROCESSABLE_ENTITY =>
        {
            let confirmed = is_conflict_body(&body);
            ApplyOutcome::AlreadyExists { body, confirmed }
        }
        Err(github_client::Error::ApiStatus { status, body }) => ApplyOutcome::Failed {
            status: Some(status),
            body,
        },
        Err(e) => ApplyOutcome::Failed {
            status: None,
            body: Value::String(e.to_string()),
        },
    }
}

fn is_conflict_body(body: &Value) -> bool {
    let text = body.to_string().to_lowercase();
    CONFLICT_MARKERS.iter().any(|marker| text.contains(marker))
}

/// Selects the repositories that should receive the ruleset.
///
/// Keeps, in listing order, every repository that is on the allow-list and not archived.
pub fn select_repositories<'a>(
    repositories: &'a [Repository],
    allow_list: &[String],
) -> Vec<&'a Repository> {
    let selected: Vec<&Repository> = repositories
        .iter()
        .filter(|repo| allow_list.iter().any(|name| name == repo.name()) && !repo.is_archived())
        .collect();

    for name in allow_list {
        if !repositories.iter().any(|repo| repo.name() == name) {
            debug!(repo = name.as_str(), "Allow-listed repository not found in organization");
        }
    }

    selected
}

/// Counters for a ruleset rollout.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApplySummary {
    /// Number of repositories that passed the allow-list and archive filter
    pub considered: usize,

    /// Number of repositories where the ruleset was created
    pub applied: usize,

    /// Number of repositories that rejected the ruleset with a 422
    pub already_exists: usize,

    /// Number of repositories where creation failed for any other reason
    pub failed: usize,
}

impl ApplySummary {
    /// Records the outcome for one repository.
    pub fn record(&mut self, outcome: &ApplyOutcome) {
        match outcome {
            ApplyOutcome::Applied => self.applied += 1,
            ApplyOutcome::AlreadyExists { .. } => self.already_exists += 1,
            ApplyOutcome::Failed { .. } => self.failed += 1,
        }
    }
}

/// Rolls a ruleset out to the allow-listed repositories of an organization.
///
/// Requests are sent one at a time. A failure on one repository is logged and the
/// rollout moves on to the next; nothing is retried.
///
/// # Examples
///
/// ```rust,no_run
/// use github_client::{create_token_client, GitHubClient, DEFAULT_API_BASE_URL};
/// use ruleset_standardizer::{RulesetApplier, RulesetDocument};
///
/// # async fn example(ruleset: RulesetDocument) -> Result<(), Box<dyn std::error::Error>> {
/// let client = GitHubClient::new(create_token_client("ghp_example", DEFAULT_API_BASE_URL)?);
/// let applier = RulesetApplier::new(client);
///
/// let allow_list = vec!["duck-hub".to_string()];
/// let summary = applier.apply("reichlab", &ruleset, &allow_list).await?;
/// println!("Applied to {} repositories", summary.applied);
/// # Ok(())
/// # }
/// ```
pub struct RulesetApplier<C: RulesetClient> {
    /// GitHub client for API operations
    client: C,
}

impl<C: RulesetClient> RulesetApplier<C> {
    /// Creates a new RulesetApplier.
    pub fn new(client: C) -> Self {
        Self { client }
    }

    /// Applies the ruleset to every allow-listed, non-archived repository.
    ///
    /// # Arguments
    ///
    /// * `org_name` - Organization that owns the repositories
    /// * `ruleset` - Ruleset document sent to each repository
    /// * `allow_list` - Names of the repositories opted into the ruleset
    ///
    /// # Errors
    ///
    /// Returns `Error::GitHub` only when the repository listing fails. Failures on
    /// individual repositories are reported through the returned summary.
    pub async fn apply(
        &self,
        org_name: &str,
        ruleset: &RulesetDocument,
        allow_list: &[String],
    ) -> Result<ApplySummary, Error> {
        let repositories = self.client.list_org_repositories(org_name).await?;
        let selected = select_repositories(&repositories, allow_list);

        info!(
            org = org_name,
            ruleset = ruleset.name().unwrap_or("<unnamed>"),
            listed = repositories.len(),
            selected = selected.len(),
            "Applying ruleset to repositories"
        );

        let mut summary = ApplySummary {
            considered: selected.len(),
            ..Default::default()
        };

        for repo in selected {
            let repo_name = repo.name();
            info!(repo = repo_name, "Applying ruleset");

            let result = self
                .client
                .create_repository_ruleset(org_name, repo_name, ruleset.body())
                .await;
            let outcome = classify_response(result);

            match &outcome {
                ApplyOutcome::Applied => {
                    info!(repo = repo_name, "Successfully applied branch ruleset");
                }
                ApplyOutcome::AlreadyExists { body, confirmed } => {
                    warn!(
                        repo = repo_name,
                        response = %body,
                        confirmed_conflict = *confirmed,
                        "Failed to apply branch ruleset (likely because it already exists)"
                    );
                }
                ApplyOutcome::Failed { status, body } => {
                    error!(
                        repo = repo_name,
                        status = status.map(|s| s.as_u16()),
                        response = %body,
                        "Failed to apply branch ruleset"
                    );
                }
            }

            summary.record(&outcome);
        }

        info!(
            count = summary.applied,
            already_exists = summary.already_exists,
            failed = summary.failed,
            "All rulesets applied"
        );

        Ok(summary)
    }
}
