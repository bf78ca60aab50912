//! Error types for GitHub client operations.
//!
//! This module defines the error types that can occur when interacting with the GitHub API
//! through the github_client crate. Non-success HTTP responses keep their status code and
//! decoded body so callers can decide which failures are expected.

use http::StatusCode;

#[cfg(test)]
#[path = "errors_tests.rs"]
mod tests;

/// Errors that can occur during GitHub client operations.
///
/// ## Examples
///
/// ```rust,ignore
/// use github_client::{Error, RulesetClient};
///
/// match client.create_repository_ruleset("my-org", "my-repo", &ruleset).await {
///     Ok(created) => println!("Ruleset created: {created}"),
///     Err(e) if e.is_unprocessable() => eprintln!("Ruleset rejected: {e}"),
///     Err(e) => eprintln!("Other error: {e}"),
/// }
/// ```
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The request could not be sent or its response could not be read.
    ///
    /// Covers connection failures, invalid URIs and other transport problems
    /// where no HTTP status is available.
    #[error("API request failed: {0}")]
    ApiError(String),

    /// The GitHub client could not be initialized.
    ///
    /// Occurs when the token or the API base URL is rejected while building
    /// the underlying octocrab client.
    #[error("Failed to authenticate or initialize GitHub client: {0}")]
    AuthError(String),

    /// GitHub answered with a non-success HTTP status.
    ///
    /// `body` holds the error document returned by GitHub (`message`,
    /// `errors`, `documentation_url`).
    #[error("GitHub API returned status {status}")]
    ApiStatus {
        status: StatusCode,
        body: serde_json::Value,
    },
}

impl Error {
    /// Returns the HTTP status carried by this error, if GitHub sent one.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Error::ApiStatus { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Returns `true` when GitHub rejected the request as unprocessable (HTTP 422).
    ///
    /// For ruleset creation this usually means a ruleset with the same name
    /// already exists on the repository.
    pub fn is_unprocessable(&self) -> bool {
        self.status() == Some(StatusCode::UNPROCESSABLE_ENTITY)
    }
}
