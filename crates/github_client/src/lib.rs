//! Crate for interacting with the GitHub REST API.
//!
//! This crate provides a client for making token-authenticated requests to GitHub,
//! covering the operations needed to roll a standard ruleset out across an
//! organization: listing the organization's repositories (following pagination
//! links) and creating repository rulesets.

use async_trait::async_trait;
use http::{StatusCode, Uri};
use octocrab::service::middleware::retry::RetryConfig;
use octocrab::{FromResponse, Octocrab, Page};
use tracing::{debug, error, info, instrument};

pub mod errors;
pub use errors::Error;

pub mod models;

// Reference the tests module in the separate file
#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;

/// Base URL of the public GitHub REST API.
pub const DEFAULT_API_BASE_URL: &str = "https://api.github.com";

/// Largest page size accepted by the GitHub listing endpoints.
const REPOSITORIES_PER_PAGE: u8 = 100;

/// A client for interacting with the GitHub API, authenticated with an access token.
#[derive(Debug)]
pub struct GitHubClient {
    client: Octocrab,
}

impl GitHubClient {
    /// Creates a new `GitHubClient` from an already configured `Octocrab` instance.
    ///
    /// Use [`create_token_client`] to build an `Octocrab` instance that matches the
    /// behaviour this crate expects (token auth, no automatic retries).
    pub fn new(client: Octocrab) -> Self {
        Self { client }
    }
}

/// Trait for the repository and ruleset operations used by the ruleset rollout.
///
/// Implemented by [`GitHubClient`]; callers depend on the trait so the rollout logic
/// can be exercised against in-memory implementations.
#[async_trait]
pub trait RulesetClient: Send + Sync {
    /// Lists every repository in an organization.
    ///
    /// Follows the `Link: <...>; rel="next"` header until GitHub stops sending one and
    /// returns all pages concatenated in page order.
    ///
    /// # Arguments
    ///
    /// * `org_name` - The name of the organization.
    ///
    /// # Errors
    ///
    /// Returns `Error::ApiStatus` as soon as any page comes back with a non-success
    /// status; pages fetched before the failure are discarded. Returns
    /// `Error::ApiError` for transport failures and undecodable success bodies.
    async fn list_org_repositories(
        &self,
        org_name: &str,
    ) -> Result<Vec<models::Repository>, Error>;

    /// Creates a ruleset on a repository.
    ///
    /// The ruleset document is sent as the request body without modification.
    ///
    /// # Arguments
    ///
    /// * `owner` - The owner of the repository (user or organization name).
    /// * `repo` - The name of the repository.
    /// * `ruleset` - The ruleset document, in the GitHub rulesets API format.
    ///
    /// # Returns
    ///
    /// The ruleset as stored by GitHub, or `Value::Null` when the response has no body.
    ///
    /// # Errors
    ///
    /// Returns `Error::ApiStatus` carrying the status and response body whenever the
    /// request is rejected, whatever the shape of the body. A 422 typically means the
    /// ruleset already exists.
    async fn create_repository_ruleset(
        &self,
        owner: &str,
        repo: &str,
        ruleset: &serde_json::Value,
    ) -> Result<serde_json::Value, Error>;
}

#[async_trait]
impl RulesetClient for GitHubClient {
    #[instrument(skip(self), fields(org_name = %org_name))]
    async fn list_org_repositories(
        &self,
        org_name: &str,
    ) -> Result<Vec<models::Repository>, Error> {
        let first_page = format!(
            "/orgs/{}/repos?per_page={}",
            org_name, REPOSITORIES_PER_PAGE
        );
        let first_uri = first_page.parse::<Uri>().map_err(|e| {
            error!(uri = %first_page, error = %e, "Invalid repository listing URI");
            Error::ApiError(format!("Invalid repository listing URI '{}': {}", first_page, e))
        })?;

        let mut repositories = Vec::new();
        let mut page_number = 0u32;
        let mut next_uri = Some(first_uri);
        while let Some(uri) = next_uri.take() {
            page_number += 1;
            debug!("Making API call to: {}", uri);

            let response = self.client._get(uri).await.map_err(|e| {
                log_octocrab_error("Failed to list organization repositories", &e);
                map_octocrab_error(e)
            })?;

            let status = response.status();
            if !status.is_success() {
                let text = self.client.body_to_string(response).await;
                error!(
                    org_name = org_name,
                    page = page_number,
                    status = status.as_u16(),
                    "Failed to list organization repositories"
                );
                return Err(status_error(status, &text.unwrap_or_default()));
            }

            let mut page = Page::<models::Repository>::from_response(response)
                .await
                .map_err(|e| {
                    log_octocrab_error("Failed to decode page of repositories", &e);
                    map_octocrab_error(e)
                })?;

            debug!(
                org_name = org_name,
                page = page_number,
                count = page.items.len(),
                "Retrieved page of repositories"
            );
            repositories.append(&mut page.items);
            next_uri = page.next;
        }

        info!(
            org_name = org_name,
            pages = page_number,
            count = repositories.len(),
            "Successfully listed organization repositories"
        );

        Ok(repositories)
    }

    #[instrument(skip(self, ruleset), fields(owner = %owner, repo = %repo))]
    async fn create_repository_ruleset(
        &self,
        owner: &str,
        repo: &str,
        ruleset: &serde_json::Value,
    ) -> Result<serde_json::Value, Error> {
        let path = format!("/repos/{}/{}/rulesets", owner, repo);

        debug!("Making API call to: {}", path);
        let response = self
            .client
            ._post(path.as_str(), Some(ruleset))
            .await
            .map_err(|e| {
                log_octocrab_error("Failed to create repository ruleset", &e);
                map_octocrab_error(e)
            })?;

        // Rejections are classified by the caller, so they are not logged here.
        let status = response.status();
        let text = self.client.body_to_string(response).await;
        if !status.is_success() {
            return Err(status_error(status, &text.unwrap_or_default()));
        }

        let text = text.map_err(|e| {
            log_octocrab_error("Failed to read created ruleset", &e);
            map_octocrab_error(e)
        })?;
        if text.trim().is_empty() {
            return Ok(serde_json::Value::Null);
        }
        serde_json::from_str(&text).map_err(|e| {
            error!(error = %e, "Failed to decode created ruleset");
            Error::ApiError(format!("Failed to decode created ruleset: {}", e))
        })
    }
}

/// Creates an `Octocrab` client authenticated with a personal or installation access token.
///
/// Automatic retries are disabled so every request is sent exactly once.
///
/// # Arguments
///
/// * `token` - The access token.
/// * `base_uri` - Base URL of the REST API, usually [`DEFAULT_API_BASE_URL`].
///
/// # Errors
///
/// Returns `Error::AuthError` if the base URI is invalid or the client cannot be built.
///
/// # Example
///
/// ```rust,no_run
/// use github_client::{create_token_client, GitHubClient, DEFAULT_API_BASE_URL};
///
/// # fn example() -> Result<(), github_client::Error> {
/// let octocrab = create_token_client("ghp_example", DEFAULT_API_BASE_URL)?;
/// let client = GitHubClient::new(octocrab);
/// # Ok(())
/// # }
/// ```
#[instrument(skip(token))]
pub fn create_token_client(token: &str, base_uri: &str) -> Result<Octocrab, Error> {
    Octocrab::builder()
        .personal_token(token.to_string())
        .add_retry_config(RetryConfig::None)
        .base_uri(base_uri)
        .map_err(|e| {
            error!(base_uri = base_uri, error = %e, "Invalid GitHub API base URI");
            Error::AuthError(format!("Invalid GitHub API base URI '{}': {}", base_uri, e))
        })?
        .build()
        .map_err(|e| {
            error!(error = ?e, "Failed to build Octocrab client with access token");
            Error::AuthError("Failed to build GitHub client with access token.".to_string())
        })
}

/// Builds the error for a non-success response.
///
/// The body is kept as JSON when it parses as JSON and as a plain string
/// otherwise (empty bodies, HTML error pages from proxies).
fn status_error(status: StatusCode, text: &str) -> Error {
    let body = serde_json::from_str(text)
        .unwrap_or_else(|_| serde_json::Value::String(text.to_string()));
    Error::ApiStatus { status, body }
}

/// Converts an octocrab error into the crate error.
///
/// Octocrab only reports transport and decoding problems here; HTTP statuses
/// are checked before a body is decoded.
fn map_octocrab_error(e: octocrab::Error) -> Error {
    Error::ApiError(e.to_string())
}

fn log_octocrab_error(message: &str, e: &octocrab::Error) {
    match e {
        octocrab::Error::UriParse { source, .. } => error!(
            error_message = source.to_string(),
            "{}. Failed to parse URI.",
            message
        ),
        octocrab::Error::Uri { source, .. } => error!(
            error_message = source.to_string(),
            "{}, Failed to parse URI.",
            message
        ),
        octocrab::Error::InvalidHeaderValue { source, .. } => error!(
            error_message = source.to_string(),
            "{}. One of the header values was invalid.",
            message
        ),
        octocrab::Error::InvalidUtf8 { source, .. } => error!(
            error_message = source.to_string(),
            "{}. The message wasn't valid UTF-8.",
            message,
        ),
        _ => error!(error_message = e.to_string(), message),
    };
}
