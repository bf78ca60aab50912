//! # Models
//!
//! This module contains the data models returned by the GitHub client.
//!
//! Only the fields the ruleset tooling consumes are modelled; every other field in the
//! GitHub response is ignored during deserialization.

use serde::Deserialize;

#[cfg(test)]
#[path = "models_tests.rs"]
mod tests;

/// Represents a GitHub repository as returned by the organization repository listing.
///
/// # Examples
///
/// ```rust
/// use github_client::models::Repository;
///
/// let repo = Repository::new("duck-hub".to_string(), false);
///
/// assert_eq!(repo.name(), "duck-hub");
/// assert!(!repo.is_archived());
/// ```
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct Repository {
    /// The name of the repository (unique within the organization)
    name: String,
    /// The full name of the repository (owner/name)
    #[serde(default)]
    full_name: Option<String>,
    /// Whether the repository is archived
    #[serde(default)]
    archived: bool,
}

impl Repository {
    /// Creates a new Repository instance.
    ///
    /// # Arguments
    ///
    /// * `name` - The name of the repository
    /// * `archived` - Whether the repository is archived
    pub fn new(name: String, archived: bool) -> Self {
        Self {
            name,
            full_name: None,
            archived,
        }
    }

    /// Returns the name of the repository (without owner).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the full name (owner/name), falling back to the bare name.
    pub fn full_name(&self) -> &str {
        self.full_name.as_deref().unwrap_or(&self.name)
    }

    /// Returns whether the repository is archived.
    ///
    /// Archived repositories are read-only and cannot receive rulesets.
    pub fn is_archived(&self) -> bool {
        self.archived
    }
}
