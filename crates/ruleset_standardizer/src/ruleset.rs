//! Loading of the ruleset document sent to GitHub.
//!
//! The document is treated as opaque JSON in the GitHub rulesets API format and is
//! posted without modification. A default ruleset is compiled into the binary so the
//! tool works from any install location without a rulesets directory next to it.
//!
//! See: https://docs.github.com/en/rest/repos/rules

use std::{fs, path::Path};

use serde_json::Value;
use tracing::debug;

use crate::errors::Error;

#[cfg(test)]
#[path = "ruleset_tests.rs"]
mod tests;

/// File name the built-in ruleset is reported under in errors and logs.
pub const DEFAULT_RULESET_NAME: &str = "reichlab_default_branch_protections.json";

const DEFAULT_RULESET: &str =
    include_str!("../rulesets/reichlab_default_branch_protections.json");

/// A ruleset document, either built in or loaded from disk.
#[derive(Clone, Debug, PartialEq)]
pub struct RulesetDocument {
    body: Value,
}

impl RulesetDocument {
    /// Wraps an already parsed ruleset.
    pub fn new(body: Value) -> Self {
        Self { body }
    }

    /// Parses the ruleset compiled into the binary.
    ///
    /// # Errors
    ///
    /// Returns `Error::ParseRuleset` if the built-in document is not valid JSON.
    pub fn built_in() -> Result<Self, Error> {
        Self::parse(DEFAULT_RULESET, Path::new(DEFAULT_RULESET_NAME))
    }

    /// Reads and parses a ruleset JSON file.
    ///
    /// # Errors
    ///
    /// Returns `Error::LoadRuleset` if the file cannot be read and
    /// `Error::ParseRuleset` if it is not valid JSON.
    pub fn load(path: &Path) -> Result<Self, Error> {
        debug!("Loading ruleset from {:?}", path);

        let content = fs::read_to_string(path).map_err(|source| Error::LoadRuleset {
            path: path.to_path_buf(),
            source,
        })?;

        Self::parse(&content, path)
    }

    fn parse(content: &str, origin: &Path) -> Result<Self, Error> {
        let body = serde_json::from_str(content).map_err(|source| Error::ParseRuleset {
            path: origin.to_path_buf(),
            source,
        })?;

        Ok(Self { body })
    }

    /// The ruleset name, if the document declares one.
    pub fn name(&self) -> Option<&str> {
        self.body.get("name").and_then(Value::as_str)
    }

    /// The request body sent to GitHub.
    pub fn body(&self) -> &Value {
        &self.body
    }
}
