use std::path::PathBuf;

use clap::Parser;
use ruleset_standardizer::{logging::init_logging, run, ApplySummary, Error, StandardizerConfig};
use tracing::{error, info, info_span, Instrument};

#[cfg(test)]
#[path = "main_tests.rs"]
mod tests;

/// Apply the standard branch-protection ruleset to allow-listed organization repositories
#[derive(Parser, Debug)]
#[command(name = "standardize-rulesets", version)]
#[command(about = "Apply a standard branch-protection ruleset to organization repositories", long_about = None)]
struct Cli {
    /// TOML configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Organization that owns the repositories
    #[arg(long)]
    org: Option<String>,

    /// Ruleset JSON file to apply
    #[arg(long)]
    ruleset: Option<PathBuf>,

    /// Repository to apply the ruleset to; repeat to build the allow-list
    #[arg(long = "repo", value_name = "NAME")]
    repos: Vec<String>,

    /// Base URL of the GitHub REST API
    #[arg(long)]
    api_url: Option<String>,
}

impl Cli {
    /// Resolves the configuration: built-in defaults, then the config file, then flags.
    fn resolve_config(&self) -> Result<StandardizerConfig, Error> {
        let mut config = match &self.config {
            Some(path) => StandardizerConfig::load(path)?,
            None => StandardizerConfig::default(),
        };

        if let Some(org) = &self.org {
            config.organization = org.clone();
        }
        if let Some(ruleset) = &self.ruleset {
            config.ruleset_file = Some(ruleset.clone());
        }
        if !self.repos.is_empty() {
            config.repositories = self.repos.clone();
        }
        if let Some(api_url) = &self.api_url {
            config.api_base_url = api_url.clone();
        }

        Ok(config)
    }
}

async fn execute(cli: &Cli) -> Result<ApplySummary, Error> {
    let config = cli.resolve_config()?;
    run(&config).await
}

#[tokio::main]
async fn main() {
    init_logging();

    let cli = Cli::parse();
    let span = info_span!("standardize_rulesets", version = env!("CARGO_PKG_VERSION"));

    let exit_code = async {
        match execute(&cli).await {
            Ok(summary) => {
                info!(count = summary.applied, "Ruleset rollout finished");
                0
            }
            Err(Error::MissingCredential(var)) => {
                // Nothing was sent; this is not reported through the exit status.
                error!("{var} environment variable is required");
                0
            }
            Err(e) => {
                error!("Error: {e}");
                1
            }
        }
    }
    .instrument(span)
    .await;

    if exit_code != 0 {
        std::process::exit(exit_code);
    }
}
