use super::*;
use serial_test::serial;
use std::{env, fs, path::Path};
use tempfile::TempDir;

const TEST_TOKEN_VAR: &str = "RULESET_STANDARDIZER_TEST_TOKEN";

#[test]
fn test_default_config() {
    let config = StandardizerConfig::default();

    assert_eq!(config.organization, "reichlab");
    assert_eq!(
        config.repositories,
        vec!["reichlab-python-template".to_string(), "duck-hub".to_string()]
    );
    assert_eq!(config.api_base_url, "https://api.github.com");
    assert_eq!(config.token_env_var, "GITHUB_TOKEN");
    assert!(config.ruleset_file.is_none());
}

#[test]
fn test_load_ruleset_defaults_to_built_in() {
    let config = StandardizerConfig::default();

    let ruleset = config.load_ruleset().expect("built-in ruleset should load");

    assert_eq!(ruleset.name(), Some("reichlab-default-branch-protections"));
}

#[test]
fn test_load_ruleset_does_not_depend_on_working_directory_layout() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let config_path = temp_dir.path().join("standardizer.toml");
    fs::write(&config_path, "organization = \"other-org\"\n").expect("Failed to write config");

    let config = StandardizerConfig::load(&config_path).expect("Failed to load config");

    assert!(config.ruleset_file.is_none());
    assert_eq!(
        config.load_ruleset().expect("built-in ruleset should load"),
        RulesetDocument::built_in().expect("built-in ruleset should parse")
    );
}

#[test]
fn test_load_ruleset_reads_configured_file() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let ruleset_path = temp_dir.path().join("custom.json");
    fs::write(&ruleset_path, r#"{ "name": "custom" }"#).expect("Failed to write ruleset");
    let config = StandardizerConfig {
        ruleset_file: Some(ruleset_path),
        ..Default::default()
    };

    let ruleset = config.load_ruleset().expect("configured ruleset should load");

    assert_eq!(ruleset.name(), Some("custom"));
}

#[test]
fn test_load_partial_config_keeps_defaults() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let config_path = temp_dir.path().join("standardizer.toml");
    fs::write(
        &config_path,
        r#"
organization = "other-org"
repositories = ["one", "two", "three"]
"#,
    )
    .expect("Failed to write config");

    let config = StandardizerConfig::load(&config_path).expect("Failed to load config");

    assert_eq!(config.organization, "other-org");
    assert_eq!(config.repositories, vec!["one", "two", "three"]);
    assert_eq!(config.api_base_url, "https://api.github.com");
    assert_eq!(config.token_env_var, "GITHUB_TOKEN");
    assert!(config.ruleset_file.is_none());
}

#[test]
fn test_load_resolves_relative_ruleset_file() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let config_path = temp_dir.path().join("standardizer.toml");
    fs::write(
        &config_path,
        r#"
ruleset_file = "rulesets/custom.json"
api_base_url = "https://github.example.com/api/v3"
"#,
    )
    .expect("Failed to write config");

    let config = StandardizerConfig::load(&config_path).expect("Failed to load config");

    assert_eq!(
        config.ruleset_file,
        Some(temp_dir.path().join("rulesets").join("custom.json"))
    );
    assert_eq!(config.api_base_url, "https://github.example.com/api/v3");
}

#[test]
fn test_load_invalid_toml() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let config_path = temp_dir.path().join("invalid_config.toml");
    fs::write(&config_path, "invalid = toml = syntax").expect("Failed to write invalid TOML");

    let result = StandardizerConfig::load(&config_path);

    if let Err(Error::Config(msg)) = result {
        assert!(msg.contains("Failed to parse configuration file"));
    } else {
        panic!("Expected Config error");
    }
}

#[test]
fn test_load_nonexistent_file() {
    let result = StandardizerConfig::load(Path::new("nonexistent_standardizer.toml"));

    if let Err(Error::Config(msg)) = result {
        assert!(msg.contains("Configuration file not found"));
    } else {
        panic!("Expected Config error");
    }
}

#[test]
#[serial]
fn test_token_from_env_present() {
    env::set_var(TEST_TOKEN_VAR, "ghp_from_env");
    let config = StandardizerConfig {
        token_env_var: TEST_TOKEN_VAR.to_string(),
        ..Default::default()
    };

    let token = config.token_from_env();
    env::remove_var(TEST_TOKEN_VAR);

    assert_eq!(token.expect("token should be read"), "ghp_from_env");
}

#[test]
#[serial]
fn test_token_from_env_missing() {
    env::remove_var(TEST_TOKEN_VAR);
    let config = StandardizerConfig {
        token_env_var: TEST_TOKEN_VAR.to_string(),
        ..Default::default()
    };

    match config.token_from_env() {
        Err(Error::MissingCredential(var)) => assert_eq!(var, TEST_TOKEN_VAR),
        other => panic!("Expected MissingCredential error, got {other:?}"),
    }
}

#[test]
#[serial]
fn test_token_from_env_empty_is_missing() {
    env::set_var(TEST_TOKEN_VAR, "  ");
    let config = StandardizerConfig {
        token_env_var: TEST_TOKEN_VAR.to_string(),
        ..Default::default()
    };

    let result = config.token_from_env();
    env::remove_var(TEST_TOKEN_VAR);

    assert!(matches!(result, Err(Error::MissingCredential(_))));
}
