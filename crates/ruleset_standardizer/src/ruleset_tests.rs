use super::*;
use serde_json::json;
use std::path::PathBuf;
use tempfile::TempDir;

#[test]
fn test_built_in_ruleset() {
    let ruleset = RulesetDocument::built_in().expect("built-in ruleset should parse");

    assert_eq!(ruleset.name(), Some("reichlab-default-branch-protections"));
    assert_eq!(ruleset.body()["target"], "branch");
    assert!(ruleset.body()["rules"].is_array());
}

#[test]
fn test_built_in_ruleset_matches_packaged_file() {
    let path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("rulesets")
        .join(DEFAULT_RULESET_NAME);

    let from_file = RulesetDocument::load(&path).expect("packaged ruleset file should load");
    let built_in = RulesetDocument::built_in().expect("built-in ruleset should parse");

    assert_eq!(from_file, built_in);
}

#[test]
fn test_load_preserves_document() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let path = temp_dir.path().join("ruleset.json");
    let document = json!({
        "name": "custom",
        "enforcement": "evaluate",
        "unknown_field": { "kept": [1, 2, 3] }
    });
    fs::write(&path, document.to_string()).expect("Failed to write ruleset");

    let ruleset = RulesetDocument::load(&path).expect("ruleset should load");

    assert_eq!(ruleset.body(), &document);
}

#[test]
fn test_name_missing() {
    let ruleset = RulesetDocument::new(json!({ "target": "branch" }));

    assert_eq!(ruleset.name(), None);
}

#[test]
fn test_load_missing_file() {
    let path = PathBuf::from("does-not-exist/ruleset.json");

    match RulesetDocument::load(&path) {
        Err(Error::LoadRuleset { path: p, source }) => {
            assert_eq!(p, path);
            assert_eq!(source.kind(), std::io::ErrorKind::NotFound);
        }
        other => panic!("Expected LoadRuleset error, got {other:?}"),
    }
}

#[test]
fn test_load_malformed_json() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let path = temp_dir.path().join("broken.json");
    fs::write(&path, "{ \"name\": ").expect("Failed to write ruleset");

    let result = RulesetDocument::load(&path);

    assert!(matches!(result, Err(Error::ParseRuleset { .. })));
}
