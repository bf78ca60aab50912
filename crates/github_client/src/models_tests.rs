use super::*;
use serde_json::json;

#[test]
fn test_repository_deserialize_ignores_unknown_fields() {
    let value = json!({
        "id": 123456,
        "name": "duck-hub",
        "full_name": "reichlab/duck-hub",
        "private": false,
        "archived": true,
        "default_branch": "main",
        "topics": ["hub"]
    });

    let repo: Repository = serde_json::from_value(value).expect("valid repository");

    assert_eq!(repo.name(), "duck-hub");
    assert_eq!(repo.full_name(), "reichlab/duck-hub");
    assert!(repo.is_archived());
}

#[test]
fn test_repository_archived_defaults_to_false() {
    let repo: Repository =
        serde_json::from_value(json!({ "name": "duck-hub" })).expect("valid repository");

    assert!(!repo.is_archived());
    assert_eq!(repo.full_name(), "duck-hub");
}

#[test]
fn test_repository_requires_name() {
    let result = serde_json::from_value::<Repository>(json!({ "archived": false }));

    assert!(result.is_err());
}

#[test]
fn test_repository_new() {
    let repo = Repository::new("reichlab-python-template".to_string(), true);

    assert_eq!(repo.name(), "reichlab-python-template");
    assert!(repo.is_archived());
}
