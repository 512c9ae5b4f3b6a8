// integration tests for the relationships command

use crate::common::*;

#[test]
fn test_relationships_empty_with_nothing_selected() {
    let test_dir = create_test_dir("rel_empty");
    let schema_path = game_schema(&test_dir);

    let output = run_varform(&["relationships"], &schema_path);
    assert!(output.status.success());

    let result = jsonrpc_result(&output);
    let relationships = result["relationships"].as_object().unwrap();

    // every schema variable gets an entry, all of them empty
    assert_eq!(relationships.len(), 4);
    for entry in relationships.values() {
        assert!(entry["related"].as_array().unwrap().is_empty());
        assert!(entry["incompatible"].as_array().unwrap().is_empty());
    }

    cleanup_test_dir(&test_dir);
}

#[test]
fn test_unsatisfiable_value_marked_incompatible() {
    let test_dir = create_test_dir("rel_incompatible");
    let schema_path = game_schema(&test_dir);

    // Easy contradicts Dragon's requirement of Level=Hard
    let output = run_varform(&["--select", "Level=Easy", "relationships"], &schema_path);
    assert!(output.status.success());

    let result = jsonrpc_result(&output);
    let boss = &result["relationships"]["Boss"];
    let incompatible: Vec<&str> = boss["incompatible"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v.as_str().unwrap())
        .collect();
    assert_eq!(incompatible, vec!["Dragon"]);

    cleanup_test_dir(&test_dir);
}

#[test]
fn test_selected_value_projects_related_values() {
    let test_dir = create_test_dir("rel_related");
    let schema_path = game_schema(&test_dir);

    // selecting Dragon marks its required Level value as related
    let output = run_varform(&["--select", "Boss=Dragon", "relationships"], &schema_path);
    assert!(output.status.success());

    let result = jsonrpc_result(&output);
    let level = &result["relationships"]["Level"];
    let related: Vec<&str> = level["related"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v.as_str().unwrap())
        .collect();
    assert_eq!(related, vec!["Hard"]);

    let incompatible: Vec<&str> = level["incompatible"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v.as_str().unwrap())
        .collect();
    assert_eq!(incompatible, vec!["Easy"]);

    cleanup_test_dir(&test_dir);
}

#[test]
fn test_relationships_idempotent() {
    let test_dir = create_test_dir("rel_idempotent");
    let schema_path = game_schema(&test_dir);

    let first = run_varform(&["--select", "Level=Easy", "relationships"], &schema_path);
    let second = run_varform(&["--select", "Level=Easy", "relationships"], &schema_path);

    assert_eq!(first.stdout, second.stdout);

    cleanup_test_dir(&test_dir);
}

#[test]
fn test_relationships_text_output_skips_empty_entries() {
    let test_dir = create_test_dir("rel_text");
    let schema_path = game_schema(&test_dir);

    let output = run_varform(
        &["--no-json", "--select", "Level=Easy", "relationships"],
        &schema_path,
    );
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Boss:"));
    assert!(stdout.contains("incompatible: Dragon"));
    assert!(!stdout.contains("Hints:"));

    cleanup_test_dir(&test_dir);
}
