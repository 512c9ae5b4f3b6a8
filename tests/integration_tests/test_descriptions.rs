// integration tests for the descriptions command

use crate::common::*;

#[test]
fn test_descriptions_show_all_when_nothing_selected() {
    let test_dir = create_test_dir("desc_all");
    let schema_path = game_schema(&test_dir);

    let output = run_varform(&["descriptions", "Hints"], &schema_path);
    assert!(output.status.success());

    let result = jsonrpc_result(&output);
    let descriptions: Vec<&str> = result["descriptions"]
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d.as_str().unwrap())
        .collect();
    assert_eq!(descriptions, vec!["Take it slow.", "Bring potions."]);

    cleanup_test_dir(&test_dir);
}

#[test]
fn test_descriptions_narrow_with_selection() {
    let test_dir = create_test_dir("desc_narrow");
    let schema_path = game_schema(&test_dir);

    let output = run_varform(
        &["--select", "Level=Hard", "descriptions", "Hints"],
        &schema_path,
    );
    assert!(output.status.success());

    let result = jsonrpc_result(&output);
    let descriptions = result["descriptions"].as_array().unwrap();
    assert_eq!(descriptions.len(), 1);
    assert_eq!(descriptions[0], "Bring potions.");

    cleanup_test_dir(&test_dir);
}

#[test]
fn test_descriptions_fall_back_to_variable_description() {
    let test_dir = create_test_dir("desc_fallback");
    let schema_path = write_schema(
        &test_dir,
        &serde_json::json!({
            "variables": [
                { "name": "Level", "values": [{ "name": "Easy" }, { "name": "Hard" }] },
                {
                    "name": "Hints",
                    "type": "info",
                    "description": "Nothing to say yet.",
                    "values": [
                        { "description": "Hard advice.", "conditions": { "Level": "Hard" } }
                    ]
                }
            ]
        }),
    );

    let output = run_varform(
        &["--select", "Level=Easy", "descriptions", "Hints"],
        &schema_path,
    );
    assert!(output.status.success());

    let result = jsonrpc_result(&output);
    let descriptions = result["descriptions"].as_array().unwrap();
    assert_eq!(descriptions.len(), 1);
    assert_eq!(descriptions[0], "Nothing to say yet.");

    cleanup_test_dir(&test_dir);
}

#[test]
fn test_descriptions_explain_annotates_deferred_conditions() {
    let test_dir = create_test_dir("desc_explain");
    let schema_path = game_schema(&test_dir);

    let output = run_varform(&["descriptions", "Hints", "--explain"], &schema_path);
    assert!(output.status.success());

    let result = jsonrpc_result(&output);
    let annotated = result["applies_when"].as_array().unwrap();
    assert_eq!(annotated.len(), 2);
    assert_eq!(annotated[0]["condition"], "Level = Easy");
    assert_eq!(annotated[1]["condition"], "Level = Hard");

    // once Level is chosen the annotation disappears
    let output = run_varform(
        &["--select", "Level=Hard", "descriptions", "Hints", "--explain"],
        &schema_path,
    );
    let result = jsonrpc_result(&output);
    assert!(result["applies_when"].as_array().is_none());

    cleanup_test_dir(&test_dir);
}

#[test]
fn test_descriptions_unknown_variable() {
    let test_dir = create_test_dir("desc_unknown");
    let schema_path = game_schema(&test_dir);

    let output = run_varform(&["descriptions", "Hintz"], &schema_path);
    assert_eq!(output.status.code(), Some(2));

    cleanup_test_dir(&test_dir);
}
