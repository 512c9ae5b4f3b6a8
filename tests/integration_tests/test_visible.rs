// integration tests for the visible command

use crate::common::*;

#[test]
fn test_visible_variable_with_no_conditions() {
    let test_dir = create_test_dir("visible_plain");
    let schema_path = game_schema(&test_dir);

    let output = run_varform(&["visible", "Level"], &schema_path);
    assert!(output.status.success());

    let result = jsonrpc_result(&output);
    assert_eq!(result["variable"], "Level");
    assert_eq!(result["visible"], true);
    assert_eq!(
        result["values"].as_array().unwrap().len(),
        2,
        "both Level values should be visible"
    );

    cleanup_test_dir(&test_dir);
}

#[test]
fn test_visible_defers_on_empty_selection() {
    let test_dir = create_test_dir("visible_defer");
    let schema_path = game_schema(&test_dir);

    // Reward's conditions reference Boss, but nothing is selected yet
    let output = run_varform(&["visible", "Reward"], &schema_path);
    assert!(output.status.success());

    let result = jsonrpc_result(&output);
    assert_eq!(result["visible"], true);

    cleanup_test_dir(&test_dir);
}

#[test]
fn test_hidden_variable_exits_with_code_6() {
    let test_dir = create_test_dir("visible_hidden");
    let schema_path = write_schema(
        &test_dir,
        &serde_json::json!({
            "variables": [
                { "name": "Mode", "values": [{ "name": "On" }, { "name": "Off" }] },
                {
                    "name": "Extras",
                    "conditions": { "Mode": "On" },
                    "values": [{ "name": "Sound" }]
                }
            ]
        }),
    );

    let output = run_varform(&["--select", "Mode=Off", "visible", "Extras"], &schema_path);
    assert_eq!(output.status.code(), Some(6));

    let result = jsonrpc_result(&output);
    assert_eq!(result["visible"], false);

    cleanup_test_dir(&test_dir);
}

#[test]
fn test_visible_values_follow_selections() {
    let test_dir = create_test_dir("visible_values");
    let schema_path = game_schema(&test_dir);

    let output = run_varform(&["--select", "Level=Easy", "visible", "Boss"], &schema_path);
    assert!(output.status.success());

    let result = jsonrpc_result(&output);
    let values: Vec<&str> = result["values"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v.as_str().unwrap())
        .collect();
    assert_eq!(values, vec!["Slime"]);

    cleanup_test_dir(&test_dir);
}

#[test]
fn test_visible_names_mode_one_per_line() {
    let test_dir = create_test_dir("visible_names");
    let schema_path = game_schema(&test_dir);

    let output = run_varform(&["visible", "Boss", "--names"], &schema_path);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines, vec!["Slime", "Dragon"]);

    cleanup_test_dir(&test_dir);
}

#[test]
fn test_unknown_variable_exits_with_code_2_and_suggestions() {
    let test_dir = create_test_dir("visible_unknown");
    let schema_path = game_schema(&test_dir);

    let output = run_varform(&["visible", "Bos"], &schema_path);
    assert_eq!(output.status.code(), Some(2));

    let error = jsonrpc_error(&output);
    assert_eq!(error["code"], -32002);
    let suggestions: Vec<&str> = error["data"]["suggestions"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s.as_str().unwrap())
        .collect();
    assert!(suggestions.contains(&"Boss"));

    cleanup_test_dir(&test_dir);
}
