// integration tests for the show command

use crate::common::*;

#[test]
fn test_show_lists_all_variables_with_nothing_selected() {
    let test_dir = create_test_dir("show_all");
    let schema_path = game_schema(&test_dir);

    let output = run_varform(&["show"], &schema_path);
    assert!(output.status.success());

    // with nothing selected every condition defers, so everything shows
    let result = jsonrpc_result(&output);
    let names: Vec<&str> = result["variables"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Level", "Boss", "Reward", "Hints"]);

    cleanup_test_dir(&test_dir);
}

#[test]
fn test_show_marks_selected_values() {
    let test_dir = create_test_dir("show_selected");
    let schema_path = game_schema(&test_dir);

    let output = run_varform(&["--select", "Level=Hard", "show"], &schema_path);
    assert!(output.status.success());

    let result = jsonrpc_result(&output);
    let level = &result["variables"][0];
    assert_eq!(level["name"], "Level");

    let values = level["values"].as_array().unwrap();
    assert_eq!(values[0]["name"], "Easy");
    assert_eq!(values[0]["selected"], false);
    assert_eq!(values[1]["name"], "Hard");
    assert_eq!(values[1]["selected"], true);

    cleanup_test_dir(&test_dir);
}

#[test]
fn test_show_hides_values_whose_conditions_fail() {
    let test_dir = create_test_dir("show_hidden_value");
    let schema_path = game_schema(&test_dir);

    let output = run_varform(&["--select", "Level=Easy", "show"], &schema_path);
    assert!(output.status.success());

    let result = jsonrpc_result(&output);
    let boss = &result["variables"][1];
    assert_eq!(boss["name"], "Boss");

    let values: Vec<&str> = boss["values"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v["name"].as_str().unwrap())
        .collect();
    assert_eq!(values, vec!["Slime"]);

    cleanup_test_dir(&test_dir);
}

#[test]
fn test_show_reports_stale_selections() {
    let test_dir = create_test_dir("show_stale");
    let schema_path = game_schema(&test_dir);

    // Dragon requires Level=Hard, so selecting it alongside Easy is stale
    let output = run_varform(
        &["--select", "Boss=Dragon", "--select", "Level=Easy", "show"],
        &schema_path,
    );
    assert!(output.status.success());

    let result = jsonrpc_result(&output);
    let stale = result["stale_selections"].as_array().unwrap();
    assert_eq!(stale.len(), 1);
    assert_eq!(stale[0]["variable"], "Boss");
    assert_eq!(stale[0]["value"], "Dragon");

    cleanup_test_dir(&test_dir);
}

#[test]
fn test_show_text_output() {
    let test_dir = create_test_dir("show_text");
    let schema_path = game_schema(&test_dir);

    let output = run_varform(&["--no-json", "--select", "Level=Hard", "show"], &schema_path);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Level"));
    assert!(stdout.contains("[*] Hard"));
    assert!(stdout.contains("[ ] Easy"));
    assert!(stdout.contains("Bring potions."));

    cleanup_test_dir(&test_dir);
}

#[test]
fn test_show_quiet_produces_no_output() {
    let test_dir = create_test_dir("show_quiet");
    let schema_path = game_schema(&test_dir);

    let output = run_varform(&["--quiet", "show"], &schema_path);
    assert!(output.status.success());
    assert!(output.stdout.is_empty());

    cleanup_test_dir(&test_dir);
}

#[test]
fn test_show_missing_schema_file_errors() {
    let test_dir = create_test_dir("show_missing");
    let schema_path = test_dir.join("nope.json");

    let output = run_varform(&["show"], &schema_path);
    assert!(!output.status.success());
    assert_eq!(output.status.code(), Some(5));

    let error = jsonrpc_error(&output);
    assert_eq!(error["code"], -32005);

    cleanup_test_dir(&test_dir);
}

#[test]
fn test_show_malformed_schema_errors() {
    let test_dir = create_test_dir("show_malformed");
    let schema_path = test_dir.join("schema.json");
    std::fs::write(&schema_path, "{\"not\": \"a schema\"}").unwrap();

    let output = run_varform(&["show"], &schema_path);
    assert!(!output.status.success());
    assert_eq!(output.status.code(), Some(5));

    cleanup_test_dir(&test_dir);
}

#[test]
fn test_show_invalid_select_argument() {
    let test_dir = create_test_dir("show_bad_select");
    let schema_path = game_schema(&test_dir);

    let output = run_varform(&["--select", "no-equals-sign", "show"], &schema_path);
    assert!(!output.status.success());
    assert_eq!(output.status.code(), Some(4));

    cleanup_test_dir(&test_dir);
}
