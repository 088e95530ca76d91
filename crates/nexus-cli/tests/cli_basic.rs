//! Basic CLI E2E tests.
//!
//! Tests invoke the built binary with its config directory pointed at a
//! temporary directory and verify outputs.

use std::process::Command;

/// Run a CLI command and return (stdout, stderr, exit code).
fn run_cli_in(dir: &std::path::Path, args: &[&str]) -> (String, String, i32) {
    run_cli_with_log(dir, None, args)
}

fn run_cli_with_log(
    dir: &std::path::Path,
    log: Option<&str>,
    args: &[&str],
) -> (String, String, i32) {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_nexus-cli"));
    cmd.args(args).env("NEXUS_CONFIG_DIR", dir).env_remove("NEXUS_LOG");
    if let Some(filter) = log {
        cmd.env("NEXUS_LOG", filter);
    }
    let output = cmd.output().expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

fn run_cli(args: &[&str]) -> (String, String, i32) {
    let dir = tempfile::tempdir().unwrap();
    run_cli_in(dir.path(), args)
}

fn parse_json(stdout: &str) -> serde_json::Value {
    serde_json::from_str(stdout).expect("Failed to parse JSON output")
}

/// Parse JSON that follows a one-line header such as "Lead created: <id>".
fn parse_json_after_header(stdout: &str) -> serde_json::Value {
    let (_, body) = stdout.split_once('\n').expect("missing header line");
    parse_json(body)
}

#[test]
fn test_suggest_in_progress_high() {
    let (stdout, _, code) = run_cli(&["suggest", "--status", "in-progress", "--priority", "high"]);
    assert_eq!(code, 0, "suggest failed");
    let json = parse_json(&stdout);
    let titles: Vec<_> = json
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["title"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(
        titles,
        vec![
            "Share Product Demo",
            "Schedule Follow-up",
            "Owner Involvement",
            "Priority Support"
        ]
    );
    assert_eq!(json[2]["category"], "escalation");
}

#[test]
fn test_suggest_closed_medium_is_empty() {
    let (stdout, _, code) = run_cli(&["suggest", "--status", "closed", "--priority", "medium"]);
    assert_eq!(code, 0);
    assert_eq!(parse_json(&stdout), serde_json::json!([]));
}

#[test]
fn test_suggest_rejects_unknown_status() {
    let (_, stderr, code) = run_cli(&["suggest", "--status", "won", "--priority", "low"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("won"));
}

#[test]
fn test_lead_list_owner_sees_all() {
    let (stdout, _, code) = run_cli(&["lead", "list"]);
    assert_eq!(code, 0, "lead list failed");
    assert_eq!(parse_json(&stdout).as_array().unwrap().len(), 5);
}

#[test]
fn test_lead_list_sales_sees_own() {
    let (stdout, _, code) = run_cli(&["--role", "sales", "lead", "list"]);
    assert_eq!(code, 0);
    let json = parse_json(&stdout);
    let leads = json.as_array().unwrap();
    assert_eq!(leads.len(), 3);
    assert!(leads.iter().all(|l| l["owner"] == "Alex Rivera"));
}

#[test]
fn test_lead_list_by_status() {
    let (stdout, _, code) = run_cli(&["lead", "list", "--status", "In Progress"]);
    assert_eq!(code, 0);
    let json = parse_json(&stdout);
    assert_eq!(json.as_array().unwrap().len(), 2);
    assert_eq!(json[0]["status"], "In Progress");
}

#[test]
fn test_lead_analyze() {
    let (stdout, _, code) = run_cli(&["lead", "analyze", "1"]);
    assert_eq!(code, 0);
    let json = parse_json(&stdout);
    assert_eq!(json["lead"]["name"], "Sarah Jenkins");
    // Follow-up was in 2024
    assert_eq!(json["overdue"], true);
    assert_eq!(json["suggestions"].as_array().unwrap().len(), 4);
    assert_eq!(json["suggestions"][0]["title"], "Immediate Welcome");
}

#[test]
fn test_lead_get_hidden_from_sales() {
    let (_, stderr, code) = run_cli(&["--role", "sales", "lead", "get", "2"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("Lead not found: 2"));
}

#[test]
fn test_lead_create_fills_defaults() {
    let (stdout, _, code) = run_cli(&["lead", "create", "Nora Quinn", "--value", "1500"]);
    assert_eq!(code, 0);
    assert!(stdout.starts_with("Lead created:"));
    let lead = parse_json_after_header(&stdout);
    assert_eq!(lead["status"], "New");
    assert_eq!(lead["priority"], "Medium");
    assert_eq!(lead["owner"], "Alex Rivera");
    assert_eq!(lead["source"], "Manual Entry");
    assert_eq!(lead["value"], 1500);
    assert_eq!(lead["activities"][0]["content"], "Lead manually created");
}

#[test]
fn test_task_create_owner_only() {
    let (_, stderr, code) = run_cli(&["--role", "sales", "task", "create", "Follow up"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("may not assign tasks"));

    let (stdout, _, code) = run_cli(&[
        "task", "create", "Follow up", "--lead-id", "4", "--due", "2024-06-01",
    ]);
    assert_eq!(code, 0);
    let task = parse_json_after_header(&stdout);
    assert_eq!(task["lead_name"], "David Wilson");
    assert_eq!(task["assigned_to"], "Unassigned");
    assert_eq!(task["status"], "Pending");
}

#[test]
fn test_task_complete() {
    let (stdout, _, code) = run_cli(&["task", "complete", "t2"]);
    assert_eq!(code, 0);
    let task = parse_json_after_header(&stdout);
    assert_eq!(task["status"], "Completed");

    let (_, stderr, code) = run_cli(&["task", "complete", "t9"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("Task not found: t9"));
}

#[test]
fn test_task_list_open() {
    let (stdout, _, code) = run_cli(&["--role", "sales", "task", "list", "--open"]);
    assert_eq!(code, 0);
    let json = parse_json(&stdout);
    assert_eq!(json.as_array().unwrap().len(), 1);
    assert_eq!(json[0]["id"], "t1");
}

#[test]
fn test_task_list_marks_lapsed_tasks_overdue() {
    let (stdout, _, code) = run_cli(&["task", "list"]);
    assert_eq!(code, 0);
    let json = parse_json(&stdout);
    let t1 = json
        .as_array()
        .unwrap()
        .iter()
        .find(|t| t["id"] == "t1")
        .unwrap();
    // Sample due date is in 2024
    assert_eq!(t1["status"], "Overdue");
}

#[test]
fn test_dashboard() {
    let (stdout, _, code) = run_cli(&["dashboard"]);
    assert_eq!(code, 0);
    let json = parse_json(&stdout);
    assert_eq!(json["title"], "Business Intelligence");
    assert_eq!(json["greeting"], "Welcome back, Director.");
    assert_eq!(json["stats"]["total_leads"], 5);
    assert_eq!(json["stats"]["success_rate"], 20);
    assert_eq!(json["status_breakdown"].as_array().unwrap().len(), 4);
}

#[test]
fn test_session_menu_for_sales() {
    let (stdout, _, code) = run_cli(&["--role", "sales", "session"]);
    assert_eq!(code, 0);
    let json = parse_json(&stdout);
    assert_eq!(json["role"], "SALES");
    assert_eq!(json["views"].as_array().unwrap().len(), 3);
}

#[test]
fn test_config_set_changes_default_role() {
    let dir = tempfile::tempdir().unwrap();

    let (stdout, _, code) = run_cli_in(dir.path(), &["config", "get", "session.default_role"]);
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), "OWNER");

    let (_, _, code) = run_cli_in(dir.path(), &["config", "set", "session.default_role", "SALES"]);
    assert_eq!(code, 0);
    assert!(dir.path().join("config.toml").exists());

    let (stdout, _, code) = run_cli_in(dir.path(), &["session"]);
    assert_eq!(code, 0);
    assert_eq!(parse_json(&stdout)["role"], "SALES");

    let (_, _, code) = run_cli_in(dir.path(), &["config", "reset"]);
    assert_eq!(code, 0);
    let (stdout, _, _) = run_cli_in(dir.path(), &["config", "get", "session.default_role"]);
    assert_eq!(stdout.trim(), "OWNER");
}

#[test]
fn test_config_set_role_any_case() {
    let dir = tempfile::tempdir().unwrap();
    let (_, _, code) = run_cli_in(dir.path(), &["config", "set", "session.default_role", "sAlEs"]);
    assert_eq!(code, 0);
    let (stdout, _, _) = run_cli_in(dir.path(), &["config", "get", "session.default_role"]);
    assert_eq!(stdout.trim(), "SALES");
}

#[test]
fn test_reads_do_not_create_config_dir() {
    let dir = tempfile::tempdir().unwrap();
    let config_dir = dir.path().join("nexus");
    for args in [&["lead", "list"][..], &["config", "path"], &["dashboard"]] {
        let (_, _, code) = run_cli_in(&config_dir, args);
        assert_eq!(code, 0);
    }
    assert!(!config_dir.exists());
}

#[test]
fn test_debug_log_goes_to_stderr() {
    let dir = tempfile::tempdir().unwrap();
    let (stdout, stderr, code) = run_cli_with_log(dir.path(), Some("debug"), &["session"]);
    assert_eq!(code, 0);
    assert!(stderr.contains("dispatching"));
    assert_eq!(parse_json(&stdout)["role"], "OWNER");
}

#[test]
fn test_config_unknown_key_fails() {
    let (_, stderr, code) = run_cli(&["config", "get", "identity.nope"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("unknown key"));
}

#[test]
fn test_completions() {
    let (stdout, _, code) = run_cli(&["completions", "bash"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("nexus-cli"));
}
