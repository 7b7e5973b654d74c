use std::fs;
use std::path::PathBuf;
use std::process::Command;
use std::time::{SystemTime, UNIX_EPOCH};

fn bin() -> &'static str {
    env!("CARGO_BIN_EXE_warband")
}

fn unique_temp_path(name: &str, extension: &str) -> PathBuf {
    let stamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock should be after unix epoch")
        .as_nanos();
    std::env::temp_dir().join(format!("warband-cli-{name}-{stamp}.{extension}"))
}

fn run(args: &[&str]) -> std::process::Output {
    Command::new(bin())
        .args(args)
        .env_remove("WARBAND_CONFIG")
        .output()
        .expect("warband should run")
}

fn json_stdout(output: &std::process::Output) -> serde_json::Value {
    let stdout = String::from_utf8_lossy(&output.stdout);
    serde_json::from_str(&stdout).expect("command should emit json")
}

#[test]
fn unknown_command_prints_usage() {
    let output = run(&["serve"]);
    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("usage: warband"));
}

#[test]
fn optimize_command_emits_army_json() {
    let output = run(&["optimize", "150"]);
    assert_eq!(output.status.code(), Some(0));
    let payload = json_stdout(&output);
    assert_eq!(payload["max_points"], 150);
    assert_eq!(payload["army"]["units"], serde_json::json!(["Scout", "Marine"]));
    assert_eq!(payload["army"]["total_points"], 140);
}

#[test]
fn optimize_table_prints_army_listing() {
    let output = run(&["optimize", "150", "--table"]);
    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Optimized Army (Max Points: 150):"));
    assert!(stdout.contains("Army:"));
    assert!(stdout.contains("Total Points: 140"));
}

#[test]
fn optimize_rejects_negative_budget() {
    let output = run(&["optimize", "-10"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("optimize failed"));
}

#[test]
fn battle_command_reports_verdict() {
    let output = run(&["battle", "350", "60", "attrition", "4"]);
    assert_eq!(output.status.code(), Some(0));
    let payload = json_stdout(&output);
    assert_eq!(payload["model"], "attrition");
    assert_eq!(payload["seed"], 4);
    assert_eq!(payload["verdict"]["winner"], "A");
    assert_eq!(payload["army_b"]["units"], serde_json::json!(["Scout"]));
}

#[test]
fn battle_csv_emits_round_trace() {
    let output = run(&["battle", "300", "200", "attrition", "9", "--csv"]);
    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    let mut lines = stdout.lines();
    assert!(lines
        .next()
        .is_some_and(|header| header.starts_with("round,unit_a,unit_b")));
    assert!(lines.next().is_some());
}

#[test]
fn matchup_command_emits_summary() {
    let output = run(&["matchup", "300", "150", "50", "3"]);
    assert_eq!(output.status.code(), Some(0));
    let payload = json_stdout(&output);
    assert_eq!(payload["iterations"], 50);
    let total = payload["a_wins"].as_u64().unwrap()
        + payload["b_wins"].as_u64().unwrap()
        + payload["draws"].as_u64().unwrap();
    assert_eq!(total, 50);
}

#[test]
fn rank_command_requires_budgets() {
    let output = run(&["rank", "150"]);
    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).contains("usage: warband rank"));
}

#[test]
fn config_file_overrides_battle_defaults() {
    let path = unique_temp_path("config", "yaml");
    fs::write(&path, "battle:\n  model: attrition\n  seed: 12\n").expect("fixture should be written");

    let output = run(&["battle", "200", "200", &format!("--config={}", path.display())]);
    assert_eq!(output.status.code(), Some(0));
    let payload = json_stdout(&output);
    assert_eq!(payload["model"], "attrition");
    assert_eq!(payload["seed"], 12);

    let _ = fs::remove_file(path);
}

#[test]
fn validate_command_flags_bad_catalog() {
    let path = unique_temp_path("invalid", "json");
    fs::write(
        &path,
        r#"[{"name":"","speed":1,"wounds":1,"armor":0.5,"shooting_accuracy":0.5,
             "shooting_damage":1,"close_combat_accuracy":0.5,"close_combat_damage":1,"point_cost":0}]"#,
    )
    .expect("fixture should be written");

    let output = run(&["validate", path.to_string_lossy().as_ref()]);
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("validation failed"));

    let _ = fs::remove_file(path);
}

#[test]
fn validate_command_accepts_shipped_codex() {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("data")
        .join("codex.yaml");
    let output = run(&["validate", path.to_string_lossy().as_ref()]);
    assert_eq!(output.status.code(), Some(0));
    assert!(String::from_utf8_lossy(&output.stdout).contains("validation passed"));
}

#[test]
fn catalog_command_lists_builtin_units() {
    let output = run(&["catalog"]);
    assert_eq!(output.status.code(), Some(0));
    let payload = json_stdout(&output);
    assert_eq!(payload["units"].as_array().map(Vec::len), Some(4));
    assert_eq!(payload["units"][2]["name"], "Terminator");
}
