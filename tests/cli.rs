use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Output, Stdio};

use serde_json::{Value, json};

// ── Test infrastructure ──────────────────────────────────────

/// The binary with every `LOUNGE_*` variable cleared, so tests opt in explicitly.
fn lounge() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_lounge-merge"));
    for var in ["LOUNGE_KIND", "LOUNGE_INPUT", "LOUNGE_OUTPUT", "LOUNGE_PRETTY"] {
        cmd.env_remove(var);
    }
    cmd.env("RUST_LOG", "warn");
    cmd
}

fn feed(cmd: &mut Command, input: &str) -> Output {
    let mut child = cmd
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .unwrap();
    child
        .stdin
        .take()
        .unwrap()
        .write_all(input.as_bytes())
        .unwrap();
    child.wait_with_output().unwrap()
}

fn run(kind: &str, input: &str) -> Output {
    feed(lounge().args(["--kind", kind]), input)
}

fn test_path(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join("lounge_test_cli");
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join(name);
    let _ = std::fs::remove_file(&path);
    path
}

fn two_bookings() -> Value {
    json!([
        {"id": "b1", "userName": "A", "system": "PC", "startTime": "2024-01-01T10:00:00Z", "endTime": "2024-01-01T11:00:00Z"},
        {"id": "b2", "userName": "A", "system": "PC", "startTime": "2024-01-01T11:00:00Z", "endTime": "2024-01-01T12:00:00Z"}
    ])
}

fn merged_two_bookings() -> Value {
    json!([
        {"id": "b1", "userName": "A", "system": "PC", "startTime": "2024-01-01T10:00:00.000Z", "endTime": "2024-01-01T12:00:00.000Z"}
    ])
}

fn stdout_json(output: &Output) -> Value {
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).unwrap()
}

// ── Slots ────────────────────────────────────────────────────

#[test]
fn slots_grouped_by_identity_and_adjacency() {
    let input = json!([
        {"id": 1, "startTime": "2024-01-01T10:00:00Z", "endTime": "2024-01-01T11:00:00Z", "userId": "u1", "gameId": "g1"},
        {"id": 2, "startTime": "2024-01-01T11:00:00Z", "endTime": "2024-01-01T12:00:00Z", "userId": "u1", "gameId": "g1"},
        {"id": 3, "startTime": "2024-01-01T09:00:00Z", "endTime": "2024-01-01T10:00:00Z", "userId": "u2", "gameId": "g1"}
    ]);
    let out = stdout_json(&run("slots", &input.to_string()));

    let groups = out.as_array().unwrap();
    assert_eq!(groups.len(), 2);
    let ids: Vec<Vec<i64>> = groups
        .iter()
        .map(|g| {
            g.as_array()
                .unwrap()
                .iter()
                .map(|s| s["id"].as_i64().unwrap())
                .collect()
        })
        .collect();
    assert_eq!(ids, vec![vec![3], vec![1, 2]]);
    assert_eq!(groups[0][0]["startTime"], "2024-01-01T09:00:00.000Z");
    assert_eq!(groups[1][1]["userId"], "u1");
}

#[test]
fn slots_empty_array() {
    let out = stdout_json(&run("slots", "[]"));
    assert_eq!(out, json!([]));
}

#[test]
fn slots_bad_timestamp_fails() {
    let input = json!([
        {"id": 1, "startTime": "whenever", "endTime": "2024-01-01T11:00:00Z", "userId": "u1", "gameId": "g1"}
    ]);
    let output = run("slots", &input.to_string());
    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
}

// ── Bookings ─────────────────────────────────────────────────

#[test]
fn bookings_merged_with_gap_kept() {
    let input = json!([
        {"id": "b1", "userName": "A", "system": "PC", "startTime": "2024-01-01T10:00:00Z", "endTime": "2024-01-01T11:00:00Z"},
        {"id": "b2", "userName": "A", "system": "PC", "startTime": "2024-01-01T11:00:00Z", "endTime": "2024-01-01T12:00:00Z"},
        {"id": "b3", "userName": "A", "system": "PC", "startTime": "2024-01-01T12:30:00Z", "endTime": "2024-01-01T13:00:00Z"}
    ]);
    let out = stdout_json(&run("bookings", &input.to_string()));
    assert_eq!(
        out,
        json!([
            {"id": "b1", "userName": "A", "system": "PC", "startTime": "2024-01-01T10:00:00.000Z", "endTime": "2024-01-01T12:00:00.000Z"},
            {"id": "b3", "userName": "A", "system": "PC", "startTime": "2024-01-01T12:30:00.000Z", "endTime": "2024-01-01T13:00:00.000Z"}
        ])
    );
}

#[test]
fn bookings_overlap_warned_on_stderr() {
    let input = json!([
        {"id": "b1", "userName": "A", "system": "PC", "startTime": "2024-01-01T10:00:00Z", "endTime": "2024-01-01T11:00:00Z"},
        {"id": "b2", "userName": "A", "system": "PC", "startTime": "2024-01-01T10:30:00Z", "endTime": "2024-01-01T11:30:00Z"}
    ]);
    let output = run("bookings", &input.to_string());
    let out = stdout_json(&output);
    assert_eq!(out.as_array().unwrap().len(), 2);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("overlap"), "stderr: {stderr}");
}

#[test]
fn malformed_json_fails() {
    let output = run("bookings", "{not json");
    assert!(!output.status.success());
}

// ── Configuration ────────────────────────────────────────────

#[test]
fn file_input_and_output_flags() {
    let input = test_path("flags_in.json");
    let output = test_path("flags_out.json");
    std::fs::write(&input, two_bookings().to_string()).unwrap();

    let out = feed(
        lounge()
            .args(["--kind", "bookings", "--input"])
            .arg(&input)
            .arg("--output")
            .arg(&output),
        "",
    );
    assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));
    assert!(out.stdout.is_empty());

    let written: Value = serde_json::from_str(&std::fs::read_to_string(&output).unwrap()).unwrap();
    assert_eq!(written, merged_two_bookings());
}

#[test]
fn file_paths_from_env() {
    let input = test_path("env_in.json");
    let output = test_path("env_out.json");
    std::fs::write(&input, two_bookings().to_string()).unwrap();

    let out = feed(
        lounge()
            .env("LOUNGE_KIND", "bookings")
            .env("LOUNGE_INPUT", &input)
            .env("LOUNGE_OUTPUT", &output),
        "",
    );
    assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));
    assert!(out.stdout.is_empty());

    let written: Value = serde_json::from_str(&std::fs::read_to_string(&output).unwrap()).unwrap();
    assert_eq!(written, merged_two_bookings());
}

#[test]
fn kind_from_env_without_flag() {
    let out = feed(lounge().env("LOUNGE_KIND", "bookings"), &two_bookings().to_string());
    assert_eq!(stdout_json(&out), merged_two_bookings());
}

#[test]
fn kind_flag_overrides_env() {
    let slots = json!([
        {"id": 1, "startTime": "2024-01-01T10:00:00Z", "endTime": "2024-01-01T11:00:00Z", "userId": "u1", "gameId": "g1"}
    ]);
    let out = feed(
        lounge().env("LOUNGE_KIND", "bookings").args(["--kind", "slots"]),
        &slots.to_string(),
    );
    assert_eq!(stdout_json(&out).as_array().unwrap().len(), 1);
}

#[test]
fn compact_output_is_one_line() {
    let out = run("bookings", &two_bookings().to_string());
    let text = String::from_utf8(out.stdout.clone()).unwrap();
    assert_eq!(text.lines().count(), 1);
    assert_eq!(stdout_json(&out), merged_two_bookings());
}

#[test]
fn pretty_flag_spans_lines() {
    let out = feed(lounge().args(["--kind", "bookings", "--pretty"]), &two_bookings().to_string());
    let text = String::from_utf8(out.stdout.clone()).unwrap();
    assert!(text.lines().count() > 1, "output: {text}");
    assert_eq!(stdout_json(&out), merged_two_bookings());
}

#[test]
fn pretty_from_env() {
    let out = feed(
        lounge().env("LOUNGE_KIND", "bookings").env("LOUNGE_PRETTY", "true"),
        &two_bookings().to_string(),
    );
    let text = String::from_utf8(out.stdout.clone()).unwrap();
    assert!(text.lines().count() > 1, "output: {text}");
    assert_eq!(stdout_json(&out), merged_two_bookings());
}

#[test]
fn missing_input_file_fails() {
    let missing = test_path("does_not_exist.json");
    let out = feed(lounge().arg("--input").arg(&missing), "");
    assert!(!out.status.success());
}
