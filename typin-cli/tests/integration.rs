use std::fs;
use std::process::Command;

use serde_json::Value;
use tempfile::tempdir;

fn parse_single_json_line(stdout: &[u8]) -> Value {
    let text = String::from_utf8_lossy(stdout);
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 1, "stdout must be one JSON line:\n{text}");
    serde_json::from_str(lines[0]).expect("parse json output")
}

#[test]
fn list_reports_only_font_files() {
    let fonts = tempdir().expect("tempdir");
    fs::write(fonts.path().join("a.ttf"), b"").expect("touch a.ttf");
    fs::write(fonts.path().join("b.OTF"), b"").expect("touch b.OTF");
    fs::write(fonts.path().join("notes.txt"), b"").expect("touch notes.txt");

    let output = Command::new(env!("CARGO_BIN_EXE_typin"))
        .arg("list")
        .env("TYPIN_FONTS_DIR", fonts.path())
        .output()
        .expect("run typin");

    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let payload = parse_single_json_line(&output.stdout);
    let listed = payload["fonts"].as_array().expect("fonts array");
    assert_eq!(listed.len(), 2, "payload: {payload}");

    let paths: Vec<&str> = listed.iter().filter_map(|p| p.as_str()).collect();
    assert!(paths.iter().any(|p| p.ends_with("a.ttf")));
    assert!(paths.iter().any(|p| p.ends_with("b.OTF")));
}

#[test]
fn list_of_empty_directory_is_empty() {
    let fonts = tempdir().expect("tempdir");

    let output = Command::new(env!("CARGO_BIN_EXE_typin"))
        .arg("list")
        .env("TYPIN_FONTS_DIR", fonts.path())
        .output()
        .expect("run typin");

    assert!(output.status.success());
    let payload = parse_single_json_line(&output.stdout);
    assert_eq!(payload["fonts"].as_array().map(Vec::len), Some(0));
}

#[test]
fn unknown_command_exits_zero_with_error_payload() {
    let output = Command::new(env!("CARGO_BIN_EXE_typin"))
        .arg("foo")
        .output()
        .expect("run typin");

    // Errors travel in the payload, not the exit status.
    assert!(output.status.success());

    let payload = parse_single_json_line(&output.stdout);
    assert_eq!(payload["error"], "Unknown command: foo");
    assert!(payload["usage"].as_str().unwrap_or_default().contains("activate"));
}

#[test]
fn missing_command_exits_zero_with_usage_payload() {
    let output = Command::new(env!("CARGO_BIN_EXE_typin"))
        .output()
        .expect("run typin");

    assert!(output.status.success());

    let payload = parse_single_json_line(&output.stdout);
    assert_eq!(payload["error"], "Missing command");
    assert!(payload["usage"].is_string());
}

#[test]
fn activate_without_path_exits_zero_with_usage_payload() {
    let output = Command::new(env!("CARGO_BIN_EXE_typin"))
        .arg("activate")
        .output()
        .expect("run typin");

    assert!(output.status.success());

    let payload = parse_single_json_line(&output.stdout);
    assert_eq!(payload["error"], "Missing command");
    assert!(payload["usage"].is_string());
}

#[test]
fn activate_of_missing_source_reports_failure_in_payload() {
    let fonts = tempdir().expect("tempdir");

    let output = Command::new(env!("CARGO_BIN_EXE_typin"))
        .args(["activate", "/no/such/Ghost.ttf"])
        .env("TYPIN_FONTS_DIR", fonts.path())
        .output()
        .expect("run typin");

    assert!(output.status.success(), "fail-soft: exit 0 even on failure");

    let payload = parse_single_json_line(&output.stdout);
    assert_eq!(payload["success"], false);
    assert!(payload["error"].is_string());
}
