//! Integration tests for CLI output
//!
//! These run the `mylocation` binary and check its JSON output.

use serde_json::Value;
use std::io::Write;
use std::process::Command;

fn run_json(args: &[&str]) -> Value {
    let output = Command::new(env!("CARGO_BIN_EXE_mylocation"))
        .args(args)
        .arg("--json")
        .env_remove("MYLOCATION_BUSY_POLICY")
        .env_remove("MYLOCATION_ALERT_ON_POSITIONING_ERROR")
        .env_remove("MYLOCATION_FALLBACK_PLACE_LABEL")
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    let stdout = String::from_utf8_lossy(&output.stdout);
    serde_json::from_str(&stdout).expect("Output should be valid JSON")
}

#[test]
fn test_distance_json() {
    let parsed = run_json(&["distance", "37.5665,126.9780", "37.5651,126.9895"]);

    assert_eq!(parsed["status"], "success");
    assert_eq!(parsed["data"]["method"], "geodesic");
    let rounded = parsed["data"]["rounded_meters"].as_u64().unwrap();
    assert!((1027..=1029).contains(&rounded), "got {}", rounded);
}

#[test]
fn test_distance_rejects_invalid_coordinate() {
    let output = Command::new(env!("CARGO_BIN_EXE_mylocation"))
        .args(["distance", "95.0,0.0", "0.0,0.0"])
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Invalid coordinate"));
}

#[test]
fn test_check_success_includes_pin_feature() {
    let parsed = run_json(&["check", "37.5651,126.9895", "--place", "Jongno-gu"]);

    assert_eq!(parsed["status"], "success");
    let data = &parsed["data"];
    assert_eq!(data["place_label"], "Jongno-gu");
    assert_eq!(data["pin"]["type"], "Feature");
    assert_eq!(data["pin"]["geometry"]["coordinates"][0], 126.9895);
    assert_eq!(data["alerts"][0]["kind"], "DistanceResult");
}

#[test]
fn test_check_denied() {
    let parsed = run_json(&["check", "37.5651,126.9895", "--auth", "denied"]);

    assert_eq!(parsed["status"], "failed");
    assert_eq!(parsed["data"]["error"], "Location permission denied");
    assert_eq!(parsed["data"]["alerts"][0]["kind"], "PermissionDenied");
    // The pin is dropped even though the check failed
    assert_eq!(parsed["data"]["pin"]["type"], "Feature");
}

#[test]
fn test_check_cancelled_prompt() {
    let parsed =
        run_json(&["check", "37.5651,126.9895", "--auth", "not-determined", "--prompt", "cancel"]);

    assert_eq!(parsed["status"], "failed");
    assert_eq!(parsed["data"]["error"], "User cancelled permission request");
}

#[test]
fn test_check_granted_after_prompt() {
    let parsed = run_json(&["check", "37.5651,126.9895", "--auth", "not-determined"]);

    assert_eq!(parsed["status"], "success");
    assert_eq!(parsed["data"]["authorization"], "when-in-use");
    assert_eq!(parsed["data"]["place_label"], "selected location");
}

#[test]
fn test_check_positioning_failure() {
    let parsed = run_json(&["check", "37.5651,126.9895", "--fail", "GPS signal lost"]);

    assert_eq!(parsed["status"], "failed");
    assert!(parsed["data"]["error"].as_str().unwrap().contains("GPS signal lost"));
    assert_eq!(parsed["data"]["alerts"][0]["kind"], "Error");

    let quiet = run_json(&["check", "37.5651,126.9895", "--fail", "GPS signal lost", "--no-error-alert"]);
    assert_eq!(quiet["data"]["alerts"].as_array().unwrap().len(), 0);
}

#[test]
fn test_check_later_tap_supersedes_first() {
    let parsed = run_json(&["check", "37.5700,126.9800", "--then", "37.5651,126.9895"]);

    assert_eq!(parsed["status"], "success");
    let data = &parsed["data"];
    assert_eq!(data["request"], 2);
    assert_eq!(data["target"]["latitude"], 37.5651);
    let rounded = data["rounded_meters"].as_u64().unwrap();
    assert!((1027..=1029).contains(&rounded), "got {}", rounded);

    let taps = data["taps"].as_array().unwrap();
    assert_eq!(taps.len(), 2);
    assert_eq!(taps[0]["status"], "displaced");
    assert!(taps[0]["error"].as_str().unwrap().contains("superseded"));
    assert_eq!(taps[1]["status"], "success");
    // Only the latest tap keeps a pin
    assert_eq!(data["pin"]["geometry"]["coordinates"][1], 37.5651);
}

#[test]
fn test_check_reject_policy_keeps_first_tap() {
    let parsed = run_json(&[
        "check",
        "37.5651,126.9895",
        "--then",
        "37.5700,126.9800",
        "--busy-policy",
        "reject",
    ]);

    assert_eq!(parsed["status"], "success");
    let data = &parsed["data"];
    assert_eq!(data["request"], 1);
    assert_eq!(data["target"]["latitude"], 37.5651);

    let taps = data["taps"].as_array().unwrap();
    assert_eq!(taps[0]["status"], "success");
    assert_eq!(taps[1]["status"], "displaced");
    assert!(taps[1]["error"].as_str().unwrap().contains("already in progress"));
}

#[test]
fn test_check_ask_prompt_requires_terminal_output() {
    let output = Command::new(env!("CARGO_BIN_EXE_mylocation"))
        .args(["check", "37.5651,126.9895", "--auth", "not-determined", "--prompt", "ask", "--json"])
        .env_remove("MYLOCATION_BUSY_POLICY")
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("--prompt ask"));
    assert!(output.stdout.is_empty());
}

#[test]
fn test_config_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "busy_policy = \"reject\"").unwrap();
    let path = file.path().to_str().unwrap().to_string();

    let parsed = run_json(&["config", "--config", &path]);

    let rows = parsed["data"].as_array().unwrap();
    let busy = rows.iter().find(|row| row["key"] == "busy_policy").unwrap();
    assert_eq!(busy["value"], "Reject");
    assert_eq!(busy["source"], "File");
}
