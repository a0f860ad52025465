use std::fs;
use std::process::{Command, Output};

fn run_cli(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_rawrr2graph"))
        .args(args)
        .output()
        .expect("binary should launch")
}

fn write_report(dir: &tempfile::TempDir, contents: &str) -> String {
    let path = dir.path().join("report.json");
    fs::write(&path, contents).expect("write report fixture");
    path.to_str().expect("utf-8 temp path").to_string()
}

#[test]
fn prints_graph_document_to_stdout() {
    let dir = tempfile::tempdir().unwrap();
    let report = write_report(
        &dir,
        r#"{"sections": [
            {"sectionName": "Assets", "entries": [{"title": "Server A", "description": "rack"}]},
            {"sectionName": "Activities", "entries": [
                {"title": "Patch Server", "description": "", "relatedAssets": [{"assetName": "Server A"}]}
            ]}
        ]}"#,
    );

    let output = run_cli(&[&report]);
    assert!(output.status.success());
    assert!(output.stderr.is_empty());

    let json: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("stdout should be one json document");
    assert_eq!(json["graph"]["nodes"].as_array().unwrap().len(), 3);
    assert_eq!(json["graph"]["edges"].as_array().unwrap().len(), 2);
    assert_eq!(json["graph"]["name"], "RAWRR");
}

#[test]
fn unresolved_reference_fails_without_stdout() {
    let dir = tempfile::tempdir().unwrap();
    let report = write_report(
        &dir,
        r#"{"sections": [{"sectionName": "Recommendations", "entries": [
            {"title": "Rotate keys", "description": "", "relatedVulnerabilities": [{"vulnerabilityName": "Leaked key"}]}
        ]}]}"#,
    );

    let output = run_cli(&[&report]);
    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert_eq!(stderr.lines().count(), 1, "stderr: {stderr}");
    assert!(stderr.starts_with("error:"));
    assert!(stderr.contains("Leaked key"));
}

#[test]
fn failure_cause_is_reported_once() {
    let dir = tempfile::tempdir().unwrap();
    let report = write_report(
        &dir,
        r#"{"sections": [{"sectionName": "Controls", "entries": []}]}"#,
    );

    let output = run_cli(&[&report]);
    assert_eq!(output.status.code(), Some(1));

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert_eq!(stderr.lines().count(), 1, "stderr: {stderr}");
    assert_eq!(stderr.matches("unknown report section: Controls").count(), 1);
    assert!(stderr.contains("failed to convert report"));
    assert!(stderr.contains("malformed report"));
}

#[test]
fn invalid_json_cause_is_reported_once() {
    let dir = tempfile::tempdir().unwrap();
    let report = write_report(&dir, "{ not json");

    let output = run_cli(&[&report]);
    assert_eq!(output.status.code(), Some(1));

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert_eq!(stderr.lines().count(), 1, "stderr: {stderr}");
    assert_eq!(stderr.matches("invalid report json").count(), 1);
    assert_eq!(stderr.matches("line 1 column").count(), 1);
}

#[test]
fn missing_file_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("absent.json");

    let output = run_cli(&[missing.to_str().unwrap()]);
    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert_eq!(stderr.lines().count(), 1, "stderr: {stderr}");
    assert!(stderr.contains("failed to read report"));
}

#[test]
fn requires_report_argument() {
    let output = run_cli(&[]);
    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
}
