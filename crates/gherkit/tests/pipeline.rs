//! Integration tests that run the gherkit binary

use std::path::Path;
use std::process::Command;

fn gherkit_bin() -> Command {
    Command::new(env!("CARGO_BIN_EXE_gherkit"))
}

fn fixtures_dir() -> &'static Path {
    Path::new(concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures"))
}

#[test]
fn full_pipeline_produces_a_report() {
    let out_dir = tempfile::tempdir().unwrap();

    let output = gherkit_bin()
        .arg("--project-dir")
        .arg(fixtures_dir().join("calculator"))
        .arg("--results-dir")
        .arg(fixtures_dir().join("results"))
        .arg("--out-dir")
        .arg(out_dir.path())
        .arg("--json")
        .output()
        .expect("Failed to run gherkit");

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(output.status.success(), "Command should succeed: {stderr}");
    assert!(
        stderr.contains("Report generated"),
        "Should announce the report: {stderr}"
    );

    // The JSON summary carries the aggregate counts.
    let stdout = String::from_utf8_lossy(&output.stdout);
    let summary: serde_json::Value =
        serde_json::from_str(&stdout).expect("stdout should be the JSON summary");
    assert_eq!(summary["project"], "CalculatorTests");
    assert_eq!(summary["features"], 2);
    assert_eq!(summary["scenarios"], 4);
    assert_eq!(summary["passed"], 3);
    assert_eq!(summary["success_rate"], "75%");

    // The report file exists and is fully substituted.
    let report_path = Path::new(summary["report"].as_str().unwrap()).to_path_buf();
    assert!(report_path.exists(), "Report file should be written");
    let report = std::fs::read_to_string(&report_path).unwrap();

    assert!(report.contains("Adding numbers"));
    assert!(report.contains("Subtracting numbers"));
    assert!(report.contains("Add two positive numbers"));
    assert!(report.contains("75%"));
    // The failure message from the result file survives, HTML-encoded.
    assert!(report.contains("Assert.AreEqual failed"));
    // No token may remain unsubstituted.
    assert!(!report.contains("[Summary"), "Unreplaced token: {report}");
    assert!(!report.contains("[Scenario"), "Unreplaced token: {report}");
    assert!(!report.contains("[Feature"), "Unreplaced token: {report}");
}

#[test]
fn category_filter_narrows_the_run() {
    let out_dir = tempfile::tempdir().unwrap();

    let output = gherkit_bin()
        .arg("--project-dir")
        .arg(fixtures_dir().join("calculator"))
        .arg("--results-dir")
        .arg(fixtures_dir().join("results"))
        .arg("--out-dir")
        .arg(out_dir.path())
        .arg("--category")
        .arg("Smoke")
        .arg("--json")
        .output()
        .expect("Failed to run gherkit");

    assert!(output.status.success());

    // Only the AddTwoNumbers entry carries the Smoke category.
    let stdout = String::from_utf8_lossy(&output.stdout);
    let summary: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(summary["description"], "Filtered Category: Smoke");
    assert_eq!(summary["features"], 1);
    assert_eq!(summary["scenarios"], 1);
    assert_eq!(summary["passed"], 1);
    assert_eq!(summary["success_rate"], "100%");
}

#[test]
fn missing_project_file_fails_with_a_diagnostic() {
    let empty = tempfile::tempdir().unwrap();
    let out_dir = tempfile::tempdir().unwrap();

    let output = gherkit_bin()
        .arg("--project-dir")
        .arg(empty.path())
        .arg("--results-dir")
        .arg(fixtures_dir().join("results"))
        .arg("--out-dir")
        .arg(out_dir.path())
        .output()
        .expect("Failed to run gherkit");

    assert!(!output.status.success(), "Command should fail");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("no project file"),
        "Should name the failure: {stderr}"
    );
}

#[test]
fn missing_documentation_file_names_the_exact_path() {
    let out_dir = tempfile::tempdir().unwrap();

    let output = gherkit_bin()
        .arg("--project-dir")
        .arg(fixtures_dir().join("broken"))
        .arg("--results-dir")
        .arg(fixtures_dir().join("results"))
        .arg("--out-dir")
        .arg(out_dir.path())
        .output()
        .expect("Failed to run gherkit");

    assert!(!output.status.success(), "Command should fail");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("does-not-exist.xml") && stderr.contains("was not found"),
        "Should name the missing documentation file: {stderr}"
    );
    // No report may be written for a failed run.
    assert_eq!(std::fs::read_dir(out_dir.path()).unwrap().count(), 0);
}

#[test]
fn missing_template_files_fail_the_render() {
    let empty_templates = tempfile::tempdir().unwrap();
    let out_dir = tempfile::tempdir().unwrap();

    let output = gherkit_bin()
        .arg("--project-dir")
        .arg(fixtures_dir().join("calculator"))
        .arg("--results-dir")
        .arg(fixtures_dir().join("results"))
        .arg("--templates")
        .arg(empty_templates.path())
        .arg("--out-dir")
        .arg(out_dir.path())
        .output()
        .expect("Failed to run gherkit");

    assert!(!output.status.success(), "Command should fail");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("report template"),
        "Should mention the templates: {stderr}"
    );
}

#[test]
fn unknown_category_fails_with_no_test_results() {
    let out_dir = tempfile::tempdir().unwrap();

    let output = gherkit_bin()
        .arg("--project-dir")
        .arg(fixtures_dir().join("calculator"))
        .arg("--results-dir")
        .arg(fixtures_dir().join("results"))
        .arg("--out-dir")
        .arg(out_dir.path())
        .arg("--category")
        .arg("Nightly")
        .output()
        .expect("Failed to run gherkit");

    assert!(!output.status.success(), "Command should fail");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("no test results"),
        "Should report the empty correlation: {stderr}"
    );
}
