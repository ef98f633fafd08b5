use std::path::{Path, PathBuf};
use std::process::Command;

/// Helper to get the path to a shipped case file.
fn case_path(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("../../cases")
        .join(name)
}

/// Helper to get the bdv binary path.
fn bdv_bin() -> PathBuf {
    let mut path = PathBuf::from(env!("CARGO_BIN_EXE_bdv"));
    // Fallback for test environments
    if !path.exists() {
        path = PathBuf::from("target/debug/bdv");
    }
    path
}

// ================================================================
// run command
// ================================================================

#[test]
fn bdv_run_interior() {
    let output = Command::new(bdv_bin())
        .args(["run", "--dim-x", "4", "--dim-y", "3", "--x", "1", "3", "--y", "1", "2"])
        .output()
        .expect("failed to run bdv");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("region [1, 3) x [1, 2)"));
    assert!(stdout.contains("PASSED"));
}

#[test]
fn bdv_run_json() {
    let output = Command::new(bdv_bin())
        .args(["run", "--dim-x", "5", "--dim-y", "5", "--backend", "parallel", "--format", "json"])
        .output()
        .expect("failed to run bdv");
    assert!(output.status.success());
    let json: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("run output is JSON");
    assert_eq!(json["cells_checked"], 25);
    assert_eq!(json["mismatches"].as_array().map(Vec::len), Some(0));
}

#[test]
fn bdv_run_out_of_bounds_fails() {
    let output = Command::new(bdv_bin())
        .args(["run", "--dim-x", "4", "--dim-y", "3", "--x", "0", "5"])
        .output()
        .expect("failed to run bdv");
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("exceeds domain size 4"));
}

#[test]
fn bdv_run_rejects_negative_bound() {
    let output = Command::new(bdv_bin())
        .args(["run", "--dim-x", "4", "--dim-y", "3", "--x", "-1", "2"])
        .output()
        .expect("failed to run bdv");
    assert!(!output.status.success());
}

// ================================================================
// check / validate commands
// ================================================================

#[test]
fn bdv_check_shipped_cases() {
    for name in ["foreach-bounds.yaml", "kernel-clip.yaml"] {
        let output = Command::new(bdv_bin())
            .arg("check")
            .arg(case_path(name))
            .output()
            .expect("failed to run bdv");
        assert!(output.status.success(), "{name}");
        let stdout = String::from_utf8_lossy(&output.stdout);
        assert!(stdout.contains("0 failed"));
    }
}

#[test]
fn bdv_check_backend_override() {
    let output = Command::new(bdv_bin())
        .arg("check")
        .arg(case_path("kernel-clip.yaml"))
        .args(["--backend", "parallel"])
        .output()
        .expect("failed to run bdv");
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("(parallel)"));
}

#[test]
fn bdv_validate_shipped_cases() {
    let output = Command::new(bdv_bin())
        .arg("validate")
        .arg(case_path("foreach-bounds.yaml"))
        .output()
        .expect("failed to run bdv");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Case file is valid"));
    assert!(stdout.contains("CASE-005"));
}

#[test]
fn bdv_validate_out_of_bounds_case() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bad.yaml");
    std::fs::write(
        &path,
        "cases:\n  - name: oob\n    domain: { dim_x: 4, dim_y: 3 }\n    region: { x_end: 5, y_end: 3 }\n",
    )
    .unwrap();
    let output = Command::new(bdv_bin())
        .arg("validate")
        .arg(&path)
        .output()
        .expect("failed to run bdv");
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("CASE-004"));
}

#[test]
fn bdv_check_invalid_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bad.yaml");
    std::fs::write(&path, "{{invalid").unwrap();
    let output = Command::new(bdv_bin())
        .arg("check")
        .arg(&path)
        .output()
        .expect("failed to run bdv");
    assert!(!output.status.success());
}
