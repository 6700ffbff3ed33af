#![allow(deprecated)] // cargo_bin deprecation - still works fine

mod common;

use std::fs;

use predicates::prelude::*;

use common::{TestFixture, cmd};

// ============================================================================
// Argument and configuration validation
// ============================================================================

#[test]
fn run_without_categories_is_a_config_error() {
    let fixture = TestFixture::new();

    cmd()
        .arg("run")
        .arg(fixture.path())
        .arg("--no-config")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("category"));
}

#[test]
fn run_on_missing_directory_is_a_config_error() {
    let fixture = TestFixture::new();

    cmd()
        .arg("run")
        .arg(fixture.path().join("nope"))
        .arg("--no-config")
        .arg("--ext")
        .arg("pdf")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn run_on_empty_tree_succeeds_without_scanning() {
    let fixture = TestFixture::new();

    cmd()
        .arg("run")
        .arg(fixture.path())
        .arg("--no-config")
        .arg("--ext")
        .arg("pdf")
        .assert()
        .success()
        .stdout(predicate::str::contains("No matching files"));
}

#[test]
fn invalid_exclude_pattern_is_rejected() {
    let fixture = TestFixture::new();
    fixture.create_files(1, "pdf");

    cmd()
        .arg("run")
        .arg(fixture.path())
        .arg("--no-config")
        .arg("--ext")
        .arg("pdf")
        .arg("-x")
        .arg("[")
        .assert()
        .code(2);
}

// ============================================================================
// Config file handling
// ============================================================================

#[test]
fn config_file_supplies_categories() {
    let fixture = TestFixture::new();
    fixture.create_files(2, "pdf");
    let config_path = fixture.path().join("sweep.toml");
    fs::write(
        &config_path,
        "[scan]\ncategories = [\"pdf\"]\nattribute = \"user.openwith.test\"\n",
    )
    .unwrap();

    cmd()
        .arg("run")
        .arg(fixture.path())
        .arg("--config")
        .arg(&config_path)
        .arg("--no-sample")
        .assert()
        .success()
        .stdout(predicate::str::contains("pdf"));
}

#[test]
fn malformed_config_file_is_a_config_error() {
    let fixture = TestFixture::new();
    let config_path = fixture.path().join("bad.toml");
    fs::write(&config_path, "[scan\n").unwrap();

    cmd()
        .arg("run")
        .arg(fixture.path())
        .arg("--config")
        .arg(&config_path)
        .assert()
        .code(2);
}

// ============================================================================
// init
// ============================================================================

#[test]
fn init_creates_config_file() {
    let fixture = TestFixture::new();
    let output = fixture.path().join(".openwith-sweep.toml");

    cmd()
        .arg("init")
        .arg("--output")
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("Created configuration file"));

    let content = fs::read_to_string(&output).unwrap();
    assert!(content.contains("[scan]"));
    assert!(content.contains("[sampling]"));
}

#[test]
fn init_refuses_to_overwrite_without_force() {
    let fixture = TestFixture::new();
    let output = fixture.path().join(".openwith-sweep.toml");
    fs::write(&output, "existing").unwrap();

    cmd()
        .arg("init")
        .arg("--output")
        .arg(&output)
        .assert()
        .code(2)
        .stderr(predicate::str::contains("already exists"));

    cmd()
        .arg("init")
        .arg("--output")
        .arg(&output)
        .arg("--force")
        .assert()
        .success();
}

// ============================================================================
// sample
// ============================================================================

#[test]
fn sample_reports_estimate_as_text() {
    let fixture = TestFixture::new();
    fixture.create_files(20, "pdf");

    cmd()
        .arg("sample")
        .arg(fixture.path())
        .arg("--no-config")
        .arg("--ext")
        .arg("pdf")
        .arg("--attr")
        .arg(common::TEST_ATTR)
        .assert()
        .success()
        .stdout(predicate::str::contains("Sampling estimate"))
        .stdout(predicate::str::contains("population:      20"));
}

#[test]
fn sample_emits_valid_json() {
    let fixture = TestFixture::new();
    fixture.create_files(10, "pdf");

    let output = cmd()
        .arg("sample")
        .arg(fixture.path())
        .arg("--no-config")
        .arg("--ext")
        .arg("pdf")
        .arg("--attr")
        .arg(common::TEST_ATTR)
        .arg("--format")
        .arg("json")
        .output()
        .unwrap();

    assert!(output.status.success());
    let parsed: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(parsed["population"], 10);
    assert_eq!(parsed["sampled_count"], 10);
}
