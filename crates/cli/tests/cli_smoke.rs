//! CLI smoke tests for docbuild.
//!
//! These tests verify that all CLI commands run without panicking and
//! return appropriate exit codes.

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use tempfile::TempDir;

/// Get a Command for the docbuild binary with the hosted signal cleared.
fn docbuild_cmd() -> Command {
  let mut cmd: Command = cargo_bin_cmd!("docbuild");
  cmd.env_remove("READTHEDOCS");
  cmd
}

// =============================================================================
// Help & Version
// =============================================================================

#[test]
fn help_flag_works() {
  docbuild_cmd()
    .arg("--help")
    .assert()
    .success()
    .stdout(predicate::str::contains("Usage"));
}

#[test]
fn version_flag_works() {
  docbuild_cmd()
    .arg("--version")
    .assert()
    .success()
    .stdout(predicate::str::contains("docbuild"));
}

#[test]
fn subcommand_help_works() {
  for cmd in &["build", "params", "info"] {
    docbuild_cmd()
      .arg(cmd)
      .arg("--help")
      .assert()
      .success()
      .stdout(predicate::str::contains("Usage"));
  }
}

// =============================================================================
// info
// =============================================================================

#[test]
fn info_reports_development_without_signal() {
  docbuild_cmd()
    .arg("info")
    .assert()
    .success()
    .stdout(predicate::str::starts_with("docbuild "))
    .stdout(predicate::str::contains("Build: development"))
    .stdout(predicate::str::contains("READTHEDOCS: (unset)"));
}

#[test]
fn info_reports_hosted_with_signal() {
  docbuild_cmd()
    .arg("info")
    .env("READTHEDOCS", "True")
    .assert()
    .success()
    .stdout(predicate::str::contains("Build: hosted"));
}

#[test]
fn info_lowercase_signal_is_development() {
  docbuild_cmd()
    .arg("info")
    .env("READTHEDOCS", "true")
    .assert()
    .success()
    .stdout(predicate::str::contains("Build: development"));
}

#[test]
fn info_uses_configured_environment_variable() {
  let temp = TempDir::new().unwrap();
  std::fs::write(
    temp.path().join("docbuild.toml"),
    "[environment]\nvariable = \"CI_HOSTED\"\nhosted_value = \"yes\"\n",
  )
  .unwrap();

  docbuild_cmd()
    .arg("info")
    .arg(temp.path())
    .env("CI_HOSTED", "yes")
    .assert()
    .success()
    .stdout(predicate::str::contains("Build: hosted"))
    .stdout(predicate::str::contains("CI_HOSTED: \"yes\""))
    .stdout(predicate::str::contains("READTHEDOCS").not());

  docbuild_cmd()
    .arg("params")
    .arg(temp.path())
    .env("CI_HOSTED", "yes")
    .assert()
    .success()
    .stdout(predicate::str::contains("Mode: hosted"));
}

// =============================================================================
// params
// =============================================================================

#[test]
fn params_shows_latest_version() {
  let temp = TempDir::new().unwrap();

  docbuild_cmd()
    .arg("params")
    .arg(temp.path())
    .assert()
    .success()
    .stdout(predicate::str::contains("Version: latest"))
    .stdout(predicate::str::contains("Mode: development"));
}

#[test]
fn params_json_hosted() {
  let temp = TempDir::new().unwrap();

  docbuild_cmd()
    .arg("params")
    .arg(temp.path())
    .arg("--format")
    .arg("json")
    .env("READTHEDOCS", "True")
    .assert()
    .success()
    .stdout(predicate::str::contains("\"build_mode\": \"hosted\""));
}

// =============================================================================
// Error Handling
// =============================================================================

#[test]
fn build_nonexistent_root_fails() {
  docbuild_cmd()
    .arg("build")
    .arg("/nonexistent/path/docs")
    .assert()
    .failure()
    .stderr(predicate::str::contains("not found"));
}

#[test]
fn params_nonexistent_root_fails() {
  docbuild_cmd()
    .arg("params")
    .arg("/nonexistent/path/docs")
    .assert()
    .failure()
    .stderr(predicate::str::contains("not found"));
}

#[test]
fn info_nonexistent_root_fails() {
  docbuild_cmd()
    .arg("info")
    .arg("/nonexistent/path/docs")
    .assert()
    .failure()
    .stderr(predicate::str::contains("not found"));
}

#[test]
fn malformed_define_is_rejected() {
  let temp = TempDir::new().unwrap();

  docbuild_cmd()
    .arg("build")
    .arg(temp.path())
    .arg("-D")
    .arg("missing-equals")
    .assert()
    .failure();
}
