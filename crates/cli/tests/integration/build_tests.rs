//! End-to-end `docbuild build` scenarios.

use predicates::prelude::*;
use serial_test::serial;

use super::common::TestEnv;

#[test]
fn development_build_skips_api_extraction() {
  let env = TestEnv::new();

  env
    .docbuild_cmd()
    .arg("build")
    .arg(env.doc_root())
    .assert()
    .success()
    .stdout(predicate::str::contains("Mode: development"))
    .stdout(predicate::str::contains("documentation_build: development"))
    .stdout(predicate::str::contains("API extraction skipped"));

  assert!(env.manifest_path().exists());
}

#[test]
fn hosted_build_with_missing_tool_still_succeeds() {
  let env = TestEnv::new();
  env.write_config("[api]\ntool = \"docbuild-no-such-doxygen\"\n");

  env
    .hosted_cmd()
    .arg("build")
    .arg(env.doc_root())
    .assert()
    .success()
    .stdout(predicate::str::contains("Mode: hosted"))
    .stderr(predicate::str::contains("docbuild-no-such-doxygen execution failed"));

  assert!(env.manifest_path().exists());
}

#[cfg(unix)]
#[test]
#[serial]
fn hosted_build_runs_tool_in_api_directory() {
  let env = TestEnv::new();
  env.install_tool(": > generated.xml");

  env
    .hosted_cmd()
    .arg("build")
    .arg(env.doc_root())
    .assert()
    .success()
    .stdout(predicate::str::contains("Mode: hosted"))
    .stdout(predicate::str::contains("fake-doxygen finished in"));

  assert!(env.api_dir().join("generated.xml").exists());
}

#[cfg(unix)]
#[test]
#[serial]
fn hosted_build_survives_tool_killed_by_signal() {
  let env = TestEnv::new();
  env.install_tool("kill -SEGV $$");

  env
    .hosted_cmd()
    .arg("build")
    .arg(env.doc_root())
    .assert()
    .success()
    .stderr(predicate::str::contains("terminated by signal 11"));

  let manifest: serde_json::Value =
    serde_json::from_str(&std::fs::read_to_string(env.manifest_path()).unwrap()).unwrap();
  assert_eq!(manifest["tool_invocations"][0]["exit_status"], -11);
  assert_eq!(manifest["tool_invocations"][0]["outcome"]["kind"], "terminated");
}

#[cfg(unix)]
#[test]
#[serial]
fn development_build_never_runs_tool() {
  let env = TestEnv::new();
  env.install_tool(": > generated.xml");

  env.docbuild_cmd().arg("build").arg(env.doc_root()).assert().success();

  assert!(!env.api_dir().join("generated.xml").exists());
}

#[test]
fn define_overrides_documentation_build() {
  let env = TestEnv::new();

  env
    .docbuild_cmd()
    .arg("build")
    .arg(env.doc_root())
    .arg("-D")
    .arg("documentation_build=preview")
    .assert()
    .success()
    .stdout(predicate::str::contains("documentation_build: preview"));
}

#[test]
fn unknown_define_fails() {
  let env = TestEnv::new();

  env
    .docbuild_cmd()
    .arg("build")
    .arg(env.doc_root())
    .arg("-D")
    .arg("not_registered=1")
    .assert()
    .failure()
    .stderr(predicate::str::contains("unknown config value"));
}

#[test]
fn json_output_is_the_manifest() {
  let env = TestEnv::new();
  let out = env.temp.path().join("out");

  let assert = env
    .docbuild_cmd()
    .arg("build")
    .arg(env.doc_root())
    .arg("--out")
    .arg(&out)
    .arg("--format")
    .arg("json")
    .assert()
    .success();

  let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
  let manifest: serde_json::Value = serde_json::from_str(&stdout).unwrap();
  assert_eq!(manifest["version"], "latest");
  assert_eq!(manifest["release"], "latest");
  assert_eq!(manifest["build_mode"], "development");
  assert_eq!(manifest["doc_value_kinds"][0]["display_label"], "configuration value");
  assert!(out.join("docbuild.json").exists());
}

#[test]
fn invalid_config_fails() {
  let env = TestEnv::new();
  env.write_config("[api\n");

  env
    .docbuild_cmd()
    .arg("build")
    .arg(env.doc_root())
    .assert()
    .failure()
    .stderr(predicate::str::contains("Build failed"));
}
