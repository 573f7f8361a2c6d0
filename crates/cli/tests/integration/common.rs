//! Shared test helpers for CLI integration tests.

use std::path::{Path, PathBuf};

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use tempfile::TempDir;

/// Isolated documentation tree.
///
/// Layout mirrors a project checkout:
/// ```text
/// <temp>/docs      documentation root
/// <temp>/doxygen   API tool working directory (../doxygen)
/// ```
pub struct TestEnv {
  pub temp: TempDir,
}

impl TestEnv {
  pub fn new() -> Self {
    let temp = TempDir::new().unwrap();
    std::fs::create_dir_all(temp.path().join("docs")).unwrap();
    std::fs::create_dir_all(temp.path().join("doxygen")).unwrap();
    Self { temp }
  }

  pub fn doc_root(&self) -> PathBuf {
    self.temp.path().join("docs")
  }

  pub fn api_dir(&self) -> PathBuf {
    self.temp.path().join("doxygen")
  }

  pub fn manifest_path(&self) -> PathBuf {
    self.doc_root().join("_build").join("docbuild.json")
  }

  /// Write `docbuild.toml` into the documentation root.
  pub fn write_config(&self, content: &str) {
    std::fs::write(self.doc_root().join("docbuild.toml"), content).unwrap();
  }

  /// Install an executable stand-in for the API tool and point the config at it.
  #[cfg(unix)]
  pub fn install_tool(&self, body: &str) -> PathBuf {
    let path = write_script(self.temp.path(), "fake-doxygen", body);
    self.write_config(&format!("[api]\ntool = {:?}\n", path.to_str().unwrap()));
    path
  }

  /// `docbuild` with the hosted signal removed.
  pub fn docbuild_cmd(&self) -> Command {
    let mut cmd: Command = cargo_bin_cmd!("docbuild");
    cmd.env_remove("READTHEDOCS");
    cmd.env_remove("RUST_LOG");
    cmd
  }

  /// `docbuild` as the hosted service would run it.
  pub fn hosted_cmd(&self) -> Command {
    let mut cmd = self.docbuild_cmd();
    cmd.env("READTHEDOCS", "True");
    cmd
  }
}

#[cfg(unix)]
fn write_script(dir: &Path, name: &str, body: &str) -> PathBuf {
  use std::os::unix::fs::PermissionsExt;

  let path = dir.join(name);
  std::fs::write(&path, format!("#!/bin/sh\n{}\n", body)).unwrap();
  std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
  path
}
