//! Test utilities for docbuild-lib.
//!
//! Helpers for tests that need a stand-in for the external API-extraction
//! tool. The tool is always launched without arguments, so the stand-in is an
//! executable script rather than a shell command line.

use std::path::{Path, PathBuf};

/// Write an executable `/bin/sh` script named `name` into `dir` and return its path.
#[cfg(unix)]
pub fn write_tool(dir: &Path, name: &str, body: &str) -> PathBuf {
  use std::os::unix::fs::PermissionsExt;

  let path = dir.join(name);
  std::fs::write(&path, format!("#!/bin/sh\n{}\n", body)).unwrap();
  std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
  path
}

/// Create `<root>/docs` and `<root>/doxygen`, returning the documentation root.
///
/// This mirrors the default layout where the API tool runs in `../doxygen`.
pub fn doc_tree(root: &Path) -> PathBuf {
  let docs = root.join("docs");
  std::fs::create_dir_all(&docs).unwrap();
  std::fs::create_dir_all(root.join("doxygen")).unwrap();
  docs
}
