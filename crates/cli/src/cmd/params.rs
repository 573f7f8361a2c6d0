//! Implementation of the `docbuild params` command.
//!
//! Resolves the build parameters for a documentation root without running
//! the build lifecycle or invoking the API tool.

use std::path::Path;

use anyhow::{Context, Result, bail};

use docbuild_lib::build::resolve_only;

use crate::output::{OutputFormat, print_json, print_stat};

pub fn cmd_params(doc_root: &Path, format: OutputFormat) -> Result<()> {
  if !doc_root.is_dir() {
    bail!("Documentation root not found: {}", doc_root.display());
  }
  let (params, config) =
    resolve_only(doc_root).with_context(|| format!("Failed to resolve parameters for {}", doc_root.display()))?;

  if format.is_json() {
    return print_json(&params);
  }

  println!("Parameters for {}:", config.project.name);
  print_stat("Mode", params.build_mode.as_str());
  print_stat("Version", &params.version);
  print_stat("Release", &params.release);
  print_stat("Search path", &params.extra_search_path.display().to_string());
  print_stat("API tool", &config.api.tool);
  Ok(())
}
