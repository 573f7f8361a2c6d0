//! Implementation of the `docbuild build` command.
//!
//! Runs the full build lifecycle. A failing API-extraction tool is reported
//! as a warning and never changes the exit status.

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use tracing::debug;

use docbuild_lib::build::{BuildOptions, run};
use docbuild_lib::consts::DOCUMENTATION_BUILD;
use docbuild_lib::context::ConfigOverride;
use docbuild_lib::invoke::ToolOutcome;

use crate::output::{OutputFormat, format_duration, print_info, print_json, print_stat, print_success, print_warning};

pub fn cmd_build(
  doc_root: PathBuf,
  out: Option<PathBuf>,
  overrides: Vec<ConfigOverride>,
  format: OutputFormat,
) -> Result<()> {
  if !doc_root.is_dir() {
    bail!("Documentation root not found: {}", doc_root.display());
  }
  let doc_root = dunce::canonicalize(&doc_root)
    .with_context(|| format!("Failed to resolve documentation root: {}", doc_root.display()))?;

  let options = BuildOptions {
    doc_root,
    out_dir: out,
    overrides,
  };

  debug!(doc_root = %options.doc_root.display(), "starting build");
  let report = run(&options).context("Build failed")?;
  let manifest = &report.manifest;

  if format.is_json() {
    return print_json(manifest);
  }

  print_success(&format!("Build complete: {}", manifest.project.name));
  print_stat("Mode", manifest.build_mode.as_str());
  print_stat("Version", &manifest.version);
  print_stat("Release", &manifest.release);
  if let Some(value) = manifest.config_values.get(DOCUMENTATION_BUILD) {
    print_stat(DOCUMENTATION_BUILD, value);
  }
  for entry in &manifest.search_path {
    print_stat("Search path", &entry.display().to_string());
  }

  if report.invocations.is_empty() {
    print_info("API extraction skipped (not a hosted build)");
  }
  for invocation in &report.invocations {
    let elapsed = format_duration(invocation.elapsed);
    match invocation.outcome() {
      ToolOutcome::Succeeded => print_info(&format!("{} finished in {}", invocation.program, elapsed)),
      ToolOutcome::Failed { code } => print_warning(&format!("{} exited with status {}", invocation.program, code)),
      ToolOutcome::Terminated { .. } | ToolOutcome::LaunchFailed => {
        let message = invocation
          .invocation_error
          .as_ref()
          .map(ToString::to_string)
          .unwrap_or_else(|| format!("{} failed", invocation.program));
        print_warning(&message);
      }
    }
  }

  print_stat("Manifest", &report.manifest_path.display().to_string());
  Ok(())
}
