//! Implementation of the `docbuild info` command.

use std::path::Path;

use anyhow::{Context, Result, bail};

use docbuild_lib::config::DocsConfig;
use docbuild_lib::consts::APP_NAME;
use docbuild_lib::environment::BuildEnvironment;

/// Print the environment classification a build of `doc_root` would see.
pub fn cmd_info(doc_root: &Path) -> Result<()> {
  if !doc_root.is_dir() {
    bail!("Documentation root not found: {}", doc_root.display());
  }
  let config =
    DocsConfig::load(doc_root).with_context(|| format!("Failed to load config for {}", doc_root.display()))?;
  let environment = BuildEnvironment::detect_with(&config.environment);

  println!("{} {}", APP_NAME, env!("CARGO_PKG_VERSION"));
  println!("Environment:");
  println!("Build: {}", environment);
  match std::env::var(&config.environment.variable) {
    Ok(value) => println!("{}: {:?}", config.environment.variable, value),
    Err(_) => println!("{}: (unset)", config.environment.variable),
  }
  Ok(())
}
