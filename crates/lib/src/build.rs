//! End-to-end documentation build orchestration.
//!
//! [`run`] drives one build through every lifecycle state:
//!
//! 1. load `docbuild.toml` and create the [`BuildContext`]
//! 2. resolve the build parameters and extend the search path
//! 3. register the custom value kind, config value and build-init hook
//! 4. apply config-file and command-line overrides
//! 5. fire the build-init event (API extraction on hosted builds)
//! 6. generate and write the manifest

use std::path::{Path, PathBuf};

use tracing::info;

use crate::config::DocsConfig;
use crate::context::{BuildContext, BuildError, BuildState, ConfigOverride};
use crate::engine::Session;
use crate::hooks;
use crate::invoke::{ExternalTool, ToolInvocation, ToolRunner};
use crate::manifest::BuildManifest;
use crate::params::BuildParameters;

/// Inputs to a build.
#[derive(Debug, Clone)]
pub struct BuildOptions {
  pub doc_root: PathBuf,
  /// Defaults to `<doc_root>/_build`.
  pub out_dir: Option<PathBuf>,
  pub overrides: Vec<ConfigOverride>,
}

impl BuildOptions {
  pub fn new(doc_root: impl Into<PathBuf>) -> Self {
    Self {
      doc_root: doc_root.into(),
      out_dir: None,
      overrides: Vec::new(),
    }
  }

  pub fn out_dir(&self) -> PathBuf {
    self
      .out_dir
      .clone()
      .unwrap_or_else(|| self.doc_root.join("_build"))
  }
}

/// Result of a finished build. Tool failures are reported here, not as errors.
#[derive(Debug)]
pub struct BuildReport {
  pub manifest: BuildManifest,
  pub manifest_path: PathBuf,
  pub invocations: Vec<ToolInvocation>,
}

/// Run a build with the tool named in the configuration.
pub fn run(options: &BuildOptions) -> Result<BuildReport, BuildError> {
  let config = DocsConfig::load(&options.doc_root)?;
  let runner = Box::new(ExternalTool::new(config.api.tool.clone()));
  run_with(options, config, runner)
}

/// Run a build with an explicit configuration and tool runner.
pub fn run_with(
  options: &BuildOptions,
  config: DocsConfig,
  runner: Box<dyn ToolRunner>,
) -> Result<BuildReport, BuildError> {
  let mut ctx = BuildContext::new(&options.doc_root, config);
  ctx.resolve_parameters()?;

  let mut session = Session::new(ctx);
  hooks::setup(&mut session, runner);
  session.context_mut().finish_registration(&options.overrides)?;

  session.fire_build_init()?;

  let manifest = session.generate()?;
  let manifest_path = manifest.write_to(&options.out_dir())?;

  let mut ctx = session.into_context();
  ctx.advance(BuildState::Done)?;

  info!(
    mode = %manifest.build_mode,
    invocations = manifest.tool_invocations.len(),
    "build complete"
  );

  Ok(BuildReport {
    manifest,
    manifest_path,
    invocations: ctx.into_invocations(),
  })
}

/// Resolve the parameters for `doc_root` without running a build.
pub fn resolve_only(doc_root: &Path) -> Result<(BuildParameters, DocsConfig), BuildError> {
  let config = DocsConfig::load(doc_root)?;
  let mut ctx = BuildContext::new(doc_root, config);
  let parameters = ctx.resolve_parameters()?.clone();
  Ok((parameters, ctx.config().clone()))
}
