//! Per-build state.
//!
//! A [`BuildContext`] is created at the start of every build and threaded
//! through configuration loading, hook callbacks and manifest generation.
//! Nothing is kept between builds.

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, info};

use crate::config::{ConfigError, DocsConfig};
use crate::consts::DOCUMENTATION_BUILD;
use crate::engine::registry::{ConfigValues, DocValueKinds};
use crate::environment::BuildEnvironment;
use crate::invoke::ToolInvocation;
use crate::params::{self, BuildParameters};

/// Errors that abort a build.
///
/// Tool failures are not among them; those are logged and recorded on the
/// [`ToolInvocation`].
#[derive(Debug, Error)]
pub enum BuildError {
  #[error(transparent)]
  Config(#[from] ConfigError),

  #[error("invalid build state transition: {from} -> {to}")]
  InvalidTransition { from: BuildState, to: BuildState },

  #[error("unknown config value: {0}")]
  UnknownConfigValue(String),

  #[error("config value cannot be overridden: {0}")]
  NotOverridable(String),

  #[error("invalid override {0:?}, expected name=value")]
  InvalidOverride(String),

  #[error("build parameters have not been resolved")]
  ParametersUnresolved,

  #[error("failed to write manifest {path}: {source}")]
  WriteManifest {
    path: PathBuf,
    #[source]
    source: io::Error,
  },

  #[error("failed to serialize manifest: {0}")]
  Serialize(#[from] serde_json::Error),
}

/// Lifecycle of a single build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BuildState {
  Uninitialized,
  ParametersResolved,
  HooksRegistered,
  ToolInvocationAttempted,
  ToolInvocationSkipped,
  ContentGenerated,
  Done,
}

impl BuildState {
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Uninitialized => "uninitialized",
      Self::ParametersResolved => "parameters-resolved",
      Self::HooksRegistered => "hooks-registered",
      Self::ToolInvocationAttempted => "tool-invocation-attempted",
      Self::ToolInvocationSkipped => "tool-invocation-skipped",
      Self::ContentGenerated => "content-generated",
      Self::Done => "done",
    }
  }

  fn can_advance_to(self, next: BuildState) -> bool {
    use BuildState::*;

    matches!(
      (self, next),
      (Uninitialized, ParametersResolved)
        | (ParametersResolved, HooksRegistered)
        | (HooksRegistered, ToolInvocationAttempted)
        | (HooksRegistered, ToolInvocationSkipped)
        | (ToolInvocationAttempted, ContentGenerated)
        | (ToolInvocationSkipped, ContentGenerated)
        | (ContentGenerated, Done)
    )
  }
}

impl fmt::Display for BuildState {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.as_str())
  }
}

/// Append-only list of directories used to resolve modules and resources.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchPath {
  entries: Vec<PathBuf>,
}

impl SearchPath {
  /// Append `path` unless it is already present. Returns whether it was added.
  pub fn push(&mut self, path: PathBuf) -> bool {
    if self.entries.contains(&path) {
      return false;
    }
    self.entries.push(path);
    true
  }

  pub fn entries(&self) -> &[PathBuf] {
    &self.entries
  }

  pub fn len(&self) -> usize {
    self.entries.len()
  }

  pub fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }
}

pub struct BuildContext {
  doc_root: PathBuf,
  config: DocsConfig,
  state: BuildState,
  environment: Option<BuildEnvironment>,
  parameters: Option<BuildParameters>,
  pub search_path: SearchPath,
  pub config_values: ConfigValues,
  pub doc_value_kinds: DocValueKinds,
  invocations: Vec<ToolInvocation>,
}

impl BuildContext {
  pub fn new(doc_root: impl Into<PathBuf>, config: DocsConfig) -> Self {
    Self {
      doc_root: doc_root.into(),
      config,
      state: BuildState::Uninitialized,
      environment: None,
      parameters: None,
      search_path: SearchPath::default(),
      config_values: ConfigValues::default(),
      doc_value_kinds: DocValueKinds::default(),
      invocations: Vec::new(),
    }
  }

  pub fn doc_root(&self) -> &Path {
    &self.doc_root
  }

  pub fn config(&self) -> &DocsConfig {
    &self.config
  }

  pub fn state(&self) -> BuildState {
    self.state
  }

  /// Environment classification made when the parameters were resolved.
  pub fn environment(&self) -> Option<BuildEnvironment> {
    self.environment
  }

  pub fn parameters(&self) -> Option<&BuildParameters> {
    self.parameters.as_ref()
  }

  pub fn invocations(&self) -> &[ToolInvocation] {
    &self.invocations
  }

  pub fn into_invocations(self) -> Vec<ToolInvocation> {
    self.invocations
  }

  /// Directory the API-extraction tool runs in.
  pub fn api_working_dir(&self) -> PathBuf {
    self.doc_root.join(&self.config.api.working_dir)
  }

  pub fn api_xml_dir(&self) -> PathBuf {
    self.doc_root.join(&self.config.api.xml_dir)
  }

  pub fn advance(&mut self, next: BuildState) -> Result<(), BuildError> {
    if !self.state.can_advance_to(next) {
      return Err(BuildError::InvalidTransition {
        from: self.state,
        to: next,
      });
    }
    debug!(from = %self.state, to = %next, "build state");
    self.state = next;
    Ok(())
  }

  /// Detect the environment, resolve the parameters and extend the search path.
  ///
  /// Only the first call does any work; later calls return the parameters
  /// already resolved without touching the search path again.
  pub fn resolve_parameters(&mut self) -> Result<&BuildParameters, BuildError> {
    if self.parameters.is_none() {
      let environment = BuildEnvironment::detect_with(&self.config.environment);
      let parameters = params::resolve(environment, &self.config.search_path);

      let joined = self.doc_root.join(&parameters.extra_search_path);
      let extra = dunce::canonicalize(&joined).unwrap_or(joined);
      self.search_path.push(extra);

      info!(
        environment = %environment,
        version = %parameters.version,
        search_path = %parameters.extra_search_path.display(),
        "build parameters resolved"
      );

      self.advance(BuildState::ParametersResolved)?;
      self.environment = Some(environment);
      self.parameters = Some(parameters);
    } else {
      debug!("build parameters already resolved");
    }

    self.parameters.as_ref().ok_or(BuildError::ParametersUnresolved)
  }

  /// Close the registration phase.
  ///
  /// Binds `documentation_build` to the resolved build mode, then applies the
  /// `[values]` table from the config file followed by `overrides`.
  pub fn finish_registration(&mut self, overrides: &[ConfigOverride]) -> Result<(), BuildError> {
    self.advance(BuildState::HooksRegistered)?;

    let mode = self.parameters.as_ref().map(|p| p.build_mode);
    if let Some(mode) = mode {
      if self.config_values.contains(DOCUMENTATION_BUILD) {
        self.config_values.assign(DOCUMENTATION_BUILD, mode.as_str())?;
      }
    }

    for (name, value) in &self.config.values {
      self.config_values.override_value(name, value)?;
    }
    for o in overrides {
      self.config_values.override_value(&o.name, &o.value)?;
    }

    Ok(())
  }

  /// Record an attempt at running the API tool.
  pub fn record_invocation(&mut self, invocation: ToolInvocation) -> Result<(), BuildError> {
    if self.state == BuildState::HooksRegistered {
      self.advance(BuildState::ToolInvocationAttempted)?;
    }
    self.invocations.push(invocation);
    Ok(())
  }
}

/// A `name=value` rebinding of a registered configuration value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigOverride {
  pub name: String,
  pub value: String,
}

impl std::str::FromStr for ConfigOverride {
  type Err = BuildError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.split_once('=') {
      Some((name, value)) if !name.trim().is_empty() => Ok(Self {
        name: name.trim().to_string(),
        value: value.to_string(),
      }),
      _ => Err(BuildError::InvalidOverride(s.to_string())),
    }
  }
}
