//! Interface to the documentation rendering engine.
//!
//! The rendering engine itself is external. What the build needs from it is
//! captured by [`RenderingEngine`]: a build-init lifecycle event plus two
//! registries. [`Session`] is the in-process adapter that owns the
//! [`BuildContext`] for one build and hands it to every hook.

pub mod registry;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::consts::BUILD_INIT_EVENT;
use crate::context::{BuildContext, BuildError, BuildState};
use crate::manifest::BuildManifest;

/// A named, rebindable configuration slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigValueSpec {
  pub name: String,
  pub default: String,
  pub user_overridable: bool,
}

/// A documentation-entity type content authors can mark up and have indexed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocValueKindSpec {
  pub name: String,
  pub display_label: String,
  /// Index entry pattern; `%s` is replaced by the documented target.
  pub index_template: String,
}

impl DocValueKindSpec {
  pub fn new(name: &str, display_label: &str, index_template: &str) -> Self {
    Self {
      name: name.to_string(),
      display_label: display_label.to_string(),
      index_template: index_template.to_string(),
    }
  }

  /// Index entry for `target`, e.g. `pair: documentation_build; configuration value`.
  pub fn index_entry(&self, target: &str) -> String {
    self.index_template.replace("%s", target)
  }
}

/// Callback fired on [`BUILD_INIT_EVENT`].
pub type BuildInitHook = Box<dyn FnMut(&mut BuildContext) -> Result<(), BuildError>>;

/// Registration surface of a rendering engine.
///
/// Each method returns `true` when the registration is new. Registering the
/// same name twice keeps the first registration.
pub trait RenderingEngine {
  fn on_build_init(&mut self, name: &str, hook: BuildInitHook) -> bool;

  fn register_config_value(&mut self, spec: ConfigValueSpec) -> bool;

  fn register_doc_value_kind(&mut self, spec: DocValueKindSpec) -> bool;
}

/// One build's worth of engine state.
pub struct Session {
  ctx: BuildContext,
  hooks: Vec<(String, BuildInitHook)>,
  fired: bool,
}

impl Session {
  pub fn new(ctx: BuildContext) -> Self {
    Self {
      ctx,
      hooks: Vec::new(),
      fired: false,
    }
  }

  pub fn context(&self) -> &BuildContext {
    &self.ctx
  }

  pub fn context_mut(&mut self) -> &mut BuildContext {
    &mut self.ctx
  }

  pub fn into_context(self) -> BuildContext {
    self.ctx
  }

  pub fn hook_names(&self) -> impl Iterator<Item = &str> {
    self.hooks.iter().map(|(name, _)| name.as_str())
  }

  /// Fire the build-init event.
  ///
  /// Hooks run in registration order. The event fires at most once; later
  /// calls are no-ops. If no hook attempted a tool invocation the build is
  /// marked as skipped.
  pub fn fire_build_init(&mut self) -> Result<(), BuildError> {
    if self.fired {
      debug!(event = BUILD_INIT_EVENT, "event already fired");
      return Ok(());
    }
    if self.ctx.state() != BuildState::HooksRegistered {
      return Err(BuildError::InvalidTransition {
        from: self.ctx.state(),
        to: BuildState::ToolInvocationAttempted,
      });
    }
    self.fired = true;

    info!(event = BUILD_INIT_EVENT, hooks = self.hooks.len(), "firing event");
    for (name, hook) in &mut self.hooks {
      debug!(hook = %name, "running hook");
      hook(&mut self.ctx)?;
    }

    if self.ctx.state() == BuildState::HooksRegistered {
      self.ctx.advance(BuildState::ToolInvocationSkipped)?;
    }
    Ok(())
  }

  /// Produce the manifest the external renderer consumes.
  pub fn generate(&mut self) -> Result<BuildManifest, BuildError> {
    self.ctx.advance(BuildState::ContentGenerated)?;
    BuildManifest::from_context(&self.ctx)
  }
}

impl RenderingEngine for Session {
  fn on_build_init(&mut self, name: &str, hook: BuildInitHook) -> bool {
    if self.hooks.iter().any(|(existing, _)| existing == name) {
      debug!(hook = name, event = BUILD_INIT_EVENT, "hook already connected");
      return false;
    }
    self.hooks.push((name.to_string(), hook));
    true
  }

  fn register_config_value(&mut self, spec: ConfigValueSpec) -> bool {
    self.ctx.config_values.register(spec)
  }

  fn register_doc_value_kind(&mut self, spec: DocValueKindSpec) -> bool {
    self.ctx.doc_value_kinds.register(spec)
  }
}
