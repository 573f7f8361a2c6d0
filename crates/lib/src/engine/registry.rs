//! Registries for custom configuration values and documentation-value kinds.

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::debug;

use super::{ConfigValueSpec, DocValueKindSpec};
use crate::context::BuildError;

#[derive(Debug, Clone, PartialEq, Eq)]
struct ConfigValueEntry {
  spec: ConfigValueSpec,
  value: String,
  overridden: bool,
}

/// Named configuration slots registered with the engine, each holding its current value.
#[derive(Debug, Clone, Default)]
pub struct ConfigValues {
  entries: BTreeMap<String, ConfigValueEntry>,
}

impl ConfigValues {
  /// Register a slot initialised to its default. Returns `false` if the name is already taken.
  pub fn register(&mut self, spec: ConfigValueSpec) -> bool {
    if self.entries.contains_key(&spec.name) {
      debug!(name = %spec.name, "config value already registered");
      return false;
    }

    let value = spec.default.clone();
    self.entries.insert(
      spec.name.clone(),
      ConfigValueEntry {
        spec,
        value,
        overridden: false,
      },
    );
    true
  }

  pub fn contains(&self, name: &str) -> bool {
    self.entries.contains_key(name)
  }

  pub fn get(&self, name: &str) -> Option<&str> {
    self.entries.get(name).map(|e| e.value.as_str())
  }

  pub fn default_of(&self, name: &str) -> Option<&str> {
    self.entries.get(name).map(|e| e.spec.default.as_str())
  }

  /// Rebind a slot from the build itself. Bypasses the user-overridable flag
  /// but never replaces a value the user has already overridden.
  pub(crate) fn assign(&mut self, name: &str, value: &str) -> Result<(), BuildError> {
    let entry = self
      .entries
      .get_mut(name)
      .ok_or_else(|| BuildError::UnknownConfigValue(name.to_string()))?;

    if !entry.overridden {
      entry.value = value.to_string();
    }
    Ok(())
  }

  /// Rebind a slot on behalf of the user.
  pub fn override_value(&mut self, name: &str, value: &str) -> Result<(), BuildError> {
    let entry = self
      .entries
      .get_mut(name)
      .ok_or_else(|| BuildError::UnknownConfigValue(name.to_string()))?;

    if !entry.spec.user_overridable {
      return Err(BuildError::NotOverridable(name.to_string()));
    }

    debug!(name, value, "config value overridden");
    entry.value = value.to_string();
    entry.overridden = true;
    Ok(())
  }

  /// Current values keyed by name.
  pub fn snapshot(&self) -> BTreeMap<String, String> {
    self
      .entries
      .iter()
      .map(|(name, entry)| (name.clone(), entry.value.clone()))
      .collect()
  }

  pub fn len(&self) -> usize {
    self.entries.len()
  }

  pub fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }
}

/// Custom documentation-value kinds content authors can mark up.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct DocValueKinds {
  kinds: BTreeMap<String, DocValueKindSpec>,
}

impl DocValueKinds {
  pub fn register(&mut self, spec: DocValueKindSpec) -> bool {
    if self.kinds.contains_key(&spec.name) {
      debug!(name = %spec.name, "doc value kind already registered");
      return false;
    }
    self.kinds.insert(spec.name.clone(), spec);
    true
  }

  pub fn get(&self, name: &str) -> Option<&DocValueKindSpec> {
    self.kinds.get(name)
  }

  pub fn iter(&self) -> impl Iterator<Item = &DocValueKindSpec> {
    self.kinds.values()
  }

  pub fn len(&self) -> usize {
    self.kinds.len()
  }

  pub fn is_empty(&self) -> bool {
    self.kinds.is_empty()
  }
}
