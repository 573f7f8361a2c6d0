//! Build-context detection.

use std::fmt;

use serde::Serialize;

use crate::config::EnvironmentConfig;

/// Whether the current build runs on the hosted documentation service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BuildEnvironment {
  pub is_hosted_build: bool,
}

impl BuildEnvironment {
  /// Classify the build using the default `READTHEDOCS=True` signal.
  pub fn detect() -> Self {
    Self::detect_with(&EnvironmentConfig::default())
  }

  /// Classify the build from the variable and value named in `config`.
  ///
  /// An unset or non-unicode variable is a development build, not an error.
  pub fn detect_with(config: &EnvironmentConfig) -> Self {
    let signal = std::env::var(&config.variable).ok();
    Self::from_signal(signal.as_deref(), &config.hosted_value)
  }

  /// Pure classification: hosted iff `signal` equals `hosted_value` exactly.
  pub fn from_signal(signal: Option<&str>, hosted_value: &str) -> Self {
    Self {
      is_hosted_build: signal == Some(hosted_value),
    }
  }
}

impl fmt::Display for BuildEnvironment {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    if self.is_hosted_build {
      write!(f, "hosted")
    } else {
      write!(f, "development")
    }
  }
}
