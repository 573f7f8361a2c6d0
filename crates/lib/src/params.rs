//! Build parameter resolution.
//!
//! The parameters are a pure function of the [`BuildEnvironment`] and the
//! configured [`SearchPathLayout`]. Appending the search path to a build is
//! done by [`crate::context::BuildContext::resolve_parameters`], which guards
//! against resolving twice.

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::config::SearchPathLayout;
use crate::consts::LATEST;
use crate::environment::BuildEnvironment;

/// Symbolic build mode exposed to the rendering engine as `documentation_build`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BuildMode {
  Hosted,
  Development,
}

impl BuildMode {
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Hosted => "hosted",
      Self::Development => "development",
    }
  }
}

impl fmt::Display for BuildMode {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.as_str())
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BuildParameters {
  /// Relative to the documentation root.
  pub extra_search_path: PathBuf,
  pub version: String,
  pub release: String,
  pub build_mode: BuildMode,
}

/// Derive the parameters for a build.
pub fn resolve(environment: BuildEnvironment, layout: &SearchPathLayout) -> BuildParameters {
  let (extra_search_path, build_mode) = if environment.is_hosted_build {
    (layout.hosted.clone(), BuildMode::Hosted)
  } else {
    (layout.development.clone(), BuildMode::Development)
  };

  BuildParameters {
    extra_search_path,
    version: LATEST.to_string(),
    release: LATEST.to_string(),
    build_mode,
  }
}
