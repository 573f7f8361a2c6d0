//! Loading of the optional `docbuild.toml` file.
//!
//! Every table and key has a default, so a documentation root without a
//! configuration file (or with a partial one) behaves like the stock setup:
//! hosted builds are detected through `READTHEDOCS=True` and API extraction
//! runs `doxygen` in `../doxygen`.

use std::collections::BTreeMap;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::consts::{
  CONFIG_FILENAME, DEFAULT_API_TOOL, DEFAULT_API_WORKING_DIR, DEFAULT_API_XML_DIR, DEFAULT_DEVELOPMENT_SEARCH_PATH,
  DEFAULT_HOSTED_SEARCH_PATH, HOSTED_ENV_VALUE, HOSTED_ENV_VAR,
};

#[derive(Debug, Error)]
pub enum ConfigError {
  #[error("failed to read {path}: {source}")]
  Read {
    path: PathBuf,
    #[source]
    source: io::Error,
  },

  #[error("failed to parse {path}: {source}")]
  Parse {
    path: PathBuf,
    #[source]
    source: toml::de::Error,
  },
}

/// Top-level contents of `docbuild.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DocsConfig {
  pub project: ProjectConfig,
  pub environment: EnvironmentConfig,
  pub search_path: SearchPathLayout,
  pub api: ApiToolConfig,
  /// Overrides for registered configuration values, keyed by value name.
  pub values: BTreeMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectConfig {
  pub name: String,
  pub author: String,
  pub copyright: String,
}

impl Default for ProjectConfig {
  fn default() -> Self {
    Self {
      name: "docs".to_string(),
      author: String::new(),
      copyright: String::new(),
    }
  }
}

/// Which variable signals a hosted build, and the exact value it must hold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnvironmentConfig {
  pub variable: String,
  pub hosted_value: String,
}

impl Default for EnvironmentConfig {
  fn default() -> Self {
    Self {
      variable: HOSTED_ENV_VAR.to_string(),
      hosted_value: HOSTED_ENV_VALUE.to_string(),
    }
  }
}

/// Search-path entries appended for each build mode, relative to the documentation root.
///
/// The two layouts differ because hosted checkouts and local trees place the
/// documented sources at different depths.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchPathLayout {
  pub hosted: PathBuf,
  pub development: PathBuf,
}

impl Default for SearchPathLayout {
  fn default() -> Self {
    Self {
      hosted: PathBuf::from(DEFAULT_HOSTED_SEARCH_PATH),
      development: PathBuf::from(DEFAULT_DEVELOPMENT_SEARCH_PATH),
    }
  }
}

/// External API-extraction tool, the directory it runs in and where its XML lands.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiToolConfig {
  pub tool: String,
  /// Relative paths are resolved against the documentation root.
  pub working_dir: PathBuf,
  /// Name the renderer refers to the API reference by. Falls back to `project.name`.
  pub project: Option<String>,
  /// Directory the tool writes its XML into, relative to the documentation root.
  pub xml_dir: PathBuf,
}

impl Default for ApiToolConfig {
  fn default() -> Self {
    Self {
      tool: DEFAULT_API_TOOL.to_string(),
      working_dir: PathBuf::from(DEFAULT_API_WORKING_DIR),
      project: None,
      xml_dir: PathBuf::from(DEFAULT_API_XML_DIR),
    }
  }
}

impl DocsConfig {
  /// Project name of the API reference, defaulting to the documentation project.
  pub fn api_project(&self) -> &str {
    self.api.project.as_deref().unwrap_or(&self.project.name)
  }

  /// Parse configuration from a TOML string.
  pub fn from_toml(content: &str, path: &Path) -> Result<Self, ConfigError> {
    toml::from_str(content).map_err(|source| ConfigError::Parse {
      path: path.to_path_buf(),
      source,
    })
  }

  /// Load `docbuild.toml` from `doc_root`, falling back to defaults when the file is absent.
  pub fn load(doc_root: &Path) -> Result<Self, ConfigError> {
    let path = doc_root.join(CONFIG_FILENAME);

    let content = match std::fs::read_to_string(&path) {
      Ok(content) => content,
      Err(e) if e.kind() == io::ErrorKind::NotFound => {
        debug!(path = %path.display(), "no config file, using defaults");
        return Ok(Self::default());
      }
      Err(source) => return Err(ConfigError::Read { path, source }),
    };

    debug!(path = %path.display(), "loading config");
    Self::from_toml(&content, &path)
  }
}
