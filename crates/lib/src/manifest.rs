//! Build manifest handed to the external renderer.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::info;

use crate::config::ProjectConfig;
use crate::consts::MANIFEST_FILENAME;
use crate::context::{BuildContext, BuildError};
use crate::engine::DocValueKindSpec;
use crate::invoke::InvocationSummary;
use crate::params::BuildMode;

/// Where the renderer finds the extracted API reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiReference {
  pub project: String,
  pub xml_dir: PathBuf,
}

/// Everything the renderer needs to know about a finished build.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BuildManifest {
  pub project: ProjectConfig,
  pub api_reference: ApiReference,
  pub hosted: bool,
  pub version: String,
  pub release: String,
  pub build_mode: BuildMode,
  pub search_path: Vec<PathBuf>,
  pub config_values: BTreeMap<String, String>,
  pub doc_value_kinds: Vec<DocValueKindSpec>,
  pub tool_invocations: Vec<InvocationSummary>,
}

impl BuildManifest {
  pub fn from_context(ctx: &BuildContext) -> Result<Self, BuildError> {
    let parameters = ctx.parameters().ok_or(BuildError::ParametersUnresolved)?;

    Ok(Self {
      project: ctx.config().project.clone(),
      api_reference: ApiReference {
        project: ctx.config().api_project().to_string(),
        xml_dir: ctx.api_xml_dir(),
      },
      hosted: ctx.environment().is_some_and(|e| e.is_hosted_build),
      version: parameters.version.clone(),
      release: parameters.release.clone(),
      build_mode: parameters.build_mode,
      search_path: ctx.search_path.entries().to_vec(),
      config_values: ctx.config_values.snapshot(),
      doc_value_kinds: ctx.doc_value_kinds.iter().cloned().collect(),
      tool_invocations: ctx.invocations().iter().map(|i| i.summary()).collect(),
    })
  }

  /// Write the manifest as pretty JSON into `out_dir`, creating it if needed.
  pub fn write_to(&self, out_dir: &Path) -> Result<PathBuf, BuildError> {
    let path = out_dir.join(MANIFEST_FILENAME);

    std::fs::create_dir_all(out_dir).map_err(|source| BuildError::WriteManifest {
      path: path.clone(),
      source,
    })?;

    let json = serde_json::to_string_pretty(self)?;
    std::fs::write(&path, json).map_err(|source| BuildError::WriteManifest {
      path: path.clone(),
      source,
    })?;

    info!(path = %path.display(), "manifest written");
    Ok(path)
  }
}
