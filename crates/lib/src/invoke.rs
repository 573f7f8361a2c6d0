//! External API-extraction tool invocation.
//!
//! The tool is launched directly (no shell) with its working directory set
//! through the process API. Every failure is reported through `tracing` and
//! recorded on the returned [`ToolInvocation`]; nothing here returns an error,
//! so a broken or missing tool never stops the rest of the documentation build.

use std::io;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus, Stdio};
use std::time::{Duration, Instant};

use serde::Serialize;
use thiserror::Error;
use tracing::{debug, error, info, warn};

/// Diagnostics reported by an invocation attempt.
#[derive(Debug, Error)]
pub enum InvocationError {
  /// The tool ran but was killed by a signal.
  #[error("{tool} terminated by signal {signal}")]
  AbnormalTermination { tool: String, signal: i32 },

  /// The tool could not be started at all.
  #[error("{tool} execution failed: {source}")]
  LaunchFailed {
    tool: String,
    #[source]
    source: io::Error,
  },
}

/// Classified result of a [`ToolInvocation`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum ToolOutcome {
  Succeeded,
  Failed { code: i32 },
  Terminated { signal: i32 },
  LaunchFailed,
}

/// One attempt at running the external tool. Never reused.
#[derive(Debug)]
pub struct ToolInvocation {
  pub program: String,
  pub working_directory: PathBuf,
  /// Exit code, or the negated signal number when the process was killed.
  pub exit_status: Option<i32>,
  pub invocation_error: Option<InvocationError>,
  pub elapsed: Duration,
}

impl ToolInvocation {
  pub fn outcome(&self) -> ToolOutcome {
    match self.exit_status {
      Some(0) => ToolOutcome::Succeeded,
      Some(code) if code < 0 => ToolOutcome::Terminated { signal: -code },
      Some(code) => ToolOutcome::Failed { code },
      None => ToolOutcome::LaunchFailed,
    }
  }

  pub fn succeeded(&self) -> bool {
    self.outcome() == ToolOutcome::Succeeded
  }

  /// Serializable copy of this attempt for the build manifest.
  pub fn summary(&self) -> InvocationSummary {
    InvocationSummary {
      program: self.program.clone(),
      working_directory: self.working_directory.clone(),
      exit_status: self.exit_status,
      outcome: self.outcome(),
      error: self.invocation_error.as_ref().map(ToString::to_string),
      elapsed_ms: self.elapsed.as_millis() as u64,
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InvocationSummary {
  pub program: String,
  pub working_directory: PathBuf,
  pub exit_status: Option<i32>,
  pub outcome: ToolOutcome,
  pub error: Option<String>,
  pub elapsed_ms: u64,
}

/// Runs the tool in a given directory.
///
/// The hook registry holds a `Box<dyn ToolRunner>` so builds can swap the
/// process-spawning [`ExternalTool`] for another runner.
pub trait ToolRunner {
  fn program(&self) -> &str;

  fn invoke(&self, working_directory: &Path) -> ToolInvocation;
}

/// A fixed program launched with no arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExternalTool {
  program: String,
}

impl ExternalTool {
  pub fn new(program: impl Into<String>) -> Self {
    Self {
      program: program.into(),
    }
  }
}

impl ToolRunner for ExternalTool {
  fn program(&self) -> &str {
    &self.program
  }

  /// Run the tool and block until it exits or fails to start.
  fn invoke(&self, working_directory: &Path) -> ToolInvocation {
    info!(tool = %self.program, working_dir = %working_directory.display(), "running API extraction");

    let started = Instant::now();
    let result = Command::new(&self.program)
      .current_dir(working_directory)
      .stdin(Stdio::null())
      .status();
    let elapsed = started.elapsed();

    let mut invocation = ToolInvocation {
      program: self.program.clone(),
      working_directory: working_directory.to_path_buf(),
      exit_status: None,
      invocation_error: None,
      elapsed,
    };

    match result {
      Ok(status) => {
        let code = status_code(status);
        invocation.exit_status = code;

        match code {
          Some(0) => debug!(tool = %self.program, ?elapsed, "API extraction finished"),
          Some(code) if code < 0 => {
            let err = InvocationError::AbnormalTermination {
              tool: self.program.clone(),
              signal: -code,
            };
            error!(signal = -code, "{}", err);
            invocation.invocation_error = Some(err);
          }
          Some(code) => warn!(tool = %self.program, code, "{} exited with status {}", self.program, code),
          None => warn!(tool = %self.program, "{} exited without a status", self.program),
        }
      }
      Err(source) => {
        let err = InvocationError::LaunchFailed {
          tool: self.program.clone(),
          source,
        };
        error!(working_dir = %working_directory.display(), "{}", err);
        invocation.invocation_error = Some(err);
      }
    }

    invocation
  }
}

/// Exit code, with signal termination folded in as a negative number.
#[cfg(unix)]
fn status_code(status: ExitStatus) -> Option<i32> {
  use std::os::unix::process::ExitStatusExt;

  status.code().or_else(|| status.signal().map(|signal| -signal))
}

#[cfg(not(unix))]
fn status_code(status: ExitStatus) -> Option<i32> {
  status.code()
}
