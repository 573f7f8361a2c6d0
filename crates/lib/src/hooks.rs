//! Registrations made on the rendering engine at configuration-load time.
//!
//! [`setup`] registers the `confval` documentation-value kind, the
//! `documentation_build` configuration value and the hook that generates API
//! reference XML on hosted builds.

use tracing::{debug, warn};

use crate::consts::{CONFVAL, CONFVAL_INDEX_TEMPLATE, CONFVAL_LABEL, DOCUMENTATION_BUILD};
use crate::context::{BuildContext, BuildError, BuildState};
use crate::engine::{ConfigValueSpec, DocValueKindSpec, RenderingEngine};
use crate::environment::BuildEnvironment;
use crate::invoke::ToolRunner;
use crate::params::BuildMode;

/// Name the API-extraction hook is connected under.
pub const API_XML_HOOK: &str = "generate-api-xml";

pub fn confval_kind() -> DocValueKindSpec {
  DocValueKindSpec::new(CONFVAL, CONFVAL_LABEL, CONFVAL_INDEX_TEMPLATE)
}

pub fn documentation_build_value() -> ConfigValueSpec {
  ConfigValueSpec {
    name: DOCUMENTATION_BUILD.to_string(),
    default: BuildMode::Development.as_str().to_string(),
    user_overridable: true,
  }
}

/// Perform all registrations. Calling this twice on the same engine is harmless.
pub fn setup<E>(engine: &mut E, runner: Box<dyn ToolRunner>)
where
  E: RenderingEngine + ?Sized,
{
  engine.register_doc_value_kind(confval_kind());
  engine.register_config_value(documentation_build_value());

  let connected = engine.on_build_init(
    API_XML_HOOK,
    Box::new(move |ctx: &mut BuildContext| generate_api_xml(ctx, runner.as_ref())),
  );
  if !connected {
    debug!(hook = API_XML_HOOK, "hook was already connected");
  }
}

/// Run the API tool if this is a hosted build.
///
/// The environment is detected again here rather than read from the context,
/// matching what the engine would see when it fires the event on its own.
pub fn generate_api_xml(ctx: &mut BuildContext, runner: &dyn ToolRunner) -> Result<(), BuildError> {
  let environment = BuildEnvironment::detect_with(&ctx.config().environment);

  if let Some(resolved) = ctx.environment() {
    if resolved != environment {
      warn!(
        resolved = %resolved,
        detected = %environment,
        "environment changed since parameters were resolved"
      );
    }
  }

  if !environment.is_hosted_build {
    debug!(tool = runner.program(), "not a hosted build, skipping API extraction");
    if ctx.state() == BuildState::HooksRegistered {
      ctx.advance(BuildState::ToolInvocationSkipped)?;
    }
    return Ok(());
  }

  let working_dir = ctx.api_working_dir();
  let invocation = runner.invoke(&working_dir);
  ctx.record_invocation(invocation)
}
