/// Program name shown by the CLI.
pub const APP_NAME: &str = "docbuild";

/// Name of the optional configuration file looked up in the documentation root.
pub const CONFIG_FILENAME: &str = "docbuild.toml";

/// Name of the manifest written to the output directory after a build.
pub const MANIFEST_FILENAME: &str = "docbuild.json";

/// Environment variable set by the hosted documentation service.
pub const HOSTED_ENV_VAR: &str = "READTHEDOCS";

/// Exact value of [`HOSTED_ENV_VAR`] that marks a hosted build.
pub const HOSTED_ENV_VALUE: &str = "True";

/// Version and release label used for every build.
pub const LATEST: &str = "latest";

pub const DEFAULT_API_TOOL: &str = "doxygen";
pub const DEFAULT_API_WORKING_DIR: &str = "../doxygen";
pub const DEFAULT_API_XML_DIR: &str = "../doxygen/xml";

pub const DEFAULT_HOSTED_SEARCH_PATH: &str = "..";
pub const DEFAULT_DEVELOPMENT_SEARCH_PATH: &str = "../..";

/// Lifecycle event fired once the builder is initialized, before any content is read.
pub const BUILD_INIT_EVENT: &str = "builder-inited";

pub const DOCUMENTATION_BUILD: &str = "documentation_build";

pub const CONFVAL: &str = "confval";
pub const CONFVAL_LABEL: &str = "configuration value";
pub const CONFVAL_INDEX_TEMPLATE: &str = "pair: %s; configuration value";
