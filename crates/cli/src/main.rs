mod cmd;
mod output;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use docbuild_lib::context::ConfigOverride;

use crate::output::OutputFormat;

/// docbuild - documentation build orchestration
#[derive(Parser)]
#[command(name = "docbuild")]
#[command(author, version, about, long_about = None)]
struct Cli {
  /// Enable debug logging
  #[arg(short, long, global = true)]
  verbose: bool,

  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// Run a documentation build
  Build {
    /// Documentation root (the directory holding docbuild.toml)
    #[arg(default_value = ".")]
    doc_root: PathBuf,

    /// Output directory for the build manifest (default: <DOC_ROOT>/_build)
    #[arg(short, long)]
    out: Option<PathBuf>,

    /// Override a registered config value
    #[arg(short = 'D', value_name = "NAME=VALUE")]
    define: Vec<ConfigOverride>,

    #[arg(long, value_enum, default_value_t)]
    format: OutputFormat,
  },

  /// Show the parameters a build would use
  Params {
    #[arg(default_value = ".")]
    doc_root: PathBuf,

    #[arg(long, value_enum, default_value_t)]
    format: OutputFormat,
  },

  /// Show the detected build environment
  Info {
    #[arg(default_value = ".")]
    doc_root: PathBuf,
  },
}

fn main() -> Result<()> {
  let cli = Cli::parse();

  let filter = if cli.verbose {
    EnvFilter::new("debug")
  } else {
    EnvFilter::from_default_env()
  };
  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(std::io::stderr)
    .without_time()
    .init();

  match cli.command {
    Commands::Build {
      doc_root,
      out,
      define,
      format,
    } => cmd::cmd_build(doc_root, out, define, format),
    Commands::Params { doc_root, format } => cmd::cmd_params(&doc_root, format),
    Commands::Info { doc_root } => cmd::cmd_info(&doc_root),
  }
}
