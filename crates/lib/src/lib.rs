//! docbuild-lib: environment-aware documentation build orchestration.
//!
//! This crate decides how a documentation build runs:
//! - `environment`: hosted vs development detection from `READTHEDOCS`
//! - `params`: search path, version labels and build mode for each environment
//! - `invoke`: best-effort runs of the external API-extraction tool
//! - `hooks`: registrations made on the rendering engine
//! - `build`: the end-to-end pipeline producing the build manifest

pub mod build;
pub mod config;
pub mod consts;
pub mod context;
pub mod engine;
pub mod environment;
pub mod hooks;
pub mod invoke;
pub mod manifest;
pub mod params;
pub mod util;
