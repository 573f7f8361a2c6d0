mod build;
mod info;
mod params;

pub use build::cmd_build;
pub use info::cmd_info;
pub use params::cmd_params;
