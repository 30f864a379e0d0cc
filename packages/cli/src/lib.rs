//! `devkit` command line front end for the JWT engine

pub mod commands;
pub mod config;
pub mod error;
mod run;

pub use commands::{Cli, Commands};
pub use config::{DevkitConfig, default_config_path};
pub use error::{CliError, CliResult};
pub use run::{EXIT_ERROR, EXIT_INVALID, EXIT_OK, Outcome, execute, render, run};
