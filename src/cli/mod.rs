//! CLI module
//!
//! Provides command-line interface for:
//! - serve: load config, install logging, run the HTTP server
//! - check-config: validate a config file

mod args;
mod commands;
mod errors;

pub use args::{Cli, Command};
pub use commands::{check_config, run, run_command, serve};
pub use errors::{CliError, CliErrorCode, CliResult};
