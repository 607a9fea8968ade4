//! CLI argument definitions using clap
//!
//! Commands:
//! - request-tracker serve [--config <path>] [--port <n>]
//! - request-tracker check-config --config <path>

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Request tracker - create, list and batch-edit item requests over HTTP
#[derive(Parser, Debug)]
#[command(name = "request-tracker")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Start the HTTP server
    Serve {
        /// Path to configuration file (defaults apply when omitted)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Listen port; overrides the config file and PORT
        #[arg(long)]
        port: Option<u16>,
    },

    /// Validate a configuration file and print the effective settings
    CheckConfig {
        /// Path to configuration file
        #[arg(long)]
        config: PathBuf,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
