//! CLI command implementations

use std::io::{self, Write};
use std::path::Path;
use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use crate::config::AppConfig;
use crate::http_server::HttpServer;
use crate::service::RequestService;
use crate::store::InMemoryRequestStore;

use super::args::Command;
use super::errors::{CliError, CliResult};

/// Parse arguments and run the selected command
pub fn run() -> CliResult<()> {
    let cli = super::args::Cli::parse_args();
    run_command(cli.command)
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command) -> CliResult<()> {
    match cmd {
        Command::Serve { config, port } => serve(config.as_deref(), port),
        Command::CheckConfig { config } => check_config(&config),
    }
}

/// Resolve configuration, install logging, and serve until stopped
pub fn serve(config_path: Option<&Path>, port: Option<u16>) -> CliResult<()> {
    let mut config = AppConfig::resolve(config_path)?;
    if let Some(port) = port {
        config.server.port = port;
    }

    init_logging(&config.log_filter)?;

    let store = Arc::new(InMemoryRequestStore::new());
    let service = RequestService::with_page_size(store, config.page_size);
    let server = HttpServer::with_service(config.server.clone(), service);

    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::boot_failed(format!("Failed to create tokio runtime: {}", e)))?;

    rt.block_on(async {
        server
            .start()
            .await
            .map_err(|e| CliError::boot_failed(format!("HTTP server failed: {}", e)))
    })?;

    Ok(())
}

/// Load and validate a config file, then print the effective settings
pub fn check_config(config_path: &Path) -> CliResult<()> {
    let config = AppConfig::resolve(Some(config_path))?;
    let mut stdout = io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, &config)?;
    writeln!(stdout)?;
    Ok(())
}

/// Install the global `tracing` subscriber. `RUST_LOG` wins over `default_filter`.
fn init_logging(default_filter: &str) -> CliResult<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_filter))
        .map_err(|e| CliError::config_error(format!("Invalid log filter: {}", e)))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init()
        .map_err(|e| CliError::boot_failed(format!("Failed to install logger: {}", e)))
}
