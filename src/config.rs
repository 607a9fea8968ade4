//! # Application Configuration
//!
//! Loaded from an optional JSON file, then overridden by the `PORT`
//! environment variable. Missing keys fall back to defaults.
//!
//! ```json
//! {
//!   "server": { "host": "0.0.0.0", "port": 3000, "cors_origins": [] },
//!   "page_size": 10,
//!   "log_filter": "info"
//! }
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::http_server::HttpServerConfig;
use crate::service::DEFAULT_PAGE_SIZE;

/// Environment variable overriding the listen port
pub const PORT_ENV: &str = "PORT";

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config '{path}': {reason}")]
    Read { path: String, reason: String },

    #[error("Invalid config JSON: {0}")]
    Parse(String),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Top-level application configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: HttpServerConfig,

    /// Records per listing page (default: 10)
    #[serde(default = "default_page_size")]
    pub page_size: usize,

    /// `tracing` filter directive used when `RUST_LOG` is unset
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
}

fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}

fn default_log_filter() -> String {
    "info".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: HttpServerConfig::default(),
            page_size: default_page_size(),
            log_filter: default_log_filter(),
        }
    }
}

impl AppConfig {
    /// Load configuration from file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;

        Self::from_json(&content)
    }

    /// Parse and validate configuration JSON
    pub fn from_json(content: &str) -> Result<Self, ConfigError> {
        let config: AppConfig =
            serde_json::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load from `path` if given, else defaults; then apply `PORT`
    pub fn resolve(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };
        config.apply_port_override(std::env::var(PORT_ENV).ok().as_deref())?;
        Ok(config)
    }

    /// Apply a `PORT`-style override value
    pub fn apply_port_override(&mut self, value: Option<&str>) -> Result<(), ConfigError> {
        if let Some(raw) = value.map(str::trim).filter(|v| !v.is_empty()) {
            self.server.port = raw.parse().map_err(|_| {
                ConfigError::Invalid(format!("{} must be a port number, got '{}'", PORT_ENV, raw))
            })?;
        }
        Ok(())
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.page_size == 0 {
            return Err(ConfigError::Invalid("page_size must be > 0".to_string()));
        }
        if self.server.host.trim().is_empty() {
            return Err(ConfigError::Invalid("server.host must not be empty".to_string()));
        }
        Ok(())
    }
}
