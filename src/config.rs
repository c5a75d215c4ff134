//! Environment configuration.
//!
//! Settings come from `API_*` and `LOGGER_*` environment variables, with
//! defaults suitable for local development. Malformed values are rejected
//! at startup rather than silently replaced.

use std::env;

use thiserror::Error;

use crate::http_server::HttpServerConfig;
use crate::observability::Severity;

/// Configuration loading errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// An environment variable held an unparseable value
    #[error("invalid value for {key}: {value}")]
    Invalid { key: &'static str, value: String },
}

/// Logger configuration
#[derive(Debug, Clone)]
pub struct LoggerConfig {
    /// Minimum severity to emit
    pub level: Severity,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            level: Severity::Info,
        }
    }
}

/// Combined application configuration
#[derive(Debug, Clone, Default)]
pub struct Config {
    pub api: HttpServerConfig,
    pub logger: LoggerConfig,
}

impl Config {
    /// Load configuration from the environment.
    ///
    /// Recognized variables: `API_HOST`, `API_PORT`, `API_CORS_ORIGINS`
    /// (comma-separated), `LOGGER_LEVEL` (debug|info|warn|error).
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut api = HttpServerConfig::default();

        if let Ok(host) = env::var("API_HOST") {
            api.host = host;
        }
        if let Ok(port) = env::var("API_PORT") {
            api.port = port.parse().map_err(|_| ConfigError::Invalid {
                key: "API_PORT",
                value: port.clone(),
            })?;
        }
        if let Ok(origins) = env::var("API_CORS_ORIGINS") {
            api.cors_origins = origins
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect();
        }

        let mut logger = LoggerConfig::default();
        if let Ok(level) = env::var("LOGGER_LEVEL") {
            logger.level = level.parse().map_err(|_| ConfigError::Invalid {
                key: "LOGGER_LEVEL",
                value: level.clone(),
            })?;
        }

        Ok(Self { api, logger })
    }
}
