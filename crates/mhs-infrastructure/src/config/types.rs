//! Configuration types

use crate::constants::{
    DEFAULT_APPLICATION_NAME, DEFAULT_LOG_LEVEL, DEFAULT_SHUTDOWN_TIMEOUT_SECS,
};
use mhs_domain::constants::PRODUCTION_ENVIRONMENT;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Main application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Host settings
    pub host: HostConfig,

    /// Logging settings
    pub logging: LoggingConfig,
}

/// Host configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HostConfig {
    /// Application name exposed through the host environment
    pub application_name: String,

    /// Environment name (Development, Staging, Production, ...)
    pub environment: String,

    /// Content root directory
    pub content_root: PathBuf,

    /// Time each hosted service gets to stop
    pub shutdown_timeout_secs: u64,

    /// Activate every singleton when a resolver is built
    pub validate_on_build: bool,
}

impl HostConfig {
    /// Shutdown timeout as a [`Duration`]
    pub fn shutdown_timeout(&self) -> Duration {
        Duration::from_secs(self.shutdown_timeout_secs)
    }
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            application_name: DEFAULT_APPLICATION_NAME.to_string(),
            environment: PRODUCTION_ENVIRONMENT.to_string(),
            content_root: PathBuf::from("."),
            shutdown_timeout_secs: DEFAULT_SHUTDOWN_TIMEOUT_SECS,
            validate_on_build: false,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    /// Enable JSON output format
    pub json_format: bool,

    /// Log to a daily rolling file in addition to stdout
    pub file_output: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: DEFAULT_LOG_LEVEL.to_string(),
            json_format: false,
            file_output: None,
        }
    }
}
