//! Infrastructure layer constants
//!
//! Contains constants that are part of the infrastructure implementation.
//! Domain-specific constants are defined in `mhs_domain::constants`.

// ============================================================================
// CONFIGURATION CONSTANTS
// ============================================================================

/// Default configuration file name
pub const DEFAULT_CONFIG_FILENAME: &str = "mhs.toml";

/// Default configuration directory name
pub const DEFAULT_CONFIG_DIR: &str = "mhs";

/// Environment variable prefix for configuration (`MHS__HOST__ENVIRONMENT`)
pub const CONFIG_ENV_PREFIX: &str = "MHS__";

/// Separator between nested keys in environment variable names
pub const CONFIG_ENV_SEPARATOR: &str = "__";

// ============================================================================
// HOST CONSTANTS
// ============================================================================

/// Application name used when none is configured
pub const DEFAULT_APPLICATION_NAME: &str = "mhs";

/// Time each hosted service gets to stop, in seconds
pub const DEFAULT_SHUTDOWN_TIMEOUT_SECS: u64 = 30;

// ============================================================================
// LOGGING CONSTANTS
// ============================================================================

/// Default log level
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Environment variable overriding the configured log filter
pub const LOG_ENV_VAR: &str = "MHS_LOG";

/// File stem for rolling log files when the path has none
pub const DEFAULT_LOG_FILE_STEM: &str = "mhs";
