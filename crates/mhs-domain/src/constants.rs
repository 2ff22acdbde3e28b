//! Domain layer constants
//!
//! Contains constants that are part of the hosting model. Infrastructure
//! defaults (config file names, log settings) remain in the infrastructure
//! crate's `constants` module.

// ============================================================================
// ENVIRONMENT CONSTANTS
// ============================================================================

/// Environment name used during development
pub const DEVELOPMENT_ENVIRONMENT: &str = "Development";

/// Environment name used for staging deployments
pub const STAGING_ENVIRONMENT: &str = "Staging";

/// Environment name used in production (the default)
pub const PRODUCTION_ENVIRONMENT: &str = "Production";

// ============================================================================
// SCOPE CONSTANTS
// ============================================================================

/// Scope label used in errors raised by the host registry
pub const HOST_SCOPE_NAME: &str = "host";
