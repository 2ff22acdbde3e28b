//! Configuration management
//!
//! Layered configuration (defaults, TOML file, environment) and the
//! configuration roots handed to registration callbacks and server scopes.

pub mod loader;
pub mod root;
pub mod types;

pub use loader::ConfigLoader;
pub use root::{FigmentConfiguration, JsonConfiguration};
pub use types::{AppConfig, HostConfig, LoggingConfig};
