//! # Infrastructure Layer
//!
//! Registries, resolvers and the hosting machinery that runs several
//! independently configured servers in one process.
//!
//! ## Module Categories
//!
//! ### Dependency Injection
//! | Module | Description |
//! |--------|-------------|
//! | [`di`] | Service registries, resolvers, isolated server scopes and bridges |
//!
//! ### Hosting
//! | Module | Description |
//! |--------|-------------|
//! | [`hosting`] | Host builder, host and hosted-service lifecycle |
//!
//! ### Configuration & Observability
//! | Module | Description |
//! |--------|-------------|
//! | [`config`] | Layered TOML/environment configuration via figment |
//! | [`constants`] | Centralized configuration constants |
//! | [`logging`] | Structured logging with tracing |

pub mod config;
pub mod constants;
pub mod di;
pub mod error_ext;
pub mod hosting;
pub mod logging;

// Re-export commonly used types
pub use error_ext::ErrorContext;
