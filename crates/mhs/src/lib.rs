//! # MHS
//!
//! Runs several independently configured servers in one process. Each
//! server gets an isolated service scope; a fixed set of host services
//! (environment, configuration, lifetimes, host handle) is shared into every
//! scope with its identity intact, and the host starts and stops each
//! server's hosted services through bridges into that scope.
//!
//! ## Example
//!
//! ```no_run
//! use mhs::prelude::*;
//! use std::sync::Arc;
//!
//! struct EchoServer;
//!
//! #[async_trait::async_trait]
//! impl HostedService for EchoServer {
//!     fn name(&self) -> &str {
//!         "echo"
//!     }
//!     async fn start(&self) -> mhs::Result<()> {
//!         Ok(())
//!     }
//!     async fn stop(&self) -> mhs::Result<()> {
//!         Ok(())
//!     }
//! }
//!
//! impl FromServices for EchoServer {
//!     fn from_services(_: &ServiceProvider) -> mhs::Result<Self> {
//!         Ok(EchoServer)
//!     }
//! }
//!
//! # async fn run() -> mhs::Result<()> {
//! let host = HostBuilder::from_loader(&ConfigLoader::new())?
//!     .add_server(ServerScopeBuilder::new::<EchoServer>("echo"))
//!     .build()?;
//! host.run().await
//! # }
//! ```
//!
//! ## Architecture
//!
//! - `domain` - Error taxonomy, service identity, host value objects and ports
//! - `infrastructure` - Registries, resolvers, server scopes, host, config, logging

/// Domain layer - service identity, host value objects and ports
///
/// Re-exports from the domain crate for convenience
pub mod domain {
    pub use mhs_domain::*;
}

/// Infrastructure layer - registries, scopes, host, config and logging
///
/// Re-exports from the infrastructure crate for convenience
pub mod infrastructure {
    pub use mhs_infrastructure::*;
}

/// Commonly used types for declaring servers and building a host
pub mod prelude {
    pub use mhs_domain::ports::{
        ApplicationLifetime, ConfigurationRoot, HostLifetime, HostedService, ServiceState,
    };
    pub use mhs_domain::value_objects::{HostBuilderContext, HostEnvironment};
    pub use mhs_infrastructure::config::{AppConfig, ConfigLoader};
    pub use mhs_infrastructure::di::{
        FromServices, LoggerFactory, Options, OptionsFactory, OptionsServiceCollectionExt,
        ServerScopeBuilder, ServiceCollection, ServiceProvider,
    };
    pub use mhs_infrastructure::hosting::{Host, HostBuilder};
}

// Re-export commonly used domain types at the crate root
pub use domain::{Error, Result};

// Re-export host entry points at the crate root
pub use infrastructure::hosting::{Host, HostBuilder};
pub use infrastructure::logging::init_logging;
