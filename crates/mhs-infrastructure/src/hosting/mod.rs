//! Application hosting
//!
//! The host builder, the built host and the lifecycle of hosted services.

pub mod builder;
pub mod host;
pub mod lifecycle;

pub use builder::HostBuilder;
pub use host::{Host, HostHandle};
pub use lifecycle::{ConsoleLifetime, DefaultApplicationLifetime, HostedServiceManager, ServiceInfo};
