//! Domain Port Interfaces
//!
//! Defines the boundary contracts between the hosting model and the
//! infrastructure that implements it.
//!
//! ## Organization
//!
//! - **configuration** - Read access to the merged host configuration
//! - **hosting** - Hosted services, lifetimes and the host handle

/// Configuration root port
pub mod configuration;
/// Hosting ports
pub mod hosting;

pub use configuration::ConfigurationRoot;
pub use hosting::{ApplicationLifetime, Host, HostLifetime, HostedService, ServiceState};
