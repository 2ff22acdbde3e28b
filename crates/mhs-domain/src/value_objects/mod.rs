//! Domain Value Objects
//!
//! Immutable value objects shared by the registries, the isolated server
//! scopes and the host.
//!
//! ## Value Objects
//!
//! | Value Object | Description |
//! |--------------|-------------|
//! | [`ServiceKey`] | Type identity a registration is keyed by |
//! | [`Lifetime`] | Caching behavior of a registration |
//! | [`MarkerType`] | Host services eligible for forwarding into server scopes |
//! | [`HostEnvironment`] | Application name, environment name and content root |
//! | [`HostBuilderContext`] | Snapshot handed to configuration callbacks |

/// Host environment and build context
pub mod environment;
/// Marker types forwarded from the host registry
pub mod marker;
/// Service identity and lifetimes
pub mod service_key;

// Re-export commonly used value objects
pub use environment::{HostBuilderContext, HostEnvironment, LegacyHostingEnvironment};
pub use marker::MarkerType;
pub use service_key::{Lifetime, ServiceKey};
