//! # Domain Layer
//!
//! Core types of the multi-host server layer: service identity, the marker
//! types that cross from the host registry into server scopes, the host
//! environment, and the ports implemented by the infrastructure crate.
//!
//! This crate has no knowledge of how registries are stored or resolved.

/// Domain constants
pub mod constants;
/// Error handling types
pub mod error;
/// Port interfaces
pub mod ports;
/// Value objects
pub mod value_objects;

pub use error::{Error, Result};
pub use ports::{
    ApplicationLifetime, ConfigurationRoot, Host, HostLifetime, HostedService, ServiceState,
};
pub use value_objects::{
    HostBuilderContext, HostEnvironment, LegacyHostingEnvironment, Lifetime, MarkerType,
    ServiceKey,
};
