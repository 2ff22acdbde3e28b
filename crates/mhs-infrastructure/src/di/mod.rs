//! Dependency Injection
//!
//! Type-keyed registries and resolvers, plus the isolation machinery that
//! gives every server its own scope.
//!
//! ## Architecture Overview
//!
//! ```text
//! host registry (ServiceCollection)
//! ├── marker services ───────forward──────┐
//! ├── host services                       ▼
//! └── bridges (dyn HostedService) ──▶ server scope (IsolatedScope)
//!                                     ├── forwarded markers
//!                                     ├── OptionsFactory, LoggerFactory
//!                                     ├── configure callbacks
//!                                     └── hosted-service singletons
//! ```
//!
//! ## Key Principles
//!
//! - **Last registration wins**: lookups resolve the most recent descriptor
//! - **Shared descriptors**: forwarding moves the descriptor, so singletons
//!   keep their identity across registries
//! - **No reflection**: types construct themselves through [`FromServices`]

pub mod activation;
pub mod bridge;
pub mod builder;
pub mod collection;
pub mod descriptor;
pub mod forwarding;
pub mod framework;
pub mod logger;
pub mod options;
pub mod pipeline;
pub mod provider;
pub mod provider_factory;
pub mod scope;

pub use activation::FromServices;
pub use bridge::HostedServiceBridge;
pub use builder::ServerScopeBuilder;
pub use collection::ServiceCollection;
pub use descriptor::ServiceDescriptor;
pub use forwarding::{activate_marker_services, forward_marker_services};
pub use framework::add_framework_services;
pub use logger::{Logger, LoggerFactory};
pub use options::{Options, OptionsFactory, OptionsServiceCollectionExt};
pub use pipeline::{ConfigurePipeline, ConfigureServicesAction};
pub use provider::ServiceProvider;
pub use provider_factory::{DefaultServiceProviderFactory, ServiceProviderFactory};
pub use scope::IsolatedScope;
