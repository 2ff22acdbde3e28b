//! Server scope builder
//!
//! Declares one server: its default hosted service, additional hosted
//! services and the registration callbacks for its isolated scope. At host
//! build time [`ServerScopeBuilder::build`] runs the fixed sequence:
//!
//! 1. empty descriptor set
//! 2. activate and forward marker services from the host registry
//! 3. default framework services (options, logging)
//! 4. replay the configure callbacks in queue order
//! 5. try-add the hosted-service singletons
//! 6. construct the resolver and complete the scope
//!
//! A scope is built at most once. Materializing a host from a server
//! declaration, or swapping its resolver strategy, is not supported.

use crate::di::activation::FromServices;
use crate::di::bridge::bridge_descriptor;
use crate::di::collection::ServiceCollection;
use crate::di::descriptor::ServiceDescriptor;
use crate::di::forwarding::{activate_marker_services, forward_marker_services};
use crate::di::framework::add_framework_services;
use crate::di::pipeline::ConfigurePipeline;
use crate::di::provider::ServiceProvider;
use crate::di::provider_factory::{DefaultServiceProviderFactory, ServiceProviderFactory};
use crate::di::scope::IsolatedScope;
use crate::hosting::Host;
use mhs_domain::error::{Error, Result};
use mhs_domain::ports::HostedService;
use mhs_domain::value_objects::HostBuilderContext;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info};

type BridgeConstructor = fn(Arc<IsolatedScope>) -> ServiceDescriptor;

/// A hosted-service type declared for the server
struct HostedRegistration {
    service: &'static str,
    /// Singleton registered inside the server scope
    isolated: Arc<ServiceDescriptor>,
    /// Host-side proxy constructor
    bridge: BridgeConstructor,
}

impl HostedRegistration {
    fn new<T, F>(factory: F) -> Self
    where
        T: HostedService + 'static,
        F: Fn(&ServiceProvider) -> Result<Arc<T>> + Send + Sync + 'static,
    {
        Self {
            service: std::any::type_name::<T>(),
            isolated: Arc::new(ServiceDescriptor::singleton::<T, _>(factory)),
            bridge: bridge_descriptor::<T>,
        }
    }
}

/// Declaration and builder of one server's isolated scope
pub struct ServerScopeBuilder {
    name: String,
    pipeline: ConfigurePipeline,
    hosted: Vec<HostedRegistration>,
    scope: Arc<IsolatedScope>,
    provider_factory: DefaultServiceProviderFactory,
    build_attempted: bool,
}

impl ServerScopeBuilder {
    /// Declare server `name` whose default hosted service is `S`
    pub fn new<S>(name: impl Into<String>) -> Self
    where
        S: HostedService + FromServices + 'static,
    {
        let name = name.into();
        Self {
            scope: Arc::new(IsolatedScope::new(name.clone())),
            name,
            pipeline: ConfigurePipeline::new(),
            hosted: vec![HostedRegistration::new::<S, _>(|services| {
                S::from_services(services).map(Arc::new)
            })],
            provider_factory: DefaultServiceProviderFactory::default(),
            build_attempted: false,
        }
    }

    /// Server name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Shared handle to the server's scope
    pub fn scope(&self) -> Arc<IsolatedScope> {
        Arc::clone(&self.scope)
    }

    /// Number of declared hosted-service types, the default included
    pub fn hosted_service_count(&self) -> usize {
        self.hosted.len()
    }

    /// Whether the scope resolver activates every singleton when built
    #[must_use]
    pub fn validate_on_build(mut self, validate: bool) -> Self {
        self.provider_factory = DefaultServiceProviderFactory::new(validate);
        self
    }

    /// Queue a registration callback for the server scope
    ///
    /// Callbacks accumulate across calls and run after the framework
    /// services, so they can override forwarded and default registrations.
    #[must_use]
    pub fn configure_services<F>(mut self, configure: F) -> Self
    where
        F: FnOnce(&HostBuilderContext, &mut ServiceCollection) -> anyhow::Result<()>
            + Send
            + 'static,
    {
        self.pipeline.push(configure);
        self
    }

    /// Declare an additional hosted service constructed from the scope
    #[must_use]
    pub fn use_hosted_service<T>(self) -> Self
    where
        T: HostedService + FromServices + 'static,
    {
        self.use_hosted_service_with::<T, _>(|services| T::from_services(services).map(Arc::new))
    }

    /// Declare an additional hosted service with an explicit factory
    #[must_use]
    pub fn use_hosted_service_with<T, F>(mut self, factory: F) -> Self
    where
        T: HostedService + 'static,
        F: Fn(&ServiceProvider) -> Result<Arc<T>> + Send + Sync + 'static,
    {
        self.hosted.push(HostedRegistration::new::<T, _>(factory));
        self
    }

    /// Materialize a host directly from this server declaration
    ///
    /// # Errors
    ///
    /// Always fails: hosts are built by `HostBuilder`.
    pub fn build_host(&self) -> Result<Host> {
        Err(Error::unsupported(format!(
            "Building a host from server scope '{}'",
            self.name
        )))
    }

    /// Replace the resolver-construction strategy of this scope
    ///
    /// # Errors
    ///
    /// Always fails: server scopes use the default strategy.
    pub fn use_service_provider_factory(
        &mut self,
        _factory: Arc<dyn ServiceProviderFactory>,
    ) -> Result<()> {
        Err(Error::unsupported(format!(
            "Replacing the service provider factory of server scope '{}'",
            self.name
        )))
    }

    /// Add one bridge per declared hosted service to the host registry
    pub fn register_bridges(&self, host_services: &mut ServiceCollection) {
        for hosted in &self.hosted {
            host_services.add_descriptor((hosted.bridge)(Arc::clone(&self.scope)));
            debug!(server = %self.name, service = hosted.service, "Registered hosted service bridge");
        }
    }

    /// Build the isolated resolver against the host registry
    ///
    /// # Errors
    ///
    /// `UnsupportedOperation` on a second call (whether or not the first
    /// one succeeded), `Configuration` when a callback fails, and whatever
    /// the resolver strategy reports.
    pub fn build(
        &mut self,
        context: &HostBuilderContext,
        host_services: &ServiceCollection,
    ) -> Result<Arc<ServiceProvider>> {
        if self.build_attempted {
            return Err(Error::unsupported(format!(
                "Rebuilding the service scope of server '{}'",
                self.name
            )));
        }
        self.build_attempted = true;
        info!(server = %self.name, "Building server scope");

        let mut services = ServiceCollection::new();

        activate_marker_services(&self.name, host_services)?;
        let forwarded = forward_marker_services(&self.name, host_services, &mut services);
        debug!(server = %self.name, step = "forward", forwarded = forwarded.len(), "Build step complete");

        add_framework_services(&mut services, &self.name);
        debug!(server = %self.name, step = "framework", "Build step complete");

        let callbacks = self.pipeline.len();
        std::mem::take(&mut self.pipeline).replay(&self.name, context, &mut services)?;
        debug!(server = %self.name, step = "configure", callbacks, "Build step complete");

        for hosted in &self.hosted {
            if !services.try_add(Arc::clone(&hosted.isolated)) {
                debug!(
                    server = %self.name,
                    service = hosted.service,
                    "Hosted service already registered, keeping existing registration"
                );
            }
        }
        debug!(server = %self.name, step = "hosted", hosted = self.hosted.len(), "Build step complete");

        let provider = Arc::new(
            self.provider_factory
                .create_service_provider(&self.name, services)?,
        );
        self.scope.complete(Arc::clone(&provider))?;
        info!(server = %self.name, services = provider.len(), "Server scope ready");
        Ok(provider)
    }
}

impl fmt::Debug for ServerScopeBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServerScopeBuilder")
            .field("name", &self.name)
            .field("callbacks", &self.pipeline.len())
            .field(
                "hosted",
                &self.hosted.iter().map(|h| h.service).collect::<Vec<_>>(),
            )
            .field("built", &self.scope.is_built())
            .finish()
    }
}
