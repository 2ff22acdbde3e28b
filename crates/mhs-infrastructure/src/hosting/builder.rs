//! Host builder
//!
//! Owns the host registry. `build` assembles it in a fixed order:
//!
//! 1. host framework services (options, logging)
//! 2. host `configure_services` callbacks
//! 3. marker services, unless a callback registered one already
//! 4. every server scope, in declaration order, against that registry
//! 5. one bridge per declared hosted service
//! 6. the host resolver, through the configured strategy

use crate::config::{AppConfig, ConfigLoader, JsonConfiguration};
use crate::di::builder::ServerScopeBuilder;
use crate::di::collection::ServiceCollection;
use crate::di::descriptor::ServiceDescriptor;
use crate::di::framework::add_framework_services;
use crate::di::pipeline::ConfigurePipeline;
use crate::di::provider_factory::{DefaultServiceProviderFactory, ServiceProviderFactory};
use crate::hosting::host::{Host, HostHandle, HostParts};
use crate::hosting::lifecycle::{ConsoleLifetime, DefaultApplicationLifetime, HostedServiceManager};
use mhs_domain::constants::HOST_SCOPE_NAME;
use mhs_domain::error::{Error, Result};
use mhs_domain::ports::{ApplicationLifetime, ConfigurationRoot, HostLifetime};
use mhs_domain::value_objects::{HostBuilderContext, HostEnvironment, LegacyHostingEnvironment};
use std::collections::{BTreeMap, HashSet};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info};

/// Builder of the application host
pub struct HostBuilder {
    config: AppConfig,
    configuration: Arc<dyn ConfigurationRoot>,
    properties: BTreeMap<String, serde_json::Value>,
    pipeline: ConfigurePipeline,
    servers: Vec<ServerScopeBuilder>,
    provider_factory: Arc<dyn ServiceProviderFactory>,
}

impl HostBuilder {
    /// Builder with default settings and an empty configuration root
    pub fn new() -> Self {
        Self::from_config(AppConfig::default(), Arc::new(JsonConfiguration::empty()))
    }

    /// Builder over loaded settings and the configuration root they came from
    pub fn from_config(config: AppConfig, configuration: Arc<dyn ConfigurationRoot>) -> Self {
        let provider_factory: Arc<dyn ServiceProviderFactory> = Arc::new(
            DefaultServiceProviderFactory::new(config.host.validate_on_build),
        );
        Self {
            config,
            configuration,
            properties: BTreeMap::new(),
            pipeline: ConfigurePipeline::new(),
            servers: Vec::new(),
            provider_factory,
        }
    }

    /// Builder over everything `loader` finds
    pub fn from_loader(loader: &ConfigLoader) -> Result<Self> {
        let (config, root) = loader.load_with_root()?;
        Ok(Self::from_config(config, Arc::new(root)))
    }

    /// Host settings
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Attach a property to the build context
    #[must_use]
    pub fn property(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.properties.insert(key.into(), value);
        self
    }

    /// Queue a registration callback for the host registry
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

    /// Declare a server
    #[must_use]
    pub fn add_server(mut self, server: ServerScopeBuilder) -> Self {
        self.servers.push(server);
        self
    }

    /// Replace the strategy building the host resolver
    ///
    /// Server scopes keep the default strategy.
    #[must_use]
    pub fn use_service_provider_factory(mut self, factory: Arc<dyn ServiceProviderFactory>) -> Self {
        self.provider_factory = factory;
        self
    }

    /// Build the host registry, every server scope and the host resolver
    ///
    /// # Errors
    ///
    /// `DuplicateServer` when two servers share a name, `Configuration` when
    /// a callback fails, and whatever a resolver strategy reports.
    pub fn build(self) -> Result<Host> {
        let Self {
            config,
            configuration,
            properties,
            pipeline,
            mut servers,
            provider_factory,
        } = self;

        let mut names = HashSet::new();
        for server in &servers {
            if !names.insert(server.name().to_string()) {
                return Err(Error::DuplicateServer {
                    name: server.name().to_string(),
                });
            }
        }

        let environment = Arc::new(HostEnvironment::new(
            config.host.application_name.clone(),
            config.host.environment.clone(),
            config.host.content_root.clone(),
        ));
        info!(
            application = %environment.application_name,
            environment = %environment.environment_name,
            servers = servers.len(),
            "Building host"
        );
        let context = HostBuilderContext::new(Arc::clone(&environment), Arc::clone(&configuration))
            .with_properties(properties);

        let application_lifetime: Arc<dyn ApplicationLifetime> =
            Arc::new(DefaultApplicationLifetime::new());
        let host_lifetime: Arc<dyn HostLifetime> =
            Arc::new(ConsoleLifetime::new(Arc::clone(&application_lifetime)));
        let handle: Arc<dyn mhs_domain::ports::Host> = Arc::new(HostHandle::new(
            Arc::clone(&environment),
            Arc::clone(&application_lifetime),
        ));

        let mut services = ServiceCollection::new();
        add_framework_services(&mut services, HOST_SCOPE_NAME);
        pipeline.replay(HOST_SCOPE_NAME, &context, &mut services)?;

        let markers = [
            ServiceDescriptor::instance(Arc::clone(&environment)),
            ServiceDescriptor::instance(Arc::new(LegacyHostingEnvironment::new(Arc::clone(
                &environment,
            )))),
            ServiceDescriptor::instance(Arc::new(context.clone())),
            ServiceDescriptor::instance(configuration),
            ServiceDescriptor::instance(Arc::clone(&application_lifetime)),
            ServiceDescriptor::instance(Arc::clone(&host_lifetime)),
            ServiceDescriptor::instance(handle),
        ];
        for marker in markers {
            let service = marker.key().type_name();
            if !services.try_add(Arc::new(marker)) {
                debug!(service, "Marker service registered by a callback, keeping it");
            }
        }

        for server in &mut servers {
            server.build(&context, &services)?;
        }
        for server in &servers {
            server.register_bridges(&mut services);
        }

        let provider = Arc::new(provider_factory.create_service_provider(HOST_SCOPE_NAME, services)?);
        info!(services = provider.len(), "Host built");

        Ok(Host::new(HostParts {
            services: provider,
            scopes: servers.iter().map(ServerScopeBuilder::scope).collect(),
            environment,
            application_lifetime,
            host_lifetime,
            manager: HostedServiceManager::new(config.host.shutdown_timeout()),
        }))
    }
}

impl Default for HostBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for HostBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HostBuilder")
            .field("config", &self.config)
            .field("callbacks", &self.pipeline.len())
            .field("servers", &self.servers)
            .finish()
    }
}
