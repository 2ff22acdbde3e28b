//! Built host
//!
//! Owns the host resolver and the server scopes. Starting the host resolves
//! every `dyn HostedService` registration, which activates the server
//! bridges and with them the scope-owned hosted services.

use crate::di::provider::ServiceProvider;
use crate::di::scope::IsolatedScope;
use crate::hosting::lifecycle::{HostedServiceManager, ServiceInfo};
use mhs_domain::error::{Error, Result};
use mhs_domain::ports::{ApplicationLifetime, HostLifetime, HostedService};
use mhs_domain::value_objects::HostEnvironment;
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::Mutex;
use tracing::{info, warn};

/// Handle registered as the host marker
///
/// Services that need to shut the process down resolve this instead of the
/// host itself.
#[derive(Clone)]
pub struct HostHandle {
    environment: Arc<HostEnvironment>,
    lifetime: Arc<dyn ApplicationLifetime>,
}

impl HostHandle {
    /// Create a handle over the host environment and application lifetime
    pub fn new(environment: Arc<HostEnvironment>, lifetime: Arc<dyn ApplicationLifetime>) -> Self {
        Self {
            environment,
            lifetime,
        }
    }
}

impl mhs_domain::ports::Host for HostHandle {
    fn environment(&self) -> Arc<HostEnvironment> {
        Arc::clone(&self.environment)
    }

    fn request_stop(&self) {
        self.lifetime.stop_application();
    }
}

impl fmt::Debug for HostHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HostHandle")
            .field("environment", &self.environment)
            .field("is_stopping", &self.lifetime.is_stopping())
            .finish()
    }
}

/// Parts a [`Host`] is assembled from
pub(crate) struct HostParts {
    pub services: Arc<ServiceProvider>,
    pub scopes: Vec<Arc<IsolatedScope>>,
    pub environment: Arc<HostEnvironment>,
    pub application_lifetime: Arc<dyn ApplicationLifetime>,
    pub host_lifetime: Arc<dyn HostLifetime>,
    pub manager: HostedServiceManager,
}

/// Running application host
pub struct Host {
    services: Arc<ServiceProvider>,
    scopes: Vec<Arc<IsolatedScope>>,
    environment: Arc<HostEnvironment>,
    application_lifetime: Arc<dyn ApplicationLifetime>,
    host_lifetime: Arc<dyn HostLifetime>,
    manager: Mutex<HostedServiceManager>,
    started: AtomicBool,
}

impl Host {
    pub(crate) fn new(parts: HostParts) -> Self {
        Self {
            services: parts.services,
            scopes: parts.scopes,
            environment: parts.environment,
            application_lifetime: parts.application_lifetime,
            host_lifetime: parts.host_lifetime,
            manager: Mutex::new(parts.manager),
            started: AtomicBool::new(false),
        }
    }

    /// Host resolver
    pub fn services(&self) -> &Arc<ServiceProvider> {
        &self.services
    }

    /// Host environment
    pub fn environment(&self) -> &Arc<HostEnvironment> {
        &self.environment
    }

    /// Application-lifetime controller
    pub fn application_lifetime(&self) -> Arc<dyn ApplicationLifetime> {
        Arc::clone(&self.application_lifetime)
    }

    /// Scope of the named server
    pub fn server_scope(&self, name: &str) -> Option<Arc<IsolatedScope>> {
        self.scopes
            .iter()
            .find(|scope| scope.server_name() == name)
            .cloned()
    }

    /// Declared server names, in declaration order
    pub fn server_names(&self) -> Vec<&str> {
        self.scopes.iter().map(|scope| scope.server_name()).collect()
    }

    /// Snapshot of the hosted services and their states
    pub async fn hosted_services(&self) -> Vec<ServiceInfo> {
        self.manager.lock().await.list()
    }

    /// Start the host lifetime and every hosted service
    ///
    /// # Errors
    ///
    /// `UnsupportedOperation` when the host was already started; otherwise
    /// the first resolution or start failure.
    pub async fn start(&self) -> Result<()> {
        if self.started.swap(true, Ordering::SeqCst) {
            return Err(Error::unsupported("Starting an already started host"));
        }
        info!(
            application = %self.environment.application_name,
            environment = %self.environment.environment_name,
            servers = self.scopes.len(),
            "Starting host"
        );

        self.host_lifetime.wait_for_start().await?;

        match self.start_hosted_services().await {
            Ok(hosted) => {
                info!(hosted, "Host started");
                Ok(())
            }
            Err(e) => {
                // Services that did start are already rolled back
                if let Err(release) = self.host_lifetime.stop().await {
                    warn!(error = %release, "Failed to release host lifetime");
                }
                Err(e)
            }
        }
    }

    async fn start_hosted_services(&self) -> Result<usize> {
        let hosted = self.services.get_services::<dyn HostedService>()?;
        let mut manager = self.manager.lock().await;
        for service in hosted {
            manager.register(service);
        }
        manager.start_all().await?;
        Ok(manager.count())
    }

    /// Stop every hosted service, then the host lifetime
    pub async fn stop(&self) -> Result<()> {
        info!("Stopping host");
        let stopped = self.manager.lock().await.stop_all().await;
        self.host_lifetime.stop().await?;
        stopped?;
        info!("Host stopped");
        Ok(())
    }

    /// Start, wait for a stop request, then stop
    pub async fn run(self) -> Result<()> {
        self.start().await?;
        self.application_lifetime.wait_for_stop().await;
        self.stop().await
    }
}

impl fmt::Debug for Host {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Host")
            .field("environment", &self.environment)
            .field("servers", &self.server_names())
            .field("started", &self.started.load(Ordering::SeqCst))
            .finish()
    }
}
