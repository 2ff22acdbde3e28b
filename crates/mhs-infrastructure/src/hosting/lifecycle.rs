//! Hosted Service Lifecycle Management
//!
//! The [`HostedServiceManager`] starts every hosted service the host
//! resolved (server bridges included) and stops them on shutdown.
//!
//! ## Architecture
//!
//! ```text
//!                    ┌──────────────────────┐
//!                    │ HostedServiceManager │
//!                    └──────────┬───────────┘
//!              start in order   │   stop in reverse
//!        ┌──────────────────────┼──────────────────────┐
//!        ▼                      ▼                      ▼
//! ┌──────────────┐      ┌──────────────┐      ┌──────────────┐
//! │ host service │      │ echo (scope) │      │ chat (scope) │
//! └──────────────┘      └──────────────┘      └──────────────┘
//! ```
//!
//! [`DefaultApplicationLifetime`] carries the stop request; the
//! [`ConsoleLifetime`] raises it on Ctrl-C.

use async_trait::async_trait;
use mhs_domain::error::{Error, Result};
use mhs_domain::ports::{ApplicationLifetime, HostLifetime, HostedService, ServiceState};
use serde::Serialize;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::Notify;
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

/// Information about a managed hosted service
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServiceInfo {
    /// Service name
    pub name: String,
    /// Current state
    pub state: ServiceState,
}

struct ManagedService {
    service: Arc<dyn HostedService>,
    state: ServiceState,
}

impl ManagedService {
    fn info(&self) -> ServiceInfo {
        ServiceInfo {
            name: self.service.name().to_string(),
            state: self.state,
        }
    }
}

/// Starts and stops hosted services
///
/// Services start in registration order and stop in reverse order. A
/// failed start rolls back the services already running.
pub struct HostedServiceManager {
    services: Vec<ManagedService>,
    shutdown_timeout: Duration,
}

impl HostedServiceManager {
    /// Create a manager giving each service `shutdown_timeout` to stop
    pub fn new(shutdown_timeout: Duration) -> Self {
        Self {
            services: Vec::new(),
            shutdown_timeout,
        }
    }

    /// Register a service for lifecycle management
    pub fn register(&mut self, service: Arc<dyn HostedService>) {
        info!(service = %service.name(), "Registering hosted service");
        self.services.push(ManagedService {
            service,
            state: ServiceState::Stopped,
        });
    }

    /// Get information about all registered services
    pub fn list(&self) -> Vec<ServiceInfo> {
        self.services.iter().map(ManagedService::info).collect()
    }

    /// Get information about a specific service
    pub fn get(&self, name: &str) -> Option<ServiceInfo> {
        self.services
            .iter()
            .find(|managed| managed.service.name() == name)
            .map(ManagedService::info)
    }

    /// Get the number of registered services
    pub fn count(&self) -> usize {
        self.services.len()
    }

    /// Start every registered service in registration order
    ///
    /// On the first failure the services started so far are stopped again
    /// and the failure is returned.
    pub async fn start_all(&mut self) -> Result<()> {
        for index in 0..self.services.len() {
            let managed = &mut self.services[index];
            let name = managed.service.name().to_string();
            info!(service = %name, "Starting hosted service");
            managed.state = ServiceState::Starting;

            match managed.service.start().await {
                Ok(()) => {
                    managed.state = ServiceState::Running;
                    info!(service = %name, "Hosted service started");
                }
                Err(e) => {
                    managed.state = ServiceState::Faulted;
                    error!(service = %name, error = %e, "Hosted service failed to start");
                    if let Err(rollback) = self.stop_range(index).await {
                        warn!(error = %rollback, "Rollback after failed start was incomplete");
                    }
                    return Err(Error::lifecycle_with_source(name, "failed to start", e));
                }
            }
        }
        Ok(())
    }

    /// Stop every running service in reverse registration order
    ///
    /// Every service gets its stop call even when an earlier one fails; the
    /// first failure is returned.
    pub async fn stop_all(&mut self) -> Result<()> {
        self.stop_range(self.services.len()).await
    }

    async fn stop_range(&mut self, end: usize) -> Result<()> {
        let mut first_error = None;
        for managed in self.services[..end].iter_mut().rev() {
            if managed.state != ServiceState::Running {
                continue;
            }
            let name = managed.service.name().to_string();
            info!(service = %name, "Stopping hosted service");
            managed.state = ServiceState::Stopping;

            let outcome =
                match tokio::time::timeout(self.shutdown_timeout, managed.service.stop()).await {
                    Ok(Ok(())) => Ok(()),
                    Ok(Err(e)) => Err(Error::lifecycle_with_source(&name, "failed to stop", e)),
                    Err(_) => Err(Error::lifecycle(
                        &name,
                        format!("did not stop within {:?}", self.shutdown_timeout),
                    )),
                };

            match outcome {
                Ok(()) => {
                    managed.state = ServiceState::Stopped;
                    info!(service = %name, "Hosted service stopped");
                }
                Err(e) => {
                    managed.state = ServiceState::Faulted;
                    error!(service = %name, error = %e, "Hosted service failed to stop");
                    first_error.get_or_insert(e);
                }
            }
        }
        first_error.map_or(Ok(()), Err)
    }
}

impl std::fmt::Debug for HostedServiceManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HostedServiceManager")
            .field("services", &self.list())
            .field("shutdown_timeout", &self.shutdown_timeout)
            .finish()
    }
}

// ============================================================================
// Application Lifetime
// ============================================================================

/// Default application-lifetime controller using atomics and Notify
///
/// The flag answers `is_stopping` without locking; waiters park on the
/// Notify until a stop is requested.
pub struct DefaultApplicationLifetime {
    /// Stop requested flag
    stopping: AtomicBool,
    /// Notification channel for async waiting
    notify: Notify,
}

impl DefaultApplicationLifetime {
    /// Create a lifetime with no stop requested
    pub fn new() -> Self {
        Self {
            stopping: AtomicBool::new(false),
            notify: Notify::new(),
        }
    }
}

impl Default for DefaultApplicationLifetime {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for DefaultApplicationLifetime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DefaultApplicationLifetime")
            .field("is_stopping", &self.is_stopping())
            .finish()
    }
}

#[async_trait]
impl ApplicationLifetime for DefaultApplicationLifetime {
    fn stop_application(&self) {
        if !self.stopping.swap(true, Ordering::SeqCst) {
            info!("Application stop requested");
        }
        self.notify.notify_waiters();
    }

    fn is_stopping(&self) -> bool {
        self.stopping.load(Ordering::SeqCst)
    }

    async fn wait_for_stop(&self) {
        let notified = self.notify.notified();
        tokio::pin!(notified);
        // Register before checking the flag so a concurrent stop is not lost
        notified.as_mut().enable();
        if self.is_stopping() {
            return;
        }
        notified.await;
    }
}

// ============================================================================
// Console Lifetime
// ============================================================================

/// Host lifetime that requests application stop on Ctrl-C
pub struct ConsoleLifetime {
    application: Arc<dyn ApplicationLifetime>,
    signal_task: Mutex<Option<JoinHandle<()>>>,
}

impl ConsoleLifetime {
    /// Create a console lifetime driving `application`
    pub fn new(application: Arc<dyn ApplicationLifetime>) -> Self {
        Self {
            application,
            signal_task: Mutex::new(None),
        }
    }

    /// Whether the Ctrl-C listener task is installed and still running
    pub fn is_listening(&self) -> bool {
        self.signal_task
            .lock()
            .map(|slot| slot.as_ref().is_some_and(|task| !task.is_finished()))
            .unwrap_or(false)
    }
}

impl std::fmt::Debug for ConsoleLifetime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConsoleLifetime")
            .field("is_stopping", &self.application.is_stopping())
            .finish()
    }
}

#[async_trait]
impl HostLifetime for ConsoleLifetime {
    async fn wait_for_start(&self) -> Result<()> {
        let application = Arc::clone(&self.application);
        let task = tokio::spawn(async move {
            match tokio::signal::ctrl_c().await {
                Ok(()) => {
                    info!("Ctrl-C received, shutting down");
                    application.stop_application();
                }
                Err(e) => warn!(error = %e, "Unable to listen for Ctrl-C"),
            }
        });

        let mut slot = self
            .signal_task
            .lock()
            .map_err(|_| Error::internal("Console lifetime lock poisoned"))?;
        if let Some(previous) = slot.replace(task) {
            previous.abort();
        }
        info!("Application started. Press Ctrl+C to shut down.");
        Ok(())
    }

    async fn stop(&self) -> Result<()> {
        let task = self
            .signal_task
            .lock()
            .map_err(|_| Error::internal("Console lifetime lock poisoned"))?
            .take();
        if let Some(task) = task {
            task.abort();
        }
        Ok(())
    }
}
