//! Hosting Ports
//!
//! Contracts between the host's lifecycle manager and the services it
//! drives. A hosted service may live in the host registry or inside a
//! server scope; the host only ever sees this trait.

use crate::error::Result;
use crate::value_objects::HostEnvironment;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Lifecycle state of a hosted service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ServiceState {
    /// Service is starting up
    Starting,
    /// Service is running normally
    Running,
    /// Service is shutting down
    Stopping,
    /// Service is stopped
    #[default]
    Stopped,
    /// Start or stop failed
    Faulted,
}

/// Service whose start/stop is driven by the host
///
/// # Example
///
/// ```no_run
/// use mhs_domain::ports::HostedService;
/// use std::sync::Arc;
///
/// async fn restart(service: Arc<dyn HostedService>) -> mhs_domain::Result<()> {
///     service.stop().await?;
///     service.start().await
/// }
/// ```
#[async_trait]
pub trait HostedService: Send + Sync {
    /// Name used in logs and state reports
    fn name(&self) -> &str;

    /// Start the service
    async fn start(&self) -> Result<()>;

    /// Stop the service gracefully
    async fn stop(&self) -> Result<()>;
}

/// Application-wide stop control
///
/// Any component may request the application to stop; the host waits on
/// [`ApplicationLifetime::wait_for_stop`] and then stops its services.
#[async_trait]
pub trait ApplicationLifetime: Send + Sync {
    /// Request the application to stop
    fn stop_application(&self);

    /// Whether a stop has been requested
    fn is_stopping(&self) -> bool;

    /// Wait until a stop has been requested
    async fn wait_for_stop(&self);
}

/// Bridge between the host and the process environment
///
/// The lifetime decides when the host should begin shutting down (for
/// example on Ctrl-C) and is told when the host stops.
#[async_trait]
pub trait HostLifetime: Send + Sync {
    /// Called before hosted services start
    async fn wait_for_start(&self) -> Result<()>;

    /// Called after hosted services stopped
    async fn stop(&self) -> Result<()>;
}

/// Handle to the running host
pub trait Host: Send + Sync {
    /// Environment the host was built for
    fn environment(&self) -> Arc<HostEnvironment>;

    /// Ask the host to shut down
    fn request_stop(&self);
}
