//! Hosted-service bridge
//!
//! The host drives start/stop on `dyn HostedService` entries of its own
//! registry. For a server's hosted services that entry is a bridge: its
//! factory never constructs anything, it fetches the singleton owned by the
//! server scope. The object the host starts is the scope's instance.

use crate::di::descriptor::ServiceDescriptor;
use crate::di::scope::IsolatedScope;
use mhs_domain::error::Result;
use mhs_domain::ports::HostedService;
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;
use tracing::debug;

/// Host-side proxy for hosted service `S` living in a server scope
pub struct HostedServiceBridge<S> {
    scope: Arc<IsolatedScope>,
    _service: PhantomData<fn() -> Arc<S>>,
}

impl<S> HostedServiceBridge<S>
where
    S: HostedService + 'static,
{
    /// Bridge to `S` inside `scope`
    pub fn new(scope: Arc<IsolatedScope>) -> Self {
        Self {
            scope,
            _service: PhantomData,
        }
    }

    /// Fetch the scope's `S` singleton
    ///
    /// # Errors
    ///
    /// Fails with `ScopeNotBuilt` before the scope is built and with
    /// `MissingService` when `S` was never registered in it.
    pub fn resolve(&self) -> Result<Arc<S>> {
        let service = self.scope.fetch::<S>()?;
        debug!(
            server = %self.scope.server_name(),
            service = std::any::type_name::<S>(),
            "Bridged hosted service resolved from server scope"
        );
        Ok(service)
    }

    /// Host registry descriptor for this bridge
    ///
    /// Registered as a `dyn HostedService` singleton, so repeated host
    /// lookups return the same scope-owned instance.
    pub fn into_descriptor(self) -> ServiceDescriptor {
        ServiceDescriptor::singleton::<dyn HostedService, _>(move |_| {
            let service: Arc<dyn HostedService> = self.resolve()?;
            Ok(service)
        })
    }
}

impl<S> fmt::Debug for HostedServiceBridge<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HostedServiceBridge")
            .field("server", &self.scope.server_name())
            .field("service", &std::any::type_name::<S>())
            .finish()
    }
}

/// Bridge descriptor constructor, erased over the service type
pub(crate) fn bridge_descriptor<S>(scope: Arc<IsolatedScope>) -> ServiceDescriptor
where
    S: HostedService + 'static,
{
    HostedServiceBridge::<S>::new(scope).into_descriptor()
}
