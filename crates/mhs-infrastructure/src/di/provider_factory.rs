//! Resolver-construction strategies
//!
//! The host builder accepts any [`ServiceProviderFactory`]; server scopes
//! always use [`DefaultServiceProviderFactory`] and reject substitution.

use crate::di::collection::ServiceCollection;
use crate::di::provider::ServiceProvider;
use mhs_domain::error::Result;
use tracing::debug;

/// Turns a finalized descriptor set into a resolver
pub trait ServiceProviderFactory: Send + Sync {
    /// Build the resolver for the registry named `scope`
    fn create_service_provider(
        &self,
        scope: &str,
        services: ServiceCollection,
    ) -> Result<ServiceProvider>;
}

/// Standard strategy: build the lookup table, optionally activating every
/// singleton up front
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultServiceProviderFactory {
    validate_on_build: bool,
}

impl DefaultServiceProviderFactory {
    /// Create the default strategy
    pub fn new(validate_on_build: bool) -> Self {
        Self { validate_on_build }
    }

    /// Whether singletons are activated at build time
    pub fn validates_on_build(&self) -> bool {
        self.validate_on_build
    }
}

impl ServiceProviderFactory for DefaultServiceProviderFactory {
    fn create_service_provider(
        &self,
        scope: &str,
        services: ServiceCollection,
    ) -> Result<ServiceProvider> {
        let provider = ServiceProvider::new(scope, services);
        if self.validate_on_build {
            debug!(scope = %scope, "Validating singleton registrations");
            provider.validate()?;
        }
        Ok(provider)
    }
}
