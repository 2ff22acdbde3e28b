//! Service provider (resolver)
//!
//! Immutable lookup table built once from a finalized [`ServiceCollection`].
//! The last descriptor registered for a type wins; every descriptor for a
//! type stays reachable through [`ServiceProvider::get_services`].
//!
//! The provider is read-only after construction and safe to share between
//! threads; singleton construction is serialized per descriptor.

use crate::di::collection::ServiceCollection;
use crate::di::descriptor::ServiceDescriptor;
use mhs_domain::error::{Error, Result};
use mhs_domain::value_objects::{Lifetime, ServiceKey};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// Finalized resolver for one registry
pub struct ServiceProvider {
    scope: String,
    registrations: HashMap<ServiceKey, Vec<Arc<ServiceDescriptor>>>,
    descriptor_count: usize,
}

impl ServiceProvider {
    /// Build a provider from a descriptor set
    ///
    /// `scope` names the registry in logs and errors (`host`, a server name).
    pub fn new(scope: impl Into<String>, services: ServiceCollection) -> Self {
        let scope = scope.into();
        let descriptor_count = services.len();
        let mut registrations: HashMap<ServiceKey, Vec<Arc<ServiceDescriptor>>> = HashMap::new();
        for descriptor in services {
            registrations
                .entry(descriptor.key())
                .or_default()
                .push(descriptor);
        }

        debug!(
            scope = %scope,
            descriptors = descriptor_count,
            services = registrations.len(),
            "Service provider built"
        );

        Self {
            scope,
            registrations,
            descriptor_count,
        }
    }

    /// Name of the registry this provider was built for
    pub fn scope_name(&self) -> &str {
        &self.scope
    }

    /// Resolve `T`, `Ok(None)` when nothing is registered
    ///
    /// Errors come from the service's own factory (or its dependencies).
    pub fn get_service<T>(&self) -> Result<Option<Arc<T>>>
    where
        T: ?Sized + 'static,
    {
        match self.descriptor(&ServiceKey::of::<T>()) {
            Some(descriptor) => descriptor.resolve::<T>(self).map(Some),
            None => Ok(None),
        }
    }

    /// Resolve `T`, failing with a missing-service error when absent
    pub fn get_required_service<T>(&self) -> Result<Arc<T>>
    where
        T: ?Sized + 'static,
    {
        self.get_service::<T>()?.ok_or_else(|| {
            Error::missing_service(std::any::type_name::<T>(), self.scope.clone())
        })
    }

    /// Resolve every registration of `T` in registration order
    pub fn get_services<T>(&self) -> Result<Vec<Arc<T>>>
    where
        T: ?Sized + 'static,
    {
        self.registrations
            .get(&ServiceKey::of::<T>())
            .map(|descriptors| {
                descriptors
                    .iter()
                    .map(|descriptor| descriptor.resolve::<T>(self))
                    .collect()
            })
            .unwrap_or_else(|| Ok(Vec::new()))
    }

    /// Descriptor resolution would use for `key`
    pub fn descriptor(&self, key: &ServiceKey) -> Option<&Arc<ServiceDescriptor>> {
        self.registrations
            .get(key)
            .and_then(|descriptors| descriptors.last())
    }

    /// Whether anything is registered for `key`
    pub fn contains(&self, key: &ServiceKey) -> bool {
        self.registrations.contains_key(key)
    }

    /// Whether anything is registered for `T`
    pub fn contains_service<T: ?Sized + 'static>(&self) -> bool {
        self.contains(&ServiceKey::of::<T>())
    }

    /// Registered service types
    pub fn keys(&self) -> impl Iterator<Item = &ServiceKey> {
        self.registrations.keys()
    }

    /// Number of descriptors the provider was built from
    pub fn len(&self) -> usize {
        self.descriptor_count
    }

    /// Whether the provider has no registrations
    pub fn is_empty(&self) -> bool {
        self.descriptor_count == 0
    }

    /// Activate every singleton so factory errors surface now
    pub fn validate(&self) -> Result<()> {
        for descriptors in self.registrations.values() {
            for descriptor in descriptors {
                if descriptor.lifetime() == Lifetime::Singleton {
                    descriptor.activate(self).map_err(|e| {
                        Error::configuration_with_source(
                            format!(
                                "Validation of {} in scope '{}' failed",
                                descriptor.key(),
                                self.scope
                            ),
                            e,
                        )
                    })?;
                }
            }
        }
        Ok(())
    }
}

impl fmt::Debug for ServiceProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceProvider")
            .field("scope", &self.scope)
            .field("descriptors", &self.descriptor_count)
            .field("services", &self.registrations.len())
            .finish()
    }
}
