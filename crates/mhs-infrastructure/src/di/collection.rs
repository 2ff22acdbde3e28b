//! Service collection
//!
//! Ordered, append-only list of [`ServiceDescriptor`]s. The host registry and
//! every server scope are both a `ServiceCollection` until they are turned
//! into a [`ServiceProvider`].
//!
//! Registration never replaces: a later descriptor for the same type simply
//! wins at resolution time.

use crate::di::activation::FromServices;
use crate::di::descriptor::ServiceDescriptor;
use crate::di::provider::ServiceProvider;
use mhs_domain::error::Result;
use mhs_domain::value_objects::ServiceKey;
use std::sync::Arc;

/// Ordered descriptor set
#[derive(Debug, Default, Clone)]
pub struct ServiceCollection {
    descriptors: Vec<Arc<ServiceDescriptor>>,
}

impl ServiceCollection {
    /// Create an empty collection
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a shared descriptor
    ///
    /// The descriptor is not copied; every collection holding it resolves
    /// the same singleton.
    pub fn add(&mut self, descriptor: Arc<ServiceDescriptor>) -> &mut Self {
        self.descriptors.push(descriptor);
        self
    }

    /// Append a new descriptor
    pub fn add_descriptor(&mut self, descriptor: ServiceDescriptor) -> &mut Self {
        self.add(Arc::new(descriptor))
    }

    /// Append the descriptor only if its service type is not registered yet
    ///
    /// Returns whether the descriptor was added.
    pub fn try_add(&mut self, descriptor: Arc<ServiceDescriptor>) -> bool {
        if self.contains(&descriptor.key()) {
            return false;
        }
        self.descriptors.push(descriptor);
        true
    }

    /// Register an existing instance
    pub fn add_singleton_instance<T>(&mut self, instance: Arc<T>) -> &mut Self
    where
        T: ?Sized + Send + Sync + 'static,
    {
        self.add_descriptor(ServiceDescriptor::instance(instance))
    }

    /// Register a lazily constructed singleton
    pub fn add_singleton<T, F>(&mut self, factory: F) -> &mut Self
    where
        T: ?Sized + Send + Sync + 'static,
        F: Fn(&ServiceProvider) -> Result<Arc<T>> + Send + Sync + 'static,
    {
        self.add_descriptor(ServiceDescriptor::singleton(factory))
    }

    /// Register a factory invoked on every resolution
    pub fn add_transient<T, F>(&mut self, factory: F) -> &mut Self
    where
        T: ?Sized + Send + Sync + 'static,
        F: Fn(&ServiceProvider) -> Result<Arc<T>> + Send + Sync + 'static,
    {
        self.add_descriptor(ServiceDescriptor::transient(factory))
    }

    /// Register a singleton built through [`FromServices`]
    pub fn add_singleton_from_services<T>(&mut self) -> &mut Self
    where
        T: FromServices + Send + Sync + 'static,
    {
        self.add_singleton::<T, _>(|provider| T::from_services(provider).map(Arc::new))
    }

    /// Register a transient built through [`FromServices`]
    pub fn add_transient_from_services<T>(&mut self) -> &mut Self
    where
        T: FromServices + Send + Sync + 'static,
    {
        self.add_transient::<T, _>(|provider| T::from_services(provider).map(Arc::new))
    }

    /// First descriptor registered for `key`
    pub fn first(&self, key: &ServiceKey) -> Option<&Arc<ServiceDescriptor>> {
        self.descriptors.iter().find(|d| d.key() == *key)
    }

    /// Last descriptor registered for `key`, the one resolution uses
    pub fn last(&self, key: &ServiceKey) -> Option<&Arc<ServiceDescriptor>> {
        self.descriptors.iter().rev().find(|d| d.key() == *key)
    }

    /// All descriptors registered for `key`, in registration order
    pub fn of_key<'a>(
        &'a self,
        key: &'a ServiceKey,
    ) -> impl Iterator<Item = &'a Arc<ServiceDescriptor>> + 'a {
        self.descriptors.iter().filter(move |d| d.key() == *key)
    }

    /// Whether any descriptor is registered for `key`
    pub fn contains(&self, key: &ServiceKey) -> bool {
        self.first(key).is_some()
    }

    /// Whether any descriptor is registered for `T`
    pub fn contains_service<T: ?Sized + 'static>(&self) -> bool {
        self.contains(&ServiceKey::of::<T>())
    }

    /// Number of descriptors
    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    /// Whether the collection is empty
    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }

    /// Iterate descriptors in registration order
    pub fn iter(&self) -> impl Iterator<Item = &Arc<ServiceDescriptor>> {
        self.descriptors.iter()
    }
}

impl<'a> IntoIterator for &'a ServiceCollection {
    type Item = &'a Arc<ServiceDescriptor>;
    type IntoIter = std::slice::Iter<'a, Arc<ServiceDescriptor>>;

    fn into_iter(self) -> Self::IntoIter {
        self.descriptors.iter()
    }
}

impl IntoIterator for ServiceCollection {
    type Item = Arc<ServiceDescriptor>;
    type IntoIter = std::vec::IntoIter<Arc<ServiceDescriptor>>;

    fn into_iter(self) -> Self::IntoIter {
        self.descriptors.into_iter()
    }
}
