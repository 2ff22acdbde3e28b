//! Service descriptors
//!
//! A descriptor binds a [`ServiceKey`] to a [`Lifetime`] and either a ready
//! instance or a factory. Descriptors are immutable once created and are
//! shared by `Arc` between registries: the host registry and any server
//! scope it forwards the descriptor into hold the *same* descriptor.
//!
//! Singleton instances are cached on the descriptor itself, so resolving a
//! shared descriptor from either registry yields the same object.

use crate::di::provider::ServiceProvider;
use mhs_domain::error::{Error, Result};
use mhs_domain::value_objects::{Lifetime, ServiceKey};
use once_cell::sync::OnceCell;
use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// Type-erased service instance
///
/// Always holds an `Arc<T>` for the registered service type `T`, which lets
/// unsized service types (`dyn Trait`) share the same storage.
pub(crate) type Instance = Arc<dyn Any + Send + Sync>;

type FactoryFn = dyn Fn(&ServiceProvider) -> Result<Instance> + Send + Sync;

enum Activation {
    Instance(Instance),
    Factory(Arc<FactoryFn>),
}

/// Registration record for one service type
pub struct ServiceDescriptor {
    key: ServiceKey,
    lifetime: Lifetime,
    activation: Activation,
    singleton: OnceCell<Instance>,
}

impl ServiceDescriptor {
    /// Register an existing instance as a singleton
    pub fn instance<T>(instance: Arc<T>) -> Self
    where
        T: ?Sized + Send + Sync + 'static,
    {
        Self {
            key: ServiceKey::of::<T>(),
            lifetime: Lifetime::Singleton,
            activation: Activation::Instance(Arc::new(instance) as Instance),
            singleton: OnceCell::new(),
        }
    }

    /// Register a factory whose result is cached on first resolution
    pub fn singleton<T, F>(factory: F) -> Self
    where
        T: ?Sized + Send + Sync + 'static,
        F: Fn(&ServiceProvider) -> Result<Arc<T>> + Send + Sync + 'static,
    {
        Self::with_factory(Lifetime::Singleton, factory)
    }

    /// Register a factory invoked on every resolution
    pub fn transient<T, F>(factory: F) -> Self
    where
        T: ?Sized + Send + Sync + 'static,
        F: Fn(&ServiceProvider) -> Result<Arc<T>> + Send + Sync + 'static,
    {
        Self::with_factory(Lifetime::Transient, factory)
    }

    fn with_factory<T, F>(lifetime: Lifetime, factory: F) -> Self
    where
        T: ?Sized + Send + Sync + 'static,
        F: Fn(&ServiceProvider) -> Result<Arc<T>> + Send + Sync + 'static,
    {
        let erased = move |provider: &ServiceProvider| -> Result<Instance> {
            factory(provider).map(|service| Arc::new(service) as Instance)
        };
        Self {
            key: ServiceKey::of::<T>(),
            lifetime,
            activation: Activation::Factory(Arc::new(erased)),
            singleton: OnceCell::new(),
        }
    }

    /// Service type this descriptor registers
    pub fn key(&self) -> ServiceKey {
        self.key
    }

    /// Lifetime of the registration
    pub fn lifetime(&self) -> Lifetime {
        self.lifetime
    }

    /// Whether the descriptor wraps a ready instance
    pub fn is_instance(&self) -> bool {
        matches!(self.activation, Activation::Instance(_))
    }

    /// Whether a singleton factory has already produced its instance
    pub fn is_activated(&self) -> bool {
        match self.activation {
            Activation::Instance(_) => true,
            Activation::Factory(_) => self.singleton.get().is_some(),
        }
    }

    /// Produce the erased instance, constructing it if needed
    ///
    /// Concurrent first resolutions of a singleton block on the cell so only
    /// one factory call ever runs.
    pub(crate) fn activate(&self, provider: &ServiceProvider) -> Result<Instance> {
        match (&self.activation, self.lifetime) {
            (Activation::Instance(instance), _) => Ok(Arc::clone(instance)),
            (Activation::Factory(factory), Lifetime::Singleton) => self
                .singleton
                .get_or_try_init(|| factory(provider))
                .map(Arc::clone),
            (Activation::Factory(factory), Lifetime::Transient) => factory(provider),
        }
    }

    /// Produce the instance as `Arc<T>`
    pub(crate) fn resolve<T>(&self, provider: &ServiceProvider) -> Result<Arc<T>>
    where
        T: ?Sized + 'static,
    {
        let instance = self.activate(provider)?;
        instance.downcast_ref::<Arc<T>>().cloned().ok_or_else(|| {
            Error::activation(
                self.key.type_name(),
                format!(
                    "registered instance cannot be viewed as {}",
                    std::any::type_name::<T>()
                ),
            )
        })
    }
}

impl fmt::Debug for ServiceDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceDescriptor")
            .field("service", &self.key.type_name())
            .field("lifetime", &self.lifetime)
            .field("instance", &self.is_instance())
            .field("activated", &self.is_activated())
            .finish()
    }
}
