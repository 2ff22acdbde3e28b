//! Service identity and lifetimes
//!
//! Registrations are keyed by the [`TypeId`] of the service type. The key may
//! name a concrete type (`MyServer`) or a trait object (`dyn HostedService`),
//! so lookups never need runtime reflection beyond the type id.

use serde::{Deserialize, Serialize};
use std::any::TypeId;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Identity of a service type inside a registry
///
/// Equality and hashing use the type id only; the type name is kept for
/// diagnostics.
///
/// # Example
///
/// ```
/// use mhs_domain::value_objects::ServiceKey;
///
/// struct Clock;
///
/// assert_eq!(ServiceKey::of::<Clock>(), ServiceKey::of::<Clock>());
/// assert_ne!(ServiceKey::of::<Clock>(), ServiceKey::of::<String>());
/// assert!(ServiceKey::of::<Clock>().type_name().ends_with("Clock"));
/// ```
#[derive(Clone, Copy)]
pub struct ServiceKey {
    type_id: TypeId,
    type_name: &'static str,
}

impl ServiceKey {
    /// Key for the service type `T`
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self {
            type_id: TypeId::of::<T>(),
            type_name: std::any::type_name::<T>(),
        }
    }

    /// Underlying type id
    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    /// Fully qualified type name
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Whether this key names `T`
    pub fn is<T: ?Sized + 'static>(&self) -> bool {
        self.type_id == TypeId::of::<T>()
    }
}

impl PartialEq for ServiceKey {
    fn eq(&self, other: &Self) -> bool {
        self.type_id == other.type_id
    }
}

impl Eq for ServiceKey {}

impl Hash for ServiceKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.type_id.hash(state);
    }
}

impl fmt::Debug for ServiceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ServiceKey").field(&self.type_name).finish()
    }
}

impl fmt::Display for ServiceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_name)
    }
}

/// Caching behavior of a registration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Lifetime {
    /// One instance per descriptor, created on first resolution and shared
    /// by every registry the descriptor is part of
    #[default]
    Singleton,
    /// A new instance per resolution
    Transient,
}

impl fmt::Display for Lifetime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Singleton => f.write_str("singleton"),
            Self::Transient => f.write_str("transient"),
        }
    }
}
