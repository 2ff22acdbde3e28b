//! Marker types forwarded from the host registry
//!
//! Only the services listed here cross from the host registry into a server
//! scope. The set is closed: adding a marker means adding a variant.

use crate::ports::{ApplicationLifetime, ConfigurationRoot, Host, HostLifetime};
use crate::value_objects::environment::{
    HostBuilderContext, HostEnvironment, LegacyHostingEnvironment,
};
use crate::value_objects::service_key::ServiceKey;
use std::fmt;

/// Host service eligible for forwarding into a server scope
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MarkerType {
    /// [`HostEnvironment`]
    HostEnvironment,
    /// [`LegacyHostingEnvironment`]
    LegacyHostingEnvironment,
    /// [`HostBuilderContext`]
    BuildContext,
    /// `dyn` [`ConfigurationRoot`]
    Configuration,
    /// `dyn` [`ApplicationLifetime`]
    ApplicationLifetime,
    /// `dyn` [`HostLifetime`]
    HostLifetime,
    /// `dyn` [`Host`]
    Host,
}

impl MarkerType {
    /// Every marker, in forwarding order
    pub const ALL: [MarkerType; 7] = [
        MarkerType::HostEnvironment,
        MarkerType::LegacyHostingEnvironment,
        MarkerType::BuildContext,
        MarkerType::Configuration,
        MarkerType::ApplicationLifetime,
        MarkerType::HostLifetime,
        MarkerType::Host,
    ];

    /// Registry key of the marked service type
    pub fn key(self) -> ServiceKey {
        match self {
            Self::HostEnvironment => ServiceKey::of::<HostEnvironment>(),
            Self::LegacyHostingEnvironment => ServiceKey::of::<LegacyHostingEnvironment>(),
            Self::BuildContext => ServiceKey::of::<HostBuilderContext>(),
            Self::Configuration => ServiceKey::of::<dyn ConfigurationRoot>(),
            Self::ApplicationLifetime => ServiceKey::of::<dyn ApplicationLifetime>(),
            Self::HostLifetime => ServiceKey::of::<dyn HostLifetime>(),
            Self::Host => ServiceKey::of::<dyn Host>(),
        }
    }

    /// Marker for a registry key, if the key is one
    pub fn from_key(key: &ServiceKey) -> Option<Self> {
        Self::ALL.into_iter().find(|marker| marker.key() == *key)
    }

    /// Short name used in logs
    pub fn as_str(self) -> &'static str {
        match self {
            Self::HostEnvironment => "host_environment",
            Self::LegacyHostingEnvironment => "legacy_hosting_environment",
            Self::BuildContext => "build_context",
            Self::Configuration => "configuration",
            Self::ApplicationLifetime => "application_lifetime",
            Self::HostLifetime => "host_lifetime",
            Self::Host => "host",
        }
    }
}

impl fmt::Display for MarkerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
