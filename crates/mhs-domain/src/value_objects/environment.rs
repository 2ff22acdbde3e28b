//! Host environment and build context
//!
//! These values are created once by the host builder and shared with every
//! server scope through the forwarded marker registrations.

use crate::constants::{DEVELOPMENT_ENVIRONMENT, PRODUCTION_ENVIRONMENT, STAGING_ENVIRONMENT};
use crate::ports::ConfigurationRoot;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::ops::Deref;
use std::path::PathBuf;
use std::sync::Arc;

/// Information about the environment the host runs in
///
/// # Example
///
/// ```
/// use mhs_domain::value_objects::HostEnvironment;
///
/// let env = HostEnvironment::new("echo-host", "Development", "/srv/echo");
/// assert!(env.is_development());
/// assert!(env.is_environment("development"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostEnvironment {
    /// Name of the application
    pub application_name: String,

    /// Environment name (Development, Staging, Production, ...)
    pub environment_name: String,

    /// Root directory for content files
    pub content_root: PathBuf,
}

impl HostEnvironment {
    /// Create a new host environment
    pub fn new(
        application_name: impl Into<String>,
        environment_name: impl Into<String>,
        content_root: impl Into<PathBuf>,
    ) -> Self {
        Self {
            application_name: application_name.into(),
            environment_name: environment_name.into(),
            content_root: content_root.into(),
        }
    }

    /// Case-insensitive comparison of the environment name
    pub fn is_environment(&self, name: &str) -> bool {
        self.environment_name.eq_ignore_ascii_case(name)
    }

    /// Whether the host runs in the development environment
    pub fn is_development(&self) -> bool {
        self.is_environment(DEVELOPMENT_ENVIRONMENT)
    }

    /// Whether the host runs in the staging environment
    pub fn is_staging(&self) -> bool {
        self.is_environment(STAGING_ENVIRONMENT)
    }

    /// Whether the host runs in the production environment
    pub fn is_production(&self) -> bool {
        self.is_environment(PRODUCTION_ENVIRONMENT)
    }
}

/// Legacy view of the host environment
///
/// Older server code resolves the environment through this type; it is
/// registered as a separate marker pointing at the same environment.
#[derive(Debug, Clone)]
pub struct LegacyHostingEnvironment(Arc<HostEnvironment>);

impl LegacyHostingEnvironment {
    /// Wrap the shared host environment
    pub fn new(environment: Arc<HostEnvironment>) -> Self {
        Self(environment)
    }

    /// The wrapped environment
    pub fn environment(&self) -> &Arc<HostEnvironment> {
        &self.0
    }
}

impl Deref for LegacyHostingEnvironment {
    type Target = HostEnvironment;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// Read-only snapshot handed to configuration callbacks
///
/// Callbacks receive the same context the host was built with; nothing in
/// this type can be mutated once the host builder has created it.
#[derive(Clone)]
pub struct HostBuilderContext {
    environment: Arc<HostEnvironment>,
    configuration: Arc<dyn ConfigurationRoot>,
    properties: Arc<BTreeMap<String, serde_json::Value>>,
}

impl HostBuilderContext {
    /// Create a new build context
    pub fn new(environment: Arc<HostEnvironment>, configuration: Arc<dyn ConfigurationRoot>) -> Self {
        Self {
            environment,
            configuration,
            properties: Arc::new(BTreeMap::new()),
        }
    }

    /// Attach free-form properties shared between callbacks
    pub fn with_properties(mut self, properties: BTreeMap<String, serde_json::Value>) -> Self {
        self.properties = Arc::new(properties);
        self
    }

    /// Host environment
    pub fn environment(&self) -> &Arc<HostEnvironment> {
        &self.environment
    }

    /// Host configuration root
    pub fn configuration(&self) -> &Arc<dyn ConfigurationRoot> {
        &self.configuration
    }

    /// Property by key
    pub fn property(&self, key: &str) -> Option<&serde_json::Value> {
        self.properties.get(key)
    }
}

impl fmt::Debug for HostBuilderContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HostBuilderContext")
            .field("environment", &self.environment)
            .field("properties", &self.properties.keys().collect::<Vec<_>>())
            .finish_non_exhaustive()
    }
}
