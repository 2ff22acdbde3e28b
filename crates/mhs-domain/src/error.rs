//! Error handling types

use thiserror::Error;

/// Result type alias for operations that can fail
pub type Result<T> = std::result::Result<T, Error>;

/// Boxed source error carried by the contextual variants
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Main error type for the multi-host server layer
///
/// Every failure propagates to the host's startup handling; nothing here is
/// retried. The variants keep the failure kinds distinguishable so callers
/// can tell a broken configuration callback from a missing registration or
/// a call outside the supported contract.
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration-related error (a pipeline callback failed, invalid settings)
    #[error("Configuration error: {message}")]
    Configuration {
        /// Description of the configuration error
        message: String,
        /// Optional source error
        #[source]
        source: Option<BoxError>,
    },

    /// A required service lookup found nothing registered
    #[error("Missing service: {service} is not registered in {scope}")]
    MissingService {
        /// Type name of the requested service
        service: String,
        /// Registry the lookup ran against
        scope: String,
    },

    /// An operation outside the supported contract was invoked
    #[error("Unsupported operation: {operation}")]
    UnsupportedOperation {
        /// The rejected operation
        operation: String,
    },

    /// A server scope was queried before its resolver was built
    #[error("Service scope for server '{server}' has not been built")]
    ScopeNotBuilt {
        /// Server whose scope is not built yet
        server: String,
    },

    /// Two server definitions share a name
    #[error("Server '{name}' is already declared")]
    DuplicateServer {
        /// The duplicated server name
        name: String,
    },

    /// A registered instance could not be produced as the requested type
    #[error("Activation error for {service}: {message}")]
    Activation {
        /// Type name of the service being activated
        service: String,
        /// Description of the activation failure
        message: String,
    },

    /// A hosted service failed while starting or stopping
    #[error("Lifecycle error in {service}: {message}")]
    Lifecycle {
        /// Name of the hosted service
        service: String,
        /// Description of the failure
        message: String,
        /// Optional source error
        #[source]
        source: Option<BoxError>,
    },

    /// I/O operation error
    #[error("I/O error: {message}")]
    Io {
        /// Description of the I/O error
        message: String,
        /// Optional source error
        #[source]
        source: Option<BoxError>,
    },

    /// Internal system error
    #[error("Internal error: {message}")]
    Internal {
        /// Description of the internal error
        message: String,
    },
}

// Configuration error creation methods
impl Error {
    /// Create a configuration error
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        Self::Configuration {
            message: message.into(),
            source: None,
        }
    }

    /// Create a configuration error with source
    pub fn configuration_with_source<S: Into<String>, E: Into<BoxError>>(
        message: S,
        source: E,
    ) -> Self {
        Self::Configuration {
            message: message.into(),
            source: Some(source.into()),
        }
    }
}

// Resolution error creation methods
impl Error {
    /// Create a missing service error
    pub fn missing_service<S: Into<String>, C: Into<String>>(service: S, scope: C) -> Self {
        Self::MissingService {
            service: service.into(),
            scope: scope.into(),
        }
    }

    /// Create an unsupported operation error
    pub fn unsupported<S: Into<String>>(operation: S) -> Self {
        Self::UnsupportedOperation {
            operation: operation.into(),
        }
    }

    /// Create a scope-not-built error
    pub fn scope_not_built<S: Into<String>>(server: S) -> Self {
        Self::ScopeNotBuilt {
            server: server.into(),
        }
    }

    /// Create an activation error
    pub fn activation<S: Into<String>, M: Into<String>>(service: S, message: M) -> Self {
        Self::Activation {
            service: service.into(),
            message: message.into(),
        }
    }
}

// Lifecycle and system error creation methods
impl Error {
    /// Create a lifecycle error
    pub fn lifecycle<S: Into<String>, M: Into<String>>(service: S, message: M) -> Self {
        Self::Lifecycle {
            service: service.into(),
            message: message.into(),
            source: None,
        }
    }

    /// Create a lifecycle error wrapping the failure of a hosted service
    pub fn lifecycle_with_source<S: Into<String>, M: Into<String>, E: Into<BoxError>>(
        service: S,
        message: M,
        source: E,
    ) -> Self {
        Self::Lifecycle {
            service: service.into(),
            message: message.into(),
            source: Some(source.into()),
        }
    }

    /// Create an I/O error
    pub fn io<S: Into<String>>(message: S) -> Self {
        Self::Io {
            message: message.into(),
            source: None,
        }
    }

    /// Create an internal error
    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}

// Classification
impl Error {
    /// A configuration callback or setting failed
    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::Configuration { .. })
    }

    /// A required registration was absent
    pub fn is_missing_service(&self) -> bool {
        matches!(self, Self::MissingService { .. })
    }

    /// The call is outside the supported contract
    pub fn is_unsupported(&self) -> bool {
        matches!(self, Self::UnsupportedOperation { .. })
    }

    /// The server scope was used before it was built
    pub fn is_scope_not_built(&self) -> bool {
        matches!(self, Self::ScopeNotBuilt { .. })
    }
}

impl From<std::io::Error> for Error {
    fn from(source: std::io::Error) -> Self {
        Self::Io {
            message: source.to_string(),
            source: Some(Box::new(source)),
        }
    }
}
