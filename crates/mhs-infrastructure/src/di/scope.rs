//! Isolated server scope
//!
//! Handle to one server's resolver, shared between the builder that
//! completes it and the bridges that fetch from it. The state only moves
//! forward:
//!
//! ```text
//! NotBuilt ──complete()──▶ Built(provider)
//!     │                        │
//!  fetch: ScopeNotBuilt     fetch: resolve from provider
//! ```

use crate::di::provider::ServiceProvider;
use mhs_domain::error::{Error, Result};
use std::sync::{Arc, RwLock};
use tracing::debug;

#[derive(Debug)]
enum ScopeState {
    NotBuilt,
    Built(Arc<ServiceProvider>),
}

/// Per-server resolver slot
#[derive(Debug)]
pub struct IsolatedScope {
    server: String,
    state: RwLock<ScopeState>,
}

impl IsolatedScope {
    /// Create an unbuilt scope for `server`
    pub fn new(server: impl Into<String>) -> Self {
        Self {
            server: server.into(),
            state: RwLock::new(ScopeState::NotBuilt),
        }
    }

    /// Name of the owning server
    pub fn server_name(&self) -> &str {
        &self.server
    }

    /// Whether the resolver has been built
    pub fn is_built(&self) -> bool {
        self.state
            .read()
            .map(|state| matches!(*state, ScopeState::Built(_)))
            .unwrap_or(false)
    }

    /// The built resolver
    ///
    /// # Errors
    ///
    /// Returns [`Error::ScopeNotBuilt`] while the scope is unbuilt.
    pub fn provider(&self) -> Result<Arc<ServiceProvider>> {
        let state = self
            .state
            .read()
            .map_err(|_| Error::internal(format!("Scope lock for '{}' poisoned", self.server)))?;
        match &*state {
            ScopeState::Built(provider) => Ok(Arc::clone(provider)),
            ScopeState::NotBuilt => Err(Error::scope_not_built(&self.server)),
        }
    }

    /// Fetch a registered service from the built resolver
    ///
    /// The lock is released before resolution, so the service's factory may
    /// itself look the scope up.
    pub fn fetch<T>(&self) -> Result<Arc<T>>
    where
        T: ?Sized + 'static,
    {
        self.provider()?.get_required_service::<T>()
    }

    /// Move the scope to `Built`; a second completion is rejected
    pub(crate) fn complete(&self, provider: Arc<ServiceProvider>) -> Result<()> {
        let mut state = self
            .state
            .write()
            .map_err(|_| Error::internal(format!("Scope lock for '{}' poisoned", self.server)))?;
        if matches!(*state, ScopeState::Built(_)) {
            return Err(Error::unsupported(format!(
                "Rebuilding the service scope of server '{}'",
                self.server
            )));
        }
        debug!(server = %self.server, services = provider.len(), "Server scope built");
        *state = ScopeState::Built(provider);
        Ok(())
    }
}
