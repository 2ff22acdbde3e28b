//! Configuration pipeline
//!
//! Registration callbacks queued by `configure_services` calls. Callbacks
//! accumulate across calls and are replayed once, in queue order, against
//! the registry being built. The first failing callback aborts the replay.

use crate::di::collection::ServiceCollection;
use mhs_domain::error::{Error, Result};
use mhs_domain::value_objects::HostBuilderContext;
use std::fmt;
use tracing::{debug, error};

/// One queued registration callback
pub type ConfigureServicesAction =
    Box<dyn FnOnce(&HostBuilderContext, &mut ServiceCollection) -> anyhow::Result<()> + Send>;

/// Ordered queue of registration callbacks
#[derive(Default)]
pub struct ConfigurePipeline {
    actions: Vec<ConfigureServicesAction>,
}

impl ConfigurePipeline {
    /// Create an empty pipeline
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a callback after every callback queued so far
    pub fn push<F>(&mut self, action: F)
    where
        F: FnOnce(&HostBuilderContext, &mut ServiceCollection) -> anyhow::Result<()>
            + Send
            + 'static,
    {
        self.actions.push(Box::new(action));
    }

    /// Number of queued callbacks
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    /// Whether no callback is queued
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Run every callback in queue order, consuming the pipeline
    ///
    /// A failing callback is reported as a configuration error naming the
    /// scope and the callback's position; later callbacks do not run.
    pub fn replay(
        self,
        scope: &str,
        context: &HostBuilderContext,
        services: &mut ServiceCollection,
    ) -> Result<()> {
        let total = self.actions.len();
        for (index, action) in self.actions.into_iter().enumerate() {
            debug!(scope = %scope, callback = index, total, "Replaying configure callback");
            action(context, services).map_err(|e| {
                error!(scope = %scope, callback = index, error = %e, "Configure callback failed");
                Error::configuration_with_source(
                    format!("Configure callback {index} of scope '{scope}' failed"),
                    e,
                )
            })?;
        }
        Ok(())
    }
}

impl fmt::Debug for ConfigurePipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConfigurePipeline")
            .field("actions", &self.actions.len())
            .finish()
    }
}
