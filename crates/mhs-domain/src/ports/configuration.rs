//! Configuration Root Port
//!
//! Read-only view over the merged host configuration. The host registers one
//! root and every server scope sees the same instance through forwarding.

use crate::error::{Error, Result};
use serde::de::DeserializeOwned;

/// Merged host configuration
pub trait ConfigurationRoot: Send + Sync {
    /// Value at a dotted path such as `servers.echo`, `None` when absent
    fn section(&self, path: &str) -> Option<serde_json::Value>;

    /// Top-level keys present in the configuration
    fn keys(&self) -> Vec<String>;
}

impl dyn ConfigurationRoot {
    /// Deserialize the section at `path`
    ///
    /// Returns `Ok(None)` when the section is absent and a configuration
    /// error when it exists but does not match `T`.
    pub fn bind<T: DeserializeOwned>(&self, path: &str) -> Result<Option<T>> {
        self.section(path)
            .map(|value| {
                serde_json::from_value(value).map_err(|e| {
                    Error::configuration_with_source(
                        format!("Failed to bind configuration section '{path}'"),
                        e,
                    )
                })
            })
            .transpose()
    }
}
