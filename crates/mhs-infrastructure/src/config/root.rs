//! Configuration roots
//!
//! Implementations of the [`ConfigurationRoot`] port. The host registers one
//! of these as the configuration marker; server scopes read their sections
//! from it through forwarding.

use figment::Figment;
use mhs_domain::ports::ConfigurationRoot;
use serde_json::Value;
use std::fmt;

/// Configuration root over a merged [`Figment`]
#[derive(Clone)]
pub struct FigmentConfiguration {
    figment: Figment,
}

impl FigmentConfiguration {
    /// Wrap a merged figment
    pub fn new(figment: Figment) -> Self {
        Self { figment }
    }

    /// The underlying figment
    pub fn figment(&self) -> &Figment {
        &self.figment
    }
}

impl ConfigurationRoot for FigmentConfiguration {
    fn section(&self, path: &str) -> Option<Value> {
        self.figment.extract_inner::<Value>(path).ok()
    }

    fn keys(&self) -> Vec<String> {
        self.figment
            .extract::<serde_json::Map<String, Value>>()
            .map(|map| map.into_iter().map(|(key, _)| key).collect())
            .unwrap_or_default()
    }
}

impl fmt::Debug for FigmentConfiguration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FigmentConfiguration")
            .field("keys", &self.keys())
            .finish()
    }
}

/// Configuration root over an in-memory JSON document
#[derive(Debug, Clone, PartialEq)]
pub struct JsonConfiguration {
    root: Value,
}

impl JsonConfiguration {
    /// Wrap a JSON document
    pub fn new(root: Value) -> Self {
        Self { root }
    }

    /// Configuration with no sections
    pub fn empty() -> Self {
        Self::new(Value::Object(serde_json::Map::new()))
    }
}

impl Default for JsonConfiguration {
    fn default() -> Self {
        Self::empty()
    }
}

impl ConfigurationRoot for JsonConfiguration {
    fn section(&self, path: &str) -> Option<Value> {
        if path.is_empty() {
            return Some(self.root.clone());
        }
        path.split('.')
            .try_fold(&self.root, |value, key| value.get(key))
            .cloned()
    }

    fn keys(&self) -> Vec<String> {
        self.root
            .as_object()
            .map(|map| map.keys().cloned().collect())
            .unwrap_or_default()
    }
}
