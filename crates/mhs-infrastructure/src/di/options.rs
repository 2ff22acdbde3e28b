//! Options support
//!
//! Binds configuration sections to typed values. The [`OptionsFactory`]
//! reads from the forwarded configuration root, so every server scope sees
//! the host's configuration without owning a copy of it.

use crate::di::activation::FromServices;
use crate::di::collection::ServiceCollection;
use crate::di::provider::ServiceProvider;
use mhs_domain::error::Result;
use mhs_domain::ports::ConfigurationRoot;
use serde::de::DeserializeOwned;
use std::fmt;
use std::ops::Deref;
use std::sync::Arc;

/// Typed configuration section
#[derive(Debug, Clone, PartialEq)]
pub struct Options<T> {
    section: String,
    value: T,
}

impl<T> Options<T> {
    /// Wrap a bound value
    pub fn new(section: impl Into<String>, value: T) -> Self {
        Self {
            section: section.into(),
            value,
        }
    }

    /// Section path the value was bound from
    pub fn section(&self) -> &str {
        &self.section
    }

    /// The bound value
    pub fn value(&self) -> &T {
        &self.value
    }
}

impl<T> Deref for Options<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.value
    }
}

/// Creates [`Options`] from the configuration root
#[derive(Clone, Default)]
pub struct OptionsFactory {
    configuration: Option<Arc<dyn ConfigurationRoot>>,
}

impl OptionsFactory {
    /// Create a factory over an optional configuration root
    pub fn new(configuration: Option<Arc<dyn ConfigurationRoot>>) -> Self {
        Self { configuration }
    }

    /// Bind `section`, falling back to `T::default()` when it is absent
    pub fn create<T>(&self, section: &str) -> Result<Options<T>>
    where
        T: DeserializeOwned + Default,
    {
        let value = match &self.configuration {
            Some(root) => root.bind::<T>(section)?.unwrap_or_default(),
            None => T::default(),
        };
        Ok(Options::new(section, value))
    }
}

impl FromServices for OptionsFactory {
    fn from_services(services: &ServiceProvider) -> Result<Self> {
        Ok(Self::new(services.get_service::<dyn ConfigurationRoot>()?))
    }
}

impl fmt::Debug for OptionsFactory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OptionsFactory")
            .field("configured", &self.configuration.is_some())
            .finish()
    }
}

/// Options registration helpers
pub trait OptionsServiceCollectionExt {
    /// Register the [`OptionsFactory`]
    fn add_options(&mut self) -> &mut Self;

    /// Register `Options<T>` bound from `section`
    fn configure_options<T>(&mut self, section: &str) -> &mut Self
    where
        T: DeserializeOwned + Default + Send + Sync + 'static;
}

impl OptionsServiceCollectionExt for ServiceCollection {
    fn add_options(&mut self) -> &mut Self {
        self.add_singleton_from_services::<OptionsFactory>()
    }

    fn configure_options<T>(&mut self, section: &str) -> &mut Self
    where
        T: DeserializeOwned + Default + Send + Sync + 'static,
    {
        let section = section.to_string();
        self.add_singleton::<Options<T>, _>(move |services| {
            let factory = services.get_required_service::<OptionsFactory>()?;
            factory.create::<T>(&section).map(Arc::new)
        })
    }
}
