//! Unit tests for host environment value objects

use mhs_domain::ports::ConfigurationRoot;
use mhs_domain::{HostBuilderContext, HostEnvironment, LegacyHostingEnvironment};
use std::collections::BTreeMap;
use std::sync::Arc;

struct EmptyConfiguration;

impl ConfigurationRoot for EmptyConfiguration {
    fn section(&self, _path: &str) -> Option<serde_json::Value> {
        None
    }

    fn keys(&self) -> Vec<String> {
        Vec::new()
    }
}

#[test]
fn test_environment_name_checks() {
    let env = HostEnvironment::new("app", "Staging", ".");
    assert!(env.is_staging());
    assert!(!env.is_production());
    assert!(env.is_environment("STAGING"));
}

#[test]
fn test_legacy_environment_shares_instance() {
    let env = Arc::new(HostEnvironment::new("app", "Production", "/srv"));
    let legacy = LegacyHostingEnvironment::new(env.clone());

    assert!(Arc::ptr_eq(legacy.environment(), &env));
    assert_eq!(legacy.application_name, "app");
}

#[test]
fn test_context_exposes_shared_values() {
    let env = Arc::new(HostEnvironment::new("app", "Development", "."));
    let configuration: Arc<dyn ConfigurationRoot> = Arc::new(EmptyConfiguration);
    let mut properties = BTreeMap::new();
    properties.insert("region".to_string(), serde_json::json!("eu"));

    let context =
        HostBuilderContext::new(env.clone(), configuration.clone()).with_properties(properties);
    let cloned = context.clone();

    assert!(Arc::ptr_eq(cloned.environment(), &env));
    assert!(Arc::ptr_eq(cloned.configuration(), &configuration));
    assert_eq!(cloned.property("region"), Some(&serde_json::json!("eu")));
    assert_eq!(cloned.property("zone"), None);
}
