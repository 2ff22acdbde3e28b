//! Resolver Tests
//!
//! Registration and lookup through the public registry API.

use mhs_domain::Lifetime;
use mhs_domain::error::Result;
use mhs_infrastructure::di::{
    DefaultServiceProviderFactory, FromServices, ServiceCollection, ServiceDescriptor,
    ServiceProvider, ServiceProviderFactory,
};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

trait Codec: Send + Sync {
    fn name(&self) -> &'static str;
}

struct LineCodec;

impl Codec for LineCodec {
    fn name(&self) -> &'static str {
        "line"
    }
}

struct FrameCodec;

impl Codec for FrameCodec {
    fn name(&self) -> &'static str {
        "frame"
    }
}

struct Pipeline {
    codec: Arc<dyn Codec>,
}

impl FromServices for Pipeline {
    fn from_services(services: &ServiceProvider) -> Result<Self> {
        Ok(Self {
            codec: services.get_required_service::<dyn Codec>()?,
        })
    }
}

#[test]
fn test_trait_registrations_last_wins() {
    let mut services = ServiceCollection::new();
    services
        .add_singleton_instance::<dyn Codec>(Arc::new(LineCodec))
        .add_singleton_instance::<dyn Codec>(Arc::new(FrameCodec));
    let provider = ServiceProvider::new("test", services);

    let codec = provider
        .get_required_service::<dyn Codec>()
        .expect("resolve failed");
    assert_eq!(codec.name(), "frame");

    let names: Vec<_> = provider
        .get_services::<dyn Codec>()
        .expect("resolve failed")
        .iter()
        .map(|codec| codec.name())
        .collect();
    assert_eq!(names, vec!["line", "frame"]);
}

#[test]
fn test_try_add_keeps_first_registration() {
    let mut services = ServiceCollection::new();
    assert!(services.try_add(Arc::new(ServiceDescriptor::instance::<dyn Codec>(Arc::new(
        LineCodec
    )))));
    assert!(!services.try_add(Arc::new(ServiceDescriptor::instance::<dyn Codec>(Arc::new(
        FrameCodec
    )))));
    assert_eq!(services.len(), 1);
}

#[test]
fn test_constructor_injection() {
    let mut services = ServiceCollection::new();
    services
        .add_singleton_instance::<dyn Codec>(Arc::new(LineCodec))
        .add_transient_from_services::<Pipeline>();
    let provider = ServiceProvider::new("test", services);

    let first = provider
        .get_required_service::<Pipeline>()
        .expect("resolve failed");
    let second = provider
        .get_required_service::<Pipeline>()
        .expect("resolve failed");
    assert!(!Arc::ptr_eq(&first, &second));
    assert!(Arc::ptr_eq(&first.codec, &second.codec));
    assert_eq!(first.codec.name(), "line");
}

#[test]
fn test_transient_factory_runs_per_lookup() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    let mut services = ServiceCollection::new();
    services.add_transient::<usize, _>(move |_| Ok(Arc::new(counter.fetch_add(1, Ordering::SeqCst))));
    let descriptor_lifetime = services
        .iter()
        .next()
        .map(|descriptor| descriptor.lifetime());
    let provider = ServiceProvider::new("test", services);

    for expected in 0..3 {
        assert_eq!(
            *provider.get_required_service::<usize>().expect("resolve failed"),
            expected
        );
    }
    assert_eq!(calls.load(Ordering::SeqCst), 3);
    assert_eq!(descriptor_lifetime, Some(Lifetime::Transient));
}

#[test]
fn test_validating_factory_surfaces_activation_errors() {
    let mut services = ServiceCollection::new();
    services.add_singleton_from_services::<Pipeline>();

    let lazy = DefaultServiceProviderFactory::new(false)
        .create_service_provider("lazy", services.clone());
    assert!(lazy.is_ok());

    let error = DefaultServiceProviderFactory::new(true)
        .create_service_provider("eager", services)
        .err()
        .expect("validation should fail");
    assert!(error.is_configuration());
}
