//! Constructor injection without reflection
//!
//! Types that can build themselves from a resolver implement
//! [`FromServices`]; the registration helpers and hosted-service
//! declarations use it in place of a hand-written factory.

use crate::di::provider::ServiceProvider;
use mhs_domain::error::Result;

/// Build a value from the services registered in a resolver
///
/// # Example
///
/// ```
/// use mhs_infrastructure::di::{FromServices, ServiceCollection, ServiceProvider};
/// use std::sync::Arc;
///
/// struct Greeting(String);
///
/// struct Greeter {
///     greeting: Arc<Greeting>,
/// }
///
/// impl FromServices for Greeter {
///     fn from_services(services: &ServiceProvider) -> mhs_domain::Result<Self> {
///         Ok(Self {
///             greeting: services.get_required_service::<Greeting>()?,
///         })
///     }
/// }
///
/// let mut services = ServiceCollection::new();
/// services
///     .add_singleton_instance(Arc::new(Greeting("hello".into())))
///     .add_singleton_from_services::<Greeter>();
///
/// let provider = ServiceProvider::new("docs", services);
/// let greeter = provider.get_required_service::<Greeter>().unwrap();
/// assert_eq!(greeter.greeting.0, "hello");
/// ```
pub trait FromServices: Sized {
    /// Construct the value, resolving its dependencies from `services`
    fn from_services(services: &ServiceProvider) -> Result<Self>;
}
