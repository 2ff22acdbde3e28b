//! Default framework services
//!
//! Registered in every scope before configuration callbacks run, so a
//! callback can replace any of them.

use crate::di::collection::ServiceCollection;
use crate::di::logger::LoggerFactory;
use crate::di::options::OptionsServiceCollectionExt;
use std::sync::Arc;

/// Register options and logging support for `scope`
pub fn add_framework_services(services: &mut ServiceCollection, scope: &str) {
    services
        .add_options()
        .add_singleton_instance(Arc::new(LoggerFactory::new(scope)));
}
