//! Marker forwarding
//!
//! Copies the host registrations listed in [`MarkerType::ALL`] into a server
//! scope. The descriptor itself is relocated, not re-created, so a marker
//! resolved from the scope is the same object the host registry hands out.
//!
//! ```text
//! host registry                      server scope
//! ─────────────                      ────────────
//! HostEnvironment      ──(Arc)──▶    HostEnvironment
//! dyn ConfigurationRoot ─(Arc)──▶    dyn ConfigurationRoot
//! LoggerFactory (host)    ✗          (not a marker, never forwarded)
//! ```
//!
//! A marker registered through a factory is activated against the host
//! registry before it is forwarded, so its dependencies always come from
//! host services and never from the scope that resolves it first.

use crate::di::collection::ServiceCollection;
use crate::di::provider::ServiceProvider;
use mhs_domain::constants::HOST_SCOPE_NAME;
use mhs_domain::error::{Error, Result};
use mhs_domain::value_objects::{Lifetime, MarkerType};
use std::sync::Arc;
use tracing::{debug, trace};

/// Activate the forwardable marker singletons against the host registry
///
/// Only the first host descriptor of each marker is considered, the one
/// [`forward_marker_services`] hands out. Already activated descriptors are
/// left alone, so calling this once per server is cheap.
///
/// # Errors
///
/// `Configuration` when a marker is registered as transient (it could not
/// keep its identity across registries) or when its factory fails.
pub fn activate_marker_services(server: &str, host_services: &ServiceCollection) -> Result<()> {
    let mut pending = Vec::new();
    for marker in MarkerType::ALL {
        let Some(descriptor) = host_services.first(&marker.key()) else {
            continue;
        };
        if descriptor.lifetime() == Lifetime::Transient {
            return Err(Error::configuration(format!(
                "Host service {marker} is registered as transient and cannot be shared with server '{server}'"
            )));
        }
        if !descriptor.is_activated() {
            pending.push((marker, Arc::clone(descriptor)));
        }
    }
    if pending.is_empty() {
        return Ok(());
    }

    let host = ServiceProvider::new(HOST_SCOPE_NAME, host_services.clone());
    for (marker, descriptor) in pending {
        descriptor.activate(&host).map_err(|e| {
            Error::configuration_with_source(format!("Failed to activate host service {marker}"), e)
        })?;
        debug!(server = %server, marker = %marker, "Activated host service against host registry");
    }
    Ok(())
}

/// Forward every marker registered in `host_services` into `services`
///
/// For each marker the first host descriptor of that type is appended;
/// absent markers are skipped. Returns the forwarded markers in order.
pub fn forward_marker_services(
    server: &str,
    host_services: &ServiceCollection,
    services: &mut ServiceCollection,
) -> Vec<MarkerType> {
    let mut forwarded = Vec::with_capacity(MarkerType::ALL.len());

    for marker in MarkerType::ALL {
        match host_services.first(&marker.key()) {
            Some(descriptor) => {
                services.add(Arc::clone(descriptor));
                forwarded.push(marker);
                trace!(server = %server, marker = %marker, "Forwarded host service");
            }
            None => trace!(server = %server, marker = %marker, "Host service absent, skipped"),
        }
    }

    debug!(
        server = %server,
        forwarded = forwarded.len(),
        "Forwarded host services into server scope"
    );
    forwarded
}
