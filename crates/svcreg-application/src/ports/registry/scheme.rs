//! Service Scheme Registry Entries
//!
//! Compile-time registration of scheme constructors.
//! Providers submit entries through the `SERVICE_SCHEMES` distributed slice;
//! the runtime [`SchemeRegistry`](crate::use_cases::SchemeRegistry) is seeded
//! from it when created with builtins.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use svcreg_domain::error::{Error, Result};
use svcreg_domain::value_objects::{ParsedDescriptor, QueryParams, ServiceInstance};

/// Boxed constructor stored by the scheme registry
///
/// Receives the parsed identifier and its query parameters (string-valued
/// keyword arguments) and returns the constructed instance.
pub type ConstructorFn =
    Arc<dyn Fn(&ParsedDescriptor, &QueryParams) -> Result<ServiceInstance> + Send + Sync>;

/// Box a closure as a [`ConstructorFn`]
pub fn constructor<F>(f: F) -> ConstructorFn
where
    F: Fn(&ParsedDescriptor, &QueryParams) -> Result<ServiceInstance> + Send + Sync + 'static,
{
    Arc::new(f)
}

/// Registry entry for a built-in scheme
///
/// Each provider registers itself with this entry using
/// `#[linkme::distributed_slice(SERVICE_SCHEMES)]`.
pub struct SchemeEntry {
    /// Service kind the scheme belongs to (e.g., "session", "artifact")
    pub kind: &'static str,
    /// Scheme token (e.g., "inmemory", "file")
    pub scheme: &'static str,
    /// Human-readable description
    pub description: &'static str,
    /// Factory function to create the service instance
    pub factory: fn(&ParsedDescriptor, &QueryParams) -> Result<ServiceInstance>,
}

// Auto-collection via linkme distributed slices - providers submit entries at compile time
#[linkme::distributed_slice]
pub static SERVICE_SCHEMES: [SchemeEntry] = [..];

/// List all compiled-in schemes
///
/// Returns `(kind, scheme, description)` tuples sorted by kind then scheme.
/// Useful for CLI help.
pub fn list_service_schemes() -> Vec<(&'static str, &'static str, &'static str)> {
    let mut schemes: Vec<_> = SERVICE_SCHEMES
        .iter()
        .map(|e| (e.kind, e.scheme, e.description))
        .collect();
    schemes.sort_unstable_by(|a, b| (a.0, a.1).cmp(&(b.0, b.1)));
    schemes
}

/// Invoke a constructor, classifying any error it returns
///
/// Errors already classified as `InstantiationFailure` pass through; anything
/// else is wrapped with `target` so the original cause stays reachable.
/// A panicking constructor is reported as `InstantiationFailure` too.
pub fn construct(
    target: &str,
    constructor: &ConstructorFn,
    descriptor: &ParsedDescriptor,
) -> Result<ServiceInstance> {
    let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
        constructor(descriptor, &descriptor.query)
    }));
    match outcome {
        Ok(Ok(instance)) => Ok(instance),
        Ok(Err(err @ Error::InstantiationFailure { .. })) => Err(err),
        Ok(Err(err)) => Err(Error::instantiation_with_source(target, err)),
        Err(payload) => Err(Error::instantiation(
            target,
            format!("constructor panicked: {}", panic_message(payload.as_ref())),
        )),
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    payload
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("non-string panic payload")
}
