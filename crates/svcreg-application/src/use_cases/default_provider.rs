//! Default Provider
//!
//! Pre-built in-process instances handed out when a kind is resolved without
//! an identifier.

use std::collections::HashMap;

use svcreg_domain::constants::INMEMORY_SCHEME;
use svcreg_domain::value_objects::{ParsedDescriptor, ServiceInstance, ServiceKind};
use tracing::{debug, warn};

use super::scheme_registry::SchemeRegistry;
use crate::ports::registry::construct;

/// One shared default instance per kind
///
/// Every call for the same kind returns a clone of the same handle.
#[derive(Debug, Clone, Default)]
pub struct DefaultProvider {
    defaults: HashMap<ServiceKind, ServiceInstance>,
}

impl DefaultProvider {
    /// Provider with no defaults
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a default for every kind that has an `inmemory` scheme
    ///
    /// Kinds whose in-memory constructor fails are left without a default.
    pub fn from_registry(registry: &SchemeRegistry) -> Self {
        let mut provider = Self::empty();
        let Ok(descriptor) = ParsedDescriptor::parse(&format!("{INMEMORY_SCHEME}://")) else {
            return provider;
        };

        for kind in registry.kinds() {
            let Some(ctor) = registry.lookup(&kind, INMEMORY_SCHEME) else {
                continue;
            };
            match construct(INMEMORY_SCHEME, &ctor, &descriptor) {
                Ok(instance) => {
                    debug!(kind = %kind, "Built default service");
                    provider
                        .defaults
                        .insert(kind, instance.with_label(INMEMORY_SCHEME));
                }
                Err(e) => warn!(kind = %kind, error = %e, "Default service unavailable"),
            }
        }
        provider
    }

    /// Set or replace the default for a kind
    pub fn with_default(mut self, kind: impl Into<ServiceKind>, instance: ServiceInstance) -> Self {
        self.defaults.insert(kind.into(), instance);
        self
    }

    /// Default instance for a kind, `None` for kinds without one
    pub fn default_for(&self, kind: &ServiceKind) -> Option<ServiceInstance> {
        self.defaults.get(kind).cloned()
    }

    /// Kinds that have a default, sorted
    pub fn kinds(&self) -> Vec<ServiceKind> {
        let mut kinds: Vec<ServiceKind> = self.defaults.keys().cloned().collect();
        kinds.sort_unstable();
        kinds
    }
}
