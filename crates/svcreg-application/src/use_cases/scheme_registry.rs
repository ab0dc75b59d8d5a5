//! Scheme Registry
//!
//! Runtime dispatch table from `(kind, scheme)` to a constructor.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;
use svcreg_domain::value_objects::ServiceKind;
use tracing::{debug, info};

use crate::ports::registry::{ConstructorFn, SERVICE_SCHEMES};

/// Listing row for a registered scheme
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemeInfo {
    /// Service kind
    pub kind: ServiceKind,
    /// Scheme token
    pub scheme: String,
    /// Description, present for compiled-in schemes
    pub description: Option<String>,
}

#[derive(Clone)]
struct Slot {
    constructor: ConstructorFn,
    description: Option<String>,
}

/// Process-scoped mutable scheme table
///
/// Holds at most one constructor per `(kind, scheme)` pair: registering an
/// existing pair replaces its constructor. Lookups take a shared lock and
/// registrations an exclusive one, so late plugin registration may run
/// concurrently with resolution. Kinds and schemes are matched
/// case-insensitively.
pub struct SchemeRegistry {
    slots: RwLock<HashMap<(ServiceKind, String), Slot>>,
}

impl SchemeRegistry {
    /// Create a registry with no schemes
    pub fn empty() -> Self {
        Self {
            slots: RwLock::new(HashMap::new()),
        }
    }

    /// Create a registry seeded with every compiled-in scheme
    pub fn with_builtins() -> Self {
        let registry = Self::empty();
        {
            let mut slots = registry.slots.write();
            for entry in SERVICE_SCHEMES {
                let factory = entry.factory;
                slots.insert(
                    (ServiceKind::new(entry.kind), normalize_scheme(entry.scheme)),
                    Slot {
                        constructor: Arc::new(factory),
                        description: Some(entry.description.to_string()),
                    },
                );
            }
            debug!(schemes = slots.len(), "Scheme registry seeded with builtins");
        }
        registry
    }

    /// Insert or replace the constructor for `(kind, scheme)`
    pub fn register(&self, kind: impl Into<ServiceKind>, scheme: &str, constructor: ConstructorFn) {
        let kind = kind.into();
        let scheme = normalize_scheme(scheme);
        let replaced = self
            .slots
            .write()
            .insert(
                (kind.clone(), scheme.clone()),
                Slot {
                    constructor,
                    description: None,
                },
            )
            .is_some();
        info!(kind = %kind, scheme = %scheme, replaced, "Registered service scheme");
    }

    /// Constructor registered for `(kind, scheme)`
    ///
    /// The returned handle is detached from the registry lock.
    pub fn lookup(&self, kind: &ServiceKind, scheme: &str) -> Option<ConstructorFn> {
        let key = (kind.clone(), normalize_scheme(scheme));
        self.slots.read().get(&key).map(|slot| slot.constructor.clone())
    }

    /// Whether `(kind, scheme)` is registered
    pub fn contains(&self, kind: &ServiceKind, scheme: &str) -> bool {
        let key = (kind.clone(), normalize_scheme(scheme));
        self.slots.read().contains_key(&key)
    }

    /// Schemes registered for a kind, sorted
    pub fn schemes(&self, kind: &ServiceKind) -> Vec<String> {
        let mut schemes: Vec<String> = self
            .slots
            .read()
            .keys()
            .filter(|(k, _)| k == kind)
            .map(|(_, scheme)| scheme.clone())
            .collect();
        schemes.sort_unstable();
        schemes
    }

    /// Kinds that have at least one scheme, sorted
    pub fn kinds(&self) -> Vec<ServiceKind> {
        let mut kinds: Vec<ServiceKind> = self.slots.read().keys().map(|(k, _)| k.clone()).collect();
        kinds.sort_unstable();
        kinds.dedup();
        kinds
    }

    /// Every registered scheme, sorted by kind then scheme
    pub fn entries(&self) -> Vec<SchemeInfo> {
        let mut entries: Vec<SchemeInfo> = self
            .slots
            .read()
            .iter()
            .map(|((kind, scheme), slot)| SchemeInfo {
                kind: kind.clone(),
                scheme: scheme.clone(),
                description: slot.description.clone(),
            })
            .collect();
        entries.sort_unstable_by(|a, b| (&a.kind, &a.scheme).cmp(&(&b.kind, &b.scheme)));
        entries
    }

    /// Number of registered `(kind, scheme)` pairs
    pub fn len(&self) -> usize {
        self.slots.read().len()
    }

    /// Whether nothing is registered
    pub fn is_empty(&self) -> bool {
        self.slots.read().is_empty()
    }
}

impl Default for SchemeRegistry {
    fn default() -> Self {
        Self::with_builtins()
    }
}

impl fmt::Debug for SchemeRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SchemeRegistry")
            .field("schemes", &self.len())
            .finish()
    }
}

fn normalize_scheme(scheme: &str) -> String {
    scheme.trim().to_ascii_lowercase()
}
