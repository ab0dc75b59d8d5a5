//! Service identifier configuration

use std::collections::BTreeMap;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use svcreg_domain::constants::{ARTIFACT_KIND, MEMORY_KIND, SESSION_KIND};

use crate::constants::DEFAULT_RESOLVE_TIMEOUT_SECS;

/// Identifier configured for each service kind
///
/// An unset kind resolves to its default provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServicesConfig {
    /// Session service identifier
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session: Option<String>,

    /// Memory service identifier
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memory: Option<String>,

    /// Artifact service identifier
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artifact: Option<String>,

    /// Identifiers for caller-defined kinds, keyed by kind
    #[serde(default)]
    pub extra: BTreeMap<String, String>,

    /// Upper bound for resolving one service, in seconds
    #[serde(default = "default_resolve_timeout_secs")]
    pub resolve_timeout_secs: u64,
}

fn default_resolve_timeout_secs() -> u64 {
    DEFAULT_RESOLVE_TIMEOUT_SECS
}

impl ServicesConfig {
    /// Per-service resolution timeout
    pub fn resolve_timeout(&self) -> Duration {
        Duration::from_secs(self.resolve_timeout_secs)
    }

    /// Every kind to resolve with its identifier, well-known kinds first
    ///
    /// Well-known kinds are always listed; `extra` kinds follow in key order.
    pub fn identifiers(&self) -> Vec<(String, Option<String>)> {
        let mut identifiers = vec![
            (SESSION_KIND.to_string(), self.session.clone()),
            (MEMORY_KIND.to_string(), self.memory.clone()),
            (ARTIFACT_KIND.to_string(), self.artifact.clone()),
        ];
        identifiers.extend(
            self.extra
                .iter()
                .map(|(kind, identifier)| (kind.clone(), Some(identifier.clone()))),
        );
        identifiers
    }
}

impl Default for ServicesConfig {
    fn default() -> Self {
        Self {
            session: None,
            memory: None,
            artifact: None,
            extra: BTreeMap::new(),
            resolve_timeout_secs: DEFAULT_RESOLVE_TIMEOUT_SECS,
        }
    }
}
