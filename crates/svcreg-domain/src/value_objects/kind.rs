//! Service Kind Value Object

use crate::constants::{ARTIFACT_KIND, MEMORY_KIND, SESSION_KIND};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Value Object: Service Kind
///
/// Namespace key partitioning the scheme registry (`session`, `memory`,
/// `artifact`, or any caller-defined kind). The set is open; kinds are
/// compared case-insensitively and stored lowercased.
///
/// ## Example
///
/// ```rust
/// use svcreg_domain::value_objects::ServiceKind;
///
/// let kind = ServiceKind::new("Session");
/// assert_eq!(kind, ServiceKind::session());
/// assert_eq!(kind.as_str(), "session");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct ServiceKind(String);

impl ServiceKind {
    /// Create a kind, normalizing it to lowercase
    pub fn new(kind: impl AsRef<str>) -> Self {
        Self(kind.as_ref().trim().to_ascii_lowercase())
    }

    /// The session service kind
    pub fn session() -> Self {
        Self(SESSION_KIND.to_string())
    }

    /// The memory service kind
    pub fn memory() -> Self {
        Self(MEMORY_KIND.to_string())
    }

    /// The artifact service kind
    pub fn artifact() -> Self {
        Self(ARTIFACT_KIND.to_string())
    }

    /// Kind name as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ServiceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ServiceKind {
    fn from(kind: &str) -> Self {
        Self::new(kind)
    }
}

impl From<String> for ServiceKind {
    fn from(kind: String) -> Self {
        Self::new(kind)
    }
}

impl From<ServiceKind> for String {
    fn from(kind: ServiceKind) -> Self {
        kind.0
    }
}

impl AsRef<str> for ServiceKind {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
