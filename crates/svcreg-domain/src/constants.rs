//! Domain layer constants
//!
//! Contains constants that are part of the identifier grammar and the
//! well-known service kinds. Infrastructure-specific constants remain in
//! `svcreg_infrastructure::constants`.

// ============================================================================
// IDENTIFIER GRAMMAR CONSTANTS
// ============================================================================

/// Scheme of the dynamic-import identifier form (`python:module[:attribute]`)
pub const DYNAMIC_IMPORT_SCHEME: &str = "python";

/// Separator between module path and attribute name in a dynamic-import target
pub const IMPORT_ATTRIBUTE_SEPARATOR: char = ':';

/// Separator between module path segments
pub const MODULE_PATH_SEPARATOR: char = '.';

/// Scheme of the built-in in-process services
pub const INMEMORY_SCHEME: &str = "inmemory";

/// Scheme of the local filesystem artifact store
pub const FILE_SCHEME: &str = "file";

// ============================================================================
// SERVICE KIND CONSTANTS
// ============================================================================

/// Session service kind
pub const SESSION_KIND: &str = "session";

/// Memory service kind
pub const MEMORY_KIND: &str = "memory";

/// Artifact service kind
pub const ARTIFACT_KIND: &str = "artifact";

/// Kinds that the host resolves at startup
pub const WELL_KNOWN_KINDS: [&str; 3] = [SESSION_KIND, MEMORY_KIND, ARTIFACT_KIND];

// ============================================================================
// SERVICE CONSTANTS
// ============================================================================

/// Filename prefix marking an artifact as user-scoped rather than session-scoped
pub const USER_NAMESPACE_PREFIX: &str = "user:";
