//! Provider Constants
//!
//! Constants specific to provider implementations. These are separated from
//! domain constants (which live in svcreg-domain).

// ============================================================================
// PROVIDER NAMES
// ============================================================================

/// Name reported by the in-memory session service
pub const INMEMORY_SESSION_PROVIDER: &str = "inmemory_session";

/// Name reported by the SQLite session service
pub const SQLITE_SESSION_PROVIDER: &str = "sqlite_session";

/// Name reported by the in-memory memory service
pub const INMEMORY_MEMORY_PROVIDER: &str = "inmemory_memory";

/// Name reported by the in-memory artifact service
pub const INMEMORY_ARTIFACT_PROVIDER: &str = "inmemory_artifact";

/// Name reported by the filesystem artifact service
pub const FILE_ARTIFACT_PROVIDER: &str = "file_artifact";

// ============================================================================
// FILESYSTEM ARTIFACT CONSTANTS
// ============================================================================

/// Query parameter naming the artifact root directory
pub const FILE_ARTIFACT_ROOT_PARAM: &str = "root";

/// Directory name holding user-scoped artifacts
pub const FILE_ARTIFACT_USER_DIR: &str = "user";

/// Extension of artifact payload files (`<version>.bin`)
pub const FILE_ARTIFACT_DATA_EXTENSION: &str = "bin";

/// Extension of artifact metadata files (`<version>.json`)
pub const FILE_ARTIFACT_META_EXTENSION: &str = "json";

// ============================================================================
// SQLITE SESSION CONSTANTS
// ============================================================================

/// Database name selecting a private in-memory SQLite database
pub const SQLITE_MEMORY_PATH: &str = ":memory:";

/// Query parameter naming the database file for the `python:` export
pub const SQLITE_PATH_PARAM: &str = "path";

// ============================================================================
// DYNAMIC IMPORT MODULE
// ============================================================================

/// Path of the built-in providers module (`python:svcreg.providers:...`)
pub const PROVIDERS_MODULE_PATH: &str = "svcreg.providers";
