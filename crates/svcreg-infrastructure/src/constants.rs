//! Infrastructure layer constants
//!
//! Grammar and kind constants live in `svcreg_domain::constants`.

// ============================================================================
// CONFIGURATION CONSTANTS
// ============================================================================

/// Default configuration file name
pub const DEFAULT_CONFIG_FILENAME: &str = "svcreg.toml";

/// Default configuration directory name
pub const DEFAULT_CONFIG_DIR: &str = "svcreg";

/// Environment variable prefix for configuration (`SVCREG__SERVICES__SESSION`)
pub const CONFIG_ENV_PREFIX: &str = "SVCREG";

/// Separator between nesting levels in configuration environment variables
pub const CONFIG_ENV_SEPARATOR: &str = "__";

/// Default upper bound for resolving one service at startup, in seconds
pub const DEFAULT_RESOLVE_TIMEOUT_SECS: u64 = 30;

// ============================================================================
// LOGGING CONSTANTS
// ============================================================================

/// Default log level
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Environment variable overriding the configured log filter
pub const LOG_FILTER_ENV: &str = "SVCREG_LOG";

/// Prefix of rolled log files
pub const LOG_FILE_PREFIX: &str = "svcreg";

/// Maximum number of rotated log files to keep
pub const LOG_MAX_FILES: usize = 7;
