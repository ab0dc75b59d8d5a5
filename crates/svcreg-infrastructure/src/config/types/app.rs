//! Main application configuration

use serde::{Deserialize, Serialize};

use super::{LoggingConfig, ServicesConfig};

/// Root configuration
///
/// ```toml
/// plugins = ["python:acme.redis_plugin"]
///
/// [services]
/// session = "inmemory://"
/// memory = "redis://cache:6379/0"
/// artifact = "file:///var/lib/svcreg/artifacts"
///
/// [services.extra]
/// credential = "python:acme.vault:Credentials?mount=kv"
///
/// [logging]
/// level = "debug"
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Service identifiers per kind
    #[serde(default)]
    pub services: ServicesConfig,

    /// `python:module` identifiers activated as plugins before resolution
    #[serde(default)]
    pub plugins: Vec<String>,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}
