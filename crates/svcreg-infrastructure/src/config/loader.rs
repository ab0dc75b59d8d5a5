//! Configuration loader
//!
//! Loads [`AppConfig`] from defaults, a TOML file and environment variables
//! using Figment.

use std::env;
use std::path::{Path, PathBuf};

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use svcreg_domain::constants::WELL_KNOWN_KINDS;
use svcreg_domain::error::{Error, Result};
use svcreg_domain::value_objects::{ParsedDescriptor, ServiceKind};

use crate::config::AppConfig;
use crate::constants::{
    CONFIG_ENV_PREFIX, CONFIG_ENV_SEPARATOR, DEFAULT_CONFIG_DIR, DEFAULT_CONFIG_FILENAME,
};
use crate::error_ext::ErrorContext;
use crate::logging::{log_config_loaded, parse_log_level};

/// Configuration loader service
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    /// Configuration file path
    config_path: Option<PathBuf>,

    /// Environment prefix
    env_prefix: String,
}

impl ConfigLoader {
    /// Create a new configuration loader with default settings
    pub fn new() -> Self {
        Self {
            config_path: None,
            env_prefix: CONFIG_ENV_PREFIX.to_string(),
        }
    }

    /// Set the configuration file path
    pub fn with_config_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.config_path = Some(path.as_ref().to_path_buf());
        self
    }

    /// Set the environment variable prefix
    pub fn with_env_prefix<S: Into<String>>(mut self, prefix: S) -> Self {
        self.env_prefix = prefix.into();
        self
    }

    /// Load configuration from all sources
    ///
    /// Sources are merged in this order (later sources override earlier):
    /// 1. Default values from `AppConfig::default()`
    /// 2. TOML configuration file (explicit path, or the first default
    ///    location that exists)
    /// 3. Environment variables with prefix (e.g., `SVCREG__SERVICES__SESSION`)
    pub fn load(&self) -> Result<AppConfig> {
        let mut figment = Figment::new().merge(Serialized::defaults(AppConfig::default()));

        match &self.config_path {
            Some(config_path) if config_path.exists() => {
                figment = figment.merge(Toml::file(config_path));
                log_config_loaded(config_path, true);
            }
            Some(config_path) => log_config_loaded(config_path, false),
            None => {
                if let Some(default_path) = Self::find_default_config_path() {
                    figment = figment.merge(Toml::file(&default_path));
                    log_config_loaded(&default_path, true);
                }
            }
        }

        figment = figment.merge(
            Env::prefixed(&format!("{}{CONFIG_ENV_SEPARATOR}", self.env_prefix))
                .split(CONFIG_ENV_SEPARATOR),
        );

        let app_config: AppConfig = figment
            .extract()
            .config_context("Failed to extract configuration")?;

        validate_app_config(&app_config)?;
        Ok(app_config)
    }

    /// Save configuration to file
    pub fn save_to_file<P: AsRef<Path>>(&self, config: &AppConfig, path: P) -> Result<()> {
        let toml_string =
            toml::to_string_pretty(config).config_context("Failed to serialize config to TOML")?;
        std::fs::write(path.as_ref(), toml_string)
            .io_context(format!("Failed to write {}", path.as_ref().display()))?;
        Ok(())
    }

    /// Get the current configuration file path
    pub fn config_path(&self) -> Option<&Path> {
        self.config_path.as_deref()
    }

    /// First existing default configuration file
    fn find_default_config_path() -> Option<PathBuf> {
        let current_dir = env::current_dir().ok()?;

        let candidates = [
            Some(current_dir.join(DEFAULT_CONFIG_FILENAME)),
            Some(
                current_dir
                    .join(DEFAULT_CONFIG_DIR)
                    .join(DEFAULT_CONFIG_FILENAME),
            ),
            dirs::config_dir().map(|d| d.join(DEFAULT_CONFIG_DIR).join(DEFAULT_CONFIG_FILENAME)),
        ];

        candidates.into_iter().flatten().find(|path| path.exists())
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

/// Validate application configuration
///
/// Only syntax is checked; unknown schemes surface at bootstrap.
pub fn validate_app_config(config: &AppConfig) -> Result<()> {
    validate_services_config(config)?;
    validate_plugins_config(config)?;
    parse_log_level(&config.logging.level)?;
    Ok(())
}

fn validate_services_config(config: &AppConfig) -> Result<()> {
    if config.services.resolve_timeout_secs == 0 {
        return Err(Error::configuration("Service resolve timeout cannot be 0"));
    }
    if let Some(kind) = config
        .services
        .extra
        .keys()
        .find(|kind| WELL_KNOWN_KINDS.contains(&ServiceKind::new(kind.as_str()).as_str()))
    {
        return Err(Error::configuration(format!(
            "Service kind '{kind}' must be configured under [services], not [services.extra]"
        )));
    }
    for (kind, identifier) in config.services.identifiers() {
        if ServiceKind::new(&kind).as_str().is_empty() {
            return Err(Error::configuration("Service kind cannot be empty"));
        }
        if let Some(identifier) = identifier.as_deref().filter(|id| !id.trim().is_empty()) {
            ParsedDescriptor::parse(identifier).map_err(|e| {
                Error::configuration_with_source(format!("Invalid {kind} service identifier"), e)
            })?;
        }
    }
    Ok(())
}

fn validate_plugins_config(config: &AppConfig) -> Result<()> {
    for plugin in &config.plugins {
        let descriptor = ParsedDescriptor::parse(plugin).map_err(|e| {
            Error::configuration_with_source(format!("Invalid plugin identifier '{plugin}'"), e)
        })?;
        let is_module = descriptor.is_dynamic_import()
            && descriptor
                .import_target()
                .is_ok_and(|target| target.attribute.is_none());
        if !is_module {
            return Err(Error::configuration(format!(
                "Plugin '{plugin}' must be a python:module identifier"
            )));
        }
    }
    Ok(())
}
