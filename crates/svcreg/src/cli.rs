//! Command line interface
//!
//! ```text
//! svcreg [--config FILE] [--session-service ID] [--memory-service ID]
//!        [--artifact-service ID] [--plugin python:module]... <COMMAND>
//!
//!   resolve [--json]   bootstrap the configured services and print them
//!   schemes            list registered schemes per kind
//!   modules            list compiled-in dynamic-import modules
//! ```

use std::fmt::Write as _;
use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use svcreg_application::ports::registry::list_service_modules;
use svcreg_application::use_cases::{SchemeInfo, ServiceLoader};
use svcreg_infrastructure::config::{AppConfig, ConfigLoader, loader::validate_app_config};
use svcreg_infrastructure::di::{ServiceSummary, bootstrap_with};

/// Command line interface for svcreg
#[derive(Parser, Debug)]
#[command(name = "svcreg")]
#[command(about = "Resolve pluggable runtime services from identifiers")]
#[command(version)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Session service identifier (overrides configuration)
    #[arg(long, global = true)]
    pub session_service: Option<String>,

    /// Memory service identifier (overrides configuration)
    #[arg(long, global = true)]
    pub memory_service: Option<String>,

    /// Artifact service identifier (overrides configuration)
    #[arg(long, global = true)]
    pub artifact_service: Option<String>,

    /// Plugin module to activate before resolving (repeatable)
    #[arg(long = "plugin", value_name = "python:module", global = true)]
    pub plugins: Vec<String>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Subcommands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Resolve every configured service and print what was constructed
    Resolve {
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// List registered schemes per service kind
    Schemes,
    /// List compiled-in dynamic-import modules
    Modules,
}

impl Cli {
    /// Subcommand to run, `resolve` when none was given
    pub fn command(&self) -> Command {
        self.command
            .clone()
            .unwrap_or(Command::Resolve { json: false })
    }

    /// Load configuration and apply command line overrides
    pub fn load_config(&self) -> svcreg_domain::Result<AppConfig> {
        let mut loader = ConfigLoader::new();
        if let Some(path) = &self.config {
            loader = loader.with_config_path(path);
        }
        let mut config = loader.load()?;
        self.apply_overrides(&mut config);
        validate_app_config(&config)?;
        Ok(config)
    }

    /// Command line flags win over file and environment values
    pub fn apply_overrides(&self, config: &mut AppConfig) {
        if let Some(id) = &self.session_service {
            config.services.session = Some(id.clone());
        }
        if let Some(id) = &self.memory_service {
            config.services.memory = Some(id.clone());
        }
        if let Some(id) = &self.artifact_service {
            config.services.artifact = Some(id.clone());
        }
        for plugin in &self.plugins {
            if !config.plugins.contains(plugin) {
                config.plugins.push(plugin.clone());
            }
        }
    }
}

/// Run a command against `config`, returning the text to print
pub async fn run(command: Command, config: &AppConfig) -> anyhow::Result<String> {
    let loader = Arc::new(ServiceLoader::new());
    match command {
        Command::Resolve { json } => {
            let services = bootstrap_with(loader, config).await?;
            let summary = services.summary();
            if json {
                Ok(serde_json::to_string_pretty(&summary)?)
            } else {
                Ok(render_services(&summary))
            }
        }
        Command::Schemes => {
            for plugin in &config.plugins {
                loader.activate_plugin(plugin)?;
            }
            Ok(render_schemes(&loader.registry().entries()))
        }
        Command::Modules => Ok(render_modules(&list_service_modules())),
    }
}

/// Table of resolved services
pub fn render_services(summary: &[ServiceSummary]) -> String {
    let mut out = String::new();
    for row in summary {
        let identifier = row.identifier.as_deref().unwrap_or("(default)");
        let _ = writeln!(
            out,
            "{:<10} {:<40} {} [{}]",
            row.kind, identifier, row.provider, row.type_name
        );
    }
    out
}

/// Schemes grouped by kind
pub fn render_schemes(entries: &[SchemeInfo]) -> String {
    let mut out = String::new();
    let mut current_kind = None;
    for entry in entries {
        if current_kind != Some(&entry.kind) {
            let _ = writeln!(out, "{}:", entry.kind);
            current_kind = Some(&entry.kind);
        }
        match &entry.description {
            Some(description) => {
                let _ = writeln!(out, "  {:<12} {description}", entry.scheme);
            }
            None => {
                let _ = writeln!(out, "  {}", entry.scheme);
            }
        }
    }
    out
}

/// Compiled-in modules with descriptions
pub fn render_modules(modules: &[(&str, &str)]) -> String {
    let mut out = String::new();
    for (path, description) in modules {
        let _ = writeln!(out, "python:{path:<24} {description}");
    }
    out
}
