//! Runtime Services Bootstrap
//!
//! Composition root: activates configured plugins, then resolves every
//! configured service kind through a [`ServiceLoader`].
//!
//! ```text
//! AppConfig ─┬─ plugins ──────────→ ServiceLoader::activate_plugin
//!            └─ services.{kind} ──→ ServiceLoader::load_service ──→ RuntimeServices
//! ```
//!
//! Resolution runs on the blocking pool (constructors may do blocking I/O)
//! and each step is bounded by `services.resolve_timeout_secs`. The first
//! failure aborts startup.
//!
//! ## Usage
//!
//! ```rust,ignore
//! let config = ConfigLoader::new().load()?;
//! let services = bootstrap(&config).await?;
//! let sessions = services.session().expect("session service");
//! ```

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use serde::Serialize;
use svcreg_application::use_cases::ServiceLoader;
use svcreg_domain::constants::{ARTIFACT_KIND, MEMORY_KIND, SESSION_KIND, WELL_KNOWN_KINDS};
use svcreg_domain::error::{Error, Result};
use svcreg_domain::ports::{ArtifactService, MemoryService, SessionService};
use svcreg_domain::value_objects::{ServiceInstance, ServiceKind};
use tracing::{debug, info};

use crate::config::AppConfig;

/// A service resolved at startup
#[derive(Debug, Clone)]
pub struct ResolvedService {
    /// Configured identifier, `None` when the default provider was used
    pub identifier: Option<String>,
    /// The constructed instance
    pub instance: ServiceInstance,
}

/// Printable description of a resolved service
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServiceSummary {
    /// Service kind
    pub kind: String,
    /// Configured identifier, `None` for defaults
    pub identifier: Option<String>,
    /// Scheme or import target that produced the instance
    pub provider: String,
    /// Concrete type of the instance
    pub type_name: String,
}

/// Services resolved from configuration
#[derive(Debug)]
pub struct RuntimeServices {
    loader: Arc<ServiceLoader>,
    services: BTreeMap<ServiceKind, ResolvedService>,
}

impl RuntimeServices {
    /// The loader the services were resolved with
    pub fn loader(&self) -> &Arc<ServiceLoader> {
        &self.loader
    }

    /// Resolved service for a kind
    pub fn get(&self, kind: &str) -> Option<&ResolvedService> {
        self.services.get(&ServiceKind::new(kind))
    }

    /// Session service
    pub fn session(&self) -> Option<Arc<dyn SessionService>> {
        self.get(SESSION_KIND)?.instance.port::<dyn SessionService>()
    }

    /// Memory service
    pub fn memory(&self) -> Option<Arc<dyn MemoryService>> {
        self.get(MEMORY_KIND)?.instance.port::<dyn MemoryService>()
    }

    /// Artifact service
    pub fn artifact(&self) -> Option<Arc<dyn ArtifactService>> {
        self.get(ARTIFACT_KIND)?.instance.port::<dyn ArtifactService>()
    }

    /// Resolved kinds, sorted
    pub fn kinds(&self) -> Vec<&ServiceKind> {
        self.services.keys().collect()
    }

    /// One row per resolved service, sorted by kind
    pub fn summary(&self) -> Vec<ServiceSummary> {
        self.services
            .iter()
            .map(|(kind, resolved)| ServiceSummary {
                kind: kind.to_string(),
                identifier: resolved.identifier.clone(),
                provider: resolved.instance.label().to_string(),
                type_name: resolved.instance.type_name().to_string(),
            })
            .collect()
    }
}

/// Resolve all configured services with a fresh loader
pub async fn bootstrap(config: &AppConfig) -> Result<RuntimeServices> {
    bootstrap_with(Arc::new(ServiceLoader::new()), config).await
}

/// Resolve all configured services with `loader`
///
/// Plugins are activated first so their schemes are visible to every kind.
/// Extra kinds without an identifier and without a default provider are
/// skipped; session, memory and artifact must always resolve.
///
/// # Errors
/// The first resolution error, `Configuration` when a well-known kind has
/// no service at all, or `InstantiationFailure` when a step exceeds the
/// timeout or a well-known kind resolves to something that does not
/// implement its service port.
pub async fn bootstrap_with(loader: Arc<ServiceLoader>, config: &AppConfig) -> Result<RuntimeServices> {
    let started = Instant::now();
    let timeout = config.services.resolve_timeout();

    for plugin in &config.plugins {
        let l = Arc::clone(&loader);
        let identifier = plugin.clone();
        let registered =
            run_blocking(plugin, timeout, move || l.activate_plugin(&identifier)).await?;
        info!(plugin = %plugin, schemes = registered, "Plugin activated");
    }

    let mut services = BTreeMap::new();
    for (kind, identifier) in config.services.identifiers() {
        let kind = ServiceKind::new(&kind);
        let identifier = identifier.filter(|id| !id.trim().is_empty());
        let target = identifier.clone().unwrap_or_else(|| format!("default {kind}"));

        let l = Arc::clone(&loader);
        let (k, id) = (kind.clone(), identifier.clone());
        let step = Instant::now();
        let resolved =
            run_blocking(&target, timeout, move || l.load_service(id.as_deref(), k.as_str()))
                .await?;

        let Some(instance) = resolved else {
            if WELL_KNOWN_KINDS.contains(&kind.as_str()) {
                return Err(Error::configuration(format!(
                    "no {kind} service available: no identifier configured and no default provider registered"
                )));
            }
            debug!(kind = %kind, "No identifier and no default provider, skipping");
            continue;
        };
        ensure_port(&kind, &target, &instance)?;
        info!(
            kind = %kind,
            provider = instance.label(),
            elapsed_ms = elapsed_ms(step),
            "Service resolved"
        );
        services.insert(
            kind,
            ResolvedService {
                identifier,
                instance,
            },
        );
    }

    info!(
        services = services.len(),
        elapsed_ms = elapsed_ms(started),
        "Runtime services ready"
    );
    Ok(RuntimeServices { loader, services })
}

fn elapsed_ms(since: Instant) -> u64 {
    u64::try_from(since.elapsed().as_millis()).unwrap_or(u64::MAX)
}

/// Run a blocking resolution step on the blocking pool under `timeout`
async fn run_blocking<T, F>(target: &str, timeout: Duration, f: F) -> Result<T>
where
    T: Send + 'static,
    F: FnOnce() -> Result<T> + Send + 'static,
{
    match tokio::time::timeout(timeout, tokio::task::spawn_blocking(f)).await {
        Ok(Ok(result)) => result,
        Ok(Err(join_error)) => Err(Error::internal(format!(
            "Resolution of '{target}' did not complete: {join_error}"
        ))),
        Err(_) => Err(Error::instantiation(
            target,
            format!("timed out after {}s", timeout.as_secs()),
        )),
    }
}

/// Well-known kinds must resolve to their service port
fn ensure_port(kind: &ServiceKind, target: &str, instance: &ServiceInstance) -> Result<()> {
    let (implements, port) = match kind.as_str() {
        SESSION_KIND => (instance.port::<dyn SessionService>().is_some(), "SessionService"),
        MEMORY_KIND => (instance.port::<dyn MemoryService>().is_some(), "MemoryService"),
        ARTIFACT_KIND => (instance.port::<dyn ArtifactService>().is_some(), "ArtifactService"),
        _ => return Ok(()),
    };
    if implements {
        Ok(())
    } else {
        Err(Error::instantiation(
            target,
            format!("{} does not implement {port}", instance.type_name()),
        ))
    }
}
