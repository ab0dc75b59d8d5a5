//! Service Loader Use Case
//!
//! The resolution entry point: turns an optional identifier and a kind into a
//! constructed service instance.
//!
//! ```text
//! load_service(identifier, kind)
//!   ├─ no identifier        → DefaultProvider
//!   ├─ python:module:attr   → DynamicImportResolver
//!   └─ scheme://...         → SchemeRegistry lookup → constructor
//! ```
//!
//! A process-wide loader backs the free functions [`load_service`],
//! [`register_scheme`] and [`activate_plugin`]. Tests and embedders that need
//! isolation construct their own [`ServiceLoader`].

use std::collections::HashSet;
use std::sync::{Arc, LazyLock};

use parking_lot::Mutex;
use svcreg_domain::error::{Error, Result};
use svcreg_domain::value_objects::{ParsedDescriptor, QueryParams, ServiceInstance, ServiceKind};
use tracing::{debug, info};

use super::default_provider::DefaultProvider;
use super::dynamic_import::DynamicImportResolver;
use super::module_loader::ModuleLoader;
use super::scheme_registry::SchemeRegistry;
use crate::ports::registry::{construct, constructor};

static GLOBAL_LOADER: LazyLock<ServiceLoader> = LazyLock::new(ServiceLoader::new);

/// Injectable service resolution entry point
#[derive(Debug)]
pub struct ServiceLoader {
    registry: SchemeRegistry,
    imports: DynamicImportResolver,
    defaults: DefaultProvider,
    activated_plugins: Mutex<HashSet<String>>,
}

impl ServiceLoader {
    /// Loader with every compiled-in scheme and module
    ///
    /// Defaults are built once here from the builtin `inmemory` schemes.
    pub fn new() -> Self {
        let registry = SchemeRegistry::with_builtins();
        let defaults = DefaultProvider::from_registry(&registry);
        Self::with_parts(registry, Arc::new(ModuleLoader::new()), defaults)
    }

    /// Loader assembled from explicit parts
    pub fn with_parts(
        registry: SchemeRegistry,
        modules: Arc<ModuleLoader>,
        defaults: DefaultProvider,
    ) -> Self {
        Self {
            registry,
            imports: DynamicImportResolver::new(modules),
            defaults,
            activated_plugins: Mutex::new(HashSet::new()),
        }
    }

    /// The process-wide loader
    pub fn global() -> &'static ServiceLoader {
        &GLOBAL_LOADER
    }

    /// The scheme registry
    pub fn registry(&self) -> &SchemeRegistry {
        &self.registry
    }

    /// The module loader used for dynamic imports and plugins
    pub fn modules(&self) -> &ModuleLoader {
        self.imports.modules()
    }

    /// The default provider
    pub fn defaults(&self) -> &DefaultProvider {
        &self.defaults
    }

    /// Resolve a service
    ///
    /// A missing or blank identifier yields the kind's default instance, or
    /// `Ok(None)` when the kind has no default. Never mutates the registry.
    ///
    /// # Errors
    /// `MalformedIdentifier`, `UnknownScheme`, `ImportFailure`,
    /// `AttributeResolutionFailure` or `InstantiationFailure`.
    pub fn load_service(&self, identifier: Option<&str>, kind: &str) -> Result<Option<ServiceInstance>> {
        let kind = ServiceKind::new(kind);
        let Some(identifier) = identifier.map(str::trim).filter(|id| !id.is_empty()) else {
            debug!(kind = %kind, "No identifier supplied, using default provider");
            return Ok(self.defaults.default_for(&kind));
        };

        let descriptor = ParsedDescriptor::parse(identifier)?;
        if descriptor.is_dynamic_import() {
            return self.imports.resolve(&descriptor).map(Some);
        }

        debug!(kind = %kind, scheme = %descriptor.scheme, "Looking up service scheme");
        let Some(ctor) = self.registry.lookup(&kind, &descriptor.scheme) else {
            return Err(Error::unknown_scheme(
                kind.as_str(),
                &descriptor.scheme,
                self.registry.schemes(&kind),
            ));
        };

        construct(&descriptor.scheme, &ctor, &descriptor)
            .map(|instance| Some(instance.with_label(&descriptor.scheme)))
    }

    /// Register or replace the constructor for `(kind, scheme)`
    pub fn register_scheme<F>(&self, kind: &str, scheme: &str, f: F)
    where
        F: Fn(&ParsedDescriptor, &QueryParams) -> Result<ServiceInstance> + Send + Sync + 'static,
    {
        self.registry.register(kind, scheme, constructor(f));
    }

    /// Load a module as a plugin and apply the schemes it declares
    ///
    /// `identifier` must be `python:module` without an attribute. Activating
    /// the same module again applies nothing and returns `Ok(0)`.
    ///
    /// # Returns
    /// Number of schemes registered by this call
    pub fn activate_plugin(&self, identifier: &str) -> Result<usize> {
        let descriptor = ParsedDescriptor::parse(identifier)?;
        if !descriptor.is_dynamic_import() {
            return Err(Error::invalid_argument(format!(
                "plugin '{identifier}' must use the python:module form"
            )));
        }
        let target = descriptor.import_target()?;
        if target.attribute.is_some() {
            return Err(Error::invalid_argument(format!(
                "plugin '{identifier}' must name a module, not an attribute"
            )));
        }

        let module = self.imports.modules().load(&target.module)?;
        if !self.activated_plugins.lock().insert(target.module.clone()) {
            debug!(plugin = %target.module, "Plugin already active");
            return Ok(0);
        }

        let declarations = module.scheme_declarations();
        for decl in declarations {
            self.registry
                .register(decl.kind.clone(), &decl.scheme, decl.constructor.clone());
        }
        info!(plugin = %target.module, schemes = declarations.len(), "Activated plugin");
        Ok(declarations.len())
    }

    /// Module paths activated as plugins, sorted
    pub fn active_plugins(&self) -> Vec<String> {
        let mut plugins: Vec<String> = self.activated_plugins.lock().iter().cloned().collect();
        plugins.sort_unstable();
        plugins
    }
}

impl Default for ServiceLoader {
    fn default() -> Self {
        Self::new()
    }
}

/// Resolve a service through the process-wide loader
///
/// See [`ServiceLoader::load_service`].
pub fn load_service(identifier: Option<&str>, kind: &str) -> Result<Option<ServiceInstance>> {
    ServiceLoader::global().load_service(identifier, kind)
}

/// Register a scheme on the process-wide loader
pub fn register_scheme<F>(kind: &str, scheme: &str, f: F)
where
    F: Fn(&ParsedDescriptor, &QueryParams) -> Result<ServiceInstance> + Send + Sync + 'static,
{
    ServiceLoader::global().register_scheme(kind, scheme, f);
}

/// Activate a plugin on the process-wide loader
pub fn activate_plugin(identifier: &str) -> Result<usize> {
    ServiceLoader::global().activate_plugin(identifier)
}
