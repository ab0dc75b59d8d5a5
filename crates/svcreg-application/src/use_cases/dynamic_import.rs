//! Dynamic Import Resolver
//!
//! Resolves `python:module[:attribute]?query` identifiers against the
//! compiled-in module catalog. The scheme registry is never consulted, and the
//! requested kind plays no part in the resolution.

use std::sync::Arc;

use svcreg_domain::error::{Error, Result};
use svcreg_domain::value_objects::{ParsedDescriptor, ServiceInstance};
use tracing::debug;

use super::module_loader::ModuleLoader;
use crate::ports::registry::{Export, construct};

/// Resolves and invokes dynamic-import targets
#[derive(Debug, Clone)]
pub struct DynamicImportResolver {
    modules: Arc<ModuleLoader>,
}

impl DynamicImportResolver {
    /// Create a resolver over a module loader
    pub fn new(modules: Arc<ModuleLoader>) -> Self {
        Self { modules }
    }

    /// The module loader backing this resolver
    pub fn modules(&self) -> &Arc<ModuleLoader> {
        &self.modules
    }

    /// Resolve a dynamic-import descriptor to an instance
    ///
    /// # Errors
    /// - `MalformedIdentifier` if the descriptor is not a dynamic import
    /// - `ImportFailure` if the module cannot be loaded
    /// - `AttributeResolutionFailure` if the attribute (or a default export)
    ///   is missing
    /// - `InstantiationFailure` if the callable fails, or if query parameters
    ///   are given to a non-callable attribute
    pub fn resolve(&self, descriptor: &ParsedDescriptor) -> Result<ServiceInstance> {
        let target = descriptor.import_target()?;
        let module = self.modules.load(&target.module)?;

        let (attribute, export) = match target.attribute.as_deref() {
            Some(name) => {
                let export = module
                    .get(name)
                    .ok_or_else(|| Error::attribute_resolution(&target.module, name))?;
                (name, export)
            }
            None => module
                .default_export()
                .ok_or_else(|| Error::attribute_resolution(&target.module, "<default>"))?,
        };

        let qualified = format!("{}:{attribute}", target.module);
        debug!(
            target = %qualified,
            callable = export.is_callable(),
            params = descriptor.query.len(),
            "Resolving dynamic import"
        );

        match export {
            Export::Callable(callable) => {
                construct(&qualified, callable, descriptor).map(|instance| instance.with_label(&qualified))
            }
            Export::Value(value) if descriptor.query.is_empty() => Ok(value.clone()),
            Export::Value(_) => Err(Error::instantiation(
                &qualified,
                "non-callable target cannot accept query parameters",
            )),
        }
    }
}
