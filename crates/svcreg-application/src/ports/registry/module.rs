//! Dynamic Import Module Registry
//!
//! Compiled-in modules addressable through `python:module[:attribute]`
//! identifiers. Rust cannot load arbitrary code at runtime, so the set of
//! importable modules is closed: each one submits a [`ModuleEntry`] to the
//! `SERVICE_MODULES` distributed slice.
//!
//! A module's `init` function is its top-level initialization. It populates a
//! [`ModuleExports`] table with callables, plain values and optional scheme
//! registrations, and runs at most once per loader.
//!
//! ## Example
//!
//! ```ignore
//! use svcreg_application::ports::registry::{ModuleEntry, ModuleExports, SERVICE_MODULES};
//!
//! #[linkme::distributed_slice(SERVICE_MODULES)]
//! static REDIS_PLUGIN: ModuleEntry = ModuleEntry {
//!     path: "acme.redis_plugin",
//!     description: "Redis-backed memory service",
//!     init: |exports| {
//!         exports.register_scheme("memory", "redis", |d, _q| connect(d));
//!         Ok(())
//!     },
//! };
//! ```

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use svcreg_domain::error::Result;
use svcreg_domain::value_objects::{ParsedDescriptor, QueryParams, ServiceInstance, ServiceKind};

use super::scheme::ConstructorFn;

/// Registry entry for a compiled-in module
pub struct ModuleEntry {
    /// Dotted module path (e.g., "svcreg.providers")
    pub path: &'static str,
    /// Human-readable description
    pub description: &'static str,
    /// Module initialization, run once when the module is first loaded
    pub init: fn(&mut ModuleExports) -> Result<()>,
}

// Auto-collection via linkme distributed slices - modules submit entries at compile time
#[linkme::distributed_slice]
pub static SERVICE_MODULES: [ModuleEntry] = [..];

/// List all compiled-in modules as `(path, description)`, sorted by path
pub fn list_service_modules() -> Vec<(&'static str, &'static str)> {
    let mut modules: Vec<_> = SERVICE_MODULES
        .iter()
        .map(|e| (e.path, e.description))
        .collect();
    modules.sort_unstable();
    modules
}

/// An attribute exported by a module
#[derive(Clone)]
pub enum Export {
    /// Callable invoked with the query parameters as keyword arguments
    Callable(ConstructorFn),
    /// Plain value returned as-is
    Value(ServiceInstance),
}

impl Export {
    /// Whether the attribute can be invoked
    pub fn is_callable(&self) -> bool {
        matches!(self, Self::Callable(_))
    }
}

impl fmt::Debug for Export {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Callable(_) => f.write_str("Callable"),
            Self::Value(value) => f.debug_tuple("Value").field(value).finish(),
        }
    }
}

/// A scheme registration declared by a plugin module
///
/// Declarations are only applied to a registry when the module is activated
/// as a plugin.
#[derive(Clone)]
pub struct SchemeDeclaration {
    /// Service kind to register under
    pub kind: ServiceKind,
    /// Scheme token, lowercased
    pub scheme: String,
    /// Constructor to register
    pub constructor: ConstructorFn,
}

impl fmt::Debug for SchemeDeclaration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SchemeDeclaration")
            .field("kind", &self.kind)
            .field("scheme", &self.scheme)
            .finish_non_exhaustive()
    }
}

/// Attribute table of a loaded module
#[derive(Debug, Default)]
pub struct ModuleExports {
    path: String,
    attributes: HashMap<String, Export>,
    default_attribute: Option<String>,
    schemes: Vec<SchemeDeclaration>,
}

impl ModuleExports {
    /// Create an empty table for the module at `path`
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            ..Default::default()
        }
    }

    /// Module path
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Export a callable attribute
    ///
    /// Names may be dotted (`Outer.Inner`); they are stored and looked up as
    /// one qualified name.
    pub fn export<F>(&mut self, name: impl Into<String>, f: F) -> &mut Self
    where
        F: Fn(&ParsedDescriptor, &QueryParams) -> Result<ServiceInstance> + Send + Sync + 'static,
    {
        self.attributes
            .insert(name.into(), Export::Callable(Arc::new(f)));
        self
    }

    /// Export a plain value attribute
    pub fn export_value(&mut self, name: impl Into<String>, value: ServiceInstance) -> &mut Self {
        self.attributes.insert(name.into(), Export::Value(value));
        self
    }

    /// Designate the attribute used when an identifier names no attribute
    pub fn set_default(&mut self, name: impl Into<String>) -> &mut Self {
        self.default_attribute = Some(name.into());
        self
    }

    /// Declare a scheme registration applied on plugin activation
    pub fn register_scheme<F>(
        &mut self,
        kind: impl Into<ServiceKind>,
        scheme: &str,
        f: F,
    ) -> &mut Self
    where
        F: Fn(&ParsedDescriptor, &QueryParams) -> Result<ServiceInstance> + Send + Sync + 'static,
    {
        self.schemes.push(SchemeDeclaration {
            kind: kind.into(),
            scheme: scheme.trim().to_ascii_lowercase(),
            constructor: Arc::new(f),
        });
        self
    }

    /// Look up an attribute by name
    pub fn get(&self, name: &str) -> Option<&Export> {
        self.attributes.get(name)
    }

    /// The designated default attribute, if one was set and exists
    pub fn default_export(&self) -> Option<(&str, &Export)> {
        let name = self.default_attribute.as_deref()?;
        self.attributes.get(name).map(|export| (name, export))
    }

    /// Exported attribute names, sorted
    pub fn attribute_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.attributes.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Scheme registrations declared by the module
    pub fn scheme_declarations(&self) -> &[SchemeDeclaration] {
        &self.schemes
    }
}
