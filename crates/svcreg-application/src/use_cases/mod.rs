//! Use Cases
//!
//! Resolution of service identifiers into constructed instances.
//!
//! - [`ServiceLoader`]: `load_service`, `register_scheme`, `activate_plugin`
//! - [`SchemeRegistry`]: `(kind, scheme)` dispatch table
//! - [`DynamicImportResolver`] and [`ModuleLoader`]: `python:` identifiers
//! - [`DefaultProvider`]: instances used when no identifier is given

pub mod default_provider;
pub mod dynamic_import;
pub mod module_loader;
pub mod scheme_registry;
pub mod service_loader;

pub use default_provider::DefaultProvider;
pub use dynamic_import::DynamicImportResolver;
pub use module_loader::ModuleLoader;
pub use scheme_registry::{SchemeInfo, SchemeRegistry};
pub use service_loader::{ServiceLoader, activate_plugin, load_service, register_scheme};
