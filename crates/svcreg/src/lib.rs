//! # svcreg
//!
//! Resolve runtime services from configuration identifiers.
//!
//! A host names each backing service with a string such as
//! `inmemory://`, `file:///var/lib/artifacts` or
//! `python:acme.plugins:RedisMemory?ttl=60`, and [`load_service`] turns it into
//! a constructed instance. New schemes are added at link time by providers or
//! at runtime with [`register_scheme`] and [`activate_plugin`].
//!
//! ## Example
//!
//! ```
//! extern crate svcreg_providers;
//!
//! use svcreg::domain::ports::SessionService;
//!
//! svcreg::register_scheme("greeting", "hello", |d, _| {
//!     Ok(svcreg::ServiceInstance::new(format!("hello {}", d.authority)))
//! });
//! let greeting = svcreg::load_service(Some("hello://world"), "greeting")
//!     .unwrap()
//!     .unwrap();
//! assert_eq!(greeting.downcast_ref::<String>().unwrap(), "hello world");
//!
//! // No identifier: the in-memory default
//! let session = svcreg::load_service(None, "session").unwrap().unwrap();
//! assert!(session.port::<dyn SessionService>().is_some());
//! ```
//!
//! ## Architecture
//!
//! - `domain` - identifiers, error taxonomy, service ports and entities
//! - `application` - scheme registry, dynamic import and `load_service`
//! - `infrastructure` - configuration, logging and startup bootstrap
//! - `providers` - bundled in-memory and filesystem services

/// Domain layer - identifiers, errors and service ports
pub mod domain {
    pub use svcreg_domain::*;
}

/// Application layer - registries and resolution
pub mod application {
    pub use svcreg_application::*;
}

/// Infrastructure layer - config, logging and bootstrap
pub mod infrastructure {
    pub use svcreg_infrastructure::*;
}

/// Bundled service implementations
pub mod providers {
    pub use svcreg_providers::*;
}

/// Command line interface
pub mod cli;

pub use svcreg_application::use_cases::{
    ServiceLoader, activate_plugin, load_service, register_scheme,
};
pub use svcreg_domain::error::{Error, Result};
pub use svcreg_domain::value_objects::{ParsedDescriptor, QueryParams, ServiceInstance, ServiceKind};
