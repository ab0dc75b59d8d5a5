//! # Domain Layer
//!
//! Core types of the service registry: how a service is addressed, what a
//! resolution yields and how it can fail. No registry state lives here.
//!
//! ## Organization
//!
//! - **[`value_objects`]** - identifiers, query parameters, kinds, instances
//! - **[`entities`]** - data handled by the runtime services
//! - **[`ports`]** - service traits implemented by providers
//! - **[`error`]** - error taxonomy and `Result` alias
//! - **[`constants`]** - scheme names, separators and well-known kinds
//!
//! ## Example
//!
//! ```
//! use svcreg_domain::value_objects::ParsedDescriptor;
//!
//! let descriptor = ParsedDescriptor::parse("redis://cache:6379/0?ttl=60").unwrap();
//! assert_eq!(descriptor.scheme, "redis");
//! assert_eq!(descriptor.authority, "cache:6379");
//! assert_eq!(descriptor.query.get("ttl"), Some("60"));
//! ```

/// Scheme names, separators and well-known kinds
pub mod constants;
/// Runtime service entities
pub mod entities;
/// Error taxonomy
pub mod error;
/// Service ports
pub mod ports;
/// Identifier and instance value objects
pub mod value_objects;

pub use error::{Error, Result};
pub use value_objects::{ImportTarget, ParsedDescriptor, QueryParams, ServiceInstance, ServiceKind};
