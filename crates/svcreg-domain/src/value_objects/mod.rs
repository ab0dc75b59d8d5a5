//! Domain Value Objects
//!
//! Immutable value objects describing how a service is addressed and what
//! a resolution produces.
//!
//! ## Value Objects
//!
//! | Value Object | Description |
//! |--------------|-------------|
//! | [`ParsedDescriptor`] | Structured form of a service identifier |
//! | [`ImportTarget`] | `module[:attribute]` of a dynamic-import identifier |
//! | [`QueryParams`] | String-valued keyword arguments |
//! | [`ServiceKind`] | Namespace key partitioning the scheme registry |
//! | [`ServiceInstance`] | Opaque handle to a constructed service |

/// Service identifier parsing
pub mod identifier;
/// Constructed service handle
pub mod instance;
/// Service kind namespace key
pub mod kind;
/// Query parameters
pub mod query;

pub use identifier::{ImportTarget, ParsedDescriptor};
pub use instance::ServiceInstance;
pub use kind::ServiceKind;
pub use query::QueryParams;
