//! Domain Port Interfaces
//!
//! Traits implemented by the services that schemes construct. Resolved
//! instances carry an `Arc<dyn Port>` that callers recover with
//! [`ServiceInstance::port`](crate::value_objects::ServiceInstance::port).

/// Runtime service ports
pub mod services;

pub use services::{ArtifactService, MemoryService, SessionService};
