//! Application Ports
//!
//! Registration contracts between this layer and the crates that provide
//! schemes and dynamic-import modules. Service ports themselves live in
//! `svcreg_domain::ports`.

pub mod registry;

pub use registry::*;
