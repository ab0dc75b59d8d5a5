//! Application Layer - svcreg
//!
//! This crate resolves service identifiers into constructed runtime services.
//!
//! ## Architecture
//!
//! The application layer:
//! - Declares the registration slices providers and plugin modules submit to
//! - Holds the runtime scheme registry and the module cache
//! - Implements the `load_service` resolution entry point
//! - Has no dependencies on infrastructure or concrete providers
//!
//! ## Use Cases
//!
//! - Scheme lookup and constructor invocation
//! - Dynamic import of compiled-in modules (`python:module[:attribute]`)
//! - Default in-memory services when no identifier is configured
//! - Plugin activation
//!
//! ## Dependencies
//!
//! This crate depends only on:
//! - `svcreg-domain`: identifiers, error taxonomy and service ports
//! - Pure Rust libraries for logging, locking and registration

pub mod ports;
pub mod use_cases;

pub use ports::*;
pub use use_cases::*;
