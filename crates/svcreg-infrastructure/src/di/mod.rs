//! Service bootstrap
//!
//! Turns an [`AppConfig`](crate::config::AppConfig) into resolved services.

pub mod bootstrap;

pub use bootstrap::{ResolvedService, RuntimeServices, ServiceSummary, bootstrap, bootstrap_with};
