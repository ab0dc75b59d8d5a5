//! # Infrastructure Layer
//!
//! Cross-cutting technical concerns around service resolution.
//!
//! ## Module Categories
//!
//! ### Configuration & Bootstrap
//! | Module | Description |
//! |--------|-------------|
//! | [`config`] | TOML + environment configuration via Figment |
//! | [`di`] | Resolves the configured services into [`RuntimeServices`] |
//! | [`constants`] | Centralized configuration constants |
//!
//! ### Observability
//! | Module | Description |
//! |--------|-------------|
//! | [`logging`] | Structured logging with tracing |

pub mod config;
pub mod constants;
pub mod di;
pub mod error_ext;
pub mod logging;

// Links the bundled providers so their schemes and modules are registered.
extern crate svcreg_providers;

// Re-export commonly used types
pub use config::{AppConfig, ConfigLoader};
pub use di::{RuntimeServices, bootstrap, bootstrap_with};
pub use error_ext::ErrorContext;
