//! Configuration
//!
//! [`AppConfig`] names the identifier to use for each service kind, the
//! plugins to activate and the logging setup. [`ConfigLoader`] assembles it
//! from defaults, a TOML file and `SVCREG__` environment variables.

pub mod loader;
pub mod types;

pub use loader::ConfigLoader;
pub use types::*;
