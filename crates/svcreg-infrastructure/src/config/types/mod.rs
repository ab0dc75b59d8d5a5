//! Configuration types module

pub mod app;
pub mod logging;
pub mod services;

pub use app::AppConfig;
pub use logging::LoggingConfig;
pub use services::ServicesConfig;
