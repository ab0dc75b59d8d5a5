//! # svcreg - Provider Implementations
//!
//! This crate contains the bundled service implementations. Each one
//! implements a port defined in `svcreg-domain` and registers a scheme in the
//! `svcreg-application` registry slices at link time.
//!
//! ## Provider Categories
//!
//! | Kind | Port | Schemes |
//! |------|------|---------|
//! | session | `SessionService` | `inmemory`, `db+sqlite` |
//! | memory | `MemoryService` | `inmemory` |
//! | artifact | `ArtifactService` | `inmemory`, `file` |
//!
//! The same constructors are exported by the `svcreg.providers` dynamic
//! module, so `python:svcreg.providers:InMemorySessionService` resolves too.
//!
//! ## Feature Flags
//!
//! ```toml
//! [dependencies]
//! svcreg-providers = { version = "0.1", default-features = false }
//! ```
//!
//! ## Linking
//!
//! Registration happens through `linkme`; a binary must reference this crate
//! (for example `extern crate svcreg_providers;`) for its entries to be
//! linked in.

// Re-export svcreg-domain types commonly used with providers
pub use svcreg_domain::error::{Error, Result};
pub use svcreg_domain::ports::{ArtifactService, MemoryService, SessionService};

/// Provider-specific constants
pub mod constants;

/// Artifact service implementations
pub mod artifact;

/// Memory service implementations
pub mod memory;

/// Session service implementations
pub mod session;

/// The `svcreg.providers` dynamic-import module
pub mod module;

/// Shared provider utilities
pub mod utils;

pub use artifact::InMemoryArtifactService;
#[cfg(feature = "artifact-filesystem")]
pub use artifact::FileArtifactService;
pub use memory::InMemoryMemoryService;
pub use session::InMemorySessionService;
#[cfg(feature = "session-sqlite")]
pub use session::SqliteSessionService;
