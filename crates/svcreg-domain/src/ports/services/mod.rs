//! Runtime Service Ports
//!
//! Contracts for the well-known service kinds that the registry resolves.
//!
//! | Port | Kind |
//! |------|------|
//! | SessionService | `session` |
//! | MemoryService | `memory` |
//! | ArtifactService | `artifact` |

/// Artifact service port
pub mod artifact;
/// Memory service port
pub mod memory;
/// Session service port
pub mod session;

pub use artifact::ArtifactService;
pub use memory::MemoryService;
pub use session::SessionService;
