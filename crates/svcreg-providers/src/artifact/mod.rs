//! Artifact service implementations
//!
//! | Provider | Scheme | Description |
//! |----------|--------|-------------|
//! | [`InMemoryArtifactService`] | `inmemory` | Versions kept in process memory |
//! | `FileArtifactService` | `file` | Versions written under a root directory |

pub mod in_memory;

#[cfg(feature = "artifact-filesystem")]
pub mod filesystem;

pub use in_memory::InMemoryArtifactService;

#[cfg(feature = "artifact-filesystem")]
pub use filesystem::FileArtifactService;
