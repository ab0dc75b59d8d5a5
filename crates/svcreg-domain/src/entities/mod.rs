//! Domain Entities
//!
//! Data handled by the runtime services that the registry constructs.
//!
//! | Entity | Description |
//! |--------|-------------|
//! | [`Session`] | Conversation session with ordered events and state |
//! | [`Event`] | One turn of a session, optionally carrying a state delta |
//! | [`MemoryEntry`] | An event recalled from an earlier session |
//! | [`Artifact`] | Versioned binary payload |

/// Artifact entities
pub mod artifact;
/// Memory entities
pub mod memory;
/// Session and event entities
pub mod session;

pub use artifact::{Artifact, ArtifactScope, is_user_scoped};
pub use memory::{MemoryEntry, SearchMemoryResponse};
pub use session::{Event, Session, SessionState};
