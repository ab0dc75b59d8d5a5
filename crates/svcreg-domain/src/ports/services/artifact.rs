//! Artifact Service Port
//!
//! Port for versioned artifact storage. Every save of a filename produces a
//! new version; versions start at 0 and only grow.

use crate::entities::{Artifact, ArtifactScope};
use crate::error::Result;
use async_trait::async_trait;

/// Artifact Service Port
///
/// # Implementations
///
/// - **InMemory**: versions held in a concurrent map
/// - **File**: versions written under a root directory
#[async_trait]
pub trait ArtifactService: Send + Sync + std::fmt::Debug {
    /// Store a new version of `filename`
    ///
    /// # Returns
    /// The version number assigned to the saved artifact
    async fn save_artifact(
        &self,
        scope: &ArtifactScope,
        filename: &str,
        artifact: Artifact,
    ) -> Result<u64>;

    /// Load a version of `filename`, the latest when `version` is `None`
    async fn load_artifact(
        &self,
        scope: &ArtifactScope,
        filename: &str,
        version: Option<u64>,
    ) -> Result<Option<Artifact>>;

    /// List filenames visible from a scope, sorted
    ///
    /// Includes the user-scoped filenames of the scope's user.
    async fn list_artifact_keys(&self, scope: &ArtifactScope) -> Result<Vec<String>>;

    /// Delete every version of `filename`
    async fn delete_artifact(&self, scope: &ArtifactScope, filename: &str) -> Result<()>;

    /// List the stored versions of `filename`, ascending
    async fn list_versions(&self, scope: &ArtifactScope, filename: &str) -> Result<Vec<u64>>;

    /// Name of the backing implementation
    fn provider_name(&self) -> &str;
}
