//! In-memory artifact service implementation
//!
//! Keeps every saved version in memory. Data is not persisted and will be
//! lost on restart.

use crate::constants::INMEMORY_ARTIFACT_PROVIDER;
use async_trait::async_trait;
use dashmap::DashMap;
use svcreg_domain::entities::{Artifact, ArtifactScope};
use svcreg_domain::error::Result;
use svcreg_domain::ports::ArtifactService;
use std::sync::Arc;

/// In-memory artifact service
///
/// Versions of a filename are stored in save order; the version number is
/// the index.
#[derive(Debug, Clone)]
pub struct InMemoryArtifactService {
    artifacts: Arc<DashMap<String, Vec<Artifact>>>,
}

impl InMemoryArtifactService {
    /// Create an empty artifact store
    pub fn new() -> Self {
        Self {
            artifacts: Arc::new(DashMap::new()),
        }
    }

    fn key(scope: &ArtifactScope, filename: &str) -> String {
        format!("{}/{filename}", scope.namespace_for(filename))
    }
}

impl Default for InMemoryArtifactService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ArtifactService for InMemoryArtifactService {
    async fn save_artifact(
        &self,
        scope: &ArtifactScope,
        filename: &str,
        artifact: Artifact,
    ) -> Result<u64> {
        let mut versions = self.artifacts.entry(Self::key(scope, filename)).or_default();
        versions.push(artifact);
        Ok(versions.len() as u64 - 1)
    }

    async fn load_artifact(
        &self,
        scope: &ArtifactScope,
        filename: &str,
        version: Option<u64>,
    ) -> Result<Option<Artifact>> {
        let Some(versions) = self.artifacts.get(&Self::key(scope, filename)) else {
            return Ok(None);
        };
        let artifact = match version {
            Some(v) => usize::try_from(v).ok().and_then(|v| versions.get(v)),
            None => versions.last(),
        };
        Ok(artifact.cloned())
    }

    async fn list_artifact_keys(&self, scope: &ArtifactScope) -> Result<Vec<String>> {
        let session_prefix = format!("{}/{}/{}/", scope.app_name, scope.user_id, scope.session_id);
        let user_prefix = format!("{}/{}/user/", scope.app_name, scope.user_id);

        let mut keys: Vec<String> = self
            .artifacts
            .iter()
            .filter_map(|item| {
                let key = item.key();
                key.strip_prefix(&session_prefix)
                    .or_else(|| key.strip_prefix(&user_prefix))
                    .map(str::to_string)
            })
            .collect();
        keys.sort_unstable();
        keys.dedup();
        Ok(keys)
    }

    async fn delete_artifact(&self, scope: &ArtifactScope, filename: &str) -> Result<()> {
        self.artifacts.remove(&Self::key(scope, filename));
        Ok(())
    }

    async fn list_versions(&self, scope: &ArtifactScope, filename: &str) -> Result<Vec<u64>> {
        let count = self
            .artifacts
            .get(&Self::key(scope, filename))
            .map_or(0, |versions| versions.len() as u64);
        Ok((0..count).collect())
    }

    fn provider_name(&self) -> &str {
        INMEMORY_ARTIFACT_PROVIDER
    }
}

// ============================================================================
// Auto-registration via linkme distributed slice
// ============================================================================

use svcreg_application::ports::registry::{SERVICE_SCHEMES, SchemeEntry};
use svcreg_domain::value_objects::{ParsedDescriptor, QueryParams, ServiceInstance};

/// Factory function for creating in-memory artifact service instances.
pub(crate) fn in_memory_artifact_factory(
    _descriptor: &ParsedDescriptor,
    query: &QueryParams,
) -> Result<ServiceInstance> {
    query.ensure_only(&[])?;
    let service: Arc<dyn ArtifactService> = Arc::new(InMemoryArtifactService::new());
    Ok(ServiceInstance::from_port(service))
}

#[linkme::distributed_slice(SERVICE_SCHEMES)]
static INMEMORY_ARTIFACT: SchemeEntry = SchemeEntry {
    kind: "artifact",
    scheme: "inmemory",
    description: "In-memory versioned artifact store (fast, non-persistent)",
    factory: in_memory_artifact_factory,
};
