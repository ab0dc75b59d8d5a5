//! In-memory memory service implementation
//!
//! Remembers session events per `(app_name, user_id)` and recalls them by
//! keyword overlap. Data is not persisted and will be lost on restart.

use crate::constants::INMEMORY_MEMORY_PROVIDER;
use async_trait::async_trait;
use dashmap::DashMap;
use svcreg_domain::entities::{MemoryEntry, SearchMemoryResponse, Session};
use svcreg_domain::error::Result;
use svcreg_domain::ports::MemoryService;
use std::collections::HashSet;
use std::sync::Arc;

/// Lowercased words of a text
fn words(text: &str) -> HashSet<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .map(str::to_lowercase)
        .collect()
}

/// In-memory memory service
///
/// Re-adding a session replaces what was remembered from it earlier.
#[derive(Debug, Clone)]
pub struct InMemoryMemoryService {
    memories: Arc<DashMap<(String, String), Vec<MemoryEntry>>>,
}

impl InMemoryMemoryService {
    /// Create an empty memory store
    pub fn new() -> Self {
        Self {
            memories: Arc::new(DashMap::new()),
        }
    }
}

impl Default for InMemoryMemoryService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MemoryService for InMemoryMemoryService {
    async fn add_session_to_memory(&self, session: &Session) -> Result<()> {
        let mut entries = self
            .memories
            .entry((session.app_name.clone(), session.user_id.clone()))
            .or_default();

        entries.retain(|entry| entry.session_id != session.id);
        entries.extend(
            session
                .events
                .iter()
                .filter(|event| !event.content.trim().is_empty())
                .map(|event| MemoryEntry {
                    session_id: session.id.clone(),
                    author: event.author.clone(),
                    content: event.content.clone(),
                    timestamp: event.timestamp,
                }),
        );
        Ok(())
    }

    async fn search_memory(
        &self,
        app_name: &str,
        user_id: &str,
        query: &str,
    ) -> Result<SearchMemoryResponse> {
        let query_words = words(query);
        if query_words.is_empty() {
            return Ok(SearchMemoryResponse::default());
        }

        let mut memories: Vec<MemoryEntry> = self
            .memories
            .get(&(app_name.to_string(), user_id.to_string()))
            .map(|entries| {
                entries
                    .iter()
                    .filter(|entry| !words(&entry.content).is_disjoint(&query_words))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();
        memories.sort_by_key(|entry| entry.timestamp);

        Ok(SearchMemoryResponse { memories })
    }

    fn provider_name(&self) -> &str {
        INMEMORY_MEMORY_PROVIDER
    }
}

// ============================================================================
// Auto-registration via linkme distributed slice
// ============================================================================

use svcreg_application::ports::registry::{SERVICE_SCHEMES, SchemeEntry};
use svcreg_domain::value_objects::{ParsedDescriptor, QueryParams, ServiceInstance};

/// Factory function for creating in-memory memory service instances.
pub(crate) fn in_memory_memory_factory(
    _descriptor: &ParsedDescriptor,
    query: &QueryParams,
) -> Result<ServiceInstance> {
    query.ensure_only(&[])?;
    let service: Arc<dyn MemoryService> = Arc::new(InMemoryMemoryService::new());
    Ok(ServiceInstance::from_port(service))
}

#[linkme::distributed_slice(SERVICE_SCHEMES)]
static INMEMORY_MEMORY: SchemeEntry = SchemeEntry {
    kind: "memory",
    scheme: "inmemory",
    description: "In-memory keyword memory (fast, non-persistent)",
    factory: in_memory_memory_factory,
};
