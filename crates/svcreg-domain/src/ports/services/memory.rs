//! Memory Service Port

use crate::entities::{SearchMemoryResponse, Session};
use crate::error::Result;
use async_trait::async_trait;

/// Memory Service Port
///
/// Remembers the events of finished sessions and recalls them by query.
#[async_trait]
pub trait MemoryService: Send + Sync + std::fmt::Debug {
    /// Ingest every event of a session
    async fn add_session_to_memory(&self, session: &Session) -> Result<()>;

    /// Search the memories of a user
    async fn search_memory(
        &self,
        app_name: &str,
        user_id: &str,
        query: &str,
    ) -> Result<SearchMemoryResponse>;

    /// Name of the backing implementation
    fn provider_name(&self) -> &str;
}
