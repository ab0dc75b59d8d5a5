//! Memory Entities

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Entity: Recalled Memory
///
/// One event remembered from an earlier session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemoryEntry {
    /// Session the event came from
    pub session_id: String,
    /// Author of the remembered event
    pub author: String,
    /// Text content of the remembered event
    pub content: String,
    /// When the event happened
    pub timestamp: DateTime<Utc>,
}

/// Result of a memory search
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchMemoryResponse {
    /// Matching memories, oldest first
    pub memories: Vec<MemoryEntry>,
}

impl SearchMemoryResponse {
    /// Whether nothing matched
    pub fn is_empty(&self) -> bool {
        self.memories.is_empty()
    }

    /// Number of matches
    pub fn len(&self) -> usize {
        self.memories.len()
    }
}
