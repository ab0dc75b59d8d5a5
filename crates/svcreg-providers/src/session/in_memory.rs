//! In-memory session service implementation
//!
//! Keeps sessions in a concurrent map for the lifetime of the process.
//! Data is not persisted and will be lost on restart.

use crate::constants::INMEMORY_SESSION_PROVIDER;
use async_trait::async_trait;
use dashmap::DashMap;
use svcreg_domain::entities::{Event, Session, SessionState};
use svcreg_domain::error::{Error, Result};
use svcreg_domain::ports::SessionService;
use std::sync::Arc;

/// `(app_name, user_id, session_id)`
type SessionKey = (String, String, String);

fn session_key(app_name: &str, user_id: &str, session_id: &str) -> SessionKey {
    (
        app_name.to_string(),
        user_id.to_string(),
        session_id.to_string(),
    )
}

/// In-memory session service
///
/// Clones share storage, so a default instance handed to several consumers
/// sees one set of sessions.
#[derive(Debug, Clone)]
pub struct InMemorySessionService {
    sessions: Arc<DashMap<SessionKey, Session>>,
}

impl InMemorySessionService {
    /// Create an empty session store
    pub fn new() -> Self {
        Self {
            sessions: Arc::new(DashMap::new()),
        }
    }

    /// Number of stored sessions across all apps and users
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    /// Whether no session is stored
    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

impl Default for InMemorySessionService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SessionService for InMemorySessionService {
    async fn create_session(
        &self,
        app_name: &str,
        user_id: &str,
        state: Option<SessionState>,
        session_id: Option<&str>,
    ) -> Result<Session> {
        let id = session_id
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .map_or_else(|| uuid::Uuid::new_v4().to_string(), str::to_string);

        let session = Session::new(&id, app_name, user_id).with_state(state.unwrap_or_default());
        match self.sessions.entry(session_key(app_name, user_id, &id)) {
            dashmap::mapref::entry::Entry::Occupied(_) => Err(Error::invalid_argument(format!(
                "session '{id}' already exists for {app_name}/{user_id}"
            ))),
            dashmap::mapref::entry::Entry::Vacant(slot) => {
                slot.insert(session.clone());
                Ok(session)
            }
        }
    }

    async fn get_session(
        &self,
        app_name: &str,
        user_id: &str,
        session_id: &str,
    ) -> Result<Option<Session>> {
        Ok(self
            .sessions
            .get(&session_key(app_name, user_id, session_id))
            .map(|s| s.clone()))
    }

    async fn list_sessions(&self, app_name: &str, user_id: &str) -> Result<Vec<Session>> {
        let mut sessions: Vec<Session> = self
            .sessions
            .iter()
            .filter(|item| {
                let (app, user, _) = item.key();
                app == app_name && user == user_id
            })
            .map(|item| {
                let mut session = item.value().clone();
                session.events.clear();
                session
            })
            .collect();
        sessions.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(sessions)
    }

    async fn delete_session(
        &self,
        app_name: &str,
        user_id: &str,
        session_id: &str,
    ) -> Result<()> {
        self.sessions
            .remove(&session_key(app_name, user_id, session_id));
        Ok(())
    }

    async fn append_event(&self, session: &Session, event: Event) -> Result<Event> {
        let key = session_key(&session.app_name, &session.user_id, &session.id);
        let mut stored = self
            .sessions
            .get_mut(&key)
            .ok_or_else(|| Error::not_found(format!("session '{}'", session.id)))?;
        stored.apply_event(event.clone());
        Ok(event)
    }

    fn provider_name(&self) -> &str {
        INMEMORY_SESSION_PROVIDER
    }
}

// ============================================================================
// Auto-registration via linkme distributed slice
// ============================================================================

use svcreg_application::ports::registry::{SERVICE_SCHEMES, SchemeEntry};
use svcreg_domain::value_objects::{ParsedDescriptor, QueryParams, ServiceInstance};

/// Factory function for creating in-memory session service instances.
pub(crate) fn in_memory_session_factory(
    _descriptor: &ParsedDescriptor,
    query: &QueryParams,
) -> Result<ServiceInstance> {
    query.ensure_only(&[])?;
    let service: Arc<dyn SessionService> = Arc::new(InMemorySessionService::new());
    Ok(ServiceInstance::from_port(service))
}

#[linkme::distributed_slice(SERVICE_SCHEMES)]
static INMEMORY_SESSION: SchemeEntry = SchemeEntry {
    kind: "session",
    scheme: "inmemory",
    description: "In-memory session store (fast, non-persistent)",
    factory: in_memory_session_factory,
};
