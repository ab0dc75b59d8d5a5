//! Session Service Port
//!
//! Port for session storage backends. The in-memory backend keeps sessions
//! for the lifetime of the process; plugins may register durable ones.

use crate::entities::{Event, Session, SessionState};
use crate::error::Result;
use async_trait::async_trait;

/// Session Service Port
///
/// Stores sessions per `(app_name, user_id)` and appends events to them.
///
/// # Example
///
/// ```ignore
/// let session = sessions.create_session("app", "u1", None, None).await?;
/// let event = Event::new("user", "hello").with_state_delta("k", json!(1));
/// sessions.append_event(&session, event).await?;
/// ```
#[async_trait]
pub trait SessionService: Send + Sync + std::fmt::Debug {
    /// Create a session
    ///
    /// # Arguments
    /// * `app_name` - Owning application
    /// * `user_id` - Owning user
    /// * `state` - Initial state, empty when `None`
    /// * `session_id` - Explicit id, generated when `None`
    ///
    /// # Errors
    /// `InvalidArgument` when an explicit id is already taken.
    async fn create_session(
        &self,
        app_name: &str,
        user_id: &str,
        state: Option<SessionState>,
        session_id: Option<&str>,
    ) -> Result<Session>;

    /// Fetch a session, `None` if it does not exist
    async fn get_session(
        &self,
        app_name: &str,
        user_id: &str,
        session_id: &str,
    ) -> Result<Option<Session>>;

    /// List the sessions of a user, without their events
    async fn list_sessions(&self, app_name: &str, user_id: &str) -> Result<Vec<Session>>;

    /// Delete a session; deleting a missing session is not an error
    async fn delete_session(&self, app_name: &str, user_id: &str, session_id: &str)
    -> Result<()>;

    /// Append an event to a stored session and apply its state delta
    ///
    /// # Errors
    /// `NotFound` when the session is not stored by this service.
    async fn append_event(&self, session: &Session, event: Event) -> Result<Event>;

    /// Name of the backing implementation
    fn provider_name(&self) -> &str;
}
