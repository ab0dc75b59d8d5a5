//! Session and Event Entities

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// Key-value state attached to a session
pub type SessionState = HashMap<String, Value>;

/// Entity: Conversation Session
///
/// A session belongs to one `(app_name, user_id)` pair and accumulates
/// events in order. Its state is the result of applying every event's
/// `state_delta` on top of the initial state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    /// Unique session identifier within the app/user pair
    pub id: String,
    /// Application that owns the session
    pub app_name: String,
    /// User the session belongs to
    pub user_id: String,
    /// Current session state
    #[serde(default)]
    pub state: SessionState,
    /// Events in append order
    #[serde(default)]
    pub events: Vec<Event>,
    /// Timestamp of the last mutation
    pub last_update_time: DateTime<Utc>,
}

impl Session {
    /// Create an empty session
    pub fn new(
        id: impl Into<String>,
        app_name: impl Into<String>,
        user_id: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            app_name: app_name.into(),
            user_id: user_id.into(),
            state: SessionState::new(),
            events: Vec::new(),
            last_update_time: Utc::now(),
        }
    }

    /// Replace the initial state
    pub fn with_state(mut self, state: SessionState) -> Self {
        self.state = state;
        self
    }

    /// Append an event and fold its state delta into the session state
    pub fn apply_event(&mut self, event: Event) {
        for (key, value) in &event.state_delta {
            self.state.insert(key.clone(), value.clone());
        }
        self.last_update_time = event.timestamp;
        self.events.push(event);
    }
}

/// Entity: Session Event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    /// Unique event identifier
    pub id: String,
    /// Who produced the event (`user`, an agent name, ...)
    pub author: String,
    /// Text content of the event
    pub content: String,
    /// When the event happened
    pub timestamp: DateTime<Utc>,
    /// State changes carried by the event
    #[serde(default)]
    pub state_delta: SessionState,
}

impl Event {
    /// Create an event with a fresh id and the current time
    pub fn new(author: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            author: author.into(),
            content: content.into(),
            timestamp: Utc::now(),
            state_delta: SessionState::new(),
        }
    }

    /// Attach a state change
    pub fn with_state_delta(mut self, key: impl Into<String>, value: Value) -> Self {
        self.state_delta.insert(key.into(), value);
        self
    }
}
