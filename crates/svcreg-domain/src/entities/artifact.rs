//! Artifact Entities

use crate::constants::USER_NAMESPACE_PREFIX;
use serde::{Deserialize, Serialize};

/// Entity: Stored Artifact Version
///
/// Binary payload plus its MIME type. Each save of the same filename creates a
/// new version, numbered from 0.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Artifact {
    /// Raw bytes
    pub data: Vec<u8>,
    /// MIME type of the data
    pub mime_type: String,
}

impl Artifact {
    /// Create an artifact
    pub fn new(data: impl Into<Vec<u8>>, mime_type: impl Into<String>) -> Self {
        Self {
            data: data.into(),
            mime_type: mime_type.into(),
        }
    }

    /// Create a `text/plain` artifact
    pub fn text(text: impl Into<String>) -> Self {
        Self::new(text.into().into_bytes(), "text/plain")
    }
}

/// Address of an artifact: which app, user and session it belongs to
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ArtifactScope {
    /// Owning application
    pub app_name: String,
    /// Owning user
    pub user_id: String,
    /// Owning session (ignored for user-scoped filenames)
    pub session_id: String,
}

impl ArtifactScope {
    /// Create a scope
    pub fn new(
        app_name: impl Into<String>,
        user_id: impl Into<String>,
        session_id: impl Into<String>,
    ) -> Self {
        Self {
            app_name: app_name.into(),
            user_id: user_id.into(),
            session_id: session_id.into(),
        }
    }

    /// Storage namespace for a filename
    ///
    /// Filenames prefixed with `user:` live in the user namespace and are
    /// visible from every session of that user.
    pub fn namespace_for(&self, filename: &str) -> String {
        if is_user_scoped(filename) {
            format!("{}/{}/user", self.app_name, self.user_id)
        } else {
            format!("{}/{}/{}", self.app_name, self.user_id, self.session_id)
        }
    }
}

/// Whether a filename lives in the user namespace
pub fn is_user_scoped(filename: &str) -> bool {
    filename.starts_with(USER_NAMESPACE_PREFIX)
}
