//! SQLite session service implementation
//!
//! Durable session store on a single SQLite database. Identifiers follow the
//! SQLAlchemy URL layout the `db+` prefix comes from:
//!
//! ```text
//! db+sqlite://                  in-memory database
//! db+sqlite:///:memory:         in-memory database
//! db+sqlite:///sessions.db      relative to the working directory
//! db+sqlite:////var/lib/s.db    absolute path
//! ```
//!
//! Session state is stored as JSON next to the session row; events are
//! stored whole, one row per event, in append order.

use crate::constants::{SQLITE_MEMORY_PATH, SQLITE_PATH_PARAM, SQLITE_SESSION_PROVIDER};
use crate::utils::decode_path;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use rusqlite::{Connection, OptionalExtension, params};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use svcreg_domain::entities::{Event, Session, SessionState};
use svcreg_domain::error::{Error, Result};
use svcreg_domain::ports::SessionService;
use tracing::debug;

const SCHEMA: &str = "
    CREATE TABLE IF NOT EXISTS sessions (
        app_name         TEXT NOT NULL,
        user_id          TEXT NOT NULL,
        id               TEXT NOT NULL,
        state            TEXT NOT NULL,
        last_update_time TEXT NOT NULL,
        PRIMARY KEY (app_name, user_id, id)
    );
    CREATE TABLE IF NOT EXISTS events (
        seq        INTEGER PRIMARY KEY AUTOINCREMENT,
        app_name   TEXT NOT NULL,
        user_id    TEXT NOT NULL,
        session_id TEXT NOT NULL,
        event      TEXT NOT NULL
    );
    CREATE INDEX IF NOT EXISTS idx_events_session
        ON events (app_name, user_id, session_id);
";

fn sqlite_err(context: &str, e: rusqlite::Error) -> Error {
    Error::io_with_source(format!("sqlite {context} failed"), e)
}

fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| Error::internal(format!("stored timestamp '{raw}' is invalid: {e}")))
}

/// SQLite session service
///
/// Clones share one connection.
#[derive(Debug, Clone)]
pub struct SqliteSessionService {
    conn: Arc<Mutex<Connection>>,
    location: Option<PathBuf>,
}

impl SqliteSessionService {
    /// Open (creating if needed) a database file
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| {
                Error::io_with_source(format!("Failed to create {}", parent.display()), e)
            })?;
        }
        let conn = Connection::open(path).map_err(|e| sqlite_err("open", e))?;
        debug!(path = %path.display(), "Opened sqlite session store");
        Self::initialize(conn, Some(path.to_path_buf()))
    }

    /// Open a private in-memory database
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().map_err(|e| sqlite_err("open", e))?;
        Self::initialize(conn, None)
    }

    fn initialize(conn: Connection, location: Option<PathBuf>) -> Result<Self> {
        conn.execute_batch("PRAGMA busy_timeout = 5000;")
            .map_err(|e| sqlite_err("pragma", e))?;
        conn.execute_batch(SCHEMA)
            .map_err(|e| sqlite_err("schema", e))?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
            location,
        })
    }

    /// Database file, `None` for in-memory stores
    pub fn location(&self) -> Option<&Path> {
        self.location.as_deref()
    }

    fn load_events(
        conn: &Connection,
        app_name: &str,
        user_id: &str,
        session_id: &str,
    ) -> Result<Vec<Event>> {
        let mut stmt = conn
            .prepare(
                "SELECT event FROM events
                 WHERE app_name = ?1 AND user_id = ?2 AND session_id = ?3
                 ORDER BY seq",
            )
            .map_err(|e| sqlite_err("select events", e))?;
        let rows = stmt
            .query_map(params![app_name, user_id, session_id], |row| row.get::<_, String>(0))
            .map_err(|e| sqlite_err("select events", e))?;

        let mut events = Vec::new();
        for row in rows {
            let json = row.map_err(|e| sqlite_err("read event", e))?;
            events.push(serde_json::from_str(&json)?);
        }
        Ok(events)
    }
}

#[async_trait]
impl SessionService for SqliteSessionService {
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
        let state_json = serde_json::to_string(&session.state)?;

        let conn = self.conn.lock();
        let inserted = conn
            .execute(
                "INSERT OR IGNORE INTO sessions (app_name, user_id, id, state, last_update_time)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![
                    app_name,
                    user_id,
                    id,
                    state_json,
                    session.last_update_time.to_rfc3339()
                ],
            )
            .map_err(|e| sqlite_err("insert session", e))?;
        if inserted == 0 {
            return Err(Error::invalid_argument(format!(
                "session '{id}' already exists for {app_name}/{user_id}"
            )));
        }
        Ok(session)
    }

    async fn get_session(
        &self,
        app_name: &str,
        user_id: &str,
        session_id: &str,
    ) -> Result<Option<Session>> {
        let conn = self.conn.lock();
        let row = conn
            .query_row(
                "SELECT state, last_update_time FROM sessions
                 WHERE app_name = ?1 AND user_id = ?2 AND id = ?3",
                params![app_name, user_id, session_id],
                |row| Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?)),
            )
            .optional()
            .map_err(|e| sqlite_err("select session", e))?;
        let Some((state, updated)) = row else {
            return Ok(None);
        };

        let mut session = Session::new(session_id, app_name, user_id)
            .with_state(serde_json::from_str(&state)?);
        session.last_update_time = parse_timestamp(&updated)?;
        session.events = Self::load_events(&conn, app_name, user_id, session_id)?;
        Ok(Some(session))
    }

    async fn list_sessions(&self, app_name: &str, user_id: &str) -> Result<Vec<Session>> {
        let conn = self.conn.lock();
        let mut stmt = conn
            .prepare(
                "SELECT id, state, last_update_time FROM sessions
                 WHERE app_name = ?1 AND user_id = ?2
                 ORDER BY id",
            )
            .map_err(|e| sqlite_err("list sessions", e))?;
        let rows = stmt
            .query_map(params![app_name, user_id], |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, String>(2)?,
                ))
            })
            .map_err(|e| sqlite_err("list sessions", e))?;

        let mut sessions = Vec::new();
        for row in rows {
            let (id, state, updated) = row.map_err(|e| sqlite_err("read session", e))?;
            let mut session =
                Session::new(id, app_name, user_id).with_state(serde_json::from_str(&state)?);
            session.last_update_time = parse_timestamp(&updated)?;
            sessions.push(session);
        }
        Ok(sessions)
    }

    async fn delete_session(
        &self,
        app_name: &str,
        user_id: &str,
        session_id: &str,
    ) -> Result<()> {
        let mut conn = self.conn.lock();
        let tx = conn
            .transaction()
            .map_err(|e| sqlite_err("delete session begin", e))?;
        tx.execute(
            "DELETE FROM events WHERE app_name = ?1 AND user_id = ?2 AND session_id = ?3",
            params![app_name, user_id, session_id],
        )
        .map_err(|e| sqlite_err("delete events", e))?;
        tx.execute(
            "DELETE FROM sessions WHERE app_name = ?1 AND user_id = ?2 AND id = ?3",
            params![app_name, user_id, session_id],
        )
        .map_err(|e| sqlite_err("delete session", e))?;
        tx.commit()
            .map_err(|e| sqlite_err("delete session commit", e))
    }

    async fn append_event(&self, session: &Session, event: Event) -> Result<Event> {
        let mut conn = self.conn.lock();
        let tx = conn
            .transaction()
            .map_err(|e| sqlite_err("append event begin", e))?;

        let state = tx
            .query_row(
                "SELECT state FROM sessions WHERE app_name = ?1 AND user_id = ?2 AND id = ?3",
                params![session.app_name, session.user_id, session.id],
                |row| row.get::<_, String>(0),
            )
            .optional()
            .map_err(|e| sqlite_err("select session", e))?
            .ok_or_else(|| Error::not_found(format!("session '{}'", session.id)))?;

        let mut state: SessionState = serde_json::from_str(&state)?;
        for (key, value) in &event.state_delta {
            state.insert(key.clone(), value.clone());
        }

        tx.execute(
            "UPDATE sessions SET state = ?4, last_update_time = ?5
             WHERE app_name = ?1 AND user_id = ?2 AND id = ?3",
            params![
                session.app_name,
                session.user_id,
                session.id,
                serde_json::to_string(&state)?,
                event.timestamp.to_rfc3339()
            ],
        )
        .map_err(|e| sqlite_err("update session", e))?;
        tx.execute(
            "INSERT INTO events (app_name, user_id, session_id, event) VALUES (?1, ?2, ?3, ?4)",
            params![
                session.app_name,
                session.user_id,
                session.id,
                serde_json::to_string(&event)?
            ],
        )
        .map_err(|e| sqlite_err("insert event", e))?;
        tx.commit()
            .map_err(|e| sqlite_err("append event commit", e))?;

        Ok(event)
    }

    fn provider_name(&self) -> &str {
        SQLITE_SESSION_PROVIDER
    }
}

/// Database location named by a `db+sqlite:` descriptor, `None` for in-memory
pub(crate) fn database_from_descriptor(descriptor: &ParsedDescriptor) -> Result<Option<PathBuf>> {
    if !descriptor.authority.is_empty() {
        return Err(Error::invalid_argument(format!(
            "sqlite identifiers take no host, got '{}' (use db+sqlite:///relative.db or db+sqlite:////absolute.db)",
            descriptor.authority
        )));
    }
    let path = descriptor.path.strip_prefix('/').unwrap_or(&descriptor.path);
    match path {
        "" | SQLITE_MEMORY_PATH => Ok(None),
        path => decode_path(path).map(Some),
    }
}

// ============================================================================
// Auto-registration via linkme distributed slice
// ============================================================================

use svcreg_application::ports::registry::{SERVICE_SCHEMES, SchemeEntry};
use svcreg_domain::value_objects::{ParsedDescriptor, QueryParams, ServiceInstance};

/// Factory function for creating SQLite session service instances.
pub(crate) fn sqlite_session_factory(
    descriptor: &ParsedDescriptor,
    query: &QueryParams,
) -> Result<ServiceInstance> {
    query.ensure_only(&[])?;
    let service = match database_from_descriptor(descriptor)? {
        Some(path) => SqliteSessionService::open(path)?,
        None => SqliteSessionService::open_in_memory()?,
    };
    let service: Arc<dyn SessionService> = Arc::new(service);
    Ok(ServiceInstance::from_port(service))
}

/// `python:` export; the database comes from `?path=`, in-memory when absent.
pub(crate) fn sqlite_session_module_factory(
    _descriptor: &ParsedDescriptor,
    query: &QueryParams,
) -> Result<ServiceInstance> {
    query.ensure_only(&[SQLITE_PATH_PARAM])?;
    let path = query
        .get(SQLITE_PATH_PARAM)
        .filter(|p| !p.is_empty() && *p != SQLITE_MEMORY_PATH);
    let service = match path {
        Some(path) => SqliteSessionService::open(path)?,
        None => SqliteSessionService::open_in_memory()?,
    };
    let service: Arc<dyn SessionService> = Arc::new(service);
    Ok(ServiceInstance::from_port(service))
}

#[linkme::distributed_slice(SERVICE_SCHEMES)]
static SQLITE_SESSION: SchemeEntry = SchemeEntry {
    kind: "session",
    scheme: "db+sqlite",
    description: "SQLite session store (db+sqlite:///file.db, db+sqlite:// for in-memory)",
    factory: sqlite_session_factory,
};
