//! Session service implementations
//!
//! | Provider | Scheme | Description |
//! |----------|--------|-------------|
//! | [`InMemorySessionService`] | `inmemory` | Process-local session store |
//! | [`SqliteSessionService`] | `db+sqlite` | Durable session store on SQLite |

pub mod in_memory;
#[cfg(feature = "session-sqlite")]
pub mod sqlite;

pub use in_memory::InMemorySessionService;
#[cfg(feature = "session-sqlite")]
pub use sqlite::SqliteSessionService;
