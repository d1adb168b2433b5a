use rusqlite::Connection;
use std::path::Path;
use std::sync::{Arc, Mutex};

use crate::errors::{WeirError, WeirResult};

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS accounts (
    account_id TEXT PRIMARY KEY,
    active INTEGER NOT NULL DEFAULT 1,
    created_at TEXT NOT NULL DEFAULT (datetime('now'))
);

CREATE TABLE IF NOT EXISTS fetch_yields (
    account_id TEXT PRIMARY KEY,
    last_fetch_at TEXT NOT NULL,
    last_requested_count INTEGER NOT NULL,
    last_new_count INTEGER NOT NULL,
    total_fetches INTEGER NOT NULL,
    avg_new_rate REAL NOT NULL,
    consecutive_empty_fetches INTEGER NOT NULL
);

CREATE TABLE IF NOT EXISTS scopes (
    consumer_id TEXT NOT NULL,
    account_id TEXT NOT NULL,
    priority INTEGER NOT NULL,
    PRIMARY KEY (consumer_id, account_id)
);

CREATE INDEX IF NOT EXISTS idx_scopes_consumer ON scopes(consumer_id);

CREATE TABLE IF NOT EXISTS filter_rules (
    consumer_id TEXT NOT NULL,
    kind TEXT NOT NULL,
    value TEXT NOT NULL,
    PRIMARY KEY (consumer_id, kind, value)
);

CREATE TABLE IF NOT EXISTS items (
    id TEXT PRIMARY KEY,
    text TEXT NOT NULL,
    author_id TEXT NOT NULL,
    created_at TEXT NOT NULL,
    content_type TEXT
);

CREATE INDEX IF NOT EXISTS idx_items_author_created ON items(author_id, created_at);
"#;

#[derive(Clone)]
pub struct SqliteStorage {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteStorage {
    pub fn new<P: AsRef<Path>>(path: P) -> WeirResult<Self> {
        let conn = Connection::open(path)?;
        Self::init(conn)
    }

    pub fn in_memory() -> WeirResult<Self> {
        let conn = Connection::open_in_memory()?;
        Self::init(conn)
    }

    fn init(conn: Connection) -> WeirResult<Self> {
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        conn.execute_batch(SCHEMA)?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    pub fn connection(&self) -> Result<std::sync::MutexGuard<'_, Connection>, WeirError> {
        self.conn
            .lock()
            .map_err(|_| WeirError::Database(rusqlite::Error::InvalidQuery))
    }
}
