use rusqlite::Connection;
use std::cell::RefCell;
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use tracing::info;

use crate::errors::ServerError;

pub const SCHEMA_SQL: &str = include_str!("../../sql/schema.sql");

// Thread-local connection slots, one per database path.
thread_local! {
    static DB_CONNS: RefCell<HashMap<String, Connection>> = RefCell::new(HashMap::new());
}

#[derive(Debug, Clone)]
pub struct Database {
    path: String,
}

impl Database {
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// Provides this thread's connection to the closure, opening it on first use.
    /// Must not be nested: the closure can't call `with_conn` again.
    pub fn with_conn<F, T>(&self, f: F) -> Result<T, ServerError>
    where
        F: FnOnce(&mut Connection) -> Result<T, ServerError>,
    {
        DB_CONNS
            .try_with(|cell| {
                let mut slots = cell
                    .try_borrow_mut()
                    .map_err(|_| ServerError::InternalError)?;
                let conn = match slots.entry(self.path.clone()) {
                    Entry::Occupied(slot) => slot.into_mut(),
                    Entry::Vacant(slot) => slot.insert(open(&self.path)?),
                };
                f(conn)
            })
            .map_err(|_| ServerError::InternalError)?
    }
}

fn open(path: &str) -> Result<Connection, ServerError> {
    let conn = Connection::open(path)
        .map_err(|e| ServerError::DbError(format!("Open DB failed: {e}")))?;
    conn.execute_batch("PRAGMA foreign_keys = ON; PRAGMA busy_timeout = 5000;")
        .map_err(|e| ServerError::DbError(format!("Configure DB failed: {e}")))?;
    Ok(conn)
}

/// Apply the embedded schema. Every statement is idempotent.
pub fn init_db(db: &Database) -> Result<(), ServerError> {
    db.with_conn(|conn| {
        conn.execute_batch(SCHEMA_SQL)
            .map_err(|e| ServerError::DbError(format!("Failed to apply schema: {e}")))
    })?;

    info!(path = db.path(), "database initialized");
    Ok(())
}
