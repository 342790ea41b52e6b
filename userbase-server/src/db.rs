//! SQLite storage accessor for userbase-server
//!
//! One connection per request, opened lazily on first use and closed when
//! the request's [`RequestDb`] is dropped. No pool, no shared connection.
//! The schema is created once at startup, and only if the store file does
//! not exist yet.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use rusqlite::{Connection, OpenFlags, OptionalExtension, Params, Row};
use tracing::{debug, info, warn};

use crate::error::ServerResult;

/// Setup script shipped with the crate
pub const DEFAULT_SCHEMA: &str = include_str!("../schema.sql");

/// Process-wide handle to the store location
#[derive(Clone, Debug)]
pub struct Database {
    path: Arc<PathBuf>,
}

impl Database {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Arc::new(path.into()),
        }
    }

    /// Get the database file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Get database file size in bytes
    pub fn size_bytes(&self) -> Option<u64> {
        std::fs::metadata(self.path.as_path()).ok().map(|m| m.len())
    }

    /// Start a request-scoped handle. No I/O happens until first use.
    pub fn request(&self) -> RequestDb {
        RequestDb {
            path: Arc::clone(&self.path),
            conn: None,
        }
    }

    /// Create the schema if the store file is absent.
    ///
    /// Returns `true` when the script ran. An existing file is never
    /// touched, so calling this repeatedly is safe.
    pub fn bootstrap(&self, script: &str) -> ServerResult<bool> {
        if self.path.exists() {
            info!("Using existing database at {}", self.path.display());
            return Ok(false);
        }

        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let result = Connection::open(self.path.as_path())
            .map_err(Into::into)
            .and_then(|mut conn| initialize_schema(&mut conn, script));

        if let Err(e) = result {
            // A half-initialized file would be skipped on the next start.
            warn!("Schema bootstrap failed, removing {}", self.path.display());
            if let Err(rm) = std::fs::remove_file(self.path.as_path()) {
                warn!("Could not remove {}: {}", self.path.display(), rm);
            }
            return Err(e);
        }

        info!("Initialized database schema at {}", self.path.display());
        Ok(true)
    }
}

/// Run a setup script in one transaction and commit it.
pub fn initialize_schema(conn: &mut Connection, script: &str) -> ServerResult<()> {
    let tx = conn.transaction()?;
    tx.execute_batch(script)?;
    tx.commit()?;
    Ok(())
}

/// Request-scoped connection handle
pub struct RequestDb {
    path: Arc<PathBuf>,
    conn: Option<Connection>,
}

impl RequestDb {
    /// Return this request's connection, opening it on the first call.
    ///
    /// Never creates the store file: a missing store is an error here, and
    /// only [`Database::bootstrap`] may create it.
    pub fn get_connection(&mut self) -> ServerResult<&mut Connection> {
        let conn = match self.conn.take() {
            Some(conn) => conn,
            None => {
                debug!("Opening request connection to {}", self.path.display());
                Connection::open_with_flags(
                    self.path.as_path(),
                    OpenFlags::SQLITE_OPEN_READ_WRITE
                        | OpenFlags::SQLITE_OPEN_URI
                        | OpenFlags::SQLITE_OPEN_NO_MUTEX,
                )?
            }
        };
        Ok(self.conn.insert(conn))
    }

    /// Whether a connection has been opened for this request
    pub fn is_open(&self) -> bool {
        self.conn.is_some()
    }

    /// Run a query and map every row.
    pub fn query<T, P, F>(&mut self, sql: &str, params: P, map: F) -> ServerResult<Vec<T>>
    where
        P: Params,
        F: FnMut(&Row<'_>) -> rusqlite::Result<T>,
    {
        let conn = self.get_connection()?;
        let mut stmt = conn.prepare(sql)?;
        let rows = stmt
            .query_map(params, map)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    /// Run a query expected to return at most one row.
    pub fn query_row<T, P, F>(&mut self, sql: &str, params: P, map: F) -> ServerResult<Option<T>>
    where
        P: Params,
        F: FnOnce(&Row<'_>) -> rusqlite::Result<T>,
    {
        let conn = self.get_connection()?;
        let row = conn.query_row(sql, params, map).optional()?;
        Ok(row)
    }

    /// Run a single mutation, commit it, and return the last inserted row id.
    pub fn execute<P: Params>(&mut self, sql: &str, params: P) -> ServerResult<i64> {
        let conn = self.get_connection()?;
        let tx = conn.transaction()?;
        tx.execute(sql, params)?;
        let id = tx.last_insert_rowid();
        tx.commit()?;
        Ok(id)
    }
}
