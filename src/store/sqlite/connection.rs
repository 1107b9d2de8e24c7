//! Connection management for SqliteStore.

use super::SqliteStore;
use super::transaction::Transaction;
use crate::store::{SEARCHES_TABLE, StoreError, StoreResult, create_schema, table_exists};
use rusqlite::Connection;
use std::fs;
use std::path::Path;

impl SqliteStore {
    // ===========================================
    // In-Memory Connection
    // ===========================================

    /// Opens an in-memory store with an empty schema.
    pub fn open_in_memory() -> StoreResult<Self> {
        let conn = Connection::open_in_memory()?;
        Self::from_connection(conn)
    }

    // ===========================================
    // File-Based Connection
    // ===========================================

    /// Opens or creates a store at the given path.
    ///
    /// Creates parent directories if they don't exist. The `searches` table is
    /// only created when missing, so opening an existing file never loses data.
    pub fn open(path: &Path) -> StoreResult<Self> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            fs::create_dir_all(parent).map_err(|e| StoreError::Io {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let conn = Connection::open(path)?;
        tracing::debug!(path = %path.display(), "opened search store");
        Self::from_connection(conn)
    }

    fn from_connection(conn: Connection) -> StoreResult<Self> {
        // LIKE stays a wildcard match but stops folding ASCII case
        conn.execute_batch("PRAGMA case_sensitive_like = ON;")?;

        let mut store = Self { conn };
        if table_exists(&store.conn, SEARCHES_TABLE)? {
            // Files from older versions lack the sequence table
            create_schema(&store.conn)?;
        } else {
            store.initialize()?;
        }
        Ok(store)
    }

    // ===========================================
    // Schema Lifecycle
    // ===========================================

    /// Drops and recreates the schema.
    ///
    /// On a fresh file this simply creates the tables. On a populated store it
    /// discards every search and restarts id assignment at 1.
    pub fn initialize(&mut self) -> StoreResult<()> {
        let tx = self.transaction("initialize")?;
        tx.recreate_schema()?;
        tx.commit()?;
        tracing::info!("search store initialized");
        Ok(())
    }

    // ===========================================
    // Connection Accessors
    // ===========================================

    /// Returns a reference to the underlying SQLite connection.
    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    // ===========================================
    // Writes
    // ===========================================

    /// Starts a write transaction labelled with the action it performs.
    pub(crate) fn transaction(&mut self, action: &'static str) -> StoreResult<Transaction<'_>> {
        Transaction::begin(&self.conn, action)
    }
}
