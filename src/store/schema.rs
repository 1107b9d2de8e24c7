//! SQLite schema for the search store.

use rusqlite::Connection;

/// Name of the table holding searches.
pub const SEARCHES_TABLE: &str = "searches";

/// Returns true if a table with the given name exists.
pub fn table_exists(conn: &Connection, name: &str) -> rusqlite::Result<bool> {
    conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?1)",
        [name],
        |row| row.get(0),
    )
}

/// Creates the tables that are missing.
///
/// # Tables Created
/// - `searches` - one row per search; columns are deliberately untyped and
///   unconstrained so files written by earlier versions open unchanged
/// - `search_sequence` - high-water mark of assigned ids
pub fn create_schema(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS searches(id, tags, spl, notes);
         CREATE TABLE IF NOT EXISTS search_sequence (last_id INTEGER NOT NULL);",
    )
}

/// Drops every table and recreates an empty schema.
pub fn reset_schema(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        "DROP TABLE IF EXISTS searches;
         DROP TABLE IF EXISTS search_sequence;",
    )?;
    create_schema(conn)
}
