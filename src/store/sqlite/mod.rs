//! SQLite-backed search store implementation.

mod connection;
mod repo_impl;
mod transaction;


use rusqlite::Connection;

// ===========================================
// SqliteStore Struct
// ===========================================

/// SQLite-backed search store.
///
/// Owns the single connection used for the lifetime of the process.
pub struct SqliteStore {
    pub(crate) conn: Connection,
}
