//! Persistent search store backed by SQLite

mod repository;
mod schema;
mod sqlite;

pub use repository::{SearchMap, SearchRepository, StoreError, StoreResult};
pub use schema::{SEARCHES_TABLE, create_schema, reset_schema, table_exists};
pub use sqlite::SqliteStore;
