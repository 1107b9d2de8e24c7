//! SearchRepository trait and error types.

use crate::domain::{Search, SearchId, TagList};
use std::collections::BTreeMap;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A database error occurred.
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// An I/O error occurred.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The id chosen for a new search is already taken.
    #[error("search id {id} is already in use")]
    DuplicateId { id: SearchId },

    /// A row holds an id that is not a positive integer.
    #[error("stored search has invalid id {0}")]
    InvalidStoredId(i64),

    /// Every positive id has been handed out.
    #[error("no search ids left to assign")]
    IdsExhausted,

    /// A search body must not be empty.
    #[error("SPL cannot be empty")]
    EmptySpl,
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Searches keyed by id, iterated in ascending id order.
pub type SearchMap = BTreeMap<SearchId, Search>;

/// Durable collection of searches.
///
/// Reads return empty collections rather than errors when nothing matches.
/// Mutations on an id that does not exist are no-ops and report `false`.
/// Every mutation is committed before the method returns.
pub trait SearchRepository {
    /// Stores a new search and returns its freshly assigned id.
    fn add(&mut self, tags: &TagList, spl: &str, notes: &str) -> StoreResult<SearchId>;

    /// Looks up a search by exact id.
    fn get_by_id(&self, id: SearchId) -> StoreResult<Option<Search>>;

    /// Returns every stored search.
    fn get_all(&self) -> StoreResult<SearchMap>;

    /// Returns searches whose body matches `%term%` under SQL `LIKE`.
    ///
    /// Matching is case-sensitive. `%` and `_` inside `term` are not escaped
    /// and keep their wildcard meaning.
    fn search_by_text(&self, term: &str) -> StoreResult<SearchMap>;

    /// Returns searches that carry `tag` as one of their tags.
    fn search_by_tag(&self, tag: &str) -> StoreResult<SearchMap>;

    /// Replaces the tags of a search.
    fn update_tags(&mut self, id: SearchId, tags: &TagList) -> StoreResult<bool>;

    /// Replaces the body of a search. Empty bodies are rejected.
    fn update_spl(&mut self, id: SearchId, spl: &str) -> StoreResult<bool>;

    /// Replaces the notes of a search.
    fn update_notes(&mut self, id: SearchId, notes: &str) -> StoreResult<bool>;

    /// Removes a search.
    fn delete(&mut self, id: SearchId) -> StoreResult<bool>;

    /// Distinct tags across all searches in first-seen order (ascending id).
    fn list_distinct_tags(&self) -> StoreResult<Vec<String>>;

    /// The id the next `add` will assign.
    fn next_id(&self) -> StoreResult<SearchId>;

    /// Drops and recreates the schema, discarding every search.
    fn reset(&mut self) -> StoreResult<()>;
}
