//! SearchRepository trait implementation for SqliteStore.

use super::SqliteStore;
use super::transaction::{Field, next_id_in};
use crate::domain::{Search, SearchId, TagList};
use crate::store::{SearchMap, SearchRepository, StoreError, StoreResult};
use rusqlite::{Connection, OptionalExtension, Params};
use std::collections::HashSet;

const SELECT_SEARCHES: &str = "SELECT id, tags, spl, notes, rowid FROM searches";

/// A `searches` row before its tag column is decoded.
struct RawRow {
    id: i64,
    tags: Option<String>,
    spl: String,
    notes: Option<String>,
}

impl RawRow {
    fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            tags: row.get(1)?,
            spl: row.get(2)?,
            notes: row.get(3)?,
        })
    }

    /// Converts the row into a Search.
    ///
    /// A malformed tag column only affects this row: it is logged and read as
    /// an empty tag list.
    fn into_search(self) -> StoreResult<Search> {
        let id = SearchId::new(self.id).map_err(|_| StoreError::InvalidStoredId(self.id))?;
        let tags = decode_tags(id, self.tags.as_deref());
        Ok(Search::new(id, tags, self.spl, self.notes.unwrap_or_default()))
    }
}

fn decode_tags(id: SearchId, raw: Option<&str>) -> TagList {
    let Some(raw) = raw else {
        return TagList::default();
    };
    match TagList::decode(raw) {
        Ok(tags) => tags,
        Err(e) => {
            tracing::warn!(%id, error = %e, "ignoring malformed tags");
            TagList::default()
        }
    }
}

/// Runs a row query and collects the results keyed by id.
///
/// A row that cannot be read, such as one whose id is not a positive
/// integer, is logged and skipped. The other rows are still returned.
fn query_searches(conn: &Connection, sql: &str, params: impl Params) -> StoreResult<SearchMap> {
    let mut stmt = conn.prepare(sql)?;
    let mut rows = stmt.query(params)?;

    let mut searches = SearchMap::new();
    while let Some(row) = rows.next()? {
        let search = RawRow::from_row(row)
            .map_err(StoreError::from)
            .and_then(RawRow::into_search);
        match search {
            Ok(search) => {
                // First row wins if a buggy writer ever stored the same id twice
                searches.entry(search.id).or_insert(search);
            }
            Err(e) => {
                let rowid = row.get::<_, i64>(4).ok();
                tracing::warn!(?rowid, error = %e, "skipping unreadable search row");
            }
        }
    }
    Ok(searches)
}

impl SqliteStore {
    fn update_field(&mut self, id: SearchId, field: Field, value: &str) -> StoreResult<bool> {
        let tx = self.transaction("update")?;
        let changed = tx.set_field(id, field, value)?;
        tx.commit()?;
        tracing::debug!(%id, ?field, changed, "updated search");
        Ok(changed)
    }
}

impl SearchRepository for SqliteStore {
    fn add(&mut self, tags: &TagList, spl: &str, notes: &str) -> StoreResult<SearchId> {
        if spl.is_empty() {
            return Err(StoreError::EmptySpl);
        }

        let tx = self.transaction("add")?;
        let id = tx.assign_id()?;
        tx.insert(id, tags, spl, notes)?;
        tx.commit()?;
        tracing::debug!(%id, "added search");
        Ok(id)
    }

    fn get_by_id(&self, id: SearchId) -> StoreResult<Option<Search>> {
        let row = self
            .conn
            .query_row(
                &format!("{SELECT_SEARCHES} WHERE id = ?1 ORDER BY rowid LIMIT 1"),
                [id.get()],
                RawRow::from_row,
            )
            .optional()?;

        row.map(RawRow::into_search).transpose()
    }

    fn get_all(&self) -> StoreResult<SearchMap> {
        query_searches(&self.conn, &format!("{SELECT_SEARCHES} ORDER BY id"), [])
    }

    fn search_by_text(&self, term: &str) -> StoreResult<SearchMap> {
        let pattern = format!("%{term}%");
        let results = query_searches(
            &self.conn,
            &format!("{SELECT_SEARCHES} WHERE spl LIKE ?1 ORDER BY id"),
            [pattern],
        )?;
        tracing::debug!(term, matches = results.len(), "text search");
        Ok(results)
    }

    fn search_by_tag(&self, tag: &str) -> StoreResult<SearchMap> {
        let mut results = self.get_all()?;
        results.retain(|_, search| search.tags.contains(tag));
        tracing::debug!(tag, matches = results.len(), "tag search");
        Ok(results)
    }

    fn update_tags(&mut self, id: SearchId, tags: &TagList) -> StoreResult<bool> {
        self.update_field(id, Field::Tags, &tags.encode())
    }

    fn update_spl(&mut self, id: SearchId, spl: &str) -> StoreResult<bool> {
        if spl.is_empty() {
            return Err(StoreError::EmptySpl);
        }
        self.update_field(id, Field::Spl, spl)
    }

    fn update_notes(&mut self, id: SearchId, notes: &str) -> StoreResult<bool> {
        self.update_field(id, Field::Notes, notes)
    }

    fn delete(&mut self, id: SearchId) -> StoreResult<bool> {
        let tx = self.transaction("delete")?;
        let removed = tx.remove(id)?;
        tx.commit()?;
        tracing::debug!(%id, removed, "deleted search");
        Ok(removed)
    }

    fn list_distinct_tags(&self) -> StoreResult<Vec<String>> {
        let mut stmt = self
            .conn
            .prepare("SELECT rowid, tags FROM searches ORDER BY id")?;
        let mut rows = stmt.query([])?;

        let mut seen = HashSet::new();
        let mut tags = Vec::new();
        while let Some(row) = rows.next()? {
            let rowid: i64 = row.get(0)?;
            let raw = match row.get::<_, Option<String>>(1) {
                Ok(Some(raw)) => raw,
                Ok(None) => continue,
                Err(e) => {
                    tracing::warn!(rowid, error = %e, "skipping unreadable tags");
                    continue;
                }
            };
            match TagList::decode(&raw) {
                Ok(decoded) => {
                    for tag in decoded.iter() {
                        if seen.insert(tag.clone()) {
                            tags.push(tag.clone());
                        }
                    }
                }
                Err(e) => tracing::warn!(rowid, error = %e, "skipping malformed tags"),
            }
        }
        Ok(tags)
    }

    fn next_id(&self) -> StoreResult<SearchId> {
        next_id_in(&self.conn)
    }

    fn reset(&mut self) -> StoreResult<()> {
        self.initialize()
    }
}
