//! Write transactions over the searches table.

use crate::domain::{SearchId, TagList};
use crate::store::{StoreError, StoreResult, reset_schema};
use rusqlite::{Connection, params};

/// Editable column of a stored search.
#[derive(Debug, Clone, Copy)]
pub(crate) enum Field {
    Tags,
    Spl,
    Notes,
}

impl Field {
    fn update_sql(self) -> &'static str {
        match self {
            Field::Tags => "UPDATE searches SET tags = ?1 WHERE id = ?2",
            Field::Spl => "UPDATE searches SET spl = ?1 WHERE id = ?2",
            Field::Notes => "UPDATE searches SET notes = ?1 WHERE id = ?2",
        }
    }
}

/// One atomic change to the store.
///
/// Starts with `BEGIN IMMEDIATE`, so the write lock is taken before the first
/// read. Everything done through it is rolled back on drop unless
/// [`Transaction::commit`] is called.
pub(crate) struct Transaction<'a> {
    conn: &'a Connection,
    action: &'static str,
    committed: bool,
}

impl<'a> Transaction<'a> {
    pub(super) fn begin(conn: &'a Connection, action: &'static str) -> StoreResult<Self> {
        conn.execute_batch("BEGIN IMMEDIATE")?;
        tracing::trace!(action, "transaction started");
        Ok(Self {
            conn,
            action,
            committed: false,
        })
    }

    /// Reserves the next search id and records it as handed out.
    ///
    /// The id is above every live row and every id assigned before, even if
    /// the search holding it was deleted since.
    pub(crate) fn assign_id(&self) -> StoreResult<SearchId> {
        let id = next_id_in(self.conn)?;
        if id_exists(self.conn, id)? {
            return Err(StoreError::DuplicateId { id });
        }

        self.conn.execute("DELETE FROM search_sequence", [])?;
        self.conn.execute(
            "INSERT INTO search_sequence (last_id) VALUES (?1)",
            [id.get()],
        )?;
        Ok(id)
    }

    pub(crate) fn insert(
        &self,
        id: SearchId,
        tags: &TagList,
        spl: &str,
        notes: &str,
    ) -> StoreResult<()> {
        self.conn.execute(
            "INSERT INTO searches (id, tags, spl, notes) VALUES (?1, ?2, ?3, ?4)",
            params![id.get(), tags.encode(), spl, notes],
        )?;
        Ok(())
    }

    /// Overwrites one field of a search. Returns whether the search exists.
    pub(crate) fn set_field(&self, id: SearchId, field: Field, value: &str) -> StoreResult<bool> {
        let changed = self.conn.execute(field.update_sql(), params![value, id.get()])?;
        Ok(changed > 0)
    }

    /// Removes a search. Returns whether it existed.
    pub(crate) fn remove(&self, id: SearchId) -> StoreResult<bool> {
        let removed = self
            .conn
            .execute("DELETE FROM searches WHERE id = ?1", [id.get()])?;
        Ok(removed > 0)
    }

    /// Drops every search and the id high-water mark.
    pub(crate) fn recreate_schema(&self) -> StoreResult<()> {
        Ok(reset_schema(self.conn)?)
    }

    pub(crate) fn commit(mut self) -> StoreResult<()> {
        self.conn.execute_batch("COMMIT")?;
        self.committed = true;
        tracing::trace!(action = self.action, "transaction committed");
        Ok(())
    }
}

impl Drop for Transaction<'_> {
    fn drop(&mut self) {
        if self.committed {
            return;
        }
        match self.conn.execute_batch("ROLLBACK") {
            Ok(()) => tracing::debug!(action = self.action, "transaction rolled back"),
            Err(e) => tracing::warn!(action = self.action, error = %e, "rollback failed"),
        }
    }
}

/// Computes the next id from both the live rows and the high-water mark.
///
/// Rows whose id is not an integer are ignored.
pub(super) fn next_id_in(conn: &Connection) -> StoreResult<SearchId> {
    let max_live: Option<i64> = conn.query_row(
        "SELECT MAX(id) FROM searches WHERE typeof(id) = 'integer'",
        [],
        |row| row.get(0),
    )?;
    let last_assigned: Option<i64> =
        conn.query_row("SELECT MAX(last_id) FROM search_sequence", [], |row| {
            row.get(0)
        })?;

    match max_live.into_iter().chain(last_assigned).max() {
        Some(high) if high >= 1 => SearchId::new(high)
            .map_err(|_| StoreError::InvalidStoredId(high))?
            .next()
            .ok_or(StoreError::IdsExhausted),
        _ => Ok(SearchId::FIRST),
    }
}

fn id_exists(conn: &Connection, id: SearchId) -> StoreResult<bool> {
    Ok(conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM searches WHERE id = ?1)",
        [id.get()],
        |row| row.get(0),
    )?)
}
