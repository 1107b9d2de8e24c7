//! The stored search record.

use serde::{Deserialize, Serialize};

use super::{SearchId, TagList};

/// A saved query snippet with its tags and free-text notes.
///
/// `spl` is the snippet body and is never empty for records created through
/// the store. Notes may be empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Search {
    pub id: SearchId,
    pub tags: TagList,
    pub spl: String,
    pub notes: String,
}

impl Search {
    pub fn new(id: SearchId, tags: TagList, spl: impl Into<String>, notes: impl Into<String>) -> Self {
        Self {
            id,
            tags,
            spl: spl.into(),
            notes: notes.into(),
        }
    }
}
