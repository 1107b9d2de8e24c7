//! Builder for searches seeded into a test database.

#![allow(dead_code)]

use splbook::domain::TagList;

/// A search to seed, built fluently.
///
/// ```ignore
/// let search = TestSearch::new("index=web status=500").tag("web").notes("errors");
/// ```
#[derive(Debug, Clone)]
pub struct TestSearch {
    spl: String,
    tags: Vec<String>,
    notes: String,
}

impl TestSearch {
    pub fn new(spl: &str) -> Self {
        Self {
            spl: spl.to_string(),
            tags: Vec::new(),
            notes: String::new(),
        }
    }

    pub fn tag(mut self, tag: &str) -> Self {
        self.tags.push(tag.to_string());
        self
    }

    pub fn notes(mut self, notes: &str) -> Self {
        self.notes = notes.to_string();
        self
    }

    pub fn spl(&self) -> &str {
        &self.spl
    }

    pub fn tag_list(&self) -> TagList {
        TagList::new(self.tags.iter().cloned())
    }

    pub fn get_notes(&self) -> &str {
        &self.notes
    }
}
