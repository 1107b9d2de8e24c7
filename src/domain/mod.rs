//! Core types: Search, SearchId, TagList

mod search;
mod search_id;
mod tags;

pub use search::Search;
pub use search_id::{ParseSearchIdError, SearchId};
pub use tags::{EMPTY_ENCODING, TagDecodeError, TagList};
