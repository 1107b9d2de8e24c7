//! Retrieval modes and narrowing of multi-record results to one search.
//!
//! The engine never renders or reads anything itself. It talks to the user
//! through a [`Prompter`], which lets the interactive menu plug in a terminal
//! and tests plug in a script.

mod prompt;


use thiserror::Error;

use crate::domain::{Search, SearchId};
use crate::store::{SearchMap, SearchRepository, StoreError, StoreResult};

pub use prompt::{INVALID_ANSWER, INVALID_ID, Prompter, choose, prompt_id};

/// Shown when a query or a narrowing step selects nothing.
pub const NO_RESULTS: &str = "No results";

/// Shown when the user backs out of a multi-step operation.
pub const CANCELED: &str = "Canceled";

/// Errors that abort the engine.
///
/// Empty results, bad ids and cancellation are not errors; they come back as
/// a [`Selection`].
#[derive(Debug, Error)]
pub enum QueryError {
    /// The store failed.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Reading input or writing output failed.
    #[error("terminal I/O failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for engine operations.
pub type QueryResult<T> = Result<T, QueryError>;

/// One of the retrieval modes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Query {
    /// Every stored search.
    All,
    /// Searches whose body contains the text.
    Text(String),
    /// Searches carrying the tag.
    Tag(String),
    /// The search with this id.
    Id(SearchId),
}

/// Outcome of narrowing a result set down to one search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    /// Exactly one search was selected.
    Selected(Search),
    /// Nothing matched, or the id given was not part of the results.
    NoResults,
    /// The user left the id prompt blank or input ended.
    Canceled,
}

/// Runs a query against the store.
pub fn execute<R: SearchRepository + ?Sized>(store: &R, query: &Query) -> StoreResult<SearchMap> {
    tracing::debug!(?query, "executing query");
    match query {
        Query::All => store.get_all(),
        Query::Text(term) => store.search_by_text(term),
        Query::Tag(tag) => store.search_by_tag(tag),
        Query::Id(id) => Ok(store
            .get_by_id(*id)?
            .map(|search| SearchMap::from([(search.id, search)]))
            .unwrap_or_default()),
    }
}

/// Narrows `results` using the id the user typed.
///
/// Blank input cancels. Input that is not a positive integer, or an id outside
/// the result set, yields [`Selection::NoResults`].
pub fn narrow(mut results: SearchMap, answer: &str) -> Selection {
    if answer.trim().is_empty() {
        return Selection::Canceled;
    }
    let Ok(id) = answer.parse::<SearchId>() else {
        return Selection::NoResults;
    };
    match results.remove(&id) {
        Some(search) => Selection::Selected(search),
        None => Selection::NoResults,
    }
}

/// Reduces a result set to a single search, asking the user when needed.
///
/// Zero results select nothing and one result is selected directly. With
/// several results the set is shown and the user must type one of its ids.
pub fn select<P: Prompter + ?Sized>(results: SearchMap, prompter: &mut P) -> QueryResult<Selection> {
    match results.len() {
        0 => Ok(Selection::NoResults),
        1 => Ok(results
            .into_values()
            .next()
            .map_or(Selection::NoResults, Selection::Selected)),
        _ => {
            prompter.show_results(&results)?;
            let Some(answer) = prompter.read_line("Search ID or ENTER for None: ")? else {
                return Ok(Selection::Canceled);
            };
            Ok(narrow(results, &answer))
        }
    }
}

/// Runs a query and narrows its results to one search.
pub fn resolve<R, P>(store: &R, query: &Query, prompter: &mut P) -> QueryResult<Selection>
where
    R: SearchRepository + ?Sized,
    P: Prompter + ?Sized,
{
    let results = execute(store, query)?;
    select(results, prompter)
}

/// Lets the user pick one tag from the tag index.
///
/// Tags are offered in alphabetical order. Returns `None` when the store has
/// no tags or input ended.
pub fn pick_tag<R, P>(store: &R, prompter: &mut P) -> QueryResult<Option<String>>
where
    R: SearchRepository + ?Sized,
    P: Prompter + ?Sized,
{
    let mut tags = store.list_distinct_tags()?;
    if tags.is_empty() {
        return Ok(None);
    }
    tags.sort();

    prompter.message("Select Tag")?;
    let choice = choose(prompter, &tags)?;
    Ok(choice.map(|index| tags.swap_remove(index)))
}
