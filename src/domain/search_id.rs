//! Positive integer identifier for stored searches.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Identifier of a stored search.
///
/// Ids are positive integers assigned by the store in increasing order and
/// never reused. A `SearchId` can only hold a value of 1 or more, so a zero or
/// negative id is rejected before it can reach a query.
///
/// # Examples
///
/// ```
/// use splbook::domain::SearchId;
///
/// let id: SearchId = " 42 ".parse().unwrap();
/// assert_eq!(id.get(), 42);
///
/// assert!("0".parse::<SearchId>().is_err());
/// assert!("abc".parse::<SearchId>().is_err());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct SearchId(i64);

impl SearchId {
    /// The first id handed out by an empty store.
    pub const FIRST: SearchId = SearchId(1);

    /// Creates a SearchId, rejecting values below 1.
    pub fn new(value: i64) -> Result<Self, ParseSearchIdError> {
        if value < 1 {
            return Err(ParseSearchIdError {
                value: value.to_string(),
            });
        }
        Ok(Self(value))
    }

    /// Returns the raw integer value.
    pub fn get(self) -> i64 {
        self.0
    }

    /// Returns the id that follows this one, or `None` past `i64::MAX`.
    pub fn next(self) -> Option<SearchId> {
        self.0.checked_add(1).map(SearchId)
    }
}

impl fmt::Display for SearchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Debug for SearchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SearchId({})", self.0)
    }
}

/// Error returned when a value is not a usable search id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseSearchIdError {
    value: String,
}

impl ParseSearchIdError {
    /// Returns the rejected input.
    pub fn invalid_value(&self) -> &str {
        &self.value
    }
}

impl fmt::Display for ParseSearchIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "'{}' is not a valid ID", self.value)
    }
}

impl std::error::Error for ParseSearchIdError {}

impl FromStr for SearchId {
    type Err = ParseSearchIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let value: i64 = trimmed.parse().map_err(|_| ParseSearchIdError {
            value: trimmed.to_string(),
        })?;
        Self::new(value)
    }
}

impl TryFrom<i64> for SearchId {
    type Error = ParseSearchIdError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<SearchId> for i64 {
    fn from(id: SearchId) -> Self {
        id.0
    }
}
