//! Ordered tag list and its single-column JSON encoding.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Ordered list of tags attached to a search.
///
/// In storage the list lives in one text column as a JSON array of strings.
/// Empty strings are never kept: `[""]`, which older databases contain for
/// searches saved without tags, decodes to the empty list.
///
/// # Examples
///
/// ```
/// use splbook::domain::TagList;
///
/// let tags = TagList::parse_input(" web, auth ,,");
/// assert_eq!(tags.encode(), r#"["web","auth"]"#);
///
/// let decoded = TagList::decode(r#"["web", "auth"]"#).unwrap();
/// assert_eq!(decoded, tags);
/// assert!(decoded.contains("web"));
/// assert!(!decoded.contains("we"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TagList(Vec<String>);

/// Encoding of a tag list with no tags.
pub const EMPTY_ENCODING: &str = "[]";

/// Error returned when a stored tag column is not a JSON list of strings.
#[derive(Debug, thiserror::Error)]
#[error("malformed tag list {raw:?}: {source}")]
pub struct TagDecodeError {
    raw: String,
    #[source]
    source: serde_json::Error,
}

impl TagDecodeError {
    /// Returns the raw column value that failed to decode.
    pub fn raw(&self) -> &str {
        &self.raw
    }
}

impl TagList {
    /// Creates a tag list, dropping empty and whitespace-only entries.
    pub fn new<I, S>(tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(
            tags.into_iter()
                .map(Into::into)
                .filter(|t| !t.trim().is_empty())
                .collect(),
        )
    }

    /// Parses comma-separated user input such as `"web, auth"`.
    ///
    /// Each element is trimmed; blank input yields an empty list.
    pub fn parse_input(input: &str) -> Self {
        Self::new(input.split(',').map(str::trim))
    }

    /// Encodes the list as a compact JSON array.
    pub fn encode(&self) -> String {
        if self.0.is_empty() {
            return EMPTY_ENCODING.to_string();
        }
        // Vec<String> serialization cannot fail
        serde_json::to_string(&self.0).unwrap_or_else(|_| EMPTY_ENCODING.to_string())
    }

    /// Decodes a stored JSON array of strings.
    pub fn decode(raw: &str) -> Result<Self, TagDecodeError> {
        let tags: Vec<String> = serde_json::from_str(raw).map_err(|source| TagDecodeError {
            raw: raw.to_string(),
            source,
        })?;
        Ok(Self::new(tags))
    }

    /// Returns true if `tag` is one of the elements (exact match).
    pub fn contains(&self, tag: &str) -> bool {
        self.0.iter().any(|t| t == tag)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }
}

impl fmt::Display for TagList {
    /// Comma-separated form used for display, e.g. `web, auth`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.join(", "))
    }
}

impl IntoIterator for TagList {
    type Item = String;
    type IntoIter = std::vec::IntoIter<String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a TagList {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
