//! Prompter seam and the re-prompting input loops built on it.

use std::io;

use super::QueryResult;
use crate::domain::SearchId;
use crate::store::SearchMap;

/// Shown when a numbered choice is out of range or not a number.
pub const INVALID_ANSWER: &str = "That is not a valid answer.";

/// Shown when an id is not a positive integer.
pub const INVALID_ID: &str = "Not a valid ID";

/// The user-facing side of the engine.
///
/// Implementations decide how results look and where input comes from.
pub trait Prompter {
    /// Presents a set of searches.
    fn show_results(&mut self, results: &SearchMap) -> io::Result<()>;

    /// Presents a line of text.
    fn message(&mut self, text: &str) -> io::Result<()>;

    /// Shows `prompt` and reads one line without its line ending.
    ///
    /// Returns `None` once input is exhausted.
    fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>>;
}

/// Presents numbered choices and returns the index picked.
///
/// Invalid answers are reported and the choices shown again. Returns `None`
/// when input ends.
pub fn choose<P, S>(prompter: &mut P, choices: &[S]) -> QueryResult<Option<usize>>
where
    P: Prompter + ?Sized,
    S: AsRef<str>,
{
    loop {
        for (pos, choice) in choices.iter().enumerate() {
            prompter.message(&format!("{}) {}", pos + 1, choice.as_ref()))?;
        }

        let Some(answer) = prompter.read_line("--> ")? else {
            return Ok(None);
        };

        match answer.trim().parse::<usize>() {
            Ok(pos) if (1..=choices.len()).contains(&pos) => return Ok(Some(pos - 1)),
            _ => prompter.message(INVALID_ANSWER)?,
        }
    }
}

/// Asks for a search id until a positive integer is entered.
///
/// Returns `None` when input ends.
pub fn prompt_id<P: Prompter + ?Sized>(prompter: &mut P) -> QueryResult<Option<SearchId>> {
    loop {
        let Some(answer) = prompter.read_line("Enter the ID to Search: ")? else {
            return Ok(None);
        };
        match answer.parse::<SearchId>() {
            Ok(id) => return Ok(Some(id)),
            Err(_) => prompter.message(INVALID_ID)?,
        }
    }
}
