//! Command handlers for the CLI.

mod add;
mod edit;
mod list;
mod manage;

#[cfg(test)]
pub(crate) mod tests;

use anyhow::Result;
use std::io::Write;

use crate::cli::output::{Output, OutputFormat, render_table};
use crate::domain::TagList;
use crate::store::SearchMap;

// Re-export public items
pub use add::{handle_add, read_spl};
pub use edit::{handle_copy, handle_edit, handle_retag, handle_rm};
pub use list::{handle_list, handle_search, handle_show, handle_tagged, handle_tags};
pub use manage::{ExportDocument, export_document, handle_export, handle_reset, write_export_file};

// ===========================================
// Shared Utilities
// ===========================================

/// Message printed when a listing is empty.
pub(crate) const NO_RESULTS_LINE: &str = "No results.";

/// Builds a tag list from repeated `--tag` values, each possibly comma-separated.
pub(crate) fn collect_tags(values: &[String]) -> TagList {
    TagList::new(values.iter().flat_map(|value| TagList::parse_input(value)))
}

/// Writes searches in the requested format.
pub(crate) fn write_searches<W: Write>(
    out: &mut W,
    searches: &SearchMap,
    format: OutputFormat,
    wrap_width: usize,
) -> Result<()> {
    match format {
        OutputFormat::Human => {
            if searches.is_empty() {
                writeln!(out, "{NO_RESULTS_LINE}")?;
            } else {
                write!(out, "{}", render_table(searches, wrap_width))?;
                writeln!(out, "{} search(es)", searches.len())?;
            }
        }
        OutputFormat::Json => {
            let output = Output::new(searches.values().collect::<Vec<_>>());
            writeln!(out, "{}", serde_json::to_string_pretty(&output)?)?;
        }
    }
    Ok(())
}
