//! Output formats, search tables and word wrapping.

use clap::ValueEnum;
use serde::Serialize;

use crate::store::SearchMap;

/// Output format for command results.
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table (default)
    #[default]
    Human,
    /// JSON output for programmatic consumption
    Json,
}

/// Wrapper for serializable command output.
#[derive(Debug, Serialize)]
pub struct Output<T: Serialize> {
    pub data: T,
}

impl<T: Serialize> Output<T> {
    pub fn new(data: T) -> Self {
        Self { data }
    }
}

/// Indent applied to continuation lines of a wrapped SPL line.
const CONTINUATION_INDENT: &str = "    ";

/// Greedily wraps one line of text at whitespace.
///
/// Continuation lines are indented by four spaces and the indent counts toward
/// `width`. Words longer than the width are kept whole on their own line.
pub fn wrap_line(line: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in line.split_whitespace() {
        let prefix = if lines.is_empty() { "" } else { CONTINUATION_INDENT };
        if current.is_empty() {
            current = format!("{prefix}{word}");
        } else if current.chars().count() + 1 + word.chars().count() <= width {
            current.push(' ');
            current.push_str(word);
        } else {
            lines.push(std::mem::take(&mut current));
            current = format!("{CONTINUATION_INDENT}{word}");
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

/// Formats an SPL body for a table cell.
///
/// Blank lines are dropped and every remaining line is wrapped to `width`.
pub fn format_spl(spl: &str, width: usize) -> Vec<String> {
    spl.lines()
        .filter(|line| !line.trim().is_empty())
        .flat_map(|line| wrap_line(line, width))
        .collect()
}

/// Renders searches as a grid with ID, Tags, SPL and Notes columns, sorted by id.
pub fn render_table(searches: &SearchMap, wrap_width: usize) -> String {
    let header = ["ID", "Tags", "SPL", "Notes"];
    let rows: Vec<[Vec<String>; 4]> = searches
        .values()
        .map(|search| {
            [
                vec![search.id.to_string()],
                vec![search.tags.to_string()],
                format_spl(&search.spl, wrap_width),
                search.notes.lines().map(str::to_string).collect(),
            ]
        })
        .collect();

    let mut widths = header.map(str::len);
    for row in &rows {
        for (col, cell) in row.iter().enumerate() {
            for line in cell {
                widths[col] = widths[col].max(line.chars().count());
            }
        }
    }

    let border = {
        let segments: Vec<String> = widths.iter().map(|w| "-".repeat(w + 2)).collect();
        format!("+{}+\n", segments.join("+"))
    };
    let render_line = |cells: [&str; 4]| {
        let padded: Vec<String> = cells
            .iter()
            .zip(widths)
            .map(|(text, w)| format!(" {text:<w$} "))
            .collect();
        format!("|{}|\n", padded.join("|"))
    };

    let mut out = String::new();
    out.push_str(&border);
    out.push_str(&render_line(header));
    out.push_str(&border);
    for row in &rows {
        let height = row.iter().map(Vec::len).max().unwrap_or(0).max(1);
        for i in 0..height {
            let cells = [0, 1, 2, 3].map(|col| row[col].get(i).map_or("", String::as_str));
            out.push_str(&render_line(cells));
        }
    }
    out.push_str(&border);
    out
}
