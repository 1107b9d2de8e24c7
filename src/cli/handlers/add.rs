//! Add command handler.

use anyhow::{Context, Result, bail};
use std::io::{Read, Write};

use super::collect_tags;
use crate::cli::AddArgs;
use crate::store::SearchRepository;

/// Reads an SPL body from `input`, dropping trailing line endings.
pub fn read_spl<I: Read>(mut input: I) -> Result<String> {
    let mut spl = String::new();
    input
        .read_to_string(&mut spl)
        .with_context(|| "failed to read SPL from stdin")?;
    let trimmed = spl.trim_end_matches(['\n', '\r']).len();
    spl.truncate(trimmed);
    Ok(spl)
}

pub fn handle_add<R, I, W>(args: &AddArgs, store: &mut R, input: I, out: &mut W) -> Result<()>
where
    R: SearchRepository,
    I: Read,
    W: Write,
{
    let spl = match &args.spl {
        Some(spl) => spl.clone(),
        None => read_spl(input)?,
    };

    // Validate before touching the store
    if spl.trim().is_empty() {
        bail!("SPL cannot be empty; search not added");
    }

    let tags = collect_tags(&args.tags);
    let id = store
        .add(&tags, &spl, &args.notes)
        .with_context(|| "failed to add search")?;

    writeln!(out, "Search {id} added.")?;
    Ok(())
}
