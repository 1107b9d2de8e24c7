//! Handlers that act on a single search (retag, edit, rm, copy).

use anyhow::{Context, Result, bail};
use std::io::Write;

use super::{collect_tags, write_searches};
use crate::cli::clipboard::Clipboard;
use crate::cli::output::OutputFormat;
use crate::cli::{CopyArgs, EditArgs, RetagArgs, RmArgs};
use crate::domain::{Search, SearchId};
use crate::store::{SearchMap, SearchRepository};

/// Fetches a search that must exist.
fn require_search<R: SearchRepository>(store: &R, id: SearchId) -> Result<Search> {
    match store
        .get_by_id(id)
        .with_context(|| format!("failed to look up search {id}"))?
    {
        Some(search) => Ok(search),
        None => bail!("search not found: {id}"),
    }
}

/// Prints a search after it has been changed.
fn write_updated<R, W>(store: &R, id: SearchId, out: &mut W, wrap_width: usize) -> Result<()>
where
    R: SearchRepository,
    W: Write,
{
    let updated = require_search(store, id)?;
    writeln!(out, "Updated Search")?;
    let searches = SearchMap::from([(id, updated)]);
    write_searches(out, &searches, OutputFormat::Human, wrap_width)
}

pub fn handle_retag<R, W>(args: &RetagArgs, store: &mut R, out: &mut W, wrap_width: usize) -> Result<()>
where
    R: SearchRepository,
    W: Write,
{
    require_search(&*store, args.id)?;

    let tags = collect_tags(&args.tags);
    store
        .update_tags(args.id, &tags)
        .with_context(|| format!("failed to update tags of search {}", args.id))?;

    write_updated(&*store, args.id, out, wrap_width)
}

pub fn handle_edit<R, W>(args: &EditArgs, store: &mut R, out: &mut W, wrap_width: usize) -> Result<()>
where
    R: SearchRepository,
    W: Write,
{
    if args.spl.is_none() && args.notes.is_none() {
        bail!("nothing to change; pass --spl and/or --notes");
    }
    if args.spl.as_deref().is_some_and(|spl| spl.trim().is_empty()) {
        bail!("SPL cannot be empty");
    }

    require_search(&*store, args.id)?;

    if let Some(spl) = &args.spl {
        store
            .update_spl(args.id, spl)
            .with_context(|| format!("failed to update SPL of search {}", args.id))?;
    }
    if let Some(notes) = &args.notes {
        store
            .update_notes(args.id, notes)
            .with_context(|| format!("failed to update notes of search {}", args.id))?;
    }

    write_updated(&*store, args.id, out, wrap_width)
}

pub fn handle_rm<R, W>(args: &RmArgs, store: &mut R, out: &mut W) -> Result<()>
where
    R: SearchRepository,
    W: Write,
{
    let removed = store
        .delete(args.id)
        .with_context(|| format!("failed to delete search {}", args.id))?;

    if removed {
        writeln!(out, "Search {} deleted.", args.id)?;
    } else {
        writeln!(out, "No search with ID {}; nothing deleted.", args.id)?;
    }
    Ok(())
}

pub fn handle_copy<R, C, W>(args: &CopyArgs, store: &R, clipboard: &mut C, out: &mut W) -> Result<()>
where
    R: SearchRepository,
    C: Clipboard,
    W: Write,
{
    let search = require_search(store, args.id)?;
    clipboard.copy(&search.spl)?;
    writeln!(out, "Search {} copied to the clipboard.", args.id)?;
    Ok(())
}
