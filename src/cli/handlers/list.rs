//! Read-only command handlers (ls, search, tagged, show, tags).

use anyhow::{Context, Result, bail};
use std::io::Write;

use super::write_searches;
use crate::cli::output::{Output, OutputFormat};
use crate::cli::{ListArgs, SearchArgs, ShowArgs, TaggedArgs, TagsArgs};
use crate::query::{Query, execute};
use crate::store::SearchRepository;

pub fn handle_list<R, W>(args: &ListArgs, store: &R, out: &mut W, wrap_width: usize) -> Result<()>
where
    R: SearchRepository,
    W: Write,
{
    let searches = execute(store, &Query::All).with_context(|| "failed to list searches")?;
    write_searches(out, &searches, args.format, wrap_width)
}

pub fn handle_search<R, W>(
    args: &SearchArgs,
    store: &R,
    out: &mut W,
    wrap_width: usize,
) -> Result<()>
where
    R: SearchRepository,
    W: Write,
{
    let searches = execute(store, &Query::Text(args.text.clone()))
        .with_context(|| format!("search failed for text: {}", args.text))?;
    write_searches(out, &searches, args.format, wrap_width)
}

pub fn handle_tagged<R, W>(
    args: &TaggedArgs,
    store: &R,
    out: &mut W,
    wrap_width: usize,
) -> Result<()>
where
    R: SearchRepository,
    W: Write,
{
    let searches = execute(store, &Query::Tag(args.tag.clone()))
        .with_context(|| format!("search failed for tag: {}", args.tag))?;
    write_searches(out, &searches, args.format, wrap_width)
}

pub fn handle_show<R, W>(args: &ShowArgs, store: &R, out: &mut W, wrap_width: usize) -> Result<()>
where
    R: SearchRepository,
    W: Write,
{
    let searches = execute(store, &Query::Id(args.id))
        .with_context(|| format!("failed to look up search {}", args.id))?;
    if searches.is_empty() {
        bail!("search not found: {}", args.id);
    }
    write_searches(out, &searches, args.format, wrap_width)
}

pub fn handle_tags<R, W>(args: &TagsArgs, store: &R, out: &mut W) -> Result<()>
where
    R: SearchRepository,
    W: Write,
{
    let tags = store
        .list_distinct_tags()
        .with_context(|| "failed to list tags")?;

    match args.format {
        OutputFormat::Human => {
            if tags.is_empty() {
                writeln!(out, "No tags found.")?;
            } else {
                for tag in &tags {
                    writeln!(out, "{tag}")?;
                }
            }
        }
        OutputFormat::Json => {
            writeln!(out, "{}", serde_json::to_string_pretty(&Output::new(&tags))?)?;
        }
    }
    Ok(())
}
