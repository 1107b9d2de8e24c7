//! Database management handlers (export, reset).

use anyhow::{Context, Result, bail};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

use crate::cli::{ExportArgs, ResetArgs};
use crate::domain::Search;
use crate::store::SearchRepository;

/// Snapshot of every search, as written by `export`.
#[derive(Debug, Serialize, Deserialize)]
pub struct ExportDocument {
    pub exported_at: DateTime<Utc>,
    pub count: usize,
    pub searches: Vec<Search>,
}

/// Collects every search into an export document.
pub fn export_document<R: SearchRepository + ?Sized>(store: &R) -> Result<ExportDocument> {
    let searches: Vec<Search> = store
        .get_all()
        .with_context(|| "failed to read searches for export")?
        .into_values()
        .collect();

    Ok(ExportDocument {
        exported_at: Utc::now(),
        count: searches.len(),
        searches,
    })
}

/// Writes an export document to `path`.
///
/// The JSON goes to a temporary file in the same directory first and is then
/// renamed over `path`, so a failed export never leaves a truncated file.
pub fn write_export_file(path: &Path, document: &ExportDocument) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(dir)
        .with_context(|| format!("failed to create directory {}", dir.display()))?;

    let mut file = NamedTempFile::new_in(dir)
        .with_context(|| format!("failed to create temporary file in {}", dir.display()))?;
    serde_json::to_writer_pretty(&mut file, document)
        .with_context(|| "failed to serialize export")?;
    writeln!(file)?;

    file.persist(path)
        .map_err(|e| e.error)
        .with_context(|| format!("failed to write export to {}", path.display()))?;
    Ok(())
}

pub fn handle_export<R, W>(args: &ExportArgs, store: &R, out: &mut W) -> Result<()>
where
    R: SearchRepository,
    W: Write,
{
    let document = export_document(store)?;

    match &args.output {
        Some(path) => {
            write_export_file(path, &document)?;
            writeln!(
                out,
                "Exported {} search(es) to {}",
                document.count,
                path.display()
            )?;
        }
        None => {
            writeln!(out, "{}", serde_json::to_string_pretty(&document)?)?;
        }
    }
    Ok(())
}

pub fn handle_reset<R, W>(args: &ResetArgs, store: &mut R, out: &mut W) -> Result<()>
where
    R: SearchRepository,
    W: Write,
{
    if !args.yes {
        bail!("reset deletes every search; re-run with --yes to confirm");
    }

    store.reset().with_context(|| "failed to reset database")?;
    writeln!(out, "Database has been reset.")?;
    Ok(())
}
