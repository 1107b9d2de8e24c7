//! CLI command definitions and handlers

pub mod clipboard;
pub mod config;
pub mod console;
pub mod handlers;
pub mod menu;
pub mod output;

use clap::{ArgAction, Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

use crate::domain::SearchId;
use output::OutputFormat;

/// splbook - a personal library of reusable search snippets
#[derive(Parser, Debug)]
#[command(name = "splbook", version, about, long_about = None)]
pub struct Cli {
    /// Database file (overrides config file)
    #[arg(long, global = true, value_name = "PATH")]
    pub db: Option<PathBuf>,

    /// Config file to use instead of the default location
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Runs the interactive menu when omitted
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Browse and manage searches interactively
    Menu,

    /// Save a new search
    Add(AddArgs),

    /// List all searches
    #[command(name = "ls")]
    List(ListArgs),

    /// Find searches whose SPL contains the text
    Search(SearchArgs),

    /// Find searches carrying a tag
    Tagged(TaggedArgs),

    /// Show one search
    Show(ShowArgs),

    /// List every tag in use
    Tags(TagsArgs),

    /// Replace the tags of a search
    Retag(RetagArgs),

    /// Change the SPL or notes of a search
    Edit(EditArgs),

    /// Delete a search
    Rm(RmArgs),

    /// Copy the SPL of a search to the clipboard
    Copy(CopyArgs),

    /// Export all searches as JSON
    Export(ExportArgs),

    /// Delete every search and start over
    Reset(ResetArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the `add` command
#[derive(Parser, Debug)]
pub struct AddArgs {
    /// The SPL to save (read from stdin when omitted)
    pub spl: Option<String>,

    /// Tag for the search (can be specified multiple times, or comma-separated)
    #[arg(short, long = "tag", action = ArgAction::Append)]
    pub tags: Vec<String>,

    /// Free-text notes
    #[arg(short, long, default_value = "")]
    pub notes: String,
}

/// Arguments for the `ls` command
#[derive(Parser, Debug)]
pub struct ListArgs {
    /// Output format
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,
}

/// Arguments for the `search` command
#[derive(Parser, Debug)]
pub struct SearchArgs {
    /// Text to look for (`%` and `_` act as wildcards)
    pub text: String,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,
}

/// Arguments for the `tagged` command
#[derive(Parser, Debug)]
pub struct TaggedArgs {
    /// Tag to look for (exact match)
    pub tag: String,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,
}

/// Arguments for the `show` command
#[derive(Parser, Debug)]
pub struct ShowArgs {
    /// Search ID
    pub id: SearchId,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,
}

/// Arguments for the `tags` command
#[derive(Parser, Debug)]
pub struct TagsArgs {
    /// Output format
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,
}

/// Arguments for the `retag` command
#[derive(Parser, Debug)]
pub struct RetagArgs {
    /// Search ID
    pub id: SearchId,

    /// New tag (can be specified multiple times, or comma-separated); none clears the tags
    #[arg(short, long = "tag", action = ArgAction::Append)]
    pub tags: Vec<String>,
}

/// Arguments for the `edit` command
#[derive(Parser, Debug)]
pub struct EditArgs {
    /// Search ID
    pub id: SearchId,

    /// New SPL
    #[arg(long)]
    pub spl: Option<String>,

    /// New notes
    #[arg(long)]
    pub notes: Option<String>,
}

/// Arguments for the `rm` command
#[derive(Parser, Debug)]
pub struct RmArgs {
    /// Search ID
    pub id: SearchId,
}

/// Arguments for the `copy` command
#[derive(Parser, Debug)]
pub struct CopyArgs {
    /// Search ID
    pub id: SearchId,
}

/// Arguments for the `export` command
#[derive(Parser, Debug)]
pub struct ExportArgs {
    /// File to write (stdout when omitted)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Arguments for the `reset` command
#[derive(Parser, Debug)]
pub struct ResetArgs {
    /// Confirm that every search should be deleted
    #[arg(long)]
    pub yes: bool,
}

/// Arguments for the `completions` command
#[derive(Parser, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}
