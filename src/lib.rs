//! splbook - a personal library of reusable search snippets

pub mod cli;
pub mod domain;
pub mod query;
pub mod store;

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use std::io;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use cli::{
    Cli, Command,
    clipboard::LazyClipboard,
    config::Config,
    console::Console,
    handlers::{
        handle_add, handle_copy, handle_edit, handle_export, handle_list, handle_reset,
        handle_retag, handle_rm, handle_search, handle_show, handle_tagged, handle_tags,
    },
    menu::Menu,
};
use store::SqliteStore;

/// Main entry point for the CLI application.
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Some(Command::Completions(args)) = &cli.command {
        clap_complete::generate(args.shell, &mut Cli::command(), "splbook", &mut io::stdout());
        return Ok(());
    }

    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    let db_path = config.db_path(cli.db.as_ref());
    let wrap_width = config.wrap_width();

    let mut store = SqliteStore::open(&db_path)
        .with_context(|| format!("failed to open database {}", db_path.display()))?;
    tracing::debug!(db = %db_path.display(), "store ready");

    let mut out = io::stdout().lock();

    match &cli.command {
        None | Some(Command::Menu) => {
            let mut clipboard = LazyClipboard::new(&config);
            let mut console = Console::stdio(wrap_width);
            Menu::new(&mut store, &mut console, &mut clipboard).run()
        }
        Some(Command::Add(args)) => handle_add(args, &mut store, io::stdin().lock(), &mut out),
        Some(Command::List(args)) => handle_list(args, &store, &mut out, wrap_width),
        Some(Command::Search(args)) => handle_search(args, &store, &mut out, wrap_width),
        Some(Command::Tagged(args)) => handle_tagged(args, &store, &mut out, wrap_width),
        Some(Command::Show(args)) => handle_show(args, &store, &mut out, wrap_width),
        Some(Command::Tags(args)) => handle_tags(args, &store, &mut out),
        Some(Command::Retag(args)) => handle_retag(args, &mut store, &mut out, wrap_width),
        Some(Command::Edit(args)) => handle_edit(args, &mut store, &mut out, wrap_width),
        Some(Command::Rm(args)) => handle_rm(args, &mut store, &mut out),
        Some(Command::Copy(args)) => {
            let mut clipboard = LazyClipboard::new(&config);
            handle_copy(args, &store, &mut clipboard, &mut out)
        }
        Some(Command::Export(args)) => handle_export(args, &store, &mut out),
        Some(Command::Reset(args)) => handle_reset(args, &mut store, &mut out),
        Some(Command::Completions(_)) => Ok(()),
    }
}

/// Installs the stderr log subscriber.
///
/// `RUST_LOG` wins when set; otherwise `-v` flags raise the level from warn.
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    // A subscriber may already be installed when embedded; keep it.
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(io::stderr).with_target(false))
        .try_init();
}
