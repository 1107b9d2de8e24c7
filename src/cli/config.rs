//! Configuration file support.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Width SPL lines are wrapped to when no width is configured.
pub const DEFAULT_WRAP_WIDTH: usize = 70;

/// Application configuration loaded from config file.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Database file
    pub db: Option<PathBuf>,

    /// Width at which SPL lines are wrapped in tables
    pub wrap_width: Option<usize>,

    /// Command that receives copied text on stdin, e.g. "xclip -selection clipboard"
    pub clipboard: Option<String>,
}

impl Config {
    /// Load configuration from the default config file location.
    ///
    /// Returns default config if the file doesn't exist.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    /// Load configuration from a specific file.
    ///
    /// Returns default config if the file doesn't exist.
    pub fn load_from(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(config_path)
            .with_context(|| format!("failed to read config file: {}", config_path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("failed to parse config file: {}", config_path.display()))
    }

    /// Returns the path to the config file.
    ///
    /// Default: `~/.config/splbook/config.toml`
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("splbook")
            .join("config.toml")
    }

    /// Resolve the database file, with CLI argument taking precedence.
    ///
    /// Precedence order:
    /// 1. CLI `--db` argument
    /// 2. Config file `db` setting
    /// 3. `searches.db` in the platform data directory
    pub fn db_path(&self, cli_db: Option<&PathBuf>) -> PathBuf {
        cli_db
            .cloned()
            .or_else(|| self.db.clone())
            .unwrap_or_else(|| {
                dirs::data_dir()
                    .unwrap_or_else(|| PathBuf::from("."))
                    .join("splbook")
                    .join("searches.db")
            })
    }

    /// Width used when wrapping SPL for display. Never below 10.
    pub fn wrap_width(&self) -> usize {
        self.wrap_width.unwrap_or(DEFAULT_WRAP_WIDTH).max(10)
    }
}
