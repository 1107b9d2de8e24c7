//! Isolated test environment with a temporary database.

use super::{SplCommand, TestSearch};
use splbook::domain::SearchId;
use splbook::store::{SearchRepository, SqliteStore};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Isolated test environment with its own database file.
///
/// The temp directory is removed when the TestEnv is dropped.
pub struct TestEnv {
    /// The temporary directory (kept for lifetime management)
    temp_dir: TempDir,
}

#[allow(dead_code)]
impl TestEnv {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        Self { temp_dir }
    }

    /// Returns the temp directory root.
    pub fn dir(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Returns the database path passed to every command.
    pub fn db_path(&self) -> PathBuf {
        self.dir().join("data").join("searches.db")
    }

    /// Returns a config path that does not exist, so the user's config is never read.
    pub fn config_path(&self) -> PathBuf {
        self.dir().join("config.toml")
    }

    /// Opens the environment's database directly.
    pub fn store(&self) -> SqliteStore {
        SqliteStore::open(&self.db_path()).expect("Failed to open test database")
    }

    /// Seeds a search and returns its id.
    pub fn add_search(&self, search: &TestSearch) -> SearchId {
        self.store()
            .add(&search.tag_list(), search.spl(), search.get_notes())
            .expect("Failed to seed search")
    }

    /// Writes a file into the environment and returns its path.
    pub fn write_file(&self, name: &str, content: &str) -> PathBuf {
        let path = self.dir().join(name);
        std::fs::write(&path, content).expect("Failed to write file");
        path
    }

    /// Creates a command bound to this environment's database.
    pub fn cmd(&self) -> SplCommand {
        SplCommand::new()
            .db(&self.db_path())
            .config(&self.config_path())
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_cleanup_on_drop() {
        let path = {
            let env = TestEnv::new();
            env.dir().to_path_buf()
        };
        assert!(!path.exists(), "temp directory should be cleaned up on drop");
    }

    #[test]
    fn test_env_db_is_inside_temp_dir() {
        let env = TestEnv::new();
        assert!(env.db_path().starts_with(env.dir()));
        assert!(!env.config_path().exists());
    }

    #[test]
    fn test_env_seeds_sequential_ids() {
        let env = TestEnv::new();
        let first = env.add_search(&TestSearch::new("index=a"));
        let second = env.add_search(&TestSearch::new("index=b").tag("x"));
        assert_eq!(first.get(), 1);
        assert_eq!(second.get(), 2);
    }

    #[test]
    fn test_env_command_carries_db_and_config() {
        let env = TestEnv::new();
        let cmd = env.cmd();
        let args = cmd.get_args();
        assert_eq!(args[0], "--db");
        assert_eq!(args[1], env.db_path().to_string_lossy());
        assert_eq!(args[2], "--config");
    }
}
