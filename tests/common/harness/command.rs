//! Fluent wrapper around assert_cmd::Command.

// Allow dead code since not every test binary uses every helper
#![allow(dead_code)]

use assert_cmd::Command;
use serde::de::DeserializeOwned;
use std::path::Path;

/// Fluent wrapper around `assert_cmd::Command` for the `splbook` binary.
pub struct SplCommand {
    args: Vec<String>,
    stdin: Option<String>,
}

impl SplCommand {
    pub fn new() -> Self {
        Self {
            args: Vec::new(),
            stdin: None,
        }
    }

    /// Sets the `--db` option.
    pub fn db(self, path: &Path) -> Self {
        self.args(["--db", &*path.to_string_lossy()])
    }

    /// Sets the `--config` option.
    pub fn config(self, path: &Path) -> Self {
        self.args(["--config", &*path.to_string_lossy()])
    }

    /// Adds arguments to the command.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.args
            .extend(args.into_iter().map(|s| s.as_ref().to_string()));
        self
    }

    /// Feeds `input` to the process on stdin.
    pub fn stdin(mut self, input: &str) -> Self {
        self.stdin = Some(input.to_string());
        self
    }

    /// Returns the current arguments (for testing).
    pub fn get_args(&self) -> &[String] {
        &self.args
    }

    /// Runs the command and returns an Assert for making assertions.
    #[allow(deprecated)]
    pub fn assert(self) -> assert_cmd::assert::Assert {
        let mut cmd = Command::cargo_bin("splbook").expect("Failed to find splbook binary");
        cmd.args(&self.args).env_remove("RUST_LOG");
        // Always provide stdin so commands never wait on a terminal
        cmd.write_stdin(self.stdin.unwrap_or_default());
        cmd.assert()
    }

    /// Runs the command, expects success, and returns stdout as a string.
    pub fn output_success(self) -> String {
        let output = self.assert().success().get_output().stdout.clone();
        String::from_utf8(output).expect("Output was not valid UTF-8")
    }

    /// Runs the command, expects success, and parses stdout as JSON.
    pub fn output_json<T: DeserializeOwned>(self) -> T {
        let output = self.output_success();
        serde_json::from_str(&output).expect("Failed to parse output as JSON")
    }

    // ===========================================
    // Command Shortcuts
    // ===========================================

    pub fn ls(self) -> Self {
        self.args(["ls"])
    }

    pub fn search(self, text: &str) -> Self {
        self.args(["search", text])
    }

    pub fn tagged(self, tag: &str) -> Self {
        self.args(["tagged", tag])
    }

    pub fn show(self, id: &str) -> Self {
        self.args(["show", id])
    }

    pub fn tags(self) -> Self {
        self.args(["tags"])
    }

    /// Adds `--format json` to the command.
    pub fn format_json(self) -> Self {
        self.args(["--format", "json"])
    }
}

impl Default for SplCommand {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_runs_binary() {
        SplCommand::new().args(["--help"]).assert().success();
    }

    #[test]
    fn test_command_output_success() {
        let output = SplCommand::new().args(["--help"]).output_success();
        assert!(output.contains("splbook"));
    }

    #[test]
    fn test_command_shortcuts() {
        let cmd = SplCommand::new().ls().format_json();
        assert_eq!(cmd.get_args(), ["ls", "--format", "json"]);
    }
}
