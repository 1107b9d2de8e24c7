//! Clipboard export through an external command.

use anyhow::{Context, Result, anyhow, bail};
use std::io::Write;
use std::path::Path;
use std::process::{Command, Stdio};

use super::config::Config;

/// Destination for copied SPL (allows mocking in tests).
pub trait Clipboard {
    fn copy(&mut self, text: &str) -> Result<()>;
}

/// Commands tried in order when none is configured.
const CANDIDATES: &[&str] = &["pbcopy", "wl-copy", "xclip -selection clipboard", "clip"];

/// Clipboard that pipes text into a command such as `pbcopy`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandClipboard {
    program: String,
    args: Vec<String>,
}

impl CommandClipboard {
    /// Builds a clipboard from a command line like `xclip -selection clipboard`.
    pub fn new(command_line: &str) -> Result<Self> {
        let mut parts = command_line.split_whitespace().map(str::to_string);
        let Some(program) = parts.next() else {
            bail!("clipboard command is empty");
        };
        Ok(Self {
            program,
            args: parts.collect(),
        })
    }

    /// Resolve the clipboard command.
    ///
    /// Precedence order:
    /// 1. Config file `clipboard` setting
    /// 2. First of `pbcopy`, `wl-copy`, `xclip`, `clip` found on `PATH`
    pub fn from_config(config: &Config) -> Result<Self> {
        Self::resolve(config.clipboard.as_deref())
    }

    fn resolve(configured: Option<&str>) -> Result<Self> {
        if let Some(command_line) = configured {
            return Self::new(command_line);
        }
        let path = std::env::var_os("PATH").unwrap_or_default();
        let dirs: Vec<_> = std::env::split_paths(&path).collect();
        CANDIDATES
            .iter()
            .find(|candidate| {
                let program = candidate.split_whitespace().next().unwrap_or_default();
                dirs.iter().any(|dir| is_program(&dir.join(program)))
            })
            .map(|candidate| Self::new(candidate))
            .unwrap_or_else(|| {
                Err(anyhow!(
                    "no clipboard command found; set `clipboard` in the config file"
                ))
            })
    }

    pub fn program(&self) -> &str {
        &self.program
    }
}

fn is_program(path: &Path) -> bool {
    path.is_file() || path.with_extension("exe").is_file()
}

impl Clipboard for CommandClipboard {
    fn copy(&mut self, text: &str) -> Result<()> {
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .spawn()
            .with_context(|| format!("failed to launch clipboard command '{}'", self.program))?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin
                .write_all(text.as_bytes())
                .with_context(|| "failed to write to clipboard command")?;
        }

        let status = child
            .wait()
            .with_context(|| format!("clipboard command '{}' failed", self.program))?;
        if !status.success() {
            bail!("clipboard command '{}' exited with non-zero status", self.program);
        }
        tracing::debug!(program = %self.program, bytes = text.len(), "copied to clipboard");
        Ok(())
    }
}

/// Clipboard whose command is looked up on the first copy.
///
/// A machine without a clipboard tool can still run everything except copy.
#[derive(Debug, Default)]
pub struct LazyClipboard {
    configured: Option<String>,
    resolved: Option<CommandClipboard>,
}

impl LazyClipboard {
    pub fn new(config: &Config) -> Self {
        Self {
            configured: config.clipboard.clone(),
            resolved: None,
        }
    }
}

impl Clipboard for LazyClipboard {
    fn copy(&mut self, text: &str) -> Result<()> {
        let clipboard = match &mut self.resolved {
            Some(clipboard) => clipboard,
            empty => empty.insert(CommandClipboard::resolve(self.configured.as_deref())?),
        };
        clipboard.copy(text)
    }
}
