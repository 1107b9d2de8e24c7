//! Line-oriented terminal prompter.

use std::io::{self, BufRead, Write};

use super::output::render_table;
use crate::query::Prompter;
use crate::store::SearchMap;

/// Prompter over any line reader and writer, usually stdin and stdout.
pub struct Console<R, W> {
    input: R,
    output: W,
    wrap_width: usize,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W, wrap_width: usize) -> Self {
        Self {
            input,
            output,
            wrap_width,
        }
    }

    /// Consumes the console and returns the writer.
    pub fn into_output(self) -> W {
        self.output
    }
}

impl Console<io::StdinLock<'static>, io::Stdout> {
    /// Console attached to the process's stdin and stdout.
    pub fn stdio(wrap_width: usize) -> Self {
        Self::new(io::stdin().lock(), io::stdout(), wrap_width)
    }
}

impl<R: BufRead, W: Write> Prompter for Console<R, W> {
    fn show_results(&mut self, results: &SearchMap) -> io::Result<()> {
        write!(self.output, "{}", render_table(results, self.wrap_width))?;
        self.output.flush()
    }

    fn message(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.output, "{text}")
    }

    fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let trimmed = line.trim_end_matches(['\n', '\r']).len();
        line.truncate(trimmed);
        Ok(Some(line))
    }
}
