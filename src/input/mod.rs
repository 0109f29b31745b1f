use std::io::{self, BufRead};
use std::path::Path;

use crate::filesystem::decode_line;

mod completer;
mod editor;

pub use completer::ShellCompleter;
pub use editor::EditorSource;

/// Result of asking a line source for the next line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadOutcome {
    Line(String),
    Interrupted,
    Eof,
}

/// Where the shell gets its lines from: an interactive editor on a terminal,
/// or any buffered reader (pipes, scripts, tests).
pub trait LineSource {
    fn read_line(&mut self, prompt: &str) -> io::Result<ReadOutcome>;

    /// Reads a line of file content rather than a command. Sources with
    /// history keep these lines out of it.
    fn read_content_line(&mut self, prompt: &str) -> io::Result<ReadOutcome> {
        self.read_line(prompt)
    }

    /// Whether `read_line` displays the prompt itself.
    fn renders_prompt(&self) -> bool {
        false
    }

    /// Called before every prompt so completion can follow `cd`.
    fn set_cwd(&mut self, _cwd: &Path) {}

    fn finish(&mut self) -> io::Result<()> {
        Ok(())
    }
}

pub struct ReaderSource<R> {
    reader: R,
    buffer: Vec<u8>,
}

impl<R: BufRead> ReaderSource<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            buffer: Vec::new(),
        }
    }
}

impl<R: BufRead> LineSource for ReaderSource<R> {
    fn read_line(&mut self, _prompt: &str) -> io::Result<ReadOutcome> {
        self.buffer.clear();
        if self.reader.read_until(b'\n', &mut self.buffer)? == 0 {
            return Ok(ReadOutcome::Eof);
        }

        Ok(ReadOutcome::Line(decode_line(&self.buffer)))
    }
}
