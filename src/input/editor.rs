use std::io;
use std::path::{Path, PathBuf};

use rustyline::error::ReadlineError;
use rustyline::{config::Configurer, history::FileHistory, Editor};
use tracing::{debug, warn};

use super::{LineSource, ReadOutcome, ShellCompleter};
use crate::error::ShellError;

/// Terminal line source backed by rustyline, with a persistent history file.
pub struct EditorSource {
    editor: Editor<ShellCompleter, FileHistory>,
    history_file: Option<PathBuf>,
}

impl EditorSource {
    pub fn new(
        completer: ShellCompleter,
        history_file: Option<PathBuf>,
        history_size: usize,
    ) -> Result<Self, ShellError> {
        let mut editor = Editor::<ShellCompleter, FileHistory>::new()?;
        editor.set_helper(Some(completer));
        editor.set_auto_add_history(true);
        editor.set_max_history_size(history_size)?;

        if let Some(path) = &history_file {
            match editor.load_history(path) {
                Ok(()) => debug!(path = %path.display(), "loaded history"),
                Err(ReadlineError::Io(e)) if e.kind() == io::ErrorKind::NotFound => {}
                Err(e) => warn!(path = %path.display(), "could not load history: {}", e),
            }
        }

        Ok(Self {
            editor,
            history_file,
        })
    }
}

impl LineSource for EditorSource {
    fn read_line(&mut self, prompt: &str) -> io::Result<ReadOutcome> {
        match self.editor.readline(prompt) {
            Ok(line) => Ok(ReadOutcome::Line(line)),
            Err(ReadlineError::Interrupted) => Ok(ReadOutcome::Interrupted),
            Err(ReadlineError::Eof) => Ok(ReadOutcome::Eof),
            Err(ReadlineError::Io(e)) => Err(e),
            Err(e) => Err(io::Error::other(e)),
        }
    }

    fn read_content_line(&mut self, prompt: &str) -> io::Result<ReadOutcome> {
        self.editor.set_auto_add_history(false);
        let outcome = self.read_line(prompt);
        self.editor.set_auto_add_history(true);
        outcome
    }

    fn renders_prompt(&self) -> bool {
        true
    }

    fn set_cwd(&mut self, cwd: &Path) {
        if let Some(helper) = self.editor.helper_mut() {
            helper.set_cwd(cwd);
        }
    }

    fn finish(&mut self) -> io::Result<()> {
        if let Some(path) = &self.history_file {
            self.editor
                .save_history(path)
                .map_err(|e| match e {
                    ReadlineError::Io(e) => e,
                    other => io::Error::other(other),
                })?;
            debug!(path = %path.display(), "saved history");
        }
        Ok(())
    }
}
