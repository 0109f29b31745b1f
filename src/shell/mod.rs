use std::io::Write;

use tracing::{debug, warn};

mod executor;

use crate::{
    core::{
        commands::{CommandExecutor, Flow, FAREWELL},
        config::Config,
        state::DirectoryState,
    },
    error::ShellError,
    filesystem::FileSystem,
    highlight::SyntaxHighlighter,
    input::{LineSource, ReadOutcome},
};

pub(crate) use executor::CommandHandler;

pub const WELCOME: &str = "Welcome to dirsh! Type 'help' for a list of commands.";
const INTERRUPT_HINT: &str = "Use 'exit' to exit the shell";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShellOptions {
    pub banner: bool,
    /// Print the prompt when the line source does not render it itself.
    pub prompt: bool,
    pub color: bool,
    pub quiet: bool,
}

impl ShellOptions {
    pub fn from_config(config: &Config, quiet: bool) -> Self {
        Self {
            banner: config.banner && !quiet,
            prompt: true,
            color: config.color,
            quiet,
        }
    }

    /// No banner, prompt, color or farewell: only command output and errors.
    pub fn scripted() -> Self {
        Self {
            banner: false,
            prompt: false,
            color: false,
            quiet: true,
        }
    }
}

pub struct Shell<S, W> {
    pub(crate) source: S,
    pub(crate) out: W,
    pub(crate) state: DirectoryState,
    pub(crate) executor: CommandExecutor,
    pub(crate) fs: FileSystem,
    pub(crate) highlighter: SyntaxHighlighter,
    pub(crate) options: ShellOptions,
}

impl<S: LineSource, W: Write> Shell<S, W> {
    pub fn new(source: S, out: W, state: DirectoryState, options: ShellOptions) -> Self {
        let highlighter = if options.color {
            SyntaxHighlighter::new()
        } else {
            SyntaxHighlighter::plain()
        };

        Shell {
            source,
            out,
            state,
            executor: CommandExecutor::new(),
            fs: FileSystem::new(),
            highlighter,
            options,
        }
    }

    pub fn run(&mut self) -> Result<(), ShellError> {
        if self.options.banner {
            writeln!(self.out, "{}", self.highlighter.highlight_hint(WELCOME))?;
        }

        loop {
            self.source.set_cwd(self.state.current_path());
            let prompt = format!("{} $ ", self.state.current_path().display());
            let prompted = self.show_prompt(&prompt)?;

            match self.source.read_line(&prompt) {
                Ok(ReadOutcome::Line(line)) => {
                    if self.execute_line(&line)? == Flow::Exit {
                        self.farewell(false)?;
                        break;
                    }
                }
                Ok(ReadOutcome::Interrupted) => {
                    if !self.options.quiet {
                        writeln!(self.out, "{}", INTERRUPT_HINT)?;
                    }
                }
                Ok(ReadOutcome::Eof) => {
                    debug!("end of input");
                    self.farewell(prompted)?;
                    break;
                }
                Err(e) => {
                    warn!("could not read input: {}", e);
                    self.farewell(prompted)?;
                    break;
                }
            }
        }

        if let Err(e) = self.source.finish() {
            if !self.options.quiet {
                warn!("could not save history: {}", e);
            }
        }
        self.out.flush()?;
        Ok(())
    }

    pub fn state(&self) -> &DirectoryState {
        &self.state
    }

    pub fn into_output(self) -> W {
        self.out
    }

    /// Returns whether a prompt is now sitting on the current line.
    fn show_prompt(&mut self, prompt: &str) -> Result<bool, ShellError> {
        if self.source.renders_prompt() {
            return Ok(true);
        }
        if !self.options.prompt {
            return Ok(false);
        }

        write!(self.out, "{}", self.highlighter.highlight_prompt(prompt))?;
        self.out.flush()?;
        Ok(true)
    }

    fn farewell(&mut self, after_prompt: bool) -> Result<(), ShellError> {
        if self.options.quiet {
            return Ok(());
        }
        if after_prompt {
            writeln!(self.out)?;
        }
        writeln!(self.out, "{}", FAREWELL)?;
        Ok(())
    }
}
