use std::io::{BufWriter, Write};

use tracing::debug;

use crate::core::commands::{CommandContext, CommandError, Flow};
use crate::core::parser::CommandLine;
use crate::error::ShellError;
use crate::input::LineSource;

pub(crate) trait CommandHandler {
    /// Runs one input line, reporting command failures instead of returning
    /// them. Only a failure to write output is an error here.
    fn execute_line(&mut self, line: &str) -> Result<Flow, ShellError>;
}

impl<S: LineSource, W: Write> CommandHandler for super::Shell<S, W> {
    fn execute_line(&mut self, line: &str) -> Result<Flow, ShellError> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(Flow::Continue);
        }

        match self.dispatch(line) {
            Ok(flow) => Ok(flow),
            Err(err) => {
                for failure in err.into_failures() {
                    debug!(error = %failure, "command failed");
                    let message = format!("Error: {}", failure);
                    writeln!(self.out, "{}", self.highlighter.highlight_error(&message))?;
                }
                Ok(Flow::Continue)
            }
        }
    }
}

impl<S: LineSource, W: Write> super::Shell<S, W> {
    fn dispatch(&mut self, line: &str) -> Result<Flow, CommandError> {
        let Some(parsed) = CommandLine::parse(line)? else {
            return Ok(Flow::Continue);
        };
        let invocation = self.executor.prepare(parsed)?;

        let super::Shell {
            source,
            out,
            state,
            executor,
            fs,
            options,
            ..
        } = self;

        match &invocation.redirect {
            Some(redirect) => {
                let path = state.resolve(&redirect.target)?;
                let file = fs
                    .open_output(&path, redirect.mode)
                    .map_err(|e| CommandError::from_fs(e, "File", &redirect.target))?;
                let mut writer = BufWriter::new(file);

                let console: Option<&mut dyn Write> = if options.quiet { None } else { Some(out) };
                let flow = {
                    let mut ctx = CommandContext {
                        state,
                        fs,
                        input: source,
                        out: &mut writer,
                        console,
                    };
                    executor.execute(&invocation, &mut ctx)
                };
                writer.flush()?;
                flow
            }
            None => {
                let mut ctx = CommandContext {
                    state,
                    fs,
                    input: source,
                    out,
                    console: None,
                };
                executor.execute(&invocation, &mut ctx)
            }
        }
    }
}
