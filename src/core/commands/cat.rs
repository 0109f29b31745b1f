use std::io::Write;

use tracing::debug;

use super::{Command, CommandContext, CommandError, Flow};
use crate::core::parser::Invocation;
use crate::input::ReadOutcome;

/// Line that ends interactive capture.
pub const END_OF_CAPTURE: &str = "exit";

const CAPTURE_PROMPT: &str = "> ";
const CAPTURE_GUIDANCE: &str = "Enter the content you want to write, then 'exit' on its own line:";

#[derive(Clone)]
pub struct CatCommand;

impl Default for CatCommand {
    fn default() -> Self {
        Self::new()
    }
}

impl CatCommand {
    pub fn new() -> Self {
        Self
    }

    fn print_files(
        &self,
        names: &[String],
        ctx: &mut CommandContext<'_>,
    ) -> Result<(), CommandError> {
        let mut failures = Vec::new();
        for name in names {
            let lines = ctx
                .state
                .resolve(name)
                .map_err(CommandError::from)
                .and_then(|path| {
                    ctx.fs
                        .read_lines(&path)
                        .map_err(|e| CommandError::from_fs(e, "File", name))
                });

            match lines {
                Ok(lines) => {
                    for line in lines {
                        writeln!(ctx.out, "{}", line)?;
                    }
                }
                Err(e) => failures.push(e),
            }
        }

        if failures.is_empty() {
            Ok(())
        } else {
            Err(CommandError::Batch(failures))
        }
    }

    fn capture_input(&self, ctx: &mut CommandContext<'_>) -> Result<(), CommandError> {
        if let Some(console) = ctx.console.as_mut() {
            writeln!(console, "{}", CAPTURE_GUIDANCE)?;
            console.flush()?;
        }

        let mut captured = 0usize;
        loop {
            match ctx.input.read_content_line(CAPTURE_PROMPT)? {
                ReadOutcome::Line(line) if line == END_OF_CAPTURE => break,
                ReadOutcome::Line(line) => {
                    writeln!(ctx.out, "{}", line)?;
                    captured += 1;
                }
                ReadOutcome::Interrupted | ReadOutcome::Eof => break,
            }
        }

        debug!(lines = captured, "captured input");
        Ok(())
    }
}

impl Command for CatCommand {
    fn execute(
        &self,
        invocation: &Invocation,
        ctx: &mut CommandContext<'_>,
    ) -> Result<Flow, CommandError> {
        if !invocation.args.is_empty() {
            self.print_files(&invocation.args, ctx)?;
        } else if invocation.is_redirected() {
            self.capture_input(ctx)?;
        } else {
            return Err(CommandError::MissingArgument("File name"));
        }
        Ok(Flow::Continue)
    }
}
