use std::io::Write;

use super::{Command, CommandContext, CommandError, Flow};
use crate::core::parser::Invocation;

pub const HELP_TEXT: &[(&str, &str)] = &[
    ("pwd", "Print current directory"),
    ("cd <path>|-", "Change directory, '-' returns to the previous one"),
    ("ls [-a] [-r]", "List files (-a: include hidden, -r: reverse order)"),
    ("mkdir <dir...>", "Make directories"),
    ("rmdir <dir>", "Remove an empty directory"),
    ("touch <file...>", "Create empty files"),
    ("mv <source> <destination>", "Move/rename files"),
    ("rm <file>", "Remove a file"),
    ("cat <file...>", "Print file contents"),
    ("cat > file / cat >> file", "Write typed lines to a file until 'exit'"),
    ("help", "Display help message"),
    ("exit", "Exit the shell"),
];

pub const FAREWELL: &str = "Exiting...";

#[derive(Clone)]
pub struct PwdCommand;

impl Default for PwdCommand {
    fn default() -> Self {
        Self::new()
    }
}

impl PwdCommand {
    pub fn new() -> Self {
        Self
    }
}

impl Command for PwdCommand {
    fn execute(
        &self,
        _invocation: &Invocation,
        ctx: &mut CommandContext<'_>,
    ) -> Result<Flow, CommandError> {
        writeln!(ctx.out, "{}", ctx.state.current_path().display())?;
        Ok(Flow::Continue)
    }
}

#[derive(Clone)]
pub struct HelpCommand;

impl Default for HelpCommand {
    fn default() -> Self {
        Self::new()
    }
}

impl HelpCommand {
    pub fn new() -> Self {
        Self
    }
}

impl Command for HelpCommand {
    fn execute(
        &self,
        _invocation: &Invocation,
        ctx: &mut CommandContext<'_>,
    ) -> Result<Flow, CommandError> {
        let width = HELP_TEXT
            .iter()
            .map(|(usage, _)| usage.len())
            .max()
            .unwrap_or(0);

        writeln!(ctx.out, "Available commands:")?;
        for (usage, description) in HELP_TEXT {
            writeln!(ctx.out, "  {:<width$}  {}", usage, description, width = width)?;
        }
        Ok(Flow::Continue)
    }
}

#[derive(Clone)]
pub struct ExitCommand;

impl Default for ExitCommand {
    fn default() -> Self {
        Self::new()
    }
}

impl ExitCommand {
    pub fn new() -> Self {
        Self
    }
}

impl Command for ExitCommand {
    fn execute(
        &self,
        _invocation: &Invocation,
        _ctx: &mut CommandContext<'_>,
    ) -> Result<Flow, CommandError> {
        // the loop prints the farewell so end of input can share it
        Ok(Flow::Exit)
    }
}
