use std::io::Write;

use super::{Command, CommandContext, CommandError, Flow};
use crate::core::parser::Invocation;

#[derive(Clone)]
pub struct LsCommand;

impl Default for LsCommand {
    fn default() -> Self {
        Self::new()
    }
}

impl LsCommand {
    pub fn new() -> Self {
        Self
    }
}

impl Command for LsCommand {
    fn execute(
        &self,
        invocation: &Invocation,
        ctx: &mut CommandContext<'_>,
    ) -> Result<Flow, CommandError> {
        if let Some(extra) = invocation.args.first() {
            return Err(CommandError::InvalidArguments(format!(
                "ls: unexpected argument '{}'",
                extra
            )));
        }

        let show_hidden = invocation.has_flag('a');
        let current = ctx.state.current_path();
        let mut names: Vec<String> = ctx
            .fs
            .list_entries(current)
            .map_err(|e| CommandError::from_fs(e, "Directory", &current.display().to_string()))?
            .into_iter()
            .filter(|entry| show_hidden || !entry.hidden)
            .map(|entry| entry.name)
            .collect();

        names.sort();
        if invocation.has_flag('r') {
            names.reverse();
        }

        for name in names {
            writeln!(ctx.out, "{}", name)?;
        }
        Ok(Flow::Continue)
    }

    fn accepted_flags(&self) -> &'static [char] {
        &['a', 'r']
    }
}
