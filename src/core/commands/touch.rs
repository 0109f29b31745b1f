use super::{Command, CommandContext, CommandError, Flow};
use crate::core::parser::Invocation;

#[derive(Clone)]
pub struct TouchCommand;

impl Default for TouchCommand {
    fn default() -> Self {
        Self::new()
    }
}

impl TouchCommand {
    pub fn new() -> Self {
        Self
    }
}

impl Command for TouchCommand {
    fn execute(
        &self,
        invocation: &Invocation,
        ctx: &mut CommandContext<'_>,
    ) -> Result<Flow, CommandError> {
        if invocation.args.is_empty() {
            return Err(CommandError::MissingArgument("File name"));
        }

        let failures: Vec<CommandError> = invocation
            .args
            .iter()
            .filter_map(|name| {
                let path = match ctx.state.resolve(name) {
                    Ok(path) => path,
                    Err(e) => return Some(e.into()),
                };
                ctx.fs
                    .create_file(&path)
                    .err()
                    .map(|e| CommandError::from_fs(e, "File", name))
            })
            .collect();

        if failures.is_empty() {
            Ok(Flow::Continue)
        } else {
            Err(CommandError::Batch(failures))
        }
    }
}
