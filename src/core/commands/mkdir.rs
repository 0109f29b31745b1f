use super::{Command, CommandContext, CommandError, Flow};
use crate::core::parser::Invocation;

#[derive(Clone)]
pub struct MkdirCommand;

impl Default for MkdirCommand {
    fn default() -> Self {
        Self::new()
    }
}

impl MkdirCommand {
    pub fn new() -> Self {
        Self
    }
}

impl Command for MkdirCommand {
    fn execute(
        &self,
        invocation: &Invocation,
        ctx: &mut CommandContext<'_>,
    ) -> Result<Flow, CommandError> {
        if invocation.args.is_empty() {
            return Err(CommandError::MissingArgument("Directory name"));
        }

        // every name is attempted, failures are collected
        let mut failures = Vec::new();
        for name in &invocation.args {
            let created = ctx
                .state
                .resolve(name)
                .map_err(CommandError::from)
                .and_then(|path| {
                    ctx.fs
                        .create_dir(&path)
                        .map_err(|e| CommandError::from_fs(e, "Directory", name))
                });

            if let Err(e) = created {
                failures.push(e);
            }
        }

        if failures.is_empty() {
            Ok(Flow::Continue)
        } else {
            Err(CommandError::Batch(failures))
        }
    }
}
