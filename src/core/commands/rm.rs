use super::{expect_args, Command, CommandContext, CommandError, Flow};
use crate::core::parser::Invocation;

#[derive(Clone)]
pub struct RmCommand;

impl Default for RmCommand {
    fn default() -> Self {
        Self::new()
    }
}

impl RmCommand {
    pub fn new() -> Self {
        Self
    }
}

impl Command for RmCommand {
    fn execute(
        &self,
        invocation: &Invocation,
        ctx: &mut CommandContext<'_>,
    ) -> Result<Flow, CommandError> {
        let args = expect_args(invocation, 1, "File name")?;
        let name = &args[0];
        let path = ctx.state.resolve(name)?;

        ctx.fs
            .remove_file(&path)
            .map_err(|e| CommandError::from_fs(e, "File", name))?;
        Ok(Flow::Continue)
    }
}
