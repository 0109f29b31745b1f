use super::{expect_args, Command, CommandContext, CommandError, Flow};
use crate::core::parser::Invocation;

#[derive(Clone)]
pub struct RmdirCommand;

impl Default for RmdirCommand {
    fn default() -> Self {
        Self::new()
    }
}

impl RmdirCommand {
    pub fn new() -> Self {
        Self
    }
}

impl Command for RmdirCommand {
    fn execute(
        &self,
        invocation: &Invocation,
        ctx: &mut CommandContext<'_>,
    ) -> Result<Flow, CommandError> {
        let args = expect_args(invocation, 1, "Directory name")?;
        let name = &args[0];
        let path = ctx.state.resolve(name)?;

        if path == ctx.state.current_path() {
            return Err(CommandError::InvalidArguments(
                "rmdir: cannot remove the current directory".to_string(),
            ));
        }

        ctx.fs
            .remove_dir(&path)
            .map_err(|e| CommandError::from_fs(e, "Directory", name))?;
        Ok(Flow::Continue)
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use super::*;
    use crate::testing::TempDir;
    use std::fs;

    #[test]
    fn test_rmdir_round_trip() {
        let dir = TempDir::new("rmdir_round");
        let mut state = state_in(&dir);
        let (_, before) = run_line(&mut state, "ls -a", "");

        run_line(&mut state, "mkdir d", "").0.unwrap();
        run_line(&mut state, "rmdir d", "").0.unwrap();

        let (_, after) = run_line(&mut state, "ls -a", "");
        assert_eq!(before, after);
    }

    #[test]
    fn test_rmdir_errors() {
        let dir = TempDir::new("rmdir_errors");
        fs::create_dir(dir.path().join("full")).unwrap();
        fs::write(dir.path().join("full/inner.txt"), "").unwrap();
        fs::write(dir.path().join("plain.txt"), "").unwrap();
        let mut state = state_in(&dir);

        let (result, _) = run_line(&mut state, "rmdir ghost", "");
        assert_eq!(result.unwrap_err().to_string(), "Directory ghost does not exist");

        let (result, _) = run_line(&mut state, "rmdir full", "");
        assert_eq!(result.unwrap_err().to_string(), "Directory full is not empty");
        assert!(dir.path().join("full").is_dir());

        let (result, _) = run_line(&mut state, "rmdir plain.txt", "");
        assert_eq!(result.unwrap_err().to_string(), "plain.txt is not a directory");

        let (result, _) = run_line(&mut state, "rmdir", "");
        assert!(matches!(result, Err(CommandError::MissingArgument(_))));

        let (result, _) = run_line(&mut state, "rmdir full plain.txt", "");
        assert!(matches!(result, Err(CommandError::InvalidArguments(_))));
    }

    #[test]
    fn test_rmdir_current_directory_refused() {
        let dir = TempDir::new("rmdir_self");
        let mut state = state_in(&dir);
        let (result, _) = run_line(&mut state, "rmdir .", "");
        assert!(matches!(result, Err(CommandError::InvalidArguments(_))));
        assert!(dir.path().is_dir());
    }
}
