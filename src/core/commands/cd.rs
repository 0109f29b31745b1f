use super::{expect_args, Command, CommandContext, CommandError, Flow};
use crate::core::parser::Invocation;

#[derive(Clone)]
pub struct CdCommand;

impl Default for CdCommand {
    fn default() -> Self {
        Self::new()
    }
}

impl CdCommand {
    pub fn new() -> Self {
        Self
    }
}

impl Command for CdCommand {
    fn execute(
        &self,
        invocation: &Invocation,
        ctx: &mut CommandContext<'_>,
    ) -> Result<Flow, CommandError> {
        let args = expect_args(invocation, 1, "Path")?;

        match args[0].as_str() {
            "-" => ctx.state.change_to_previous()?,
            target => ctx.state.change_to(target)?,
        }
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
    fn test_cd_requires_path() {
        let dir = TempDir::new("cd_missing");
        let mut state = state_in(&dir);
        let (result, _) = run_line(&mut state, "cd", "");
        assert!(matches!(result, Err(CommandError::MissingArgument("Path"))));
        assert_eq!(
            result.unwrap_err().to_string(),
            "Path not specified"
        );
    }

    #[test]
    fn test_cd_and_back() {
        let dir = TempDir::new("cd_back");
        fs::create_dir(dir.path().join("a")).unwrap();
        let mut state = state_in(&dir);

        run_line(&mut state, "cd a", "").0.unwrap();
        assert_eq!(state.current_path(), dir.path().join("a"));

        run_line(&mut state, "cd -", "").0.unwrap();
        assert_eq!(state.current_path(), dir.path());

        let (result, _) = run_line(&mut state, "cd -", "");
        assert!(matches!(result, Err(CommandError::NoPreviousDirectory)));
        assert_eq!(state.current_path(), dir.path());
    }

    #[test]
    fn test_cd_not_a_directory() {
        let dir = TempDir::new("cd_file");
        fs::write(dir.path().join("file.txt"), "").unwrap();
        let mut state = state_in(&dir);

        let (result, _) = run_line(&mut state, "cd file.txt", "");
        let err = result.unwrap_err();
        assert!(matches!(err, CommandError::NotADirectory(_)));
        assert!(err.to_string().starts_with("Not a directory"));
        assert_eq!(state.current_path(), dir.path());
        assert_eq!(state.previous_path(), None);
    }

    #[test]
    fn test_cd_quoted_name_with_space() {
        let dir = TempDir::new("cd_space");
        fs::create_dir(dir.path().join("my dir")).unwrap();
        let mut state = state_in(&dir);

        run_line(&mut state, "cd \"my dir\"", "").0.unwrap();
        assert_eq!(state.current_path(), dir.path().join("my dir"));
    }

    #[test]
    fn test_cd_too_many_arguments() {
        let dir = TempDir::new("cd_many");
        let mut state = state_in(&dir);
        let (result, _) = run_line(&mut state, "cd a b", "");
        assert!(matches!(result, Err(CommandError::InvalidArguments(_))));
    }
}
