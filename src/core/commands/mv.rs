use super::{Command, CommandContext, CommandError, Flow};
use crate::core::parser::Invocation;
use crate::filesystem::FsError;

#[derive(Clone)]
pub struct MvCommand;

impl Default for MvCommand {
    fn default() -> Self {
        Self::new()
    }
}

impl MvCommand {
    pub fn new() -> Self {
        Self
    }
}

impl Command for MvCommand {
    fn execute(
        &self,
        invocation: &Invocation,
        ctx: &mut CommandContext<'_>,
    ) -> Result<Flow, CommandError> {
        let (source, destination) = match invocation.args.as_slice() {
            [source, destination] => (source, destination),
            _ => return Err(CommandError::MissingArgument("Source and destination")),
        };

        let from = ctx.state.resolve(source)?;
        let mut to = ctx.state.resolve(destination)?;

        if ctx.fs.is_dir(&to) {
            if let Some(base) = from.file_name() {
                to.push(base);
            }
        }

        match ctx.fs.rename(&from, &to) {
            Ok(()) => Ok(Flow::Continue),
            Err(FsError::NotFound(_)) => Err(CommandError::NotFound {
                kind: "Source file",
                name: source.clone(),
            }),
            Err(FsError::Io { source: err, .. }) => Err(CommandError::CouldNotMove {
                from: source.clone(),
                to: destination.clone(),
                source: err,
            }),
            Err(other) => Err(CommandError::from_fs(other, "File", destination)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use super::*;
    use crate::testing::TempDir;
    use std::fs;

    #[test]
    fn test_mv_rename_keeps_content() {
        let dir = TempDir::new("mv_rename");
        fs::write(dir.path().join("src.txt"), "payload\n").unwrap();
        let mut state = state_in(&dir);

        run_line(&mut state, "mv src.txt dst.txt", "").0.unwrap();
        assert!(!dir.path().join("src.txt").exists());
        assert_eq!(
            fs::read_to_string(dir.path().join("dst.txt")).unwrap(),
            "payload\n"
        );
    }

    #[test]
    fn test_mv_into_directory() {
        let dir = TempDir::new("mv_into");
        fs::write(dir.path().join("src.txt"), "x").unwrap();
        fs::create_dir(dir.path().join("dst.txt")).unwrap();
        let mut state = state_in(&dir);

        run_line(&mut state, "mv src.txt dst.txt", "").0.unwrap();
        assert!(!dir.path().join("src.txt").exists());
        assert!(dir.path().join("dst.txt/src.txt").is_file());
    }

    #[test]
    fn test_mv_missing_source() {
        let dir = TempDir::new("mv_missing");
        let mut state = state_in(&dir);
        let (result, _) = run_line(&mut state, "mv ghost.txt other.txt", "");
        assert_eq!(
            result.unwrap_err().to_string(),
            "Source file ghost.txt does not exist"
        );
    }

    #[test]
    fn test_mv_failure_reports_could_not_move() {
        let dir = TempDir::new("mv_fail");
        fs::write(dir.path().join("a.txt"), "x").unwrap();
        let mut state = state_in(&dir);

        let (result, _) = run_line(&mut state, "mv a.txt missing_dir/a.txt", "");
        assert!(matches!(result, Err(CommandError::CouldNotMove { .. })));
        assert!(dir.path().join("a.txt").is_file());
    }

    #[test]
    fn test_mv_needs_two_names() {
        let dir = TempDir::new("mv_args");
        let mut state = state_in(&dir);
        let (result, _) = run_line(&mut state, "mv only", "");
        assert_eq!(
            result.unwrap_err().to_string(),
            "Source and destination not specified"
        );
    }
}
