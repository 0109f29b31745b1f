use std::collections::BTreeMap;
use std::io::{self, Write};

use thiserror::Error;
use tracing::debug;

mod builtin;
mod cat;
mod cd;
mod ls;
mod mkdir;
mod mv;
mod rm;
mod rmdir;
mod touch;

pub use builtin::{ExitCommand, HelpCommand, PwdCommand, FAREWELL, HELP_TEXT};
pub use cat::CatCommand;
pub use cd::CdCommand;
pub use ls::LsCommand;
pub use mkdir::MkdirCommand;
pub use mv::MvCommand;
pub use rm::RmCommand;
pub use rmdir::RmdirCommand;
pub use touch::TouchCommand;

use crate::core::parser::{CommandLine, Invocation, ParseError};
use crate::core::state::{DirectoryState, StateError};
use crate::filesystem::{EntryKind, FileSystem, FsError};
use crate::input::LineSource;

#[derive(Debug, Error)]
pub enum CommandError {
    #[error("Unknown command: {0}")]
    UnknownCommand(String),
    #[error("{0} not specified")]
    MissingArgument(&'static str),
    #[error("{0}")]
    InvalidArguments(String),
    #[error("{kind} {name} does not exist")]
    NotFound { kind: &'static str, name: String },
    #[error("{name} is not a {expected}")]
    WrongType { name: String, expected: EntryKind },
    #[error("{kind} {name} already exists")]
    AlreadyExists { kind: &'static str, name: String },
    #[error("Directory {0} is not empty")]
    NotEmpty(String),
    #[error("Not a directory: {0}")]
    NotADirectory(String),
    #[error("No previous directory")]
    NoPreviousDirectory,
    #[error("Could not move file {from} to {to}: {source}")]
    CouldNotMove {
        from: String,
        to: String,
        #[source]
        source: io::Error,
    },
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Invalid input: {0}")]
    Io(#[from] io::Error),
    #[error("{}", .0.iter().map(ToString::to_string).collect::<Vec<_>>().join("; "))]
    Batch(Vec<CommandError>),
}

impl CommandError {
    /// Maps an adapter failure onto the name the user typed.
    pub fn from_fs(err: FsError, kind: &'static str, name: &str) -> Self {
        match err {
            FsError::NotFound(_) => CommandError::NotFound {
                kind,
                name: name.to_string(),
            },
            FsError::AlreadyExists(_) => CommandError::AlreadyExists {
                kind,
                name: name.to_string(),
            },
            FsError::NotEmpty(_) => CommandError::NotEmpty(name.to_string()),
            FsError::WrongType { expected, .. } => CommandError::WrongType {
                name: name.to_string(),
                expected,
            },
            FsError::Io { source, .. } => CommandError::Io(source),
        }
    }

    /// Flattens batches so each failure can be reported on its own line.
    pub fn into_failures(self) -> Vec<CommandError> {
        match self {
            CommandError::Batch(errors) => errors
                .into_iter()
                .flat_map(CommandError::into_failures)
                .collect(),
            other => vec![other],
        }
    }
}

impl From<StateError> for CommandError {
    fn from(err: StateError) -> Self {
        match err {
            StateError::NotADirectory(path) => {
                CommandError::NotADirectory(path.display().to_string())
            }
            StateError::NoPreviousDirectory => CommandError::NoPreviousDirectory,
            StateError::Path(e) => CommandError::InvalidInput(e.to_string()),
        }
    }
}

impl From<ParseError> for CommandError {
    fn from(err: ParseError) -> Self {
        CommandError::InvalidInput(err.to_string())
    }
}

/// What the loop should do after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// Everything a command may touch while it runs.
pub struct CommandContext<'a> {
    pub state: &'a mut DirectoryState,
    pub fs: &'a FileSystem,
    pub input: &'a mut dyn LineSource,
    pub out: &'a mut dyn Write,
    /// The shell's own output while `out` is redirected, for prompts that
    /// must not land in the target. `None` when not redirected or quiet.
    pub console: Option<&'a mut dyn Write>,
}

pub trait Command {
    fn execute(
        &self,
        invocation: &Invocation,
        ctx: &mut CommandContext<'_>,
    ) -> Result<Flow, CommandError>;

    fn accepted_flags(&self) -> &'static [char] {
        &[]
    }
}

#[derive(Clone)]
enum CommandType {
    Pwd(PwdCommand),
    Cd(CdCommand),
    Ls(LsCommand),
    Mkdir(MkdirCommand),
    Rmdir(RmdirCommand),
    Touch(TouchCommand),
    Mv(MvCommand),
    Rm(RmCommand),
    Cat(CatCommand),
    Help(HelpCommand),
    Exit(ExitCommand),
}

impl CommandType {
    fn as_command(&self) -> &dyn Command {
        match self {
            CommandType::Pwd(cmd) => cmd,
            CommandType::Cd(cmd) => cmd,
            CommandType::Ls(cmd) => cmd,
            CommandType::Mkdir(cmd) => cmd,
            CommandType::Rmdir(cmd) => cmd,
            CommandType::Touch(cmd) => cmd,
            CommandType::Mv(cmd) => cmd,
            CommandType::Rm(cmd) => cmd,
            CommandType::Cat(cmd) => cmd,
            CommandType::Help(cmd) => cmd,
            CommandType::Exit(cmd) => cmd,
        }
    }
}

/// Registry of the built-in commands.
#[derive(Clone)]
pub struct CommandExecutor {
    commands: BTreeMap<&'static str, CommandType>,
}

impl Default for CommandExecutor {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandExecutor {
    pub fn new() -> Self {
        let mut commands = BTreeMap::new();
        commands.insert("pwd", CommandType::Pwd(PwdCommand::new()));
        commands.insert("cd", CommandType::Cd(CdCommand::new()));
        commands.insert("ls", CommandType::Ls(LsCommand::new()));
        commands.insert("mkdir", CommandType::Mkdir(MkdirCommand::new()));
        commands.insert("rmdir", CommandType::Rmdir(RmdirCommand::new()));
        commands.insert("touch", CommandType::Touch(TouchCommand::new()));
        commands.insert("mv", CommandType::Mv(MvCommand::new()));
        commands.insert("rm", CommandType::Rm(RmCommand::new()));
        commands.insert("cat", CommandType::Cat(CatCommand::new()));
        commands.insert("help", CommandType::Help(HelpCommand::new()));
        commands.insert("exit", CommandType::Exit(ExitCommand::new()));

        Self { commands }
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.commands.keys().copied()
    }

    /// Looks the command up and splits its words into flags and arguments.
    pub fn prepare(&self, line: CommandLine) -> Result<Invocation, CommandError> {
        let command = self
            .commands
            .get(line.name.as_str())
            .ok_or_else(|| CommandError::UnknownCommand(line.name.clone()))?;

        Ok(line.into_invocation(command.as_command().accepted_flags()))
    }

    pub fn execute(
        &self,
        invocation: &Invocation,
        ctx: &mut CommandContext<'_>,
    ) -> Result<Flow, CommandError> {
        let command = self
            .commands
            .get(invocation.name.as_str())
            .ok_or_else(|| CommandError::UnknownCommand(invocation.name.clone()))?;

        debug!(
            command = %invocation.name,
            args = ?invocation.args,
            flags = ?invocation.flags,
            "dispatching"
        );
        command.as_command().execute(invocation, ctx)
    }
}

/// Rejects argument lists that are not exactly `count` long.
pub(crate) fn expect_args<'a>(
    invocation: &'a Invocation,
    count: usize,
    missing: &'static str,
) -> Result<&'a [String], CommandError> {
    let args = invocation.args.as_slice();
    if args.len() < count {
        return Err(CommandError::MissingArgument(missing));
    }
    if args.len() > count {
        return Err(CommandError::InvalidArguments(format!(
            "{}: expected {} argument{}, got {}",
            invocation.name,
            count,
            if count == 1 { "" } else { "s" },
            args.len()
        )));
    }
    Ok(args)
}


#[cfg(test)]
mod tests {
    use super::test_support::*;
    use super::*;
    use crate::testing::TempDir;

    #[test]
    fn test_registered_command_names() {
        let executor = CommandExecutor::new();
        let names: Vec<&str> = executor.names().collect();
        assert_eq!(
            names,
            vec!["cat", "cd", "exit", "help", "ls", "mkdir", "mv", "pwd", "rm", "rmdir", "touch"]
        );
    }

    #[test]
    fn test_execute_unknown_command() {
        let dir = TempDir::new("exec_unknown");
        let mut state = state_in(&dir);
        let (result, output) = run_line(&mut state, "foobar", "");

        assert!(matches!(result, Err(CommandError::UnknownCommand(ref name)) if name == "foobar"));
        assert!(output.is_empty());
        assert_eq!(state.current_path(), dir.path());
        assert_eq!(state.previous_path(), None);
    }

    #[test]
    fn test_prepare_only_recognizes_declared_flags() {
        let executor = CommandExecutor::new();
        let line = CommandLine::parse("mkdir -a").unwrap().unwrap();
        let invocation = executor.prepare(line).unwrap();
        assert_eq!(invocation.args, vec!["-a"]);
        assert!(invocation.flags.is_empty());
    }

    #[test]
    fn test_batch_flattening() {
        let err = CommandError::Batch(vec![
            CommandError::MissingArgument("File name"),
            CommandError::Batch(vec![CommandError::NoPreviousDirectory]),
        ]);
        let failures = err.into_failures();
        assert_eq!(failures.len(), 2);
        assert_eq!(failures[0].to_string(), "File name not specified");
        assert_eq!(failures[1].to_string(), "No previous directory");
    }

    #[test]
    fn test_command_error_display() {
        let errors = vec![
            CommandError::UnknownCommand("test".to_string()),
            CommandError::InvalidArguments("bad args".to_string()),
            CommandError::NotADirectory("/nope".to_string()),
            CommandError::Io(io::Error::new(io::ErrorKind::Other, "io error")),
        ];

        for error in errors {
            assert!(!error.to_string().is_empty());
        }
    }
}
