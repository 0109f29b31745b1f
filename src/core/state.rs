use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

use crate::filesystem::FileSystem;
use crate::path::{normalize, PathError, PathResolver};

#[derive(Debug, Error)]
pub enum StateError {
    #[error("Not a directory")]
    NotADirectory(PathBuf),
    #[error("No previous directory")]
    NoPreviousDirectory,
    #[error(transparent)]
    Path(#[from] PathError),
}

/// Current and previous working directory of one session.
///
/// `current` always named an existing directory at the moment it was set; a
/// failed change leaves both fields untouched.
#[derive(Debug, Clone)]
pub struct DirectoryState {
    current: PathBuf,
    previous: Option<PathBuf>,
    resolver: PathResolver,
    fs: FileSystem,
}

impl DirectoryState {
    /// `start` is used as given, without `~` expansion.
    pub fn new(start: &Path, resolver: PathResolver) -> Result<Self, StateError> {
        let fs = FileSystem::new();
        let current = normalize(&Path::new("/").join(start));
        if !fs.is_dir(&current) {
            return Err(StateError::NotADirectory(current));
        }

        Ok(Self {
            current,
            previous: None,
            resolver,
            fs,
        })
    }

    pub fn current_path(&self) -> &Path {
        &self.current
    }

    pub fn previous_path(&self) -> Option<&Path> {
        self.previous.as_deref()
    }

    pub fn resolve(&self, input: &str) -> Result<PathBuf, StateError> {
        Ok(self.resolver.resolve(&self.current, input)?)
    }

    pub fn change_to(&mut self, target: &str) -> Result<(), StateError> {
        let resolved = self.resolve(target)?;
        if !self.fs.is_dir(&resolved) {
            return Err(StateError::NotADirectory(resolved));
        }

        debug!(from = %self.current.display(), to = %resolved.display(), "changed directory");
        let old = std::mem::replace(&mut self.current, resolved);
        self.previous = Some(old);
        Ok(())
    }

    pub fn change_to_previous(&mut self) -> Result<(), StateError> {
        let previous = self
            .previous
            .as_ref()
            .ok_or(StateError::NoPreviousDirectory)?;

        if !self.fs.is_dir(previous) {
            return Err(StateError::NotADirectory(previous.clone()));
        }

        if let Some(previous) = self.previous.take() {
            debug!(to = %previous.display(), "returned to previous directory");
            self.current = previous;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::TempDir;
    use std::fs;

    fn state_in(dir: &TempDir) -> DirectoryState {
        DirectoryState::new(dir.path(), PathResolver::with_home(dir.path())).unwrap()
    }

    #[test]
    fn test_new_rejects_missing_start() {
        let dir = TempDir::new("state_start");
        let missing = dir.path().join("missing");
        assert!(matches!(
            DirectoryState::new(&missing, PathResolver::new()),
            Err(StateError::NotADirectory(_))
        ));
    }

    #[test]
    fn test_new_takes_start_literally() {
        let dir = TempDir::new("state_tilde");
        let tilde = dir.path().join("~");
        fs::create_dir(&tilde).unwrap();

        let state = DirectoryState::new(&tilde.join("."), PathResolver::with_home("/")).unwrap();
        assert_eq!(state.current_path(), tilde);
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_new_keeps_non_utf8_start() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let dir = TempDir::new("state_bytes");
        let odd = dir.path().join(OsStr::from_bytes(b"caf\xe9"));
        fs::create_dir(&odd).unwrap();

        let state = DirectoryState::new(&odd, PathResolver::with_home(dir.path())).unwrap();
        assert_eq!(state.current_path(), odd);
    }

    #[test]
    fn test_change_to_relative_and_back() {
        let dir = TempDir::new("state_cd");
        fs::create_dir(dir.path().join("a")).unwrap();
        let mut state = state_in(&dir);

        state.change_to("a").unwrap();
        assert_eq!(state.current_path(), dir.path().join("a"));
        assert_eq!(state.previous_path(), Some(dir.path()));

        state.change_to_previous().unwrap();
        assert_eq!(state.current_path(), dir.path());
        assert_eq!(state.previous_path(), None);

        assert!(matches!(
            state.change_to_previous(),
            Err(StateError::NoPreviousDirectory)
        ));
    }

    #[test]
    fn test_failed_change_keeps_state() {
        let dir = TempDir::new("state_fail");
        fs::create_dir(dir.path().join("a")).unwrap();
        fs::write(dir.path().join("file.txt"), "x").unwrap();
        let mut state = state_in(&dir);
        state.change_to("a").unwrap();

        assert!(matches!(
            state.change_to("../file.txt"),
            Err(StateError::NotADirectory(_))
        ));
        assert!(state.change_to("nowhere").is_err());
        assert_eq!(state.current_path(), dir.path().join("a"));
        assert_eq!(state.previous_path(), Some(dir.path()));
    }

    #[test]
    fn test_change_to_absolute_and_parent() {
        let dir = TempDir::new("state_abs");
        fs::create_dir_all(dir.path().join("x/y")).unwrap();
        let mut state = state_in(&dir);

        let target = dir.path().join("x/y");
        state.change_to(&target.to_string_lossy()).unwrap();
        assert_eq!(state.current_path(), target);

        state.change_to("..").unwrap();
        assert_eq!(state.current_path(), dir.path().join("x"));

        state.change_to("~").unwrap();
        assert_eq!(state.current_path(), dir.path());
    }

    #[test]
    fn test_previous_removed_keeps_state() {
        let dir = TempDir::new("state_gone");
        fs::create_dir(dir.path().join("a")).unwrap();
        let mut state = state_in(&dir);
        state.change_to("a").unwrap();
        state.change_to("..").unwrap();
        fs::remove_dir(dir.path().join("a")).unwrap();

        assert!(matches!(
            state.change_to_previous(),
            Err(StateError::NotADirectory(_))
        ));
        assert_eq!(state.current_path(), dir.path());
        assert_eq!(state.previous_path(), Some(dir.path().join("a").as_path()));
    }
}
