use std::path::{Component, Path, PathBuf};

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PathError {
    #[error("Home directory not found")]
    HomeDirNotFound,
}

/// Turns user-typed paths into absolute ones.
///
/// A leading `~` or `~/` is replaced with the home directory, relative paths
/// are joined onto the given base, and `.`/`..` are folded away lexically
/// (symlinks are not consulted).
#[derive(Debug, Clone, Default)]
pub struct PathResolver {
    home: Option<PathBuf>,
}

impl PathResolver {
    pub fn new() -> Self {
        Self {
            home: dirs::home_dir(),
        }
    }

    pub fn with_home(home: impl Into<PathBuf>) -> Self {
        Self {
            home: Some(home.into()),
        }
    }

    pub fn home_dir(&self) -> Result<&Path, PathError> {
        self.home.as_deref().ok_or(PathError::HomeDirNotFound)
    }

    pub fn resolve(&self, base: &Path, input: &str) -> Result<PathBuf, PathError> {
        let expanded = self.expand(input)?;
        let joined = if expanded.is_absolute() {
            expanded
        } else {
            base.join(expanded)
        };
        Ok(normalize(&joined))
    }

    pub fn expand(&self, input: &str) -> Result<PathBuf, PathError> {
        if input == "~" {
            return Ok(self.home_dir()?.to_path_buf());
        }

        match input.strip_prefix("~/") {
            Some(rest) => {
                let mut path = self.home_dir()?.to_path_buf();
                for part in rest.split('/').filter(|part| !part.is_empty()) {
                    path.push(part);
                }
                Ok(path)
            }
            // "~user" is left alone
            None => Ok(PathBuf::from(input)),
        }
    }
}

pub(crate) fn normalize(path: &Path) -> PathBuf {
    let mut result = PathBuf::new();
    for component in path.components() {
        match component {
            Component::Prefix(_) | Component::RootDir => result.push(component.as_os_str()),
            Component::CurDir => {}
            Component::ParentDir => {
                // popping at the root is a no-op, same as `cd /..`
                result.pop();
            }
            Component::Normal(part) => result.push(part),
        }
    }
    result
}
