use std::path::PathBuf;

use thiserror::Error;

mod loader;
mod paths;

use loader::ConfigLoader;
pub use paths::ConfigPaths;

use crate::flags::Flags;
use crate::path::PathError;

pub const DEFAULT_HISTORY_SIZE: usize = 1000;

/// Effective settings: defaults, then the rc file, then command-line flags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub start_dir: Option<PathBuf>,
    pub history_file: Option<PathBuf>,
    pub history_size: usize,
    pub color: bool,
    pub banner: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            start_dir: None,
            history_file: None,
            history_size: DEFAULT_HISTORY_SIZE,
            color: true,
            banner: true,
        }
    }
}

impl Config {
    pub fn new(paths: &ConfigPaths) -> Self {
        Self {
            history_file: paths.history_path.clone(),
            ..Self::default()
        }
    }

    pub fn load(paths: &ConfigPaths) -> Result<Self, ConfigError> {
        let mut config = Self::new(paths);
        ConfigLoader::new(paths).load_configs(&mut config)?;
        Ok(config)
    }

    pub fn apply_flags(&mut self, flags: &Flags) {
        if let Some(dir) = flags.get_value("dir") {
            self.start_dir = Some(PathBuf::from(dir));
        }
        if flags.is_set("no-color") {
            self.color = false;
        }
        if flags.is_set("quiet") {
            self.banner = false;
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Home directory not found")]
    HomeDirNotFound,
    #[error("Config file not found: {}", .0.display())]
    ConfigFileNotFound(PathBuf),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("line {line}: expected 'key = value'")]
    Syntax { line: usize },
    #[error("line {line}: unknown setting '{key}'")]
    UnknownKey { line: usize, key: String },
    #[error("line {line}: invalid value '{value}' for '{key}'")]
    InvalidValue {
        line: usize,
        key: String,
        value: String,
    },
    #[error(transparent)]
    Path(#[from] PathError),
}
