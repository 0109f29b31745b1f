use thiserror::Error;

use crate::core::config::ConfigError;
use crate::core::state::StateError;

#[derive(Debug, Error)]
pub enum ShellError {
    #[error("Readline error: {0}")]
    Readline(#[from] rustyline::error::ReadlineError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Home directory not found")]
    HomeDirNotFound,
    #[error("Invalid start directory: {0}")]
    StartDirectory(#[from] StateError),
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
    #[error("Flag error: {0}")]
    Flag(String),
    #[error("Ctrl-C error: {0}")]
    CtrlC(#[from] ctrlc::Error),
    #[error("Logging error: {0}")]
    Logging(String),
}
