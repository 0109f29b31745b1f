use tracing_subscriber::EnvFilter;

use crate::error::ShellError;

/// Environment variable holding a tracing filter that overrides the flags.
pub const LOG_ENV: &str = "DIRSH_LOG";

pub fn init(debug: bool) -> Result<(), ShellError> {
    let default_level = if debug { "dirsh=debug" } else { "warn" };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|e| ShellError::Logging(e.to_string()))
}
