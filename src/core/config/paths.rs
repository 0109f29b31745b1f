use super::ConfigError;
use std::path::PathBuf;

const RC_FILE: &str = ".dirshrc";
const HISTORY_FILE: &str = ".dirsh_history";

#[derive(Debug, Clone)]
pub struct ConfigPaths {
    pub rc_path: Option<PathBuf>,
    /// Set when the rc file was named with `--config`; it must then exist.
    pub explicit: bool,
    pub history_path: Option<PathBuf>,
    pub home: Option<PathBuf>,
}

impl ConfigPaths {
    pub fn new(explicit_rc: Option<&str>) -> Result<Self, ConfigError> {
        Self::with_home(dirs::home_dir(), explicit_rc)
    }

    pub fn with_home(home: Option<PathBuf>, explicit_rc: Option<&str>) -> Result<Self, ConfigError> {
        let rc_path = match explicit_rc {
            Some(path) => Some(PathBuf::from(path)),
            None => home.as_ref().map(|home| home.join(RC_FILE)),
        };

        if rc_path.is_none() && home.is_none() {
            return Err(ConfigError::HomeDirNotFound);
        }

        Ok(ConfigPaths {
            rc_path,
            explicit: explicit_rc.is_some(),
            history_path: home.as_ref().map(|home| home.join(HISTORY_FILE)),
            home,
        })
    }
}
