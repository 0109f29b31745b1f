use std::{fs, path::Path};

use tracing::debug;

use super::{Config, ConfigError, ConfigPaths};
use crate::path::PathResolver;

pub struct ConfigLoader<'a> {
    paths: &'a ConfigPaths,
    resolver: PathResolver,
}

impl<'a> ConfigLoader<'a> {
    pub fn new(paths: &'a ConfigPaths) -> Self {
        let resolver = match &paths.home {
            Some(home) => PathResolver::with_home(home.clone()),
            None => PathResolver::default(),
        };
        Self { paths, resolver }
    }

    pub fn load_configs(&self, config: &mut Config) -> Result<(), ConfigError> {
        let Some(rc_path) = &self.paths.rc_path else {
            return Ok(());
        };

        if rc_path.exists() {
            self.source(rc_path, config)
        } else if self.paths.explicit {
            Err(ConfigError::ConfigFileNotFound(rc_path.clone()))
        } else {
            Ok(())
        }
    }

    fn source(&self, path: &Path, config: &mut Config) -> Result<(), ConfigError> {
        let content = fs::read_to_string(path)?;
        for (index, line) in content.lines().enumerate() {
            self.process_line(index + 1, line, config)?;
        }
        debug!(path = %path.display(), "loaded config");
        Ok(())
    }

    fn process_line(&self, line_no: usize, line: &str, config: &mut Config) -> Result<(), ConfigError> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return Ok(());
        }

        let (key, value) = line
            .split_once('=')
            .ok_or(ConfigError::Syntax { line: line_no })?;
        let key = key.trim();
        let value = unquote(value.trim());

        let invalid = || ConfigError::InvalidValue {
            line: line_no,
            key: key.to_string(),
            value: value.to_string(),
        };

        match key {
            "start_dir" => config.start_dir = Some(self.resolver.expand(value)?),
            "history_file" => {
                config.history_file = match value {
                    "" => None,
                    path => Some(self.resolver.expand(path)?),
                }
            }
            "history_size" => config.history_size = value.parse().map_err(|_| invalid())?,
            "color" => config.color = parse_bool(value).ok_or_else(invalid)?,
            "banner" => config.banner = parse_bool(value).ok_or_else(invalid)?,
            _ => {
                return Err(ConfigError::UnknownKey {
                    line: line_no,
                    key: key.to_string(),
                })
            }
        }
        Ok(())
    }
}

fn unquote(value: &str) -> &str {
    if value.len() >= 2
        && ((value.starts_with('"') && value.ends_with('"'))
            || (value.starts_with('\'') && value.ends_with('\'')))
    {
        &value[1..value.len() - 1]
    } else {
        value
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value {
        "true" | "yes" | "on" => Some(true),
        "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
