use serde::{Deserialize, Serialize};
use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;

const CONFIG_ENV: &str = "GATOR_CONFIG";
const CONFIG_FILE_NAME: &str = ".gatorconfig.toml";

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    #[serde(default = "default_db_url")]
    pub db_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_user_name: Option<String>,
    /// Overrides the feed fetched by `agg`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agg_feed_url: Option<String>,
    #[serde(skip)]
    path: Option<PathBuf>,
}

fn default_db_url() -> String {
    "sqlite:gator.db?mode=rwc".to_string()
}

impl Config {
    /// Reads the settings file from `$GATOR_CONFIG`, falling back to `~/.gatorconfig.toml`.
    pub fn read() -> Result<Self, ConfigError> {
        Self::load(Self::default_path()?)
    }

    pub fn default_path() -> Result<PathBuf, ConfigError> {
        resolve_path(std::env::var_os(CONFIG_ENV), dirs::home_dir())
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let mut config = Self::from_str(&content)?;
        config.path = Some(path.to_path_buf());
        Ok(config)
    }

    /// Parse config from a TOML string. The result has no backing file.
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(content)?;
        Ok(config)
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn save(&self) -> Result<(), ConfigError> {
        let path = self.path.as_ref().ok_or(ConfigError::NoPath)?;
        let content = toml::to_string(self)?;
        std::fs::write(path, content).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })
    }

    /// Records `name` as the current user and writes the file. On failure the
    /// in-memory value is left as it was.
    pub fn set_current_user(&mut self, name: &str) -> Result<(), ConfigError> {
        let previous = self.current_user_name.replace(name.to_string());
        if let Err(e) = self.save() {
            self.current_user_name = previous;
            return Err(e);
        }
        Ok(())
    }
}

fn resolve_path(
    env_path: Option<OsString>,
    home: Option<PathBuf>,
) -> Result<PathBuf, ConfigError> {
    match env_path {
        Some(path) => Ok(PathBuf::from(path)),
        None => Ok(home.ok_or(ConfigError::NoHome)?.join(CONFIG_FILE_NAME)),
    }
}
