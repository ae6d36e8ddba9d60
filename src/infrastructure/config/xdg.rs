//! XDG config store adapter
//!
//! Settings live in `$XDG_CONFIG_HOME/voice-notes/config.toml` as flat TOML.

use std::io;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;

use crate::application::ports::ConfigStore;
use crate::domain::config::AppConfig;
use crate::domain::error::ConfigError;

const APP_DIR: &str = "voice-notes";
const FILE_NAME: &str = "config.toml";

const HEADER: &str = "\
# voice-notes configuration
# keys: clips_dir, quality (speech | high), status_interval_ms,
#       silent_mode_playback, log_level
# command-line flags override these values

";

/// Config store rooted at the platform config directory
pub struct XdgConfigStore {
    path: PathBuf,
}

impl XdgConfigStore {
    pub fn new() -> Self {
        Self::with_path(Self::default_path())
    }

    /// Use an explicit config file, e.g. in tests
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn default_path() -> PathBuf {
        dirs::config_dir()
            .or_else(|| dirs::home_dir().map(|home| home.join(".config")))
            .unwrap_or_else(|| PathBuf::from("."))
            .join(APP_DIR)
            .join(FILE_NAME)
    }

    fn parse_toml(content: &str) -> Result<AppConfig, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))
    }

    fn to_toml(config: &AppConfig) -> Result<String, ConfigError> {
        toml::to_string_pretty(config).map_err(|e| ConfigError::WriteError(e.to_string()))
    }

    fn write_error(path: &Path, e: io::Error) -> ConfigError {
        ConfigError::WriteError(format!("{}: {}", path.display(), e))
    }

    /// Replace the config file through a sibling temp file
    async fn write_file(&self, content: String) -> Result<(), ConfigError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| Self::write_error(parent, e))?;
        }

        let staging = self.path.with_extension("toml.tmp");
        fs::write(&staging, content)
            .await
            .map_err(|e| Self::write_error(&staging, e))?;
        fs::rename(&staging, &self.path)
            .await
            .map_err(|e| Self::write_error(&self.path, e))
    }
}

impl Default for XdgConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ConfigStore for XdgConfigStore {
    async fn load(&self) -> Result<AppConfig, ConfigError> {
        match fs::read_to_string(&self.path).await {
            Ok(content) => Self::parse_toml(&content),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(AppConfig::empty()),
            Err(e) => Err(ConfigError::ReadError(format!(
                "{}: {}",
                self.path.display(),
                e
            ))),
        }
    }

    async fn save(&self, config: &AppConfig) -> Result<(), ConfigError> {
        self.write_file(Self::to_toml(config)?).await
    }

    fn path(&self) -> PathBuf {
        self.path.clone()
    }

    fn exists(&self) -> bool {
        self.path.is_file()
    }

    /// Write the defaults under a commented header
    async fn init(&self) -> Result<(), ConfigError> {
        if self.exists() {
            return Err(ConfigError::AlreadyExists(
                self.path.display().to_string(),
            ));
        }
        let body = Self::to_toml(&AppConfig::defaults())?;
        self.write_file(format!("{}{}", HEADER, body)).await
    }
}
