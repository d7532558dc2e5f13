//! User configuration
//!
//! Stored as TOML in `{config_dir}/recall/config.toml`:
//!
//! ```toml
//! data_dir = "/home/me/.local/share/recall"
//! day_boundary = "local"
//! default_minutes = 1
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::flashcards::storage::FlashcardStorageError;
use crate::flashcards::DayBoundary;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Config directory not found")]
    ConfigDirNotFound,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecallConfig {
    /// Where collections are stored (defaults to the platform data dir)
    pub data_dir: Option<PathBuf>,
    /// Timezone policy for deciding which day a review belongs to
    pub day_boundary: DayBoundary,
    /// Minutes credited per review when none are given
    pub default_minutes: u32,
}

impl Default for RecallConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            day_boundary: DayBoundary::Local,
            default_minutes: 1,
        }
    }
}

impl RecallConfig {
    /// Default config file location
    pub fn default_path() -> Result<PathBuf, ConfigError> {
        dirs::config_dir()
            .map(|p| p.join("recall").join("config.toml"))
            .ok_or(ConfigError::ConfigDirNotFound)
    }

    /// Load configuration, or defaults if the file does not exist
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            log::info!("Config file not found, using defaults: {:?}", path);
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        let config: RecallConfig = toml::from_str(&content)?;
        log::debug!("Loaded configuration from {:?}", path);
        Ok(config)
    }

    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, content)?;
        log::info!("Saved configuration to {:?}", path);
        Ok(())
    }

    /// Configured data directory, falling back to the platform default
    pub fn resolve_data_dir(&self) -> Result<PathBuf, FlashcardStorageError> {
        match &self.data_dir {
            Some(dir) => Ok(dir.clone()),
            None => dirs::data_local_dir()
                .map(|p| p.join("recall"))
                .ok_or(FlashcardStorageError::DataDirNotFound),
        }
    }
}
