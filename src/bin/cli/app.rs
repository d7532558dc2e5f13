use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use recall_lib::config::RecallConfig;
use recall_lib::flashcards::{FileStore, FlashcardStorage};

/// Shared application state for CLI commands
pub struct App {
    pub config: RecallConfig,
    pub storage: FlashcardStorage<FileStore>,
}

impl App {
    /// Load config and open the data directory
    pub fn new(config_path: Option<&Path>, data_dir: Option<PathBuf>) -> Result<Self> {
        let config_path = match config_path {
            Some(path) => path.to_path_buf(),
            None => RecallConfig::default_path().context("Failed to locate config directory")?,
        };
        let mut config = RecallConfig::load(&config_path)
            .with_context(|| format!("Failed to load config from {}", config_path.display()))?;

        if data_dir.is_some() {
            config.data_dir = data_dir;
        }

        let data_dir = config
            .resolve_data_dir()
            .context("Failed to get data directory")?;
        log::debug!("Using data directory {}", data_dir.display());

        let store = FileStore::new(data_dir);
        store.init().context("Failed to initialize data directory")?;

        let storage = FlashcardStorage::new(store, config.day_boundary);

        Ok(Self { config, storage })
    }
}
