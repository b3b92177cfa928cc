// Configuration loading for the connection target

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use std::fs;
use std::path::PathBuf;

use crate::models::BookstoreTarget;

const APP_NAME: &str = "bookstore-queries";

/// Reads optional configuration files from the platform config directory
#[derive(Clone, Debug)]
pub struct ConfigManager {
    config_dir: PathBuf,
}

impl ConfigManager {
    const TARGET_FILE: &'static str = "target.json";

    /// Use the platform-specific config directory
    pub fn new() -> Result<Self> {
        let config_dir = dirs::config_dir()
            .map(|p| p.join(APP_NAME))
            .context("Could not determine config directory")?;
        Ok(Self { config_dir })
    }

    /// Use an explicit directory instead of the platform default
    pub fn with_dir(config_dir: impl Into<PathBuf>) -> Self {
        Self { config_dir: config_dir.into() }
    }

    fn file_path(&self, filename: &str) -> PathBuf {
        self.config_dir.join(filename)
    }

    /// Load data from a JSON file
    fn load_json<T: DeserializeOwned>(&self, filename: &str) -> Result<Option<T>> {
        let path = self.file_path(filename);

        if !path.exists() {
            return Ok(None);
        }

        let data =
            fs::read_to_string(&path).with_context(|| format!("Failed to read {}", filename))?;

        let value: T = serde_json::from_str(&data)
            .with_context(|| format!("Failed to deserialize {}", filename))?;

        Ok(Some(value))
    }

    /// Load the connection target, falling back to the built-in defaults
    pub fn load_target(&self) -> Result<BookstoreTarget> {
        match self.load_json(Self::TARGET_FILE)? {
            Some(target) => {
                log::debug!("Loaded target from {}", self.file_path(Self::TARGET_FILE).display());
                Ok(target)
            }
            None => Ok(BookstoreTarget::default()),
        }
    }
}
