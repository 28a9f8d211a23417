use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;

use crate::core::bot_tracking::{BotConfig, ConfigStore, TrackingError};

/// Flat JSON file holding the status channel and tracked bots.
///
/// Every save rewrites the whole file. A missing file is a first run and
/// loads as the defaults.
pub struct JsonConfigStore {
    path: PathBuf,
}

impl JsonConfigStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

#[async_trait]
impl ConfigStore for JsonConfigStore {
    async fn load(&self) -> Result<BotConfig, TrackingError> {
        if !self.path.exists() {
            tracing::info!(path = %self.path.display(), "No bot config yet, using defaults");
            return Ok(BotConfig::default());
        }

        let text = fs::read_to_string(&self.path).await?;
        let config: BotConfig = serde_json::from_str(&text)?;
        Ok(config)
    }

    async fn save(&self, config: &BotConfig) -> Result<(), TrackingError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).await?;
        }

        let text = serde_json::to_string_pretty(config)?;
        fs::write(&self.path, text).await?;
        Ok(())
    }
}
