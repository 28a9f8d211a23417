use super::bot_tracking_models::BotConfig;
use super::bot_tracking_service::TrackingError;
use async_trait::async_trait;

/// Storage port for the bot tracking document.
///
/// `load` returns the defaults when nothing has been saved yet. `save` always
/// writes the whole document; there are no partial updates.
#[async_trait]
pub trait ConfigStore: Send + Sync {
    async fn load(&self) -> Result<BotConfig, TrackingError>;
    async fn save(&self, config: &BotConfig) -> Result<(), TrackingError>;
}
