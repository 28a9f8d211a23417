// Bot tracking service - owns the persisted config document and decides
// which presence updates become status announcements.
//
// NO Discord dependencies here. Member lookups are passed in as closures so
// the Discord layer can answer them from the serenity cache.

use super::bot_tracking_models::{BotConfig, PresenceStatus, StatusNotification, TrackedBot};
use super::config_store::ConfigStore;
use dashmap::DashMap;
use thiserror::Error;
use tokio::sync::RwLock;

// ============================================================================
// ERRORS
// ============================================================================

#[derive(Debug, Error)]
pub enum TrackingError {
    #[error("Set a status channel first using `/setstatuschannel`.")]
    StatusChannelNotSet,

    #[error("Invalid bot ID.")]
    InvalidBotId,

    #[error("Bot not found or ID is not a bot.")]
    NotABot,

    #[error("This bot is not currently tracked.")]
    NotTracked,

    #[error("Bot config file error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Bot config is not valid JSON: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl TrackingError {
    /// Storage failures, as opposed to problems with the user's input.
    pub fn is_storage(&self) -> bool {
        matches!(self, TrackingError::Io(_) | TrackingError::Serialization(_))
    }
}

// ============================================================================
// CORE SERVICE
// ============================================================================

pub struct BotTrackingService<S: ConfigStore> {
    store: S,
    config: RwLock<BotConfig>,
    /// Last status reported for every bot account we have seen, tracked or
    /// not, so that tracking a bot later starts from its known status.
    last_seen: DashMap<u64, PresenceStatus>,
}

impl<S: ConfigStore> BotTrackingService<S> {
    /// Create the service and eagerly load the persisted document.
    ///
    /// A corrupt or unreadable file is logged and replaced by the defaults
    /// instead of stopping the bot.
    pub async fn new(store: S) -> Self {
        let config = match store.load().await {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("Failed to load bot config, starting from defaults: {}", e);
                BotConfig::default()
            }
        };

        Self {
            store,
            config: RwLock::new(config),
            last_seen: DashMap::new(),
        }
    }

    pub async fn status_channel(&self) -> Option<u64> {
        self.config.read().await.status_channel_id
    }

    pub async fn set_status_channel(&self, channel_id: u64) -> Result<(), TrackingError> {
        let mut config = self.config.write().await;
        let mut updated = config.clone();
        updated.status_channel_id = Some(channel_id);

        self.store.save(&updated).await?;
        *config = updated;
        Ok(())
    }

    /// Tracked bot ids in their stored (string) form, sorted.
    pub async fn tracked_bots(&self) -> Vec<String> {
        self.config.read().await.tracked_bots.keys().cloned().collect()
    }

    pub async fn is_tracked(&self, bot_id: u64) -> bool {
        self.config
            .read()
            .await
            .tracked_bots
            .contains_key(&bot_id.to_string())
    }

    /// Start tracking a bot.
    ///
    /// `resolve` looks the parsed id up among the guild's members. Checks run
    /// in a fixed order: status channel, id syntax, then membership. Tracking
    /// an already tracked bot simply rewrites its flag. A current status
    /// supplied by `resolve` becomes the baseline for later presence updates.
    pub async fn track_bot<F>(&self, raw_id: &str, resolve: F) -> Result<TrackedBot, TrackingError>
    where
        F: FnOnce(u64) -> Option<TrackedBot>,
    {
        let mut config = self.config.write().await;

        if config.status_channel_id.is_none() {
            return Err(TrackingError::StatusChannelNotSet);
        }

        let bot_id = parse_bot_id(raw_id)?;

        let bot = match resolve(bot_id) {
            Some(bot) if bot.is_bot => bot,
            _ => return Err(TrackingError::NotABot),
        };

        let mut updated = config.clone();
        updated.tracked_bots.insert(bot_id.to_string(), true);

        self.store.save(&updated).await?;
        *config = updated;

        if let Some(status) = bot.status {
            self.last_seen.insert(bot_id, status);
        }

        tracing::info!(bot_id, name = %bot.name, "Now tracking bot");
        Ok(bot)
    }

    /// Stop tracking a bot. Untracking an unknown id leaves the file alone.
    pub async fn untrack_bot(&self, raw_id: &str) -> Result<String, TrackingError> {
        let key = raw_id.trim().to_string();
        let mut config = self.config.write().await;

        if !config.tracked_bots.contains_key(&key) {
            return Err(TrackingError::NotTracked);
        }

        let mut updated = config.clone();
        updated.tracked_bots.remove(&key);

        self.store.save(&updated).await?;
        *config = updated;

        tracing::info!(bot_id = %key, "Stopped tracking bot");
        Ok(key)
    }

    /// Drop tracked entries that no longer belong to a guild member.
    ///
    /// Runs once at startup and always saves, mirroring the document back to
    /// disk even when nothing was removed. Returns the removed ids.
    pub async fn reconcile<F>(&self, is_member: F) -> Result<Vec<String>, TrackingError>
    where
        F: Fn(u64) -> bool,
    {
        let mut config = self.config.write().await;
        let mut updated = config.clone();

        let removed: Vec<String> = updated
            .tracked_bots
            .keys()
            .filter(|key| !key.parse::<u64>().map(&is_member).unwrap_or(false))
            .cloned()
            .collect();

        for key in &removed {
            updated.tracked_bots.remove(key);
        }

        self.store.save(&updated).await?;
        *config = updated;

        Ok(removed)
    }

    /// Remember a status without announcing it (initial guild presences).
    pub fn seed_presence(&self, bot_id: u64, status: PresenceStatus) {
        self.last_seen.insert(bot_id, status);
    }

    /// Handle one presence update.
    ///
    /// Returns at most one notification. The status is always recorded;
    /// updates for untracked accounts or with an unchanged status produce
    /// nothing. Without a status channel the notification is dropped.
    pub async fn observe_presence(
        &self,
        bot_id: u64,
        status: PresenceStatus,
    ) -> Option<StatusNotification> {
        let previous = self.last_seen.insert(bot_id, status);

        if !self.is_tracked(bot_id).await || previous == Some(status) {
            return None;
        }

        Some(StatusNotification {
            channel_id: self.status_channel().await?,
            bot_id,
            status: status.coarse(),
        })
    }
}

fn parse_bot_id(raw_id: &str) -> Result<u64, TrackingError> {
    raw_id
        .trim()
        .parse::<u64>()
        .map_err(|_| TrackingError::InvalidBotId)
}

// ============================================================================
// TESTS
// ============================================================================
