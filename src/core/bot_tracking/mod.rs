// Bot tracking module - persisted config plus presence transitions for
// the bot accounts we announce in the status channel.

pub mod bot_tracking_models;
pub mod bot_tracking_service;
pub mod config_store;

pub use bot_tracking_models::{BotConfig, PresenceStatus, StatusKind, StatusNotification, TrackedBot};
pub use bot_tracking_service::{BotTrackingService, TrackingError};
pub use config_store::ConfigStore;
