use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The persisted configuration document.
///
/// Serialized as `{"status_channel_id": 42, "tracked_bots": {"111": true}}`.
/// Bot ids are stored as strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct BotConfig {
    #[serde(default)]
    pub status_channel_id: Option<u64>,
    #[serde(default)]
    pub tracked_bots: BTreeMap<String, bool>,
}

/// Platform presence as reported by the gateway, without any Discord types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PresenceStatus {
    Online,
    Idle,
    DoNotDisturb,
    Invisible,
    Offline,
}

impl PresenceStatus {
    /// Collapse to the two states we announce.
    /// Invisible accounts are reported to everybody else as offline.
    pub fn coarse(self) -> StatusKind {
        match self {
            PresenceStatus::Offline | PresenceStatus::Invisible => StatusKind::Offline,
            _ => StatusKind::Online,
        }
    }
}

/// Coarse state shown in status announcements.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Online,
    Offline,
}

impl StatusKind {
    pub fn color(self) -> u32 {
        match self {
            StatusKind::Online => 0x00FF00,
            StatusKind::Offline => 0xFF0000,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            StatusKind::Online => "✅ Online",
            StatusKind::Offline => "❌ Offline",
        }
    }
}

/// Emitted by the service when a tracked bot changes status.
/// The Discord layer turns this into an embed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusNotification {
    pub channel_id: u64,
    pub bot_id: u64,
    pub status: StatusKind,
}

/// What the Discord layer knows about a candidate bot account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackedBot {
    pub id: u64,
    pub name: String,
    pub is_bot: bool,
    /// Current presence, when the platform knows it.
    pub status: Option<PresenceStatus>,
}
