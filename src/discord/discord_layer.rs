// Discord layer - commands and event handlers.
//
// Everything here translates between serenity/poise types and the core
// services. No decisions about tracking, warnings or welcome text live here.

#[path = "commands/command_catalog.rs"]
pub mod commands;

#[path = "events/event_catalog.rs"]
pub mod events;

use crate::core::bot_tracking::BotTrackingService;
use crate::core::moderation::{MuteRole, MuteScheduler, WarningLedger};
use crate::core::welcome::WelcomeService;
use crate::infra::bot_tracking::JsonConfigStore;
use std::sync::Arc;

/// Application state handed to every command and event handler.
///
/// Built once in `main` and owned for the lifetime of the process.
pub struct Data {
    pub tracking: Arc<BotTrackingService<JsonConfigStore>>,
    pub warnings: Arc<WarningLedger>,
    pub mutes: Arc<MuteScheduler>,
    pub mute_role: Arc<MuteRole>,
    pub welcome: Arc<WelcomeService>,
}

pub type Error = Box<dyn std::error::Error + Send + Sync>;
pub type Context<'a> = poise::Context<'a, Data, Error>;
