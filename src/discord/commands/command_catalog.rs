// Discord commands module.
// Each feature gets its own command file.

pub mod bot_tracking;

pub mod help;

pub mod moderation;

pub mod mute;

pub mod warnings;

pub mod welcome;

use crate::discord::{Data, Error};

/// Every command the framework should register, slash and prefix alike.
pub fn all() -> Vec<poise::Command<Data, Error>> {
    vec![
        // Slash commands
        bot_tracking::bot_list(),
        bot_tracking::setstatuschannel(),
        bot_tracking::trackbot(),
        bot_tracking::untrackbot(),
        // Prefix commands
        welcome::setup_welcome(),
        moderation::ban(),
        moderation::kick(),
        moderation::lock(),
        moderation::unlock(),
        moderation::slowmode(),
        moderation::nick(),
        moderation::purge(),
        mute::mute(),
        mute::unmute(),
        warnings::warn(),
        warnings::unwarn(),
        warnings::clearwarns(),
        warnings::warnings(),
        help::help(),
    ]
}
