// Turns gateway presence updates into bot status announcements.
//
// The core service decides whether an update is worth announcing. This file
// only converts serenity types in and posts the resulting embed.

use crate::core::bot_tracking::{PresenceStatus, StatusNotification};
use crate::discord::Data;
use anyhow::Result;
use poise::serenity_prelude::{self as serenity, Context, Mentionable};

pub fn presence_status(status: serenity::OnlineStatus) -> PresenceStatus {
    match status {
        serenity::OnlineStatus::Online => PresenceStatus::Online,
        serenity::OnlineStatus::Idle => PresenceStatus::Idle,
        serenity::OnlineStatus::DoNotDisturb => PresenceStatus::DoNotDisturb,
        serenity::OnlineStatus::Invisible => PresenceStatus::Invisible,
        serenity::OnlineStatus::Offline => PresenceStatus::Offline,
        _ => PresenceStatus::Online,
    }
}

pub async fn handle_presence_update(
    ctx: &Context,
    data: &Data,
    presence: &serenity::Presence,
) -> Result<()> {
    // Partial presence payloads may omit the flag; only skip known humans.
    if presence.user.bot == Some(false) {
        return Ok(());
    }

    let bot_id = presence.user.id.get();
    let Some(notification) = data
        .tracking
        .observe_presence(bot_id, presence_status(presence.status))
        .await
    else {
        return Ok(());
    };

    tracing::info!(
        bot_id,
        channel_id = notification.channel_id,
        status = ?notification.status,
        "Tracked bot changed status"
    );
    send_status_update(&ctx.http, &notification).await
}

/// Record the presences that arrive with the guild payload so the first real
/// update is compared against them instead of being treated as new. Bots
/// that are not tracked yet are recorded too, for a later `/trackbot`.
pub fn seed_guild_presences(data: &Data, guild: &serenity::Guild) {
    for (user_id, presence) in &guild.presences {
        if presence.user.bot == Some(false) {
            continue;
        }
        data.tracking.seed_presence(user_id.get(), presence_status(presence.status));
    }
}

async fn send_status_update(
    http: &serenity::Http,
    notification: &StatusNotification,
) -> Result<()> {
    let embed = serenity::CreateEmbed::new()
        .title("🤖 Bot Status Update")
        .color(notification.status.color())
        .field(
            "Bot Name",
            serenity::UserId::new(notification.bot_id).mention().to_string(),
            true,
        )
        .field("New Status", notification.status.label(), true)
        .timestamp(serenity::Timestamp::now());

    serenity::ChannelId::new(notification.channel_id)
        .send_message(http, serenity::CreateMessage::new().embed(embed))
        .await?;
    Ok(())
}
