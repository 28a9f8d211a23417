// Slash commands for bot status tracking.
//
// All replies are ephemeral: only the invoker sees them.

use crate::core::bot_tracking::{PresenceStatus, TrackedBot, TrackingError};
use crate::discord::events::presence_events::presence_status;
use crate::discord::{Context, Error};
use poise::serenity_prelude::{self as serenity, Mentionable};

const COLOR_OK: u32 = 0x00FFCC;
const COLOR_WARN: u32 = 0xFFCC00;
const COLOR_ERROR: u32 = 0xFF0000;

async fn reply_private(
    ctx: Context<'_>,
    title: &str,
    description: impl Into<String>,
    color: u32,
) -> Result<(), Error> {
    let embed = serenity::CreateEmbed::new()
        .title(title)
        .description(description)
        .color(color);

    ctx.send(poise::CreateReply::default().embed(embed).ephemeral(true))
        .await?;
    Ok(())
}

/// Look a user id up in the cached guild member list, with its current presence.
fn resolve_member(ctx: Context<'_>, id: u64) -> Option<TrackedBot> {
    if id == 0 {
        return None;
    }

    let user_id = serenity::UserId::new(id);
    let guild = ctx.guild()?;
    let member = guild.members.get(&user_id)?;

    // Offline members have no entry in the presence cache.
    let status = guild
        .presences
        .get(&user_id)
        .map(|presence| presence_status(presence.status))
        .unwrap_or(PresenceStatus::Offline);

    Some(TrackedBot {
        id,
        name: member.user.name.clone(),
        is_bot: member.user.bot,
        status: Some(status),
    })
}

/// Show a list of currently tracked bots.
#[poise::command(slash_command, guild_only, rename = "bot-list")]
pub async fn bot_list(ctx: Context<'_>) -> Result<(), Error> {
    let tracked = ctx.data().tracking.tracked_bots().await;

    if tracked.is_empty() {
        return reply_private(
            ctx,
            "📜 Tracked Bots",
            "No bots are currently being tracked.",
            COLOR_WARN,
        )
        .await;
    }

    let lines: Vec<String> = tracked
        .iter()
        .map(|id| {
            let name = id
                .parse::<u64>()
                .ok()
                .and_then(|id| resolve_member(ctx, id))
                .map(|bot| bot.name)
                .unwrap_or_else(|| id.clone());
            format!("🤖 {} (tracking bots)", name)
        })
        .collect();

    reply_private(ctx, "📜 Tracked Bots", lines.join("\n"), COLOR_OK).await
}

/// Set the channel for bot status updates.
#[poise::command(slash_command, guild_only)]
pub async fn setstatuschannel(
    ctx: Context<'_>,
    #[description = "Channel to post bot status updates in"]
    #[channel_types("Text")]
    channel: serenity::GuildChannel,
) -> Result<(), Error> {
    let tracking = &ctx.data().tracking;
    let previous = tracking.status_channel().await;
    tracking.set_status_channel(channel.id.get()).await?;
    tracing::info!(?previous, channel_id = channel.id.get(), "Status channel changed");

    reply_private(
        ctx,
        "✅ Status Channel Set",
        format!("Updates will be sent in {}.", channel.mention()),
        COLOR_OK,
    )
    .await
}

/// Start tracking a bot's status.
#[poise::command(slash_command, guild_only)]
pub async fn trackbot(
    ctx: Context<'_>,
    #[description = "ID of the bot account to track"] bot_id: String,
) -> Result<(), Error> {
    let result = ctx
        .data()
        .tracking
        .track_bot(&bot_id, |id| resolve_member(ctx, id))
        .await;

    match result {
        Ok(bot) => {
            reply_private(
                ctx,
                "✅ Bot Tracked",
                format!("Now tracking **{}**.", bot.name),
                COLOR_OK,
            )
            .await
        }
        Err(e @ TrackingError::StatusChannelNotSet) => {
            reply_private(ctx, "⚠️ Warning", e.to_string(), COLOR_WARN).await
        }
        Err(e) if e.is_storage() => Err(e.into()),
        Err(e) => reply_private(ctx, "❌ Error", e.to_string(), COLOR_ERROR).await,
    }
}

/// Stop tracking a bot's status.
#[poise::command(slash_command, guild_only)]
pub async fn untrackbot(
    ctx: Context<'_>,
    #[description = "ID of the bot account to stop tracking"] bot_id: String,
) -> Result<(), Error> {
    match ctx.data().tracking.untrack_bot(&bot_id).await {
        Ok(id) => {
            reply_private(
                ctx,
                "✅ Bot Untracked",
                format!("Bot **{}** removed from tracking.", id),
                COLOR_WARN,
            )
            .await
        }
        Err(e) if e.is_storage() => Err(e.into()),
        Err(e) => reply_private(ctx, "❌ Error", e.to_string(), COLOR_ERROR).await,
    }
}
