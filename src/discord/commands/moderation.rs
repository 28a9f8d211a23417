// Administrator-only prefix commands that act directly on the guild.
//
// **Notice the pattern:** every command performs one platform call and then
// answers in the channel it was used in. Permission failures never reach the
// function body; poise reports them to the error handler instead.

use crate::core::moderation::{plan_purge, DEFAULT_REASON};
use crate::discord::{Context, Error};
use chrono::{DateTime, Utc};
use poise::serenity_prelude::{self as serenity, Mentionable};
use std::time::Duration;

/// Discord refuses to fetch or bulk delete more than this many messages at once.
const MAX_PURGE: u16 = 100;

/// How long the purge confirmation stays visible.
const PURGE_NOTICE_SECS: u64 = 3;

/// Ban a user.
#[poise::command(prefix_command, guild_only, required_permissions = "ADMINISTRATOR")]
pub async fn ban(
    ctx: Context<'_>,
    #[description = "Member to ban"] member: serenity::Member,
    #[rest]
    #[description = "Reason for the ban"]
    reason: Option<String>,
) -> Result<(), Error> {
    let reason = reason.unwrap_or_else(|| DEFAULT_REASON.to_string());

    member.ban_with_reason(ctx, 0, &reason).await?;
    tracing::info!(
        user_id = member.user.id.get(),
        moderator = ctx.author().id.get(),
        "Member banned"
    );

    ctx.say(format!(
        "✅ {} has been **banned**. Reason: {}",
        member.mention(),
        reason
    ))
    .await?;
    Ok(())
}

/// Kick a user.
#[poise::command(prefix_command, guild_only, required_permissions = "ADMINISTRATOR")]
pub async fn kick(
    ctx: Context<'_>,
    #[description = "Member to kick"] member: serenity::Member,
    #[rest]
    #[description = "Reason for the kick"]
    reason: Option<String>,
) -> Result<(), Error> {
    let reason = reason.unwrap_or_else(|| DEFAULT_REASON.to_string());

    member.kick_with_reason(ctx, &reason).await?;
    tracing::info!(
        user_id = member.user.id.get(),
        moderator = ctx.author().id.get(),
        "Member kicked"
    );

    ctx.say(format!(
        "✅ {} has been **kicked**. Reason: {}",
        member.mention(),
        reason
    ))
    .await?;
    Ok(())
}

/// Lock the current channel.
#[poise::command(prefix_command, guild_only, required_permissions = "ADMINISTRATOR")]
pub async fn lock(ctx: Context<'_>) -> Result<(), Error> {
    set_everyone_send_messages(ctx, false).await?;
    ctx.say("🔒 This channel has been **locked**.").await?;
    Ok(())
}

/// Unlock the current channel.
#[poise::command(prefix_command, guild_only, required_permissions = "ADMINISTRATOR")]
pub async fn unlock(ctx: Context<'_>) -> Result<(), Error> {
    set_everyone_send_messages(ctx, true).await?;
    ctx.say("🔓 This channel has been **unlocked**.").await?;
    Ok(())
}

/// Flip only the SEND_MESSAGES bit of the @everyone overwrite in this channel,
/// keeping whatever else the overwrite already allows or denies.
async fn set_everyone_send_messages(ctx: Context<'_>, allowed: bool) -> Result<(), Error> {
    let guild_id = ctx.guild_id().ok_or("Must be used in a server")?;
    let everyone = serenity::PermissionOverwriteType::Role(guild_id.everyone_role());

    let existing = ctx
        .guild_channel()
        .await
        .and_then(|channel| {
            channel
                .permission_overwrites
                .iter()
                .find(|overwrite| overwrite.kind == everyone)
                .map(|overwrite| (overwrite.allow, overwrite.deny))
        })
        .unwrap_or((serenity::Permissions::empty(), serenity::Permissions::empty()));

    let (mut allow, mut deny) = existing;
    if allowed {
        allow.insert(serenity::Permissions::SEND_MESSAGES);
        deny.remove(serenity::Permissions::SEND_MESSAGES);
    } else {
        allow.remove(serenity::Permissions::SEND_MESSAGES);
        deny.insert(serenity::Permissions::SEND_MESSAGES);
    }

    ctx.channel_id()
        .create_permission(
            ctx.http(),
            serenity::PermissionOverwrite {
                allow,
                deny,
                kind: everyone,
            },
        )
        .await?;
    Ok(())
}

/// Set a slowmode delay.
#[poise::command(prefix_command, guild_only, required_permissions = "ADMINISTRATOR")]
pub async fn slowmode(
    ctx: Context<'_>,
    #[description = "Seconds between messages (0 disables slowmode)"] seconds: u16,
) -> Result<(), Error> {
    ctx.channel_id()
        .edit(ctx, serenity::EditChannel::new().rate_limit_per_user(seconds))
        .await?;

    ctx.say(format!("🐌 Slowmode set to **{} seconds**.", seconds))
        .await?;
    Ok(())
}

/// Change a user's nickname.
#[poise::command(prefix_command, guild_only, required_permissions = "ADMINISTRATOR")]
pub async fn nick(
    ctx: Context<'_>,
    #[description = "Member to rename"] member: serenity::Member,
    #[rest]
    #[description = "New nickname (leave empty to reset)"]
    nickname: Option<String>,
) -> Result<(), Error> {
    let guild_id = ctx.guild_id().ok_or("Must be used in a server")?;

    // An empty nickname resets the member to their account name.
    guild_id
        .edit_member(
            ctx,
            member.user.id,
            serenity::EditMember::new().nickname(nickname.unwrap_or_default()),
        )
        .await?;

    ctx.say(format!("✅ {}'s nickname has been changed.", member.mention()))
        .await?;
    Ok(())
}

/// Delete a number of messages.
#[poise::command(prefix_command, guild_only, required_permissions = "ADMINISTRATOR")]
pub async fn purge(
    ctx: Context<'_>,
    #[description = "Amount of messages to purge"] amount: u16,
) -> Result<(), Error> {
    // +1 so the `.purge` message itself goes too.
    let fetch = amount.saturating_add(1).min(MAX_PURGE);
    let channel_id = ctx.channel_id();

    let messages = channel_id
        .messages(ctx.http(), serenity::GetMessages::new().limit(fetch as u8))
        .await?;
    let stamped: Vec<(u64, DateTime<Utc>)> = messages
        .iter()
        .map(|m| {
            let created_at = DateTime::from_timestamp(m.timestamp.unix_timestamp(), 0)
                .unwrap_or(DateTime::<Utc>::MIN_UTC);
            (m.id.get(), created_at)
        })
        .collect();
    let plan = plan_purge(&stamped, Utc::now());
    let deleted = plan.total();

    if !plan.bulk.is_empty() {
        let bulk: Vec<serenity::MessageId> =
            plan.bulk.iter().copied().map(serenity::MessageId::new).collect();
        channel_id.delete_messages(ctx.http(), bulk).await?;
    }
    for id in plan.individual {
        channel_id
            .delete_message(ctx.http(), serenity::MessageId::new(id))
            .await?;
    }

    tracing::info!(
        channel_id = channel_id.get(),
        deleted,
        moderator = ctx.author().id.get(),
        "Purged messages"
    );

    let notice = ctx
        .say(format!("✅ Deleted {} messages.", amount))
        .await?
        .into_message()
        .await?;

    let http = ctx.serenity_context().http.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_secs(PURGE_NOTICE_SECS)).await;
        if let Err(e) = channel_id.delete_message(&http, notice.id).await {
            tracing::warn!("Failed to delete purge notice: {}", e);
        }
    });

    Ok(())
}
