// Mute and unmute via a "Muted" role.
//
// The role is created the first time anybody is muted, and at that point
// every channel gets an overwrite denying it SEND_MESSAGES. A timed mute
// hands the role removal to the MuteScheduler so this command returns as
// soon as the role is applied.

use crate::discord::{Context, Error};
use poise::serenity_prelude::{self as serenity, Mentionable};

const MUTE_ROLE_NAME: &str = "Muted";

fn cached_mute_role(ctx: Context<'_>) -> Option<serenity::RoleId> {
    let guild = ctx.guild()?;
    let role_id = guild.role_by_name(MUTE_ROLE_NAME).map(|role| role.id);
    role_id
}

/// Find the mute role, creating and wiring it up on first use.
async fn ensure_mute_role(
    ctx: Context<'_>,
    guild_id: serenity::GuildId,
) -> Result<serenity::RoleId, Error> {
    let existing = cached_mute_role(ctx).map(|id| id.get());

    let role_id = ctx
        .data()
        .mute_role
        .get_or_create(existing, || create_mute_role(ctx, guild_id))
        .await?;
    Ok(serenity::RoleId::new(role_id))
}

async fn create_mute_role(ctx: Context<'_>, guild_id: serenity::GuildId) -> Result<u64, Error> {
    let role = guild_id
        .create_role(ctx, serenity::EditRole::new().name(MUTE_ROLE_NAME))
        .await?;
    tracing::info!(guild_id = guild_id.get(), role_id = role.id.get(), "Created mute role");

    let channels = guild_id.channels(ctx.http()).await?;
    for channel in channels.values() {
        let overwrite = serenity::PermissionOverwrite {
            allow: serenity::Permissions::empty(),
            deny: serenity::Permissions::SEND_MESSAGES,
            kind: serenity::PermissionOverwriteType::Role(role.id),
        };

        if let Err(e) = channel.create_permission(ctx, overwrite).await {
            tracing::warn!(
                channel_id = channel.id.get(),
                "Failed to apply mute overwrite: {}",
                e
            );
        }
    }

    Ok(role.id.get())
}

/// The mute role to take off, or `None` when the member does not hold it.
fn held_mute_role(
    member_roles: &[serenity::RoleId],
    mute_role: Option<serenity::RoleId>,
) -> Option<serenity::RoleId> {
    mute_role.filter(|role_id| member_roles.contains(role_id))
}

/// Mute a user (optional duration).
///
/// Durations look like `30s`, `10m` or `2h`. Anything else is ignored and
/// the mute stays until someone runs `.unmute`.
#[poise::command(prefix_command, guild_only, required_permissions = "ADMINISTRATOR")]
pub async fn mute(
    ctx: Context<'_>,
    #[description = "Member to mute"] member: serenity::Member,
    #[description = "How long, e.g. 30s, 10m, 2h"] duration: Option<String>,
) -> Result<(), Error> {
    let guild_id = ctx.guild_id().ok_or("Must be used in a server")?;
    let role_id = ensure_mute_role(ctx, guild_id).await?;

    member.add_role(ctx.http(), role_id).await?;
    ctx.say(format!("✅ {} has been **muted**.", member.mention()))
        .await?;

    let http = ctx.serenity_context().http.clone();
    let channel_id = ctx.channel_id();
    let user_id = member.user.id;
    let label = duration.clone().unwrap_or_default();

    let mutes = &ctx.data().mutes;
    let scheduled = mutes.schedule_if_timed(user_id.get(), duration.as_deref(), async move {
        if let Err(e) = http
            .remove_member_role(guild_id, user_id, role_id, Some("Timed mute expired"))
            .await
        {
            tracing::warn!(user_id = user_id.get(), "Failed to lift timed mute: {}", e);
            return;
        }

        let content = format!(
            "✅ {} has been **unmuted** after {}.",
            user_id.mention(),
            label
        );
        if let Err(e) = channel_id.say(&http, content).await {
            tracing::warn!("Failed to announce timed unmute: {}", e);
        }
    });

    match scheduled {
        Some(scheduled) => tracing::info!(
            user_id = scheduled.member_id,
            delay_secs = scheduled.delay.as_secs(),
            pending = mutes.pending_for(scheduled.member_id),
            "Timed mute scheduled"
        ),
        None => tracing::debug!(duration = ?duration, "No valid duration, mute is permanent"),
    }

    Ok(())
}

/// Unmute a user.
#[poise::command(prefix_command, guild_only, required_permissions = "ADMINISTRATOR")]
pub async fn unmute(
    ctx: Context<'_>,
    #[description = "Member to unmute"] member: serenity::Member,
) -> Result<(), Error> {
    let mute_role = match cached_mute_role(ctx) {
        Some(role_id) => Some(role_id),
        None => ctx.data().mute_role.known().await.map(serenity::RoleId::new),
    };

    // Members without the role get no reply. Pending timed unmutes keep
    // running; removing an absent role is a no-op.
    let Some(role_id) = held_mute_role(&member.roles, mute_role) else {
        tracing::debug!(user_id = member.user.id.get(), "Unmute skipped, member is not muted");
        return Ok(());
    };

    member.remove_role(ctx.http(), role_id).await?;
    ctx.say(format!("✅ {} has been **unmuted**.", member.mention()))
        .await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unmute_only_acts_on_members_holding_the_role() {
        let muted = serenity::RoleId::new(10);
        let other = serenity::RoleId::new(20);

        assert_eq!(held_mute_role(&[other, muted], Some(muted)), Some(muted));
        assert_eq!(held_mute_role(&[other], Some(muted)), None);
        assert_eq!(held_mute_role(&[other], None), None);
    }
}
