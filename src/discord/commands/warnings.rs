// Warning commands. These only touch the in-memory WarningLedger.

use crate::discord::{Context, Error};
use poise::serenity_prelude::{self as serenity, Mentionable};

/// Warn a user.
#[poise::command(prefix_command, guild_only, required_permissions = "ADMINISTRATOR")]
pub async fn warn(
    ctx: Context<'_>,
    #[description = "Member to warn"] member: serenity::Member,
    #[rest]
    #[description = "Reason for the warning"]
    reason: Option<String>,
) -> Result<(), Error> {
    let ledger = &ctx.data().warnings;
    let count = ledger.warn(member.user.id.get(), reason, ctx.author().id.get());
    let latest = ledger
        .warnings(member.user.id.get())
        .pop()
        .map(|w| w.reason)
        .unwrap_or_default();

    tracing::info!(user_id = member.user.id.get(), count, "Member warned");

    ctx.say(format!(
        "⚠️ {} has been warned. Reason: {}",
        member.mention(),
        latest
    ))
    .await?;
    Ok(())
}

/// Remove the latest warning from a user.
#[poise::command(prefix_command, guild_only, required_permissions = "ADMINISTRATOR")]
pub async fn unwarn(
    ctx: Context<'_>,
    #[description = "Member to remove a warning from"] member: serenity::Member,
) -> Result<(), Error> {
    match ctx.data().warnings.unwarn(member.user.id.get()) {
        Some(removed) => {
            ctx.say(format!(
                "✅ Removed warning from {}. Previous reason: {}",
                member.mention(),
                removed.reason
            ))
            .await?;
        }
        None => {
            ctx.say(format!("❌ {} has no warnings.", member.mention()))
                .await?;
        }
    }
    Ok(())
}

/// Clear all warnings from a user.
#[poise::command(prefix_command, guild_only, required_permissions = "ADMINISTRATOR")]
pub async fn clearwarns(
    ctx: Context<'_>,
    #[description = "Member to clear"] member: serenity::Member,
) -> Result<(), Error> {
    ctx.data().warnings.clear(member.user.id.get());
    ctx.say(format!(
        "✅ All warnings for {} have been cleared.",
        member.mention()
    ))
    .await?;
    Ok(())
}

/// List a user's warnings.
#[poise::command(prefix_command, guild_only, required_permissions = "ADMINISTRATOR")]
pub async fn warnings(
    ctx: Context<'_>,
    #[description = "Member to inspect"] member: serenity::Member,
) -> Result<(), Error> {
    let warnings = ctx.data().warnings.warnings(member.user.id.get());

    if warnings.is_empty() {
        ctx.say(format!("✅ {} has no warnings.", member.mention()))
            .await?;
        return Ok(());
    }

    let lines: Vec<String> = warnings
        .iter()
        .enumerate()
        .map(|(i, w)| {
            format!(
                "**{}.** {} (by <@{}>, <t:{}:R>)",
                i + 1,
                w.reason,
                w.issued_by,
                w.issued_at.timestamp()
            )
        })
        .collect();

    let embed = serenity::CreateEmbed::new()
        .title(format!("⚠️ Warnings for {}", member.user.name))
        .description(lines.join("\n"))
        .color(0xFFCC00)
        .footer(serenity::CreateEmbedFooter::new(
            "Warnings are kept in memory and reset when the bot restarts.",
        ));

    ctx.send(poise::CreateReply::default().embed(embed)).await?;
    Ok(())
}
