// One-off work done when the bot connects.

use crate::discord::Data;
use anyhow::Result;
use poise::serenity_prelude::{self as serenity, Context};
use std::collections::HashSet;

/// Discord's page size cap for the member list endpoint.
const MEMBER_PAGE_SIZE: u64 = 1000;

/// Remove tracked bots that have left the guild and save the result.
///
/// Membership comes from the HTTP member list rather than the cache, which
/// is still empty when the ready event fires. If fetching fails nothing is
/// removed.
pub async fn reconcile_tracked_bots(
    ctx: &Context,
    data: &Data,
    guild_id: serenity::GuildId,
) -> Result<()> {
    let mut members = HashSet::new();
    let mut after: Option<serenity::UserId> = None;

    loop {
        let page = guild_id
            .members(&ctx.http, Some(MEMBER_PAGE_SIZE), after)
            .await?;
        let page_len = page.len() as u64;
        after = page.last().map(|m| m.user.id);
        members.extend(page.into_iter().map(|m| m.user.id.get()));

        if page_len < MEMBER_PAGE_SIZE {
            break;
        }
    }

    let removed = data
        .tracking
        .reconcile(|id| members.contains(&id))
        .await?;

    if !removed.is_empty() {
        tracing::info!(?removed, "Dropped tracked bots that left the server");
    }
    tracing::info!(
        guild_id = guild_id.get(),
        "✅ Tracking {} bots.",
        data.tracking.tracked_bots().await.len()
    );
    Ok(())
}
