use crate::core::welcome::WelcomeNotice;
use crate::discord::Data;
use anyhow::Result;
use poise::serenity_prelude::{self as serenity, Context, Mentionable};

pub async fn handle_member_join(
    ctx: &Context,
    data: &Data,
    member: &serenity::Member,
) -> Result<()> {
    let Some(notice) = data.welcome.greeting(&member.mention().to_string()).await else {
        return Ok(());
    };

    send_notice(ctx, notice).await
}

pub async fn handle_member_remove(ctx: &Context, data: &Data, user: &serenity::User) -> Result<()> {
    let discriminator = user.discriminator.map(|d| d.get());
    let Some(notice) = data.welcome.farewell(&user.name, discriminator).await else {
        return Ok(());
    };

    send_notice(ctx, notice).await
}

async fn send_notice(ctx: &Context, notice: WelcomeNotice) -> Result<()> {
    serenity::ChannelId::new(notice.channel_id)
        .say(&ctx.http, notice.content)
        .await?;
    Ok(())
}
