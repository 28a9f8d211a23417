use crate::discord::{Context, Error};
use poise::serenity_prelude::{self as serenity, Mentionable};

/// Set up the welcome channel.
#[poise::command(prefix_command, guild_only, required_permissions = "ADMINISTRATOR")]
pub async fn setup_welcome(
    ctx: Context<'_>,
    #[description = "Channel for join and leave messages"] channel: serenity::GuildChannel,
) -> Result<(), Error> {
    ctx.data().welcome.set_channel(channel.id.get()).await;
    ctx.say(format!("✅ Welcome channel set to {}", channel.mention()))
        .await?;
    Ok(())
}
