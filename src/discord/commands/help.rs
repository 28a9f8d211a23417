use crate::core::help::{lookup, HelpReply};
use crate::discord::{Context, Error};
use poise::serenity_prelude as serenity;

const COLOR_OK: u32 = 0x00FFCC;
const COLOR_ERROR: u32 = 0xFF0000;

/// Displays help for commands.
#[poise::command(prefix_command)]
pub async fn help(
    ctx: Context<'_>,
    #[description = "Command to explain"] command_name: Option<String>,
) -> Result<(), Error> {
    let embed = match lookup(command_name.as_deref()) {
        HelpReply::Entry { name, description } => serenity::CreateEmbed::new()
            .title(format!("📌 Help: {}", name))
            .description(description)
            .color(COLOR_OK),
        HelpReply::NotFound => serenity::CreateEmbed::new()
            .title("❌ Error")
            .description("Command not found. Use `.help` to list all commands.")
            .color(COLOR_ERROR),
        HelpReply::Listing { prefix, slash } => serenity::CreateEmbed::new()
            .title("📜 Help - Available Commands")
            .description("Use `.help [command]` for details.")
            .color(COLOR_OK)
            .field(
                "🔧 Moderation Commands",
                prefix
                    .iter()
                    .map(|cmd| format!("`.{}`", cmd))
                    .collect::<Vec<_>>()
                    .join("\n"),
                false,
            )
            .field(
                "🤖 Bot Tracking Commands",
                slash
                    .iter()
                    .map(|cmd| format!("`{}`", cmd))
                    .collect::<Vec<_>>()
                    .join("\n"),
                false,
            ),
    };

    ctx.send(poise::CreateReply::default().embed(embed)).await?;
    Ok(())
}
