// Entry point of the community bot.
//
// **Architecture Overview:**
// - `core/` = Business logic (platform-agnostic)
// - `infra/` = Implementations of core traits (the JSON config file)
// - `discord/` = Discord-specific adapters (commands, events)
//
// This file loads settings, builds the services, wires them into the poise
// framework and runs the client until Ctrl+C.

// These attrs point each module declaration at a more descriptive root file
// so we don't end up with half a dozen mod.rs files that all look the same.
#[path = "core/core_layer.rs"]
mod core;
#[path = "discord/discord_layer.rs"]
mod discord;
#[path = "infra/infra_layer.rs"]
mod infra;
mod settings;

use crate::core::bot_tracking::BotTrackingService;
use crate::core::moderation::{MuteRole, MuteScheduler, WarningLedger};
use crate::core::welcome::WelcomeService;
use crate::discord::events::{errors, member_events, presence_events, startup};
use crate::discord::{Data, Error};
use crate::infra::bot_tracking::JsonConfigStore;
use crate::settings::Settings;
use poise::serenity_prelude as serenity;
use std::sync::Arc;

/// Event handler for non-command Discord events.
async fn event_handler(
    ctx: &serenity::Context,
    event: &serenity::FullEvent,
    _framework: poise::FrameworkContext<'_, Data, Error>,
    data: &Data,
) -> Result<(), Error> {
    match event {
        serenity::FullEvent::GuildCreate { guild, .. } => {
            presence_events::seed_guild_presences(data, guild);
        }
        serenity::FullEvent::PresenceUpdate { new_data } => {
            if let Err(e) = presence_events::handle_presence_update(ctx, data, new_data).await {
                tracing::error!("Error handling presence update: {}", e);
            }
        }
        serenity::FullEvent::GuildMemberAddition { new_member } => {
            if let Err(e) = member_events::handle_member_join(ctx, data, new_member).await {
                tracing::error!("Error sending welcome message: {}", e);
            }
        }
        serenity::FullEvent::GuildMemberRemoval { user, .. } => {
            if let Err(e) = member_events::handle_member_remove(ctx, data, user).await {
                tracing::error!("Error sending farewell message: {}", e);
            }
        }
        _ => {}
    }

    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging so we can see what's happening
    tracing_subscriber::fmt::init();

    // Load environment variables from .env file (if it exists)
    dotenv::dotenv().ok();

    let settings = Settings::from_env()?;

    // ========================================================================
    // DEPENDENCY INJECTION
    // ========================================================================

    let config_store = JsonConfigStore::new(&settings.data_file);
    let tracking = Arc::new(BotTrackingService::new(config_store).await);
    let warnings = Arc::new(WarningLedger::new());
    let mutes = Arc::new(MuteScheduler::new());
    let welcome = Arc::new(WelcomeService::new(
        settings.server_name.clone(),
        settings.welcome_channel_id,
    ));

    let data = Data {
        tracking,
        warnings,
        mutes: Arc::clone(&mutes),
        mute_role: Arc::new(MuteRole::new()),
        welcome,
    };

    // ========================================================================
    // DISCORD FRAMEWORK SETUP
    // ========================================================================

    let intents = serenity::GatewayIntents::GUILDS
        | serenity::GatewayIntents::GUILD_MEMBERS
        | serenity::GatewayIntents::GUILD_PRESENCES
        | serenity::GatewayIntents::GUILD_MESSAGES
        | serenity::GatewayIntents::MESSAGE_CONTENT; // Required for prefix commands

    let guild_override = settings.guild_id;

    let framework = poise::Framework::builder()
        .options(poise::FrameworkOptions {
            commands: discord::commands::all(),
            event_handler: |ctx, event, framework, data| {
                Box::pin(event_handler(ctx, event, framework, data))
            },
            on_error: |error| Box::pin(errors::on_error(error)),
            prefix_options: poise::PrefixFrameworkOptions {
                prefix: Some(settings.prefix.clone()),
                mention_as_prefix: false,
                ..Default::default()
            },
            ..Default::default()
        })
        .setup(move |ctx, ready, framework| {
            Box::pin(async move {
                tracing::info!("🤖 Logged in as {}", ready.user.name);

                // A failed registration only affects slash commands; prefix
                // commands keep working, so log it and carry on.
                match poise::builtins::register_globally(ctx, &framework.options().commands).await
                {
                    Ok(()) => tracing::info!("✅ Commands registered!"),
                    Err(e) => tracing::error!("Failed to register slash commands: {}", e),
                }

                let guild_id = guild_override
                    .map(serenity::GuildId::new)
                    .or_else(|| ready.guilds.first().map(|g| g.id));

                match guild_id {
                    Some(guild_id) => {
                        if let Err(e) = startup::reconcile_tracked_bots(ctx, &data, guild_id).await
                        {
                            tracing::warn!("Skipping tracked bot cleanup: {}", e);
                        }
                    }
                    None => tracing::warn!("Not in any guild, skipping tracked bot cleanup"),
                }

                tracing::info!("🚀 Bot is ready!");
                Ok(data)
            })
        })
        .build();

    let mut client = serenity::ClientBuilder::new(&settings.token, intents)
        .framework(framework)
        .await?;

    let shard_manager = client.shard_manager.clone();
    tokio::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            return;
        }
        tracing::info!("Shutting down...");
        mutes.shutdown();
        shard_manager.shutdown_all().await;
    });

    client.start().await?;
    Ok(())
}
