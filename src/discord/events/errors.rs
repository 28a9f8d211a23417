// Framework error handler.
//
// Usage problems are turned into one of the fixed CommandFailure messages and
// posted where the command was used, privately for slash commands. Nothing
// here propagates further.

use crate::core::help::CommandFailure;
use crate::discord::{Context, Data, Error};

pub async fn on_error(error: poise::FrameworkError<'_, Data, Error>) {
    match error {
        poise::FrameworkError::MissingUserPermissions { ctx, .. } => {
            reply(ctx, CommandFailure::PermissionDenied).await;
        }
        poise::FrameworkError::ArgumentParse {
            ctx, input, error, ..
        } => {
            tracing::debug!(
                command = %ctx.command().qualified_name,
                "Argument parse failed: {}",
                error
            );
            reply(ctx, CommandFailure::from_argument_parse(input.as_deref())).await;
        }
        poise::FrameworkError::UnknownCommand { ctx, msg, .. } => {
            if let Err(e) = msg
                .channel_id
                .say(&ctx.http, CommandFailure::UnknownCommand.to_string())
                .await
            {
                tracing::warn!("Failed to answer unknown command: {}", e);
            }
        }
        poise::FrameworkError::Command { error, ctx, .. } => {
            tracing::error!(
                command = %ctx.command().qualified_name,
                "Command failed: {}",
                error
            );
            reply(ctx, CommandFailure::Other(error.to_string())).await;
        }
        other => {
            if let Err(e) = poise::builtins::on_error(other).await {
                tracing::error!("Error while handling error: {}", e);
            }
        }
    }
}

/// Ephemeral only affects slash commands; prefix replies stay public.
fn failure_reply(failure: &CommandFailure) -> poise::CreateReply {
    poise::CreateReply::default()
        .content(failure.to_string())
        .ephemeral(true)
}

async fn reply(ctx: Context<'_>, failure: CommandFailure) {
    if let Err(e) = ctx.send(failure_reply(&failure)).await {
        tracing::warn!("Failed to report command failure: {}", e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failures_are_sent_privately() {
        let reply = failure_reply(&CommandFailure::Other("Missing Access".to_string()));

        assert_eq!(reply.content.as_deref(), Some("❌ An error occurred: Missing Access"));
        assert_eq!(reply.ephemeral, Some(true));
    }
}
