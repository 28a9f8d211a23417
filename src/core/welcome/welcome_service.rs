// Welcome/farewell messages for member join and leave events.
//
// The welcome channel is held in memory only. It can be seeded from the
// environment at startup and changed with `.setup_welcome`.

use tokio::sync::RwLock;

/// A message the Discord layer should post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WelcomeNotice {
    pub channel_id: u64,
    pub content: String,
}

pub struct WelcomeService {
    server_name: String,
    channel_id: RwLock<Option<u64>>,
}

impl WelcomeService {
    pub fn new(server_name: impl Into<String>, channel_id: Option<u64>) -> Self {
        Self {
            server_name: server_name.into(),
            channel_id: RwLock::new(channel_id),
        }
    }

    pub async fn channel(&self) -> Option<u64> {
        *self.channel_id.read().await
    }

    pub async fn set_channel(&self, channel_id: u64) {
        *self.channel_id.write().await = Some(channel_id);
        tracing::info!(channel_id, "Welcome channel updated");
    }

    /// Greeting for a new member, or `None` when no channel is configured.
    pub async fn greeting(&self, member_mention: &str) -> Option<WelcomeNotice> {
        let channel_id = self.channel().await?;
        Some(WelcomeNotice {
            channel_id,
            content: format!("🎉 Welcome to {}, {}!", self.server_name, member_mention),
        })
    }

    /// Farewell for a departed member, or `None` when no channel is configured.
    pub async fn farewell(&self, name: &str, discriminator: Option<u16>) -> Option<WelcomeNotice> {
        let channel_id = self.channel().await?;
        Some(WelcomeNotice {
            channel_id,
            content: format!(
                "😢 **{}** has left the server.",
                display_handle(name, discriminator)
            ),
        })
    }
}

/// `name` for accounts on the new username system, `name#1234` for legacy ones.
pub fn display_handle(name: &str, discriminator: Option<u16>) -> String {
    match discriminator {
        None | Some(0) => name.to_string(),
        Some(d) => format!("{}#{:04}", name, d),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_no_channel_means_no_messages() {
        let service = WelcomeService::new("Test Hub", None);

        assert!(service.greeting("<@1>").await.is_none());
        assert!(service.farewell("alice", None).await.is_none());
    }

    #[tokio::test]
    async fn test_greeting_mentions_member() {
        let service = WelcomeService::new("Test Hub", None);
        service.set_channel(99).await;

        let notice = service.greeting("<@1>").await.unwrap();

        assert_eq!(notice.channel_id, 99);
        assert_eq!(notice.content, "🎉 Welcome to Test Hub, <@1>!");
    }

    #[tokio::test]
    async fn test_farewell_formats_legacy_discriminator() {
        let service = WelcomeService::new("Test Hub", Some(5));

        let notice = service.farewell("bob", Some(42)).await.unwrap();
        assert_eq!(notice.content, "😢 **bob#0042** has left the server.");

        let notice = service.farewell("carol", None).await.unwrap();
        assert_eq!(notice.content, "😢 **carol** has left the server.");
    }

    #[test]
    fn test_zero_discriminator_is_unset() {
        assert_eq!(display_handle("dave", Some(0)), "dave");
        assert_eq!(display_handle("dave", Some(1234)), "dave#1234");
    }
}
