// Remembers the guild's mute role so it is only ever created once.
//
// Two `.mute` commands can both miss the role in the cache before the
// platform has echoed the first creation back. Creation runs under a lock
// and the id is kept here, so the second command reuses the new role.

use std::future::Future;
use tokio::sync::Mutex;

#[derive(Default)]
pub struct MuteRole {
    role_id: Mutex<Option<u64>>,
}

impl MuteRole {
    pub fn new() -> Self {
        Self::default()
    }

    /// The role id last seen or created, if any.
    pub async fn known(&self) -> Option<u64> {
        *self.role_id.lock().await
    }

    /// Resolve the mute role, running `create` only when neither the guild
    /// (`existing`) nor an earlier call knows one.
    pub async fn get_or_create<F, Fut, E>(&self, existing: Option<u64>, create: F) -> Result<u64, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<u64, E>>,
    {
        let mut known = self.role_id.lock().await;

        if let Some(role_id) = existing.or(*known) {
            *known = Some(role_id);
            return Ok(role_id);
        }

        let role_id = create().await?;
        *known = Some(role_id);
        Ok(role_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    #[tokio::test(start_paused = true)]
    async fn test_concurrent_mutes_create_one_role() {
        let role = MuteRole::new();
        let created = Arc::new(AtomicUsize::new(0));

        let create = |id: u64| {
            let created = Arc::clone(&created);
            move || async move {
                tokio::time::sleep(Duration::from_millis(50)).await;
                created.fetch_add(1, Ordering::SeqCst);
                Ok::<u64, ()>(id)
            }
        };

        let (first, second) = tokio::join!(
            role.get_or_create(None, create(500)),
            role.get_or_create(None, create(600)),
        );

        assert_eq!(created.load(Ordering::SeqCst), 1);
        assert_eq!(first, second);
        assert_eq!(role.known().await, Some(first.unwrap()));
    }

    #[tokio::test]
    async fn test_role_found_on_guild_wins() {
        let role = MuteRole::new();

        let id = role
            .get_or_create(Some(42), || async { Err::<u64, &str>("should not create") })
            .await;

        assert_eq!(id, Ok(42));
        assert_eq!(role.known().await, Some(42));
    }

    #[tokio::test]
    async fn test_failed_creation_is_retried_next_time() {
        let role = MuteRole::new();

        let failed = role
            .get_or_create(None, || async { Err::<u64, &str>("Missing Permissions") })
            .await;
        assert_eq!(failed, Err("Missing Permissions"));
        assert_eq!(role.known().await, None);

        let created = role.get_or_create(None, || async { Ok::<u64, &str>(7) }).await;
        assert_eq!(created, Ok(7));
    }
}
