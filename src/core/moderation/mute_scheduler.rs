// Deferred unmute tasks.
//
// A timed mute spawns one task that sleeps for the requested duration and
// then runs whatever unmute action the Discord layer handed in. The command
// that scheduled it returns immediately, so nothing else waits on the timer.
//
// Pending tasks are indexed by member so they can be cancelled, and all of
// them are aborted when the bot shuts down. A manual `.unmute` leaves the
// timer alone; when it fires it removes a role the member may no
// longer hold, which the platform treats as a no-op.

use super::mute_duration::parse_mute_duration;
use dashmap::DashMap;
use std::future::Future;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::Instant;

/// Handle returned to the caller for a scheduled unmute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduledUnmute {
    pub member_id: u64,
    pub delay: Duration,
    pub fires_at: Instant,
}

#[derive(Default)]
pub struct MuteScheduler {
    pending: DashMap<u64, Vec<JoinHandle<()>>>,
}

impl MuteScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `unmute` once `delay` has elapsed, measured from now.
    pub fn schedule<F>(&self, member_id: u64, delay: Duration, unmute: F) -> ScheduledUnmute
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let fires_at = Instant::now() + delay;

        let handle = tokio::spawn(async move {
            tokio::time::sleep_until(fires_at).await;
            unmute.await;
        });

        self.prune();
        self.pending.entry(member_id).or_default().push(handle);

        tracing::debug!(member_id, delay_secs = delay.as_secs(), "Scheduled unmute");

        ScheduledUnmute {
            member_id,
            delay,
            fires_at,
        }
    }

    /// Schedule `unmute` if `raw_duration` parses as a mute duration.
    ///
    /// A missing or malformed duration means a permanent mute, so nothing is
    /// scheduled and `unmute` is dropped without running.
    pub fn schedule_if_timed<F>(
        &self,
        member_id: u64,
        raw_duration: Option<&str>,
        unmute: F,
    ) -> Option<ScheduledUnmute>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let delay = parse_mute_duration(raw_duration?)?;
        Some(self.schedule(member_id, delay, unmute))
    }

    /// Number of timers for a member that have not fired yet.
    pub fn pending_for(&self, member_id: u64) -> usize {
        let live = self
            .pending
            .get(&member_id)
            .map(|tasks| tasks.iter().filter(|t| !t.is_finished()).count())
            .unwrap_or(0);

        if live == 0 {
            self.pending.remove(&member_id);
        }
        live
    }

    /// Drop finished handles, and members left with none.
    fn prune(&self) {
        self.pending.retain(|_, tasks| {
            tasks.retain(|task| !task.is_finished());
            !tasks.is_empty()
        });
    }

    /// Abort every pending timer for a member. Returns how many were live.
    pub fn cancel(&self, member_id: u64) -> usize {
        let Some((_, tasks)) = self.pending.remove(&member_id) else {
            return 0;
        };

        let mut cancelled = 0;
        for task in tasks {
            if !task.is_finished() {
                task.abort();
                cancelled += 1;
            }
        }
        cancelled
    }

    /// Abort everything. Called once during shutdown.
    pub fn shutdown(&self) {
        let members: Vec<u64> = self.pending.iter().map(|e| *e.key()).collect();
        let cancelled: usize = members.into_iter().map(|m| self.cancel(m)).sum();

        if cancelled > 0 {
            tracing::info!(cancelled, "Aborted pending unmutes on shutdown");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::{Arc, Mutex};

    #[tokio::test(start_paused = true)]
    async fn test_ten_minute_mute_fires_after_exactly_600_seconds() {
        let scheduler = MuteScheduler::new();
        let started = Instant::now();
        let fired_at: Arc<Mutex<Option<Instant>>> = Arc::new(Mutex::new(None));

        let record = Arc::clone(&fired_at);
        let scheduled = scheduler
            .schedule_if_timed(7, Some("10m"), async move {
                *record.lock().unwrap() = Some(Instant::now());
            })
            .expect("10m is a timed mute");

        assert_eq!(scheduled.delay, Duration::from_secs(600));
        assert_eq!(scheduled.fires_at - started, Duration::from_secs(600));

        tokio::time::sleep(Duration::from_secs(599)).await;
        assert!(fired_at.lock().unwrap().is_none());
        assert_eq!(scheduler.pending_for(7), 1);

        tokio::time::sleep(Duration::from_secs(2)).await;
        let fired = fired_at.lock().unwrap().expect("unmute should have fired");
        let elapsed = fired - started;
        assert!(elapsed >= Duration::from_secs(600) && elapsed < Duration::from_secs(601));
        assert_eq!(scheduler.pending_for(7), 0);
        assert!(scheduler.pending.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_missing_or_malformed_duration_is_permanent() {
        let scheduler = MuteScheduler::new();
        let fired = Arc::new(AtomicBool::new(false));

        for raw in [None, Some("10x"), Some("m"), Some("1.5h")] {
            let flag = Arc::clone(&fired);
            let scheduled = scheduler.schedule_if_timed(7, raw, async move {
                flag.store(true, Ordering::SeqCst);
            });
            assert!(scheduled.is_none(), "duration {raw:?}");
        }

        assert!(scheduler.pending.is_empty());
        tokio::time::sleep(Duration::from_secs(86_400)).await;
        assert!(!fired.load(Ordering::SeqCst));
    }

    #[tokio::test(start_paused = true)]
    async fn test_fired_timers_do_not_linger() {
        let scheduler = MuteScheduler::new();

        scheduler.schedule(1, Duration::from_secs(5), async {});
        tokio::time::sleep(Duration::from_secs(10)).await;

        scheduler.schedule(2, Duration::from_secs(5), async {});

        assert!(!scheduler.pending.contains_key(&1));
        assert_eq!(scheduler.pending_for(2), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_prevents_firing() {
        let scheduler = MuteScheduler::new();
        let fired = Arc::new(AtomicBool::new(false));

        let flag = Arc::clone(&fired);
        scheduler.schedule(7, Duration::from_secs(30), async move {
            flag.store(true, Ordering::SeqCst);
        });

        assert_eq!(scheduler.cancel(7), 1);
        tokio::time::sleep(Duration::from_secs(60)).await;

        assert!(!fired.load(Ordering::SeqCst));
        assert_eq!(scheduler.cancel(7), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_repeated_mutes_keep_every_timer() {
        let scheduler = MuteScheduler::new();
        let fired = Arc::new(Mutex::new(0u32));

        for secs in [10, 20] {
            let counter = Arc::clone(&fired);
            scheduler.schedule(7, Duration::from_secs(secs), async move {
                *counter.lock().unwrap() += 1;
            });
        }
        assert_eq!(scheduler.pending_for(7), 2);

        tokio::time::sleep(Duration::from_secs(25)).await;
        assert_eq!(*fired.lock().unwrap(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_shutdown_aborts_everything() {
        let scheduler = MuteScheduler::new();
        let fired = Arc::new(AtomicBool::new(false));

        for member in [1, 2, 3] {
            let flag = Arc::clone(&fired);
            scheduler.schedule(member, Duration::from_secs(5), async move {
                flag.store(true, Ordering::SeqCst);
            });
        }

        scheduler.shutdown();
        tokio::time::sleep(Duration::from_secs(10)).await;

        assert!(!fired.load(Ordering::SeqCst));
        assert_eq!(scheduler.pending_for(1), 0);
    }
}
