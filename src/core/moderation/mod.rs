// Core moderation module - warning ledger, timed mute bookkeeping and
// purge planning.
// The Discord layer performs the actual bans, kicks and role changes.

pub mod mute_duration;
pub mod mute_role;
pub mod mute_scheduler;
pub mod purge_plan;
pub mod warning_ledger;

pub use mute_role::MuteRole;
pub use mute_scheduler::{MuteScheduler, ScheduledUnmute};
pub use purge_plan::plan_purge;
pub use warning_ledger::{Warning, WarningLedger, DEFAULT_REASON};
