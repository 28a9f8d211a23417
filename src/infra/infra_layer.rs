// The infra module contains implementations of core traits.
// Each feature implementation goes in its own submodule.

#[path = "bot_tracking/mod.rs"]
pub mod bot_tracking;
