// The core module contains all business logic.
// Each feature gets its own submodule.

#[path = "bot_tracking/mod.rs"]
pub mod bot_tracking;

#[path = "help/mod.rs"]
pub mod help;

#[path = "moderation/mod.rs"]
pub mod moderation;

#[path = "welcome/welcome_service.rs"]
pub mod welcome;
