// Help text and user-facing error messages. Pure lookups, no Discord types.

pub mod command_errors;
pub mod help_catalog;

pub use command_errors::CommandFailure;
pub use help_catalog::{lookup, HelpReply, PREFIX_COMMANDS, SLASH_COMMANDS};
