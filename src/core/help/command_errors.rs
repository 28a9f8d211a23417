// User-facing text for failed command invocations.
//
// The Discord layer classifies framework errors into one of these buckets;
// anything it does not recognise as a usage problem ends up in `Other`.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandFailure {
    #[error("❌ You must be an **administrator** to use this command.")]
    PermissionDenied,

    #[error("❌ Missing required arguments. Use `.help [command]` for details.")]
    MissingArgument,

    #[error("❌ Invalid argument type. Try mentioning the user correctly.")]
    BadArgumentType,

    #[error("❌ Command not found. Use `.help` to see available commands.")]
    UnknownCommand,

    #[error("❌ An error occurred: {0}")]
    Other(String),
}

impl CommandFailure {
    /// Argument parse failures with no input mean the argument was missing.
    pub fn from_argument_parse(input: Option<&str>) -> Self {
        match input {
            None => CommandFailure::MissingArgument,
            Some(_) => CommandFailure::BadArgumentType,
        }
    }
}
