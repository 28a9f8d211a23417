// Runtime settings read from the environment (and `.env`, loaded by main).
//
// Only DISCORD_TOKEN is required. Everything else has a default so a fresh
// checkout runs with just a token.

use std::path::PathBuf;
use thiserror::Error;

pub const DEFAULT_DATA_FILE: &str = "data/data.json";
pub const DEFAULT_PREFIX: &str = ".";
pub const DEFAULT_SERVER_NAME: &str = "SnareHub | Sideloading";

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Missing DISCORD_TOKEN environment variable! Create a .env file with your bot token.")]
    MissingToken,
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub token: String,
    pub data_file: PathBuf,
    pub prefix: String,
    pub server_name: String,
    pub welcome_channel_id: Option<u64>,
    pub guild_id: Option<u64>,
}

impl Settings {
    pub fn from_env() -> Result<Self, SettingsError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self, SettingsError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let token = non_empty("DISCORD_TOKEN").ok_or(SettingsError::MissingToken)?;

        Ok(Self {
            token,
            data_file: non_empty("BOT_DATA_FILE")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_FILE)),
            prefix: non_empty("COMMAND_PREFIX").unwrap_or_else(|| DEFAULT_PREFIX.to_string()),
            server_name: non_empty("WELCOME_SERVER_NAME")
                .unwrap_or_else(|| DEFAULT_SERVER_NAME.to_string()),
            welcome_channel_id: parse_id("WELCOME_CHANNEL_ID", non_empty("WELCOME_CHANNEL_ID")),
            guild_id: parse_id("GUILD_ID", non_empty("GUILD_ID")),
        })
    }
}

fn parse_id(key: &str, value: Option<String>) -> Option<u64> {
    let value = value?;
    match value.parse::<u64>() {
        Ok(id) => Some(id),
        Err(_) => {
            tracing::warn!("Ignoring {}: '{}' is not a numeric ID", key, value);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn settings_from(pairs: &[(&str, &str)]) -> Result<Settings, SettingsError> {
        let env: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Settings::from_lookup(|key| env.get(key).cloned())
    }

    #[test]
    fn test_token_is_required() {
        assert!(matches!(settings_from(&[]), Err(SettingsError::MissingToken)));
        assert!(matches!(
            settings_from(&[("DISCORD_TOKEN", "   ")]),
            Err(SettingsError::MissingToken)
        ));
    }

    #[test]
    fn test_defaults() {
        let settings = settings_from(&[("DISCORD_TOKEN", "abc")]).unwrap();

        assert_eq!(settings.token, "abc");
        assert_eq!(settings.data_file, PathBuf::from(DEFAULT_DATA_FILE));
        assert_eq!(settings.prefix, ".");
        assert_eq!(settings.server_name, DEFAULT_SERVER_NAME);
        assert!(settings.welcome_channel_id.is_none());
        assert!(settings.guild_id.is_none());
    }

    #[test]
    fn test_overrides_and_bad_ids() {
        let settings = settings_from(&[
            ("DISCORD_TOKEN", "abc"),
            ("BOT_DATA_FILE", "/tmp/bot.json"),
            ("COMMAND_PREFIX", "!"),
            ("WELCOME_CHANNEL_ID", "1234"),
            ("GUILD_ID", "not-a-number"),
        ])
        .unwrap();

        assert_eq!(settings.data_file, PathBuf::from("/tmp/bot.json"));
        assert_eq!(settings.prefix, "!");
        assert_eq!(settings.welcome_channel_id, Some(1234));
        assert!(settings.guild_id.is_none());
    }
}
