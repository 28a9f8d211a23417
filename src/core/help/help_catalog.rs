/// Prefix commands, in the order they are listed in `.help`.
pub const PREFIX_COMMANDS: &[(&str, &str)] = &[
    ("setup_welcome", "Set up the welcome channel. Usage: `.setup_welcome #channel`"),
    ("ban", "Ban a user. Usage: `.ban @user [reason]`"),
    ("kick", "Kick a user. Usage: `.kick @user [reason]`"),
    ("lock", "Lock the current channel. Usage: `.lock`"),
    ("unlock", "Unlock the current channel. Usage: `.unlock`"),
    ("slowmode", "Set slowmode delay. Usage: `.slowmode seconds`"),
    ("nick", "Change a user's nickname. Usage: `.nick @user new_nickname`"),
    ("purge", "Delete messages. Usage: `.purge amount`"),
    ("mute", "Mute a user. Usage: `.mute @user [duration]` (e.g. `30s`, `10m`, `2h`)"),
    ("unmute", "Unmute a user. Usage: `.unmute @user`"),
    ("warn", "Warn a user. Usage: `.warn @user [reason]`"),
    ("unwarn", "Remove the latest warning. Usage: `.unwarn @user`"),
    ("clearwarns", "Clear all warnings. Usage: `.clearwarns @user`"),
    ("warnings", "List a user's warnings. Usage: `.warnings @user`"),
];

/// Slash commands, in the order they are listed in `.help`.
pub const SLASH_COMMANDS: &[(&str, &str)] = &[
    ("/bot-list", "Show tracked bots."),
    ("/setstatuschannel", "Set the status update channel. Usage: `/setstatuschannel #channel`"),
    ("/trackbot", "Track a bot's online/offline status. Usage: `/trackbot bot_id`"),
    ("/untrackbot", "Stop tracking a bot. Usage: `/untrackbot bot_id`"),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HelpReply {
    /// Help for one command.
    Entry {
        name: String,
        description: &'static str,
    },
    /// The requested command does not exist.
    NotFound,
    /// Every command, grouped by catalog.
    Listing {
        prefix: Vec<&'static str>,
        slash: Vec<&'static str>,
    },
}

/// Resolve `.help [command]`.
///
/// Names are matched case-insensitively against the prefix catalog first,
/// then the slash catalog. Slash entries also match without their `/`.
pub fn lookup(command_name: Option<&str>) -> HelpReply {
    let Some(name) = command_name.map(|n| n.trim().to_lowercase()) else {
        return HelpReply::Listing {
            prefix: PREFIX_COMMANDS.iter().map(|(name, _)| *name).collect(),
            slash: SLASH_COMMANDS.iter().map(|(name, _)| *name).collect(),
        };
    };

    let slash_name = if name.starts_with('/') {
        name.clone()
    } else {
        format!("/{}", name)
    };

    PREFIX_COMMANDS
        .iter()
        .find(|(cmd, _)| *cmd == name)
        .or_else(|| SLASH_COMMANDS.iter().find(|(cmd, _)| *cmd == slash_name))
        .map(|(cmd, description)| HelpReply::Entry {
            name: cmd.to_string(),
            description: *description,
        })
        .unwrap_or(HelpReply::NotFound)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_listing_contains_both_catalogs() {
        match lookup(None) {
            HelpReply::Listing { prefix, slash } => {
                assert_eq!(prefix.len(), PREFIX_COMMANDS.len());
                assert_eq!(prefix[0], "setup_welcome");
                assert_eq!(slash, vec!["/bot-list", "/setstatuschannel", "/trackbot", "/untrackbot"]);
            }
            other => panic!("expected listing, got {other:?}"),
        }
    }

    #[test]
    fn test_prefix_lookup_is_case_insensitive() {
        assert_eq!(
            lookup(Some("BAN")),
            HelpReply::Entry {
                name: "ban".to_string(),
                description: "Ban a user. Usage: `.ban @user [reason]`",
            }
        );
    }

    #[test]
    fn test_slash_lookup_with_or_without_slash() {
        let with_slash = lookup(Some("/trackbot"));
        let without_slash = lookup(Some("trackbot"));

        assert_eq!(with_slash, without_slash);
        assert!(matches!(with_slash, HelpReply::Entry { ref name, .. } if name == "/trackbot"));
    }

    #[test]
    fn test_unknown_command() {
        assert_eq!(lookup(Some("dance")), HelpReply::NotFound);
    }
}
