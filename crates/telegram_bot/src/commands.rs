//! Bot commands

use teloxide::types::BotCommand;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// Start recording an expense (`/new`, `/expense`).
    New,
    /// Totals for the current month.
    Month,
    /// Totals for a year, month and category typed next.
    MonthSpecific,
    Cancel,
    /// `/start` and `/help`.
    Help,
    /// Any other slash command, without the leading `/`.
    Unknown(String),
}

/// Parses a slash command. Text that does not start with `/` is not a
/// command. A `@botname` suffix and trailing arguments are ignored.
pub fn parse_command(text: &str) -> Option<Command> {
    let trimmed = text.trim();
    let rest = trimmed.strip_prefix('/')?;
    let word = rest.split_whitespace().next().unwrap_or("");
    let name = word.split_once('@').map_or(word, |(name, _)| name);

    let cmd = match name.to_lowercase().as_str() {
        "new" | "expense" => Command::New,
        "month" => Command::Month,
        "month_specific" => Command::MonthSpecific,
        "cancel" => Command::Cancel,
        "start" | "help" => Command::Help,
        _ => Command::Unknown(name.to_string()),
    };
    Some(cmd)
}

/// Commands advertised in the Telegram client menu.
pub(crate) fn bot_commands() -> Vec<BotCommand> {
    vec![
        BotCommand::new("new", "Καινούριο έξοδο"),
        BotCommand::new("month", "Τα έξοδα αυτού του μήνα"),
        BotCommand::new(
            "month_specific",
            "Έξοδα βάσει χρόνου, μήνα και κατηγορίας",
        ),
        BotCommand::new("cancel", "Ακύρωση"),
        BotCommand::new("help", "Βοήθεια"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_text_is_not_a_command() {
        assert_eq!(parse_command("Φαγητό"), None);
        assert_eq!(parse_command("12,50"), None);
        assert_eq!(parse_command(""), None);
    }

    #[test]
    fn known_commands() {
        assert_eq!(parse_command("/new"), Some(Command::New));
        assert_eq!(parse_command("/expense"), Some(Command::New));
        assert_eq!(parse_command("/month"), Some(Command::Month));
        assert_eq!(
            parse_command("/month_specific"),
            Some(Command::MonthSpecific)
        );
        assert_eq!(parse_command(" /cancel "), Some(Command::Cancel));
        assert_eq!(parse_command("/start"), Some(Command::Help));
        assert_eq!(parse_command("/help"), Some(Command::Help));
    }

    #[test]
    fn bot_name_suffix_and_arguments_are_ignored() {
        assert_eq!(parse_command("/new@ExpensesBot"), Some(Command::New));
        assert_eq!(parse_command("/month extra words"), Some(Command::Month));
    }

    #[test]
    fn unknown_commands_keep_their_name() {
        assert_eq!(
            parse_command("/delete"),
            Some(Command::Unknown("delete".to_string()))
        );
        assert_eq!(parse_command("/"), Some(Command::Unknown(String::new())));
    }
}
