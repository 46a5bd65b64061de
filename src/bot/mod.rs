//! Bot core: addressing, command dispatch, color roles and outbound
//! chunking. Nothing in here touches serenity's client directly; outbound
//! calls go through [`ChatPlatform`].

pub mod addressing;
pub mod chunker;
pub mod color_roles;
pub mod commands;
pub mod platform;
pub mod registry;
pub mod templates;
pub mod transcript;

#[cfg(test)]
pub(crate) mod testing;

use serenity::model::id::UserId;

pub use addressing::AddressingRules;
pub use commands::CommandHandler;
pub use platform::ChatPlatform;

use crate::common::error::AppError;
use crate::common::IncomingMessage;
use crate::config::types::Config;

/// Everything needed to react to a message. Built once at startup.
pub struct Bot {
    addressing: AddressingRules,
    commands: CommandHandler,
    log_all_messages: bool,
}

impl Bot {
    pub fn new(config: &Config) -> Result<Self, AppError> {
        Ok(Self {
            addressing: AddressingRules::new(&config.addressing),
            commands: CommandHandler::new(config)?,
            log_all_messages: config.output.log_all_messages,
        })
    }

    /// Handle a new message. Returns `true` if it was addressed to the bot.
    pub async fn on_message(
        &self,
        platform: &dyn ChatPlatform,
        message: &IncomingMessage,
        bot_id: UserId,
    ) -> bool {
        if self.log_all_messages {
            transcript::log_message(message, false);
        }

        let Some(text) = self.addressing.command_text(message, bot_id) else {
            return false;
        };

        if !self.log_all_messages {
            transcript::log_message(message, false);
        }

        self.commands.handle_command(platform, message, &text).await;
        true
    }

    /// Handle an edited message. Edits are never re-run as commands.
    pub fn on_message_edit(&self, message: &IncomingMessage) {
        if self.log_all_messages {
            transcript::log_message(message, true);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bot::testing::{dm_message, guild_message, RecordingPlatform, BOT_ID};
    use tracing_test::traced_test;

    fn logging_all(log_all_messages: bool) -> Bot {
        let mut config = Config::default();
        config.output.log_all_messages = log_all_messages;
        Bot::new(&config).unwrap()
    }

    #[tokio::test]
    async fn test_triggered_message_is_dispatched() {
        let bot = Bot::new(&Config::default()).unwrap();
        let platform = RecordingPlatform::new();

        assert!(bot.on_message(&platform, &guild_message("-help"), BOT_ID).await);
        assert_eq!(platform.texts().len(), 1);
    }

    #[tokio::test]
    async fn test_mentioned_color_command() {
        let bot = Bot::new(&Config::default()).unwrap();
        let platform = RecordingPlatform::with_roles(&["Blu"]);
        let mut message = guild_message("<@900> -color Blu");
        message.mentions.insert(BOT_ID);

        assert!(bot.on_message(&platform, &message, BOT_ID).await);
        assert_eq!(platform.texts(), vec!["You now have the Blu color role!"]);
        assert!(platform.member_has("Blu"));
    }

    #[tokio::test]
    async fn test_unaddressed_message_is_ignored() {
        let bot = Bot::new(&Config::default()).unwrap();
        let platform = RecordingPlatform::new();

        assert!(!bot.on_message(&platform, &guild_message("just chatting"), BOT_ID).await);
        assert!(platform.calls().is_empty());
    }

    #[tokio::test]
    async fn test_bot_author_never_dispatched() {
        let bot = Bot::new(&Config::default()).unwrap();
        let platform = RecordingPlatform::new();
        let mut message = dm_message("-help");
        message.author.bot = true;

        assert!(!bot.on_message(&platform, &message, BOT_ID).await);
        assert!(platform.calls().is_empty());
    }

    #[tokio::test]
    async fn test_unknown_command_in_dm() {
        let bot = Bot::new(&Config::default()).unwrap();
        let platform = RecordingPlatform::new();

        assert!(bot.on_message(&platform, &dm_message("hello there"), BOT_ID).await);
        assert_eq!(platform.texts(), vec!["I'm sorry, that is an unknown command!"]);
    }

    #[test]
    fn test_alias_collision_fails_startup() {
        let mut config = Config::default();
        config
            .commands
            .get_mut("request_info")
            .unwrap()
            .aliases
            .push("help".to_string());

        assert!(matches!(Bot::new(&config), Err(AppError::Registry(_))));
    }

    #[tokio::test]
    #[traced_test]
    async fn test_log_all_records_unaddressed_messages() {
        let platform = RecordingPlatform::new();

        assert!(!logging_all(true).on_message(&platform, &guild_message("just chatting"), BOT_ID).await);
        assert!(logs_contain("Rain Club> #general> soapy#1098> just chatting"));
        assert!(platform.calls().is_empty());
    }

    #[tokio::test]
    #[traced_test]
    async fn test_only_addressed_messages_logged_by_default() {
        let bot = logging_all(false);
        let platform = RecordingPlatform::new();

        bot.on_message(&platform, &guild_message("quiet chatter"), BOT_ID).await;
        bot.on_message(&platform, &guild_message("-info"), BOT_ID).await;

        assert!(!logs_contain("quiet chatter"));
        assert!(logs_contain("soapy#1098> -info"));
    }

    #[test]
    #[traced_test]
    fn test_edit_logged_when_logging_all() {
        logging_all(true).on_message_edit(&guild_message("-help typo fixed"));
        assert!(logs_contain("(edit) Rain Club> #general> soapy#1098> -help typo fixed"));
    }

    #[test]
    #[traced_test]
    fn test_edit_ignored_by_default() {
        logging_all(false).on_message_edit(&guild_message("-help typo fixed"));
        assert!(!logs_contain("typo fixed"));
    }
}
