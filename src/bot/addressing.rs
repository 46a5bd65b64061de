//! Decides whether a message is directed at the bot.
//!
//! A message addresses the bot when it is a direct message, starts with the
//! trigger, @mentions the bot, or was posted in the configured bot channel.

use fancy_regex::Regex;
use serenity::model::id::UserId;

use crate::common::IncomingMessage;
use crate::config::types::AddressingConfig;

/// How a message relates to the bot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Addressing {
    pub dm: bool,
    pub triggered: bool,
    pub mentioned: bool,
    pub in_bot_channel: bool,
    /// Content with self-mentions and the trigger removed, trimmed.
    pub effective_message: String,
}

impl Addressing {
    /// Whether the bot should act on the message.
    pub fn is_addressed(&self) -> bool {
        !self.effective_message.is_empty()
            && (self.dm || self.triggered || self.mentioned || self.in_bot_channel)
    }
}

/// Addressing rules built from config.
#[derive(Debug, Clone)]
pub struct AddressingRules {
    trigger: String,
    single_trigger: bool,
    /// Set only when bot-channel addressing is enabled.
    bot_channel: Option<String>,
    /// Discord user mentions (<@123> or <@!123>).
    mention_pattern: Regex,
}

impl AddressingRules {
    pub fn new(config: &AddressingConfig) -> Self {
        Self {
            trigger: config.trigger.clone(),
            single_trigger: config.single_trigger,
            bot_channel: config
                .enable_bot_channel_addressing
                .then(|| config.bot_channel.clone()),
            mention_pattern: Regex::new(r"<@!?(\d+)>").expect("mention pattern is valid"),
        }
    }

    /// Work out how a message addresses the bot.
    ///
    /// The trigger is matched after self-mentions are stripped, so
    /// `@bot -help` counts as both mentioned and triggered.
    pub fn resolve(&self, message: &IncomingMessage, bot_id: UserId) -> Addressing {
        let content = message.content.trim();
        let dm = message.is_direct();
        let mentioned = message.mentions_user(bot_id);

        let clean = if mentioned {
            self.strip_mentions(content, bot_id).trim().to_string()
        } else {
            content.to_string()
        };

        let triggered = clean.starts_with(&self.trigger)
            && (!self.single_trigger || clean.matches(self.trigger.as_str()).count() == 1);

        let in_bot_channel = match (&self.bot_channel, &message.channel.name) {
            (Some(bot_channel), Some(name)) => bot_channel == name,
            _ => false,
        };

        let effective_message = if triggered {
            clean[self.trigger.len()..].trim().to_string()
        } else {
            clean
        };

        Addressing {
            dm,
            triggered,
            mentioned,
            in_bot_channel,
            effective_message,
        }
    }

    /// The command text of a message meant for the bot, or `None` if the
    /// bot should ignore it. Bot authors are always ignored.
    pub fn command_text(&self, message: &IncomingMessage, bot_id: UserId) -> Option<String> {
        if message.author.bot {
            return None;
        }
        let addressing = self.resolve(message, bot_id);
        addressing
            .is_addressed()
            .then_some(addressing.effective_message)
    }

    /// Remove mentions of the bot, leaving other mentions alone.
    fn strip_mentions(&self, content: &str, bot_id: UserId) -> String {
        let bot_id = bot_id.get().to_string();
        self.mention_pattern
            .replace_all(content, |caps: &fancy_regex::Captures| -> String {
                if caps[1] == bot_id {
                    String::new()
                } else {
                    caps[0].to_string()
                }
            })
            .to_string()
    }
}
