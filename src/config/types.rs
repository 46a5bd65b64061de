//! Configuration type definitions.
//!
//! Every section is optional in the config file; missing sections and
//! fields fall back to the built-in bot below.

use std::collections::BTreeMap;

use serde::Deserialize;

/// Root configuration structure.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    pub bot: BotConfig,
    pub addressing: AddressingConfig,
    pub output: OutputConfig,
    /// Command name -> aliases and description. Sorted by name.
    pub commands: BTreeMap<String, CommandConfig>,
    pub responses: Responses,
    /// Self-assignable, mutually exclusive color roles.
    pub color_roles: Vec<String>,
}

/// Identity strings interpolated into responses.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BotConfig {
    pub name: String,
    pub author: String,
    pub framework: String,
    pub invite_link: String,
}

/// How users get the bot's attention.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AddressingConfig {
    /// Command prefix.
    pub trigger: String,
    /// Require the trigger to occur exactly once in the message.
    pub single_trigger: bool,
    /// Channel where every message is directed at the bot.
    pub bot_channel: String,
    pub enable_bot_channel_addressing: bool,
}

/// Outbound message and transcript settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Log every message seen, not just the ones addressed to the bot.
    pub log_all_messages: bool,
    /// Mention the author when replying in a guild.
    pub reply_mention: bool,
    pub chunk_delimiter: String,
    pub char_limit: usize,
}

/// A command's aliases and description.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct CommandConfig {
    pub aliases: Vec<String>,
    pub description: String,
}

/// A canned response template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub text: String,
    pub enabled: bool,
}

/// All canned responses the bot uses. In the config file each response may
/// override just its text or just its `enabled` flag.
#[derive(Debug, Clone, Deserialize)]
#[serde(from = "ResponseOverrides")]
pub struct Responses {
    pub help: Response,
    /// Appended to `help` when bot-channel addressing is on.
    pub bot_channel_hint: Response,
    pub invite_link: Response,
    pub info: Response,
    pub command_listing: Response,
    pub color_role_listing: Response,
    pub color_role_added: Response,
    pub color_role_removed: Response,
    pub color_role_failed: Response,
    pub unknown_color_role: Response,
    pub guild_only: Response,
    pub unknown_command: Response,
}

/// One response as written in the config file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct ResponseOverride {
    text: Option<String>,
    enabled: Option<bool>,
}

impl ResponseOverride {
    fn apply(self, response: &mut Response) {
        if let Some(text) = self.text {
            response.text = text;
        }
        if let Some(enabled) = self.enabled {
            response.enabled = enabled;
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ResponseOverrides {
    help: ResponseOverride,
    bot_channel_hint: ResponseOverride,
    invite_link: ResponseOverride,
    info: ResponseOverride,
    command_listing: ResponseOverride,
    color_role_listing: ResponseOverride,
    color_role_added: ResponseOverride,
    color_role_removed: ResponseOverride,
    color_role_failed: ResponseOverride,
    unknown_color_role: ResponseOverride,
    guild_only: ResponseOverride,
    unknown_command: ResponseOverride,
}

impl From<ResponseOverrides> for Responses {
    fn from(overrides: ResponseOverrides) -> Self {
        let mut responses = Responses::default();
        overrides.help.apply(&mut responses.help);
        overrides.bot_channel_hint.apply(&mut responses.bot_channel_hint);
        overrides.invite_link.apply(&mut responses.invite_link);
        overrides.info.apply(&mut responses.info);
        overrides.command_listing.apply(&mut responses.command_listing);
        overrides.color_role_listing.apply(&mut responses.color_role_listing);
        overrides.color_role_added.apply(&mut responses.color_role_added);
        overrides.color_role_removed.apply(&mut responses.color_role_removed);
        overrides.color_role_failed.apply(&mut responses.color_role_failed);
        overrides.unknown_color_role.apply(&mut responses.unknown_color_role);
        overrides.guild_only.apply(&mut responses.guild_only);
        overrides.unknown_command.apply(&mut responses.unknown_command);
        responses
    }
}

impl Response {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            enabled: true,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bot: BotConfig::default(),
            addressing: AddressingConfig::default(),
            output: OutputConfig::default(),
            commands: default_commands(),
            responses: Responses::default(),
            color_roles: [
                "Blu",
                "Overwatch Orange",
                "Soapy Purple",
                "Pocket Camp Purple",
                "Ukuletea Yellow",
                "Wasabi Green",
                "greys biology",
                "Garnet Red",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
        }
    }
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            name: "Rainbot".to_string(),
            author: "the Rainbot contributors".to_string(),
            framework: "serenity".to_string(),
            invite_link: "https://discord.com/oauth2/authorize?client_id=384488531738886154&scope=bot&permissions=0"
                .to_string(),
        }
    }
}

impl Default for AddressingConfig {
    fn default() -> Self {
        Self {
            trigger: "-".to_string(),
            single_trigger: false,
            bot_channel: String::new(),
            enable_bot_channel_addressing: false,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            log_all_messages: false,
            reply_mention: false,
            chunk_delimiter: "\n".to_string(),
            char_limit: 1800,
        }
    }
}

fn command(aliases: &[&str], description: &str) -> CommandConfig {
    CommandConfig {
        aliases: aliases.iter().map(|a| a.to_string()).collect(),
        description: description.to_string(),
    }
}

fn default_commands() -> BTreeMap<String, CommandConfig> {
    BTreeMap::from([
        (
            "request_help".to_string(),
            command(&["help", "tutorial"], "Help on using this bot"),
        ),
        (
            "request_invite_link".to_string(),
            command(
                &["invite", "link", "server", "discord"],
                "Invite this bot to your Discord server!",
            ),
        ),
        (
            "request_info".to_string(),
            command(&["info", "about", "information"], "See some information about this bot"),
        ),
        (
            "request_command_listing".to_string(),
            command(
                &["commands", "command", "commandlist", "commandlisting"],
                "See all of this bot's commands",
            ),
        ),
        (
            "color_role".to_string(),
            command(
                &["color", "assigncolor", "colorrole", "role"],
                "Give yourself a color role!",
            ),
        ),
        (
            "color_role_list".to_string(),
            command(
                &["colors", "colorlist", "colorroles", "colorrolelist"],
                "See what color roles there are",
            ),
        ),
    ])
}

const HELP_TEXT: &str = "This is **%botname**!

**Here's some things you can try:** _(Commands)_
• `%triggerhelp` — See this help message!
• `%triggerinvite` — Add this bot to your own Discord server!
• `%triggerinfo` — Get some basic information about this bot!
• `%triggercommands` — See all the commands you can use!

**How to talk to this bot:**
There are a few different ways you can get this bot's attention. The first way is to start your message with `%trigger` so it know you are addressing it. Another way is to simply @mention it with your message. You can also simply send it a direct message!";

const INFO_TEXT: &str = "**%botname**
Made with :heart: by **%author** with **%framework**
Ask if you'd like to `%triggerinvite` this bot to your Discord server!
Ask for `%triggerhelp` to get started!";

impl Default for Responses {
    fn default() -> Self {
        Self {
            help: Response::new(HELP_TEXT),
            bot_channel_hint: Response::new(
                " One final way to talk to this bot is to simply talk in the #%botchannel channel.",
            ),
            invite_link: Response::new("Thank you for inviting the bot to your server!\n%invite"),
            info: Response::new(INFO_TEXT),
            command_listing: Response::new("Here's all the commands you can use with this bot:"),
            color_role_listing: Response::new("Here are the color roles you can get:"),
            color_role_added: Response::new("You now have the %role color role!"),
            color_role_removed: Response::new("You no longer have the %role color role."),
            color_role_failed: Response::new(
                "I couldn't change your %role color role right now, sorry!",
            ),
            unknown_color_role: Response::new(
                "I'm sorry, that color isn't available! (See `%triggercolors`)",
            ),
            guild_only: Response::new("You can only use that command in servers!"),
            unknown_command: Response::new("I'm sorry, that is an unknown command!"),
        }
    }
}
