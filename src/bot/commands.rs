//! Bot commands (-help, -color, etc).
//!
//! Handles command parsing and execution for messages addressed to the bot.

use tracing::{debug, error, info};

use crate::bot::chunker::Chunker;
use crate::bot::color_roles::{ColorRoleChange, ColorRoles};
use crate::bot::platform::ChatPlatform;
use crate::bot::registry::{CommandKind, CommandRegistry};
use crate::bot::templates::{ResponseKey, ResponseTable};
use crate::common::error::{AppError, ChunkError};
use crate::common::IncomingMessage;
use crate::config::types::Config;

/// A command word with its arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation<'a> {
    /// First word, lower-cased.
    pub key: String,
    /// Everything after the first word, leading whitespace removed.
    pub arg: &'a str,
    /// Remaining whitespace-separated words.
    pub args: Vec<&'a str>,
}

impl<'a> Invocation<'a> {
    /// Split command text into key and arguments. `None` for blank text.
    pub fn parse(text: &'a str) -> Option<Self> {
        let text = text.trim();
        let mut words = text.split_whitespace();
        let first = words.next()?;

        Some(Self {
            key: first.to_lowercase(),
            arg: text[first.len()..].trim_start(),
            args: words.collect(),
        })
    }
}

/// Command handler for the bot.
pub struct CommandHandler {
    registry: CommandRegistry,
    responses: ResponseTable,
    color_roles: ColorRoles,
    chunker: Chunker,
    trigger: String,
    reply_mention: bool,
}

impl CommandHandler {
    pub fn new(config: &Config) -> Result<Self, AppError> {
        Ok(Self {
            registry: CommandRegistry::from_config(&config.commands)?,
            responses: ResponseTable::from_config(config),
            color_roles: ColorRoles::new(config.color_roles.clone()),
            chunker: Chunker::new(config.output.chunk_delimiter.clone(), config.output.char_limit)?,
            trigger: config.addressing.trigger.clone(),
            reply_mention: config.output.reply_mention,
        })
    }

    /// Run the command in `text` (already stripped of mentions and trigger).
    ///
    /// Returns `true` if a registered command ran; unknown commands get the
    /// unknown-command response and return `false`.
    pub async fn handle_command(
        &self,
        platform: &dyn ChatPlatform,
        message: &IncomingMessage,
        text: &str,
    ) -> bool {
        let Some(invocation) = Invocation::parse(text) else {
            return false;
        };

        debug!(
            "Processing command: {} with args: {:?}",
            invocation.key, invocation.args
        );

        let Some(kind) = self.registry.lookup(&invocation.key) else {
            self.send_response(platform, message, ResponseKey::UnknownCommand, "")
                .await;
            return false;
        };

        match kind {
            CommandKind::Help => {
                self.send_response(platform, message, ResponseKey::Help, "").await
            }
            CommandKind::InviteLink => {
                self.send_response(platform, message, ResponseKey::InviteLink, "")
                    .await
            }
            CommandKind::Info => {
                self.send_response(platform, message, ResponseKey::Info, "").await
            }
            CommandKind::CommandListing => {
                let listing = self.command_listing();
                self.send_response(platform, message, ResponseKey::CommandListing, &listing)
                    .await
            }
            CommandKind::ColorRole => {
                self.handle_color_role(platform, message, invocation.arg).await
            }
            CommandKind::ColorRoleList => {
                let listing = self.color_role_listing();
                self.send_response(platform, message, ResponseKey::ColorRoleListing, &listing)
                    .await
            }
        }

        true
    }

    /// Handle -color <name>.
    async fn handle_color_role(
        &self,
        platform: &dyn ChatPlatform,
        message: &IncomingMessage,
        arg: &str,
    ) {
        let Some(guild) = &message.guild else {
            self.send_response(platform, message, ResponseKey::GuildOnly, "").await;
            return;
        };

        let Some(role_name) = self.color_roles.resolve(arg) else {
            self.send_response(platform, message, ResponseKey::UnknownColorRole, "")
                .await;
            return;
        };

        info!("Color role {} requested by {}", role_name, message.author.tag);

        let key = match self
            .color_roles
            .toggle(platform, guild.id, message.author.id, role_name)
            .await
        {
            Ok(ColorRoleChange::Added) => ResponseKey::ColorRoleAdded,
            Ok(ColorRoleChange::Removed) => ResponseKey::ColorRoleRemoved,
            Err(e) => {
                error!("Color role change failed in guild '{}': {}", guild.name, e);
                ResponseKey::ColorRoleFailed
            }
        };

        if let Some(text) = self.responses.get_with_role(key, role_name) {
            self.send_chunked(platform, message, &text).await;
        }
    }

    /// Bullet list of every command, sorted by command name.
    fn command_listing(&self) -> String {
        let lines: Vec<String> = self
            .registry
            .entries()
            .iter()
            .map(|entry| {
                let aliases: Vec<String> = entry
                    .aliases
                    .iter()
                    .enumerate()
                    .map(|(i, alias)| {
                        if i == 0 {
                            format!("**`{}{}`**", self.trigger, alias)
                        } else {
                            format!("`{}{}`", self.trigger, alias)
                        }
                    })
                    .collect();
                format!(
                    "• {}:\n\t\t**->** {}",
                    aliases.join(", "),
                    entry.description
                )
            })
            .collect();

        format!("\n{}", lines.join("\n"))
    }

    /// Bullet list of every color role.
    fn color_role_listing(&self) -> String {
        let lines: Vec<String> = self
            .color_roles
            .names()
            .iter()
            .map(|name| format!("• {}", name))
            .collect();

        format!("\n{}", lines.join("\n"))
    }

    /// Send a canned response with `suffix` appended. Disabled responses
    /// send nothing.
    async fn send_response(
        &self,
        platform: &dyn ChatPlatform,
        message: &IncomingMessage,
        key: ResponseKey,
        suffix: &str,
    ) {
        let Some(template) = self.responses.get(key) else {
            debug!("Response {:?} is disabled", key);
            return;
        };

        let text = format!("{}{}", template, suffix);
        self.send_chunked(platform, message, &text).await;
    }

    /// Send `text` in chunks: the first as an in-context reply, the rest as
    /// plain channel messages. Stops at the first chunk that can't be sent.
    async fn send_chunked(&self, platform: &dyn ChatPlatform, message: &IncomingMessage, text: &str) {
        for (i, chunk) in self.chunker.chunks(text).enumerate() {
            let chunk = match chunk {
                Ok(chunk) => chunk,
                Err(ChunkError::Unsplittable { fragment }) => {
                    error!("\t-> Can't split message into small enough pieces:");
                    error!("{{{}}}\n", fragment);
                    error!("\t<-!!");
                    return;
                }
                Err(e) => {
                    error!("Failed to chunk message: {}", e);
                    return;
                }
            };

            let result = if i == 0 && self.reply_mention && !message.is_direct() {
                platform.reply(message, chunk).await
            } else {
                platform.send_message(message.channel.id, chunk).await
            };

            if let Err(e) = result {
                error!("Failed to send message to channel {}: {}", message.channel.id, e);
                return;
            }
        }
    }
}
