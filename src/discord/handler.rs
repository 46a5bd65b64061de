//! Discord event handling.
//!
//! Turns gateway events into calls on the bot core and logs guild
//! membership changes.

use std::sync::Arc;

use serenity::cache::Cache;
use serenity::model::channel::Message;
use serenity::model::event::MessageUpdateEvent;
use serenity::model::gateway::Ready;
use serenity::model::guild::{Guild, UnavailableGuild};
use serenity::model::id::{ChannelId, GuildId};
use serenity::model::user::User;
use serenity::prelude::*;
use tracing::{debug, info};

use crate::bot::Bot;
use crate::common::{Author, ChannelRef, GuildRef, IncomingMessage};
use crate::discord::platform::SerenityPlatform;

/// Dispatches gateway events to the bot.
pub struct BotHandler {
    bot: Arc<Bot>,
}

impl BotHandler {
    pub fn new(bot: Arc<Bot>) -> Self {
        Self { bot }
    }

    pub async fn handle_ready(&self, ready: Ready) {
        info!("Logged in as {}!", ready.user.tag());
    }

    pub async fn handle_guild_create(&self, context: &Context, guild: Guild, is_new: Option<bool>) {
        if is_new == Some(true) {
            info!("Added to guild {} <{}>!", guild.name, guild.id);
            info!("Now a part of {} guilds!", context.cache.guild_count());
        } else {
            debug!("Guild available: {} <{}>", guild.name, guild.id);
        }
    }

    pub async fn handle_guild_delete(&self, context: &Context, incomplete: UnavailableGuild, full: Option<Guild>) {
        if incomplete.unavailable {
            debug!("Guild <{}> became unavailable", incomplete.id);
            return;
        }

        let name = full.map(|guild| guild.name).unwrap_or_default();
        info!("Removed from guild {} <{}>!", name, incomplete.id);
        info!("Now a part of {} guilds!", context.cache.guild_count());
    }

    pub async fn handle_message(&self, context: &Context, message: Message) {
        let incoming = to_incoming(&context.cache, &message);
        let bot_id = context.cache.current_user().id;
        let platform = SerenityPlatform::new(context);

        self.bot.on_message(&platform, &incoming, bot_id).await;
    }

    pub async fn handle_message_update(
        &self,
        context: &Context,
        new: Option<Message>,
        event: MessageUpdateEvent,
    ) {
        match edit_to_incoming(&context.cache, new.as_ref(), &event) {
            Some(incoming) => self.bot.on_message_edit(&incoming),
            None => debug!("Message <{}> edited without new content; skipping", event.id),
        }
    }
}

/// Detach a serenity message from the gateway, resolving guild and channel
/// names from the cache.
pub fn to_incoming(cache: &Cache, message: &Message) -> IncomingMessage {
    build_incoming(
        cache,
        message.guild_id,
        message.channel_id,
        &message.author,
        message.content.clone(),
        &message.mentions,
    )
}

/// The edited message. Uses the cached copy when there is one, otherwise
/// the fields carried by the update itself. Updates without an author or
/// content (embed resolution, pins) yield `None`.
pub fn edit_to_incoming(
    cache: &Cache,
    new: Option<&Message>,
    event: &MessageUpdateEvent,
) -> Option<IncomingMessage> {
    if let Some(message) = new {
        return Some(to_incoming(cache, message));
    }

    let author = event.author.as_ref()?;
    let content = event.content.clone()?;
    Some(build_incoming(
        cache,
        event.guild_id,
        event.channel_id,
        author,
        content,
        event.mentions.as_deref().unwrap_or_default(),
    ))
}

fn build_incoming(
    cache: &Cache,
    guild_id: Option<GuildId>,
    channel_id: ChannelId,
    author: &User,
    content: String,
    mentions: &[User],
) -> IncomingMessage {
    let (guild, channel_name) = match guild_id {
        Some(guild_id) => match cache.guild(guild_id) {
            Some(guild) => (
                Some(GuildRef {
                    id: guild_id,
                    name: guild.name.clone(),
                }),
                guild.channels.get(&channel_id).map(|c| c.name.clone()),
            ),
            None => (
                Some(GuildRef {
                    id: guild_id,
                    name: guild_id.to_string(),
                }),
                None,
            ),
        },
        None => (None, None),
    };

    IncomingMessage {
        content,
        author: Author {
            id: author.id,
            tag: author.tag(),
            bot: author.bot,
        },
        channel: ChannelRef {
            id: channel_id,
            name: channel_name,
        },
        guild,
        mentions: mentions.iter().map(|user| user.id).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serenity::model::id::UserId;

    fn user(id: u64, name: &str) -> User {
        let mut user = User::default();
        user.id = UserId::new(id);
        user.name = name.to_string();
        user
    }

    #[test]
    fn test_direct_message_has_no_guild() {
        let cache = Cache::new();
        let incoming = build_incoming(
            &cache,
            None,
            ChannelId::new(55),
            &user(42, "soapy"),
            "-help".to_string(),
            &[],
        );

        assert!(incoming.is_direct());
        assert_eq!(incoming.channel.name, None);
        assert_eq!(incoming.author.tag, "soapy");
        assert_eq!(incoming.content, "-help");
    }

    #[test]
    fn test_uncached_guild_falls_back_to_id() {
        let cache = Cache::new();
        let incoming = build_incoming(
            &cache,
            Some(GuildId::new(7)),
            ChannelId::new(55),
            &user(42, "soapy"),
            "<@900> hi".to_string(),
            &[user(900, "rainbot")],
        );

        let guild = incoming.guild.as_ref().unwrap();
        assert_eq!(guild.id, GuildId::new(7));
        assert_eq!(guild.name, "7");
        assert!(incoming.mentions_user(UserId::new(900)));
        assert!(!incoming.author.bot);
    }
}
