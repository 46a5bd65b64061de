//! Shared types used across the application.

use std::collections::HashSet;

use serenity::model::id::{ChannelId, GuildId, UserId};

/// Author of a chat message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Author {
    pub id: UserId,
    /// Display tag, e.g. `name#1234` or the bare username.
    pub tag: String,
    /// True for bot accounts (including this one).
    pub bot: bool,
}

/// Channel a message arrived on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelRef {
    pub id: ChannelId,
    /// Channel name, when known. DMs have none.
    pub name: Option<String>,
}

/// Guild a message arrived in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuildRef {
    pub id: GuildId,
    pub name: String,
}

/// One received chat message, detached from the gateway library.
#[derive(Debug, Clone)]
pub struct IncomingMessage {
    pub content: String,
    pub author: Author,
    pub channel: ChannelRef,
    /// `None` for direct messages.
    pub guild: Option<GuildRef>,
    pub mentions: HashSet<UserId>,
}

impl IncomingMessage {
    /// Whether this is a direct message (no originating guild).
    pub fn is_direct(&self) -> bool {
        self.guild.is_none()
    }

    /// Whether the given user is in the mention set.
    pub fn mentions_user(&self, user_id: UserId) -> bool {
        self.mentions.contains(&user_id)
    }
}
