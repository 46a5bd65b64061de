//! Outbound calls the bot makes against the chat platform.
//!
//! The command logic only talks to this trait; the serenity-backed
//! implementation lives in `discord::platform`.

use serenity::async_trait;
use serenity::model::id::{ChannelId, GuildId, RoleId, UserId};

use crate::common::error::PlatformResult;
use crate::common::IncomingMessage;

#[async_trait]
pub trait ChatPlatform: Send + Sync {
    /// Plain send to a channel.
    async fn send_message(&self, channel_id: ChannelId, content: &str) -> PlatformResult<()>;

    /// Reply to a message, mentioning its author.
    async fn reply(&self, message: &IncomingMessage, content: &str) -> PlatformResult<()>;

    /// Look up a guild role by its exact name.
    async fn find_role(&self, guild_id: GuildId, name: &str) -> PlatformResult<Option<RoleId>>;

    /// Roles currently held by a guild member.
    async fn member_roles(&self, guild_id: GuildId, user_id: UserId) -> PlatformResult<Vec<RoleId>>;

    async fn add_role(&self, guild_id: GuildId, user_id: UserId, role_id: RoleId) -> PlatformResult<()>;

    async fn remove_role(&self, guild_id: GuildId, user_id: UserId, role_id: RoleId) -> PlatformResult<()>;
}
