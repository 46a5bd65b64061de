//! Serenity-backed implementation of [`ChatPlatform`].

use std::sync::Arc;

use serenity::async_trait;
use serenity::cache::Cache;
use serenity::http::Http;
use serenity::model::id::{ChannelId, GuildId, RoleId, UserId};
use serenity::model::mention::Mentionable;
use serenity::prelude::*;

use crate::bot::ChatPlatform;
use crate::common::error::PlatformResult;
use crate::common::IncomingMessage;

const AUDIT_LOG_REASON: &str = "Color role requested by member";

/// Outbound calls over a live gateway connection.
#[derive(Clone)]
pub struct SerenityPlatform {
    http: Arc<Http>,
    cache: Arc<Cache>,
}

impl SerenityPlatform {
    pub fn new(context: &Context) -> Self {
        Self {
            http: context.http.clone(),
            cache: context.cache.clone(),
        }
    }

    fn cached_role(&self, guild_id: GuildId, name: &str) -> Option<Option<RoleId>> {
        let guild = self.cache.guild(guild_id)?;
        Some(
            guild
                .roles
                .values()
                .find(|role| role.name == name)
                .map(|role| role.id),
        )
    }
}

#[async_trait]
impl ChatPlatform for SerenityPlatform {
    async fn send_message(&self, channel_id: ChannelId, content: &str) -> PlatformResult<()> {
        channel_id.say(&self.http, content).await?;
        Ok(())
    }

    async fn reply(&self, message: &IncomingMessage, content: &str) -> PlatformResult<()> {
        let content = format!("{}, {}", message.author.id.mention(), content);
        message.channel.id.say(&self.http, content).await?;
        Ok(())
    }

    async fn find_role(&self, guild_id: GuildId, name: &str) -> PlatformResult<Option<RoleId>> {
        if let Some(role) = self.cached_role(guild_id, name) {
            return Ok(role);
        }

        let roles = self.http.get_guild_roles(guild_id).await?;
        Ok(roles
            .into_iter()
            .find(|role| role.name == name)
            .map(|role| role.id))
    }

    async fn member_roles(&self, guild_id: GuildId, user_id: UserId) -> PlatformResult<Vec<RoleId>> {
        // Ask the API; the cache lags behind our own role changes.
        let member = self.http.get_member(guild_id, user_id).await?;
        Ok(member.roles)
    }

    async fn add_role(&self, guild_id: GuildId, user_id: UserId, role_id: RoleId) -> PlatformResult<()> {
        self.http
            .add_member_role(guild_id, user_id, role_id, Some(AUDIT_LOG_REASON))
            .await?;
        Ok(())
    }

    async fn remove_role(&self, guild_id: GuildId, user_id: UserId, role_id: RoleId) -> PlatformResult<()> {
        self.http
            .remove_member_role(guild_id, user_id, role_id, Some(AUDIT_LOG_REASON))
            .await?;
        Ok(())
    }
}
