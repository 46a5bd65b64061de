//! Self-assignable color roles.
//!
//! A member holds at most one of the configured color roles. Asking for a
//! role you already have removes it; asking for another swaps it in.

use serenity::model::id::{GuildId, RoleId, UserId};
use tracing::{debug, error};

use crate::bot::platform::ChatPlatform;
use crate::common::error::RoleMutationError;

/// What a toggle did to the member.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorRoleChange {
    Added,
    Removed,
}

/// The fixed, ordered set of color role names.
#[derive(Debug, Clone, Default)]
pub struct ColorRoles {
    names: Vec<String>,
}

impl ColorRoles {
    pub fn new(names: Vec<String>) -> Self {
        Self { names }
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Match free text against the configured names, ignoring case and
    /// surrounding whitespace. Returns the name as configured.
    pub fn resolve(&self, requested: &str) -> Option<&str> {
        let requested = requested.trim().to_lowercase();
        self.names
            .iter()
            .find(|name| name.to_lowercase() == requested)
            .map(String::as_str)
    }

    /// Toggle `role_name` for a member.
    ///
    /// Other color roles the member holds are removed before the new one is
    /// added. A failure removing one of those is logged and does not stop
    /// the add.
    pub async fn toggle(
        &self,
        platform: &dyn ChatPlatform,
        guild_id: GuildId,
        user_id: UserId,
        role_name: &str,
    ) -> Result<ColorRoleChange, RoleMutationError> {
        let role_id = find_role(platform, guild_id, role_name).await?;
        let held = platform
            .member_roles(guild_id, user_id)
            .await
            .map_err(|source| RoleMutationError::LookupFailed { guild_id, source })?;

        if held.contains(&role_id) {
            platform
                .remove_role(guild_id, user_id, role_id)
                .await
                .map_err(|source| RoleMutationError::RemoveFailed {
                    role_id,
                    user_id,
                    source,
                })?;
            debug!("Removed color role {} from {}", role_name, user_id);
            return Ok(ColorRoleChange::Removed);
        }

        for other in self.names.iter().filter(|name| name.as_str() != role_name) {
            let other_id = match find_role(platform, guild_id, other).await {
                Ok(id) => id,
                Err(RoleMutationError::RoleMissing { .. }) => continue,
                Err(e) => {
                    error!("{}", e);
                    continue;
                }
            };
            if !held.contains(&other_id) {
                continue;
            }
            if let Err(source) = platform.remove_role(guild_id, user_id, other_id).await {
                let e = RoleMutationError::RemoveFailed {
                    role_id: other_id,
                    user_id,
                    source,
                };
                error!("{}", e);
            }
        }

        platform
            .add_role(guild_id, user_id, role_id)
            .await
            .map_err(|source| RoleMutationError::AddFailed {
                role_id,
                user_id,
                source,
            })?;
        debug!("Added color role {} to {}", role_name, user_id);
        Ok(ColorRoleChange::Added)
    }
}

async fn find_role(
    platform: &dyn ChatPlatform,
    guild_id: GuildId,
    name: &str,
) -> Result<RoleId, RoleMutationError> {
    platform
        .find_role(guild_id, name)
        .await
        .map_err(|source| RoleMutationError::LookupFailed { guild_id, source })?
        .ok_or_else(|| RoleMutationError::RoleMissing {
            name: name.to_string(),
            guild_id,
        })
}
