//! Canned response templates.
//!
//! Handles placeholder substitution in the configured responses.
//! Supports placeholders: %botname, %author, %framework, %invite,
//! %botchannel, %trigger (rendered once at startup) and %role (per use).

use std::collections::HashMap;

use crate::config::types::{Config, Response};

/// Names of the canned responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResponseKey {
    Help,
    InviteLink,
    Info,
    CommandListing,
    ColorRoleListing,
    ColorRoleAdded,
    ColorRoleRemoved,
    ColorRoleFailed,
    UnknownColorRole,
    GuildOnly,
    UnknownCommand,
}

/// Values substituted into every template.
#[derive(Debug, Clone, Default)]
pub struct TemplateContext {
    pub bot_name: String,
    pub author: String,
    pub framework: String,
    pub invite_link: String,
    pub bot_channel: String,
    pub trigger: String,
}

impl TemplateContext {
    pub fn from_config(config: &Config) -> Self {
        Self {
            bot_name: config.bot.name.clone(),
            author: config.bot.author.clone(),
            framework: config.bot.framework.clone(),
            invite_link: config.bot.invite_link.clone(),
            bot_channel: config.addressing.bot_channel.clone(),
            trigger: config.addressing.trigger.clone(),
        }
    }

    /// Substitute the startup placeholders in a single pass, so text coming
    /// from a substituted value is never expanded again.
    pub fn render(&self, template: &str) -> String {
        substitute(
            template,
            &[
                ("%botname", self.bot_name.as_str()),
                ("%botchannel", self.bot_channel.as_str()),
                ("%author", self.author.as_str()),
                ("%framework", self.framework.as_str()),
                ("%invite", self.invite_link.as_str()),
                ("%trigger", self.trigger.as_str()),
            ],
        )
    }
}

/// Replace every `%name` in `template` with its value. Unknown `%` tokens are
/// kept as they are.
fn substitute(template: &str, placeholders: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(pos) = rest.find('%') {
        out.push_str(&rest[..pos]);
        let tail = &rest[pos..];
        match placeholders.iter().find(|(name, _)| tail.starts_with(name)) {
            Some((name, value)) => {
                out.push_str(value);
                rest = &tail[name.len()..];
            }
            None => {
                out.push('%');
                rest = &tail[1..];
            }
        }
    }

    out.push_str(rest);
    out
}

const ROLE_PLACEHOLDER: &str = "%role";

/// Rendered responses, kept split around `%role`. Disabled responses are
/// absent.
#[derive(Debug, Clone, Default)]
pub struct ResponseTable {
    responses: HashMap<ResponseKey, Vec<String>>,
}

impl ResponseTable {
    /// Render every enabled response from the config.
    pub fn from_config(config: &Config) -> Self {
        let ctx = TemplateContext::from_config(config);
        let r = &config.responses;

        let mut help = r.help.clone();
        if config.addressing.enable_bot_channel_addressing && r.bot_channel_hint.enabled {
            help.text.push_str(&r.bot_channel_hint.text);
        }

        let entries: [(ResponseKey, &Response); 11] = [
            (ResponseKey::Help, &help),
            (ResponseKey::InviteLink, &r.invite_link),
            (ResponseKey::Info, &r.info),
            (ResponseKey::CommandListing, &r.command_listing),
            (ResponseKey::ColorRoleListing, &r.color_role_listing),
            (ResponseKey::ColorRoleAdded, &r.color_role_added),
            (ResponseKey::ColorRoleRemoved, &r.color_role_removed),
            (ResponseKey::ColorRoleFailed, &r.color_role_failed),
            (ResponseKey::UnknownColorRole, &r.unknown_color_role),
            (ResponseKey::GuildOnly, &r.guild_only),
            (ResponseKey::UnknownCommand, &r.unknown_command),
        ];

        let responses = entries
            .into_iter()
            .filter(|(_, response)| response.enabled)
            .map(|(key, response)| {
                let parts = response
                    .text
                    .split(ROLE_PLACEHOLDER)
                    .map(|part| ctx.render(part))
                    .collect();
                (key, parts)
            })
            .collect();

        Self { responses }
    }

    /// The rendered response, or `None` if it is disabled.
    pub fn get(&self, key: ResponseKey) -> Option<String> {
        self.get_with_role(key, ROLE_PLACEHOLDER)
    }

    /// The rendered response with `%role` filled in.
    pub fn get_with_role(&self, key: ResponseKey, role: &str) -> Option<String> {
        self.responses.get(&key).map(|parts| parts.join(role))
    }
}
