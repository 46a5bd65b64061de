//! Test fixtures: canned messages and a recording platform.

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use serenity::async_trait;
use serenity::model::id::{ChannelId, GuildId, RoleId, UserId};

use crate::bot::platform::ChatPlatform;
use crate::common::error::{PlatformError, PlatformResult};
use crate::common::{Author, ChannelRef, GuildRef, IncomingMessage};

pub const BOT_ID: UserId = UserId::new(900);
pub const AUTHOR_ID: UserId = UserId::new(42);
pub const GUILD_ID: GuildId = GuildId::new(7);
pub const CHANNEL_ID: ChannelId = ChannelId::new(55);

pub fn guild_message(content: &str) -> IncomingMessage {
    IncomingMessage {
        content: content.to_string(),
        author: Author {
            id: AUTHOR_ID,
            tag: "soapy#1098".to_string(),
            bot: false,
        },
        channel: ChannelRef {
            id: CHANNEL_ID,
            name: Some("general".to_string()),
        },
        guild: Some(GuildRef {
            id: GUILD_ID,
            name: "Rain Club".to_string(),
        }),
        mentions: HashSet::new(),
    }
}

pub fn dm_message(content: &str) -> IncomingMessage {
    IncomingMessage {
        guild: None,
        channel: ChannelRef {
            id: CHANNEL_ID,
            name: None,
        },
        ..guild_message(content)
    }
}

/// An outbound call seen by the recording platform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Send(String),
    Reply(String),
    AddRole(RoleId),
    RemoveRole(RoleId),
}

#[derive(Debug, Default)]
struct State {
    calls: Vec<Call>,
    guild_roles: HashMap<String, RoleId>,
    member_roles: HashSet<RoleId>,
    fail_adds: bool,
    fail_removes: bool,
}

/// In-memory platform with one guild and one member.
#[derive(Debug, Default)]
pub struct RecordingPlatform {
    state: Mutex<State>,
}

impl RecordingPlatform {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create guild roles named after `names`, with ids 1, 2, ...
    pub fn with_roles(names: &[&str]) -> Self {
        let platform = Self::new();
        {
            let mut state = platform.state.lock().unwrap();
            for (i, name) in names.iter().enumerate() {
                state
                    .guild_roles
                    .insert(name.to_string(), RoleId::new(i as u64 + 1));
            }
        }
        platform
    }

    pub fn role_id(&self, name: &str) -> RoleId {
        self.state.lock().unwrap().guild_roles[name]
    }

    pub fn give_member_role(&self, name: &str) {
        let mut state = self.state.lock().unwrap();
        let role = state.guild_roles[name];
        state.member_roles.insert(role);
    }

    pub fn member_has(&self, name: &str) -> bool {
        let state = self.state.lock().unwrap();
        state
            .guild_roles
            .get(name)
            .is_some_and(|role| state.member_roles.contains(role))
    }

    pub fn fail_adds(&self) {
        self.state.lock().unwrap().fail_adds = true;
    }

    pub fn fail_removes(&self) {
        self.state.lock().unwrap().fail_removes = true;
    }

    pub fn calls(&self) -> Vec<Call> {
        self.state.lock().unwrap().calls.clone()
    }

    /// Text of every send and reply, in order.
    pub fn texts(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::Send(text) | Call::Reply(text) => Some(text),
                _ => None,
            })
            .collect()
    }

    pub fn role_mutations(&self) -> Vec<Call> {
        self.calls()
            .into_iter()
            .filter(|call| matches!(call, Call::AddRole(_) | Call::RemoveRole(_)))
            .collect()
    }
}

fn rejected(what: &'static str) -> PlatformError {
    PlatformError::Serenity(serenity::Error::Other(what))
}

#[async_trait]
impl ChatPlatform for RecordingPlatform {
    async fn send_message(&self, _channel_id: ChannelId, content: &str) -> PlatformResult<()> {
        self.state
            .lock()
            .unwrap()
            .calls
            .push(Call::Send(content.to_string()));
        Ok(())
    }

    async fn reply(&self, _message: &IncomingMessage, content: &str) -> PlatformResult<()> {
        self.state
            .lock()
            .unwrap()
            .calls
            .push(Call::Reply(content.to_string()));
        Ok(())
    }

    async fn find_role(&self, _guild_id: GuildId, name: &str) -> PlatformResult<Option<RoleId>> {
        Ok(self.state.lock().unwrap().guild_roles.get(name).copied())
    }

    async fn member_roles(&self, _guild_id: GuildId, _user_id: UserId) -> PlatformResult<Vec<RoleId>> {
        Ok(self.state.lock().unwrap().member_roles.iter().copied().collect())
    }

    async fn add_role(&self, _guild_id: GuildId, _user_id: UserId, role_id: RoleId) -> PlatformResult<()> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(Call::AddRole(role_id));
        if state.fail_adds {
            return Err(rejected("role add rejected"));
        }
        state.member_roles.insert(role_id);
        Ok(())
    }

    async fn remove_role(&self, _guild_id: GuildId, _user_id: UserId, role_id: RoleId) -> PlatformResult<()> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(Call::RemoveRole(role_id));
        if state.fail_removes {
            return Err(rejected("role remove rejected"));
        }
        state.member_roles.remove(&role_id);
        Ok(())
    }
}
