//! Mock transport for testing.
//!
//! Keeps members in memory and records every reply instead of delivering it.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;

use super::Transport;
use crate::commands::output::Reply;
use crate::error::{Result, RouteError};
use crate::model::{ChannelId, GuildId, Member, User, UserId};

/// A transport that records sent replies.
#[derive(Debug, Default)]
pub struct MockTransport {
    me: Option<User>,
    members: HashMap<(GuildId, UserId), Member>,
    sent: Mutex<Vec<(ChannelId, Reply)>>,
}

impl MockTransport {
    /// Creates a mock transport whose bot user is `me`.
    pub fn new(me: User) -> Self {
        Self {
            me: Some(me),
            ..Self::default()
        }
    }

    /// Creates a mock transport where fetching the bot user fails.
    pub fn without_me() -> Self {
        Self::default()
    }

    /// Registers a member identity for a guild.
    pub fn with_member(mut self, guild: GuildId, member: Member) -> Self {
        self.members.insert((guild, member.user.id), member);
        self
    }

    /// Returns every reply sent so far.
    pub fn sent(&self) -> Vec<(ChannelId, Reply)> {
        self.sent
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Returns only the replies, dropping channel ids.
    pub fn replies(&self) -> Vec<Reply> {
        self.sent().into_iter().map(|(_, reply)| reply).collect()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn me(&self) -> Result<User> {
        self.me
            .clone()
            .ok_or_else(|| RouteError::transport("get me: 404 Not Found"))
    }

    async fn member(&self, guild: GuildId, user: UserId) -> Result<Member> {
        self.members.get(&(guild, user)).cloned().ok_or_else(|| {
            RouteError::transport(format!("member {guild} {user}: 404 Not Found"))
        })
    }

    async fn send(&self, channel: ChannelId, reply: Reply) -> Result<()> {
        self.sent
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((channel, reply));
        Ok(())
    }
}
