//! Console transport used by the `chatroute` binary.
//!
//! Replies are printed to stdout; the bot's identity comes from configuration.

use async_trait::async_trait;
use tokio::io::{AsyncWriteExt, Stdout};
use tokio::sync::Mutex;

use super::Transport;
use crate::commands::output::Reply;
use crate::error::{Result, RouteError};
use crate::model::{ChannelId, GuildId, Member, User, UserId};

/// A transport that talks to a terminal.
pub struct ConsoleTransport {
    me: User,
    nick: Option<String>,
    stdout: Mutex<Stdout>,
}

impl ConsoleTransport {
    pub fn new(me: User, nick: Option<String>) -> Self {
        Self {
            me,
            nick,
            stdout: Mutex::new(tokio::io::stdout()),
        }
    }
}

#[async_trait]
impl Transport for ConsoleTransport {
    async fn me(&self) -> Result<User> {
        Ok(self.me.clone())
    }

    async fn member(&self, guild: GuildId, user: UserId) -> Result<Member> {
        if guild.is_base() {
            return Err(RouteError::transport("no members outside a guild"));
        }
        if user != self.me.id {
            return Err(RouteError::transport(format!(
                "member {guild} {user}: unknown user"
            )));
        }

        let member = Member::new(self.me.clone());
        Ok(match &self.nick {
            Some(nick) => member.with_nick(nick.clone()),
            None => member,
        })
    }

    async fn send(&self, channel: ChannelId, reply: Reply) -> Result<()> {
        let text = format!("[#{channel}] {reply}\n");
        let mut stdout = self.stdout.lock().await;
        stdout
            .write_all(text.as_bytes())
            .await
            .map_err(|e| RouteError::transport(format!("write reply: {e}")))?;
        stdout
            .flush()
            .await
            .map_err(|e| RouteError::transport(format!("flush reply: {e}")))
    }
}
