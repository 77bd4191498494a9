//! Chat platform identity types.
//!
//! These mirror the handful of platform objects the dispatch pipeline needs:
//! guild/channel/user ids, the bot's user and member identity, and incoming
//! messages.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::RouteError;

macro_rules! snowflake {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(pub u64);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.fmt(f)
            }
        }

        impl FromStr for $name {
            type Err = RouteError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.trim().parse().map(Self).map_err(|e| {
                    RouteError::config(format!(
                        "invalid {} {:?}: {}",
                        stringify!($name),
                        s,
                        e
                    ))
                })
            }
        }

        impl From<u64> for $name {
            fn from(id: u64) -> Self {
                Self(id)
            }
        }
    };
}

snowflake!(
    /// Identifier of a guild (server).
    GuildId
);
snowflake!(
    /// Identifier of a text channel.
    ChannelId
);
snowflake!(
    /// Identifier of a user.
    UserId
);

impl GuildId {
    /// Key for base configuration; also the guild of direct messages.
    pub const BASE: GuildId = GuildId(0);

    /// Returns true for the base guild.
    pub fn is_base(&self) -> bool {
        *self == Self::BASE
    }
}

/// A platform user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    #[serde(default)]
    pub bot: bool,
}

impl User {
    /// Creates a non-bot user.
    pub fn new(id: impl Into<UserId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            bot: false,
        }
    }

    /// Marks the user as a bot account.
    pub fn bot(mut self) -> Self {
        self.bot = true;
        self
    }

    /// Mention token for the user.
    pub fn mention(&self) -> String {
        format!("<@{}>", self.id)
    }
}

/// A user's identity within a guild.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    pub user: User,
    #[serde(default)]
    pub nick: Option<String>,
}

impl Member {
    pub fn new(user: User) -> Self {
        Self { user, nick: None }
    }

    pub fn with_nick(mut self, nick: impl Into<String>) -> Self {
        self.nick = Some(nick.into());
        self
    }

    /// Mention token for the member (nickname form).
    pub fn mention(&self) -> String {
        format!("<@!{}>", self.user.id)
    }

    /// Nickname if set, otherwise the username.
    pub fn display_name(&self) -> &str {
        match self.nick.as_deref() {
            Some(nick) if !nick.is_empty() => nick,
            _ => &self.user.name,
        }
    }
}

/// An incoming chat message.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Message {
    pub guild: GuildId,
    pub channel: ChannelId,
    pub author: User,
    pub content: String,
}

impl Message {
    pub fn new(
        guild: impl Into<GuildId>,
        channel: impl Into<ChannelId>,
        author: User,
        content: impl Into<String>,
    ) -> Self {
        Self {
            guild: guild.into(),
            channel: channel.into(),
            author,
            content: content.into(),
        }
    }

    /// Content split into independently dispatched lines.
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.content.split('\n')
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_mention() {
        let user = User::new(1234567890, "User");
        assert_eq!(user.mention(), "<@1234567890>");
        assert!(!user.bot);
        assert!(user.bot().bot);
    }

    #[test]
    fn test_member_mention_and_display_name() {
        let member = Member::new(User::new(42, "User"));
        assert_eq!(member.mention(), "<@!42>");
        assert_eq!(member.display_name(), "User");

        let member = member.with_nick("Nick");
        assert_eq!(member.display_name(), "Nick");
    }

    #[test]
    fn test_empty_nick_falls_back_to_username() {
        let member = Member::new(User::new(42, "User")).with_nick("");
        assert_eq!(member.display_name(), "User");
    }

    #[test]
    fn test_guild_id_parse() {
        assert_eq!("123".parse::<GuildId>().unwrap(), GuildId(123));
        assert!(" 7 ".parse::<GuildId>().is_ok());
        assert!("abc".parse::<GuildId>().is_err());
        assert!(GuildId::BASE.is_base());
        assert!(!GuildId(1).is_base());
    }

    #[test]
    fn test_message_lines() {
        let msg = Message::new(1, 2, User::new(3, "a"), "!one\n!two");
        let lines: Vec<_> = msg.lines().collect();
        assert_eq!(lines, vec!["!one", "!two"]);
    }
}
