//! Chat platform abstraction.
//!
//! The dispatch pipeline only needs three things from the platform: the bot's
//! own user, the bot's member identity in a guild, and a way to send replies.

mod console;
mod mock;

pub use console::ConsoleTransport;
pub use mock::MockTransport;

use async_trait::async_trait;

use crate::commands::output::Reply;
use crate::error::Result;
use crate::model::{ChannelId, GuildId, Member, User, UserId};

/// Trait defining the interface to the chat platform.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Returns the bot's own user.
    async fn me(&self) -> Result<User>;

    /// Returns a user's member identity in a guild.
    async fn member(&self, guild: GuildId, user: UserId) -> Result<Member>;

    /// Sends a reply to a channel.
    async fn send(&self, channel: ChannelId, reply: Reply) -> Result<()>;
}
