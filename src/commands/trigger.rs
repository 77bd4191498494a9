//! Per-invocation context handed to command handlers.

use std::sync::Arc;

use tracing::warn;

use super::command::Command;
use super::flags::{BoundOptions, FlagSet, Options};
use super::help;
use super::output::Reply;
use super::prefix::Prefix;
use super::router::Router;
use crate::error::{Result, RouteError};
use crate::model::{Member, Message};

/// Display name used when the bot's identity can't be fetched.
pub const DEFAULT_DISPLAY_NAME: &str = "chatroute";

/// The context that triggered a command.
pub struct Trigger {
    pub router: Arc<Router>,
    pub message: Message,
    pub prefix: Prefix,
    pub command: Command,
    pub flag_set: FlagSet,
    /// Positional arguments left after flag parsing.
    pub args: Vec<String>,
    /// Diagnostic text; shown above usage output.
    pub output: String,
    flags: BoundOptions,
}

impl Trigger {
    pub(crate) fn new(
        router: Arc<Router>,
        message: Message,
        prefix: Prefix,
        command: Command,
        flag_set: FlagSet,
        flags: BoundOptions,
    ) -> Self {
        Self {
            args: flag_set.args().to_vec(),
            router,
            message,
            prefix,
            command,
            flag_set,
            output: String::new(),
            flags,
        }
    }

    /// The bound options, as the type the command declared.
    pub fn flags<T: Options>(&self) -> Result<&T> {
        self.flags.downcast_ref::<T>().ok_or_else(|| {
            RouteError::internal(format!(
                "command {} does not take options of type {}",
                self.command.name(),
                std::any::type_name::<T>()
            ))
        })
    }

    /// An empty reply.
    pub fn reply(&self) -> Reply {
        Reply::default()
    }

    /// Sends a reply to the channel the command came from.
    pub async fn send(&self, reply: Reply) -> Result<()> {
        self.router
            .transport()
            .send(self.message.channel, reply)
            .await
    }

    /// Usage listing for this trigger's command, with any captured output.
    pub fn usage(&self) -> Reply {
        help::render_usage(&self.command, &self.output)
    }

    /// The bot's member identity in the trigger's guild.
    pub async fn bot_member(&self) -> Result<Member> {
        let me = self.router.transport().me().await?;
        self.router
            .transport()
            .member(self.message.guild, me.id)
            .await
    }

    /// The bot's name as seen in the trigger's guild.
    pub async fn display_name(&self) -> String {
        let transport = self.router.transport();

        let me = match transport.me().await {
            Ok(me) => me,
            Err(e) => {
                warn!(error = %e, "get me");
                return DEFAULT_DISPLAY_NAME.to_string();
            }
        };

        if self.message.guild.is_base() {
            return me.name;
        }

        match transport.member(self.message.guild, me.id).await {
            Ok(member) => member.display_name().to_string(),
            Err(e) => {
                warn!(guild = %self.message.guild, error = %e, "get bot member");
                DEFAULT_DISPLAY_NAME.to_string()
            }
        }
    }
}

impl std::fmt::Debug for Trigger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Trigger")
            .field("message", &self.message)
            .field("prefix", &self.prefix)
            .field("command", &self.command)
            .field("args", &self.args)
            .field("output", &self.output)
            .finish_non_exhaustive()
    }
}
