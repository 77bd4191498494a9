//! Line dispatch.
//!
//! Turns incoming chat messages into command invocations:
//! prefix → tokenize → lookup → bind flags → run handler.

use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Duration;

use futures::FutureExt;
use tracing::{debug, warn};

use super::command::Command;
use super::flags::{self, FlagError};
use super::help::{self, help_command};
use super::output::Reply;
use super::prefix::{Prefix, PrefixResolver};
use super::registry::Registry;
use super::tokenizer::tokenize;
use super::trigger::Trigger;
use crate::error::{Result, RouteError};
use crate::model::{Member, Message, User};
use crate::settings::SettingsStore;
use crate::transport::Transport;

/// Routes chat lines to registered commands.
pub struct Router {
    transport: Arc<dyn Transport>,
    settings: Arc<dyn SettingsStore>,
    registry: Registry,
    prefixes: PrefixResolver,
    handler_timeout: Option<Duration>,
}

impl Router {
    /// Creates a router with the built-in `help` command registered.
    pub fn new(transport: Arc<dyn Transport>, settings: Arc<dyn SettingsStore>) -> Self {
        let registry = Registry::new();
        if let Err(e) = registry.register(help_command()) {
            warn!(error = %e, "register help command");
        }

        Self {
            prefixes: PrefixResolver::new(Arc::clone(&settings)),
            transport,
            settings,
            registry,
            handler_timeout: None,
        }
    }

    /// Bounds every handler invocation; a timeout counts as a handler error.
    pub fn with_handler_timeout(mut self, timeout: Duration) -> Self {
        self.handler_timeout = Some(timeout);
        self
    }

    /// Registers a command.
    pub fn register(&self, command: Command) -> Result<()> {
        self.registry.register(command)
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn transport(&self) -> &Arc<dyn Transport> {
        &self.transport
    }

    pub fn settings(&self) -> &Arc<dyn SettingsStore> {
        &self.settings
    }

    pub fn prefixes(&self) -> &PrefixResolver {
        &self.prefixes
    }

    /// Handles an incoming message, one line at a time.
    ///
    /// Messages from bots (including this one) are ignored. Per-line failures
    /// are logged and never stop the remaining lines.
    pub async fn handle(self: &Arc<Self>, message: &Message) {
        if message.author.bot {
            debug!(author = %message.author.id, "ignore bot");
            return;
        }

        let me = match self.transport.me().await {
            Ok(me) => me,
            Err(e) => {
                warn!(error = %e, "get me");
                return;
            }
        };

        if message.author.id == me.id {
            debug!("ignore self");
            return;
        }

        let member = self.bot_member(message, &me).await;

        for line in message.lines() {
            match self.dispatch(message, &me, member.as_ref(), line).await {
                Ok(_) => {}
                Err(e) if e.is_help_request() => debug!(line, "usage shown"),
                Err(RouteError::NoCommand) => debug!(line, "no command after prefix"),
                Err(e) => warn!(line, error = %e, "handle line"),
            }
        }
    }

    /// The bot's member identity in the message's guild, if it has one.
    async fn bot_member(&self, message: &Message, me: &User) -> Option<Member> {
        if message.guild.is_base() {
            return None;
        }

        match self.transport.member(message.guild, me.id).await {
            Ok(member) => Some(member),
            Err(e) => {
                debug!(guild = %message.guild, error = %e, "no bot member, skipping mention prefix");
                None
            }
        }
    }

    /// Dispatches a single line.
    ///
    /// Returns `Ok(false)` when the line has no prefix, `Ok(true)` when a
    /// handler ran and succeeded.
    pub async fn dispatch(
        self: &Arc<Self>,
        message: &Message,
        me: &User,
        member: Option<&Member>,
        line: &str,
    ) -> Result<bool> {
        let Some(prefix) = self.prefixes.resolve(message.guild, me, member, line).await else {
            return Ok(false);
        };

        let trigger = match self.trigger(prefix, message, line) {
            Ok(trigger) => trigger,
            Err(e) => {
                self.report(message, &e).await;
                return Err(e);
            }
        };

        self.run(trigger).await?;
        Ok(true)
    }

    /// Builds a trigger for a line that starts with `prefix`.
    pub fn trigger(self: &Arc<Self>, prefix: Prefix, message: &Message, line: &str) -> Result<Trigger> {
        let (name, args) = tokenize(prefix.strip(line))?;

        let command = self
            .registry
            .lookup(&name)
            .ok_or(RouteError::CommandNotFound(name))?;

        let (bound, flag_set) = flags::bind(command.schema(), command.name(), &args)
            .map_err(|e| RouteError::flags(command.name(), e))?;

        Ok(Trigger::new(
            Arc::clone(self),
            message.clone(),
            prefix,
            command,
            flag_set,
            bound,
        ))
    }

    /// Runs a trigger's handler.
    pub async fn run(&self, trigger: Trigger) -> Result<()> {
        let command = trigger.command.clone();
        let name = command.name().to_string();
        debug!(command = %name, args = ?trigger.args, "run command");

        // A panicking handler only fails its own line.
        let handler = AssertUnwindSafe(command.run(trigger)).catch_unwind();
        let outcome = match self.handler_timeout {
            Some(timeout) => match tokio::time::timeout(timeout, handler).await {
                Ok(outcome) => outcome,
                Err(_) => Ok(Err(anyhow::anyhow!("timed out after {timeout:?}"))),
            },
            None => handler.await,
        };

        let result = outcome.unwrap_or_else(|panic| {
            let reason = panic_reason(panic.as_ref());
            warn!(command = %name, reason, "handler panicked");
            Err(anyhow::anyhow!("panicked: {reason}"))
        });

        result.map_err(|e| RouteError::handler(name, e))
    }

    /// Tells the sender about a failed trigger, where that's useful.
    async fn report(&self, message: &Message, err: &RouteError) {
        let reply = match err {
            RouteError::CommandNotFound(name) => {
                Reply::text(format!("command `{name}` not found"))
            }
            RouteError::Flags { command, source } => {
                let Some(command) = self.registry.lookup(command) else {
                    return;
                };
                let output = match source {
                    FlagError::Help => String::new(),
                    other => other.to_string(),
                };
                help::render_usage(&command, &output)
            }
            _ => return,
        };

        if let Err(e) = self.transport.send(message.channel, reply).await {
            warn!(error = %e, "send error reply");
        }
    }
}

/// The message a panic was raised with, if it carried one.
fn panic_reason(payload: &(dyn Any + Send)) -> &str {
    if let Some(reason) = payload.downcast_ref::<&str>() {
        reason
    } else if let Some(reason) = payload.downcast_ref::<String>() {
        reason
    } else {
        "unknown panic"
    }
}
