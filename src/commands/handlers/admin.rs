//! `prefix`: show or change the command prefix.

use crate::commands::command::Command;
use crate::commands::flags::{FlagError, FlagSet, Options};
use crate::commands::output::Reply;
use crate::commands::trigger::Trigger;
use crate::model::GuildId;
use crate::settings::GuildSettings;

/// Options for `prefix`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PrefixFlags {
    /// New prefix; empty leaves it unchanged.
    pub set: String,
    pub global: bool,
}

impl Options for PrefixFlags {
    fn declare(flags: &mut FlagSet) {
        flags
            .string("set", "", "new prefix")
            .bool("global", false, "use the default prefix for every guild");
    }

    fn from_flags(flags: &FlagSet) -> Result<Self, FlagError> {
        Ok(Self {
            set: flags.get_string("set")?,
            global: flags.get_bool("global")?,
        })
    }
}

pub fn prefix_command() -> Command {
    Command::new("prefix", "admin", prefix)
        .description("shows or changes the command prefix\nmentioning the bot always works too")
        .options::<PrefixFlags>()
}

async fn prefix(t: Trigger) -> anyhow::Result<()> {
    let flags = t.flags::<PrefixFlags>()?.clone();
    let guild = if flags.global {
        GuildId::BASE
    } else {
        t.message.guild
    };

    if flags.set.trim().is_empty() {
        let reply = match t.router.prefixes().guild_prefix(guild).await {
            Some(prefix) => format!("prefix: `{}`", prefix.clean),
            None => "no prefix set, mention me instead".to_string(),
        };
        t.send(Reply::text(reply)).await?;
        return Ok(());
    }

    let value = flags.set.trim().to_string();
    t.router
        .settings()
        .save(guild, GuildSettings::with_prefix(value.clone()))
        .await?;
    tracing::info!(%guild, prefix = %value, "prefix changed");

    t.send(Reply::text(format!("prefix set to `{value}`"))).await?;
    Ok(())
}
