//! `echo` and `ping`.

use crate::commands::command::Command;
use crate::commands::flags::{FlagError, FlagSet, Options};
use crate::commands::output::Reply;
use crate::commands::trigger::Trigger;

/// Most copies `echo -repeat` will send.
pub const MAX_REPEAT: u64 = 10;

/// Options for `echo`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EchoFlags {
    pub upper: bool,
    pub repeat: u64,
}

impl Options for EchoFlags {
    fn declare(flags: &mut FlagSet) {
        flags
            .bool("upper", false, "shout the text back")
            .uint("repeat", 1, "how many times to repeat the text (at most 10)");
    }

    fn from_flags(flags: &FlagSet) -> Result<Self, FlagError> {
        let repeat = flags.get_uint("repeat")?;
        if repeat > MAX_REPEAT {
            return Err(FlagError::InvalidValue {
                flag: "repeat".to_string(),
                value: repeat.to_string(),
            });
        }

        Ok(Self {
            upper: flags.get_bool("upper")?,
            repeat,
        })
    }
}

pub fn echo_command() -> Command {
    Command::new("echo", "fun", echo)
        .description("repeats what you say\npositional arguments are joined by a space")
        .options::<EchoFlags>()
}

pub fn ping_command() -> Command {
    Command::new("ping", "fun", ping)
        .description("checks the bot is alive")
        .hidden(true)
}

/// Renders the echo text; empty when there's nothing to say.
///
/// `repeat` is capped at [`MAX_REPEAT`].
pub fn render_echo(args: &[String], flags: &EchoFlags) -> String {
    let mut text = args.join(" ");
    if flags.upper {
        text = text.to_uppercase();
    }
    if text.is_empty() {
        return text;
    }

    std::iter::repeat(text.as_str())
        .take(usize::try_from(flags.repeat.min(MAX_REPEAT)).unwrap_or(1))
        .collect::<Vec<_>>()
        .join("\n")
}

async fn echo(t: Trigger) -> anyhow::Result<()> {
    let flags = t.flags::<EchoFlags>()?.clone();
    let text = render_echo(&t.args, &flags);

    if text.is_empty() {
        t.send(t.usage().with_content("nothing to echo")).await?;
        return Ok(());
    }

    t.send(Reply::text(text)).await?;
    Ok(())
}

async fn ping(t: Trigger) -> anyhow::Result<()> {
    t.send(Reply::text("pong")).await?;
    Ok(())
}
