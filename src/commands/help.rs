//! The built-in `help` command and help/usage rendering.

use super::command::Command;
use super::flags::{FlagError, FlagSet, Options};
use super::output::{Embed, Reply};
use super::registry::Registry;
use super::trigger::Trigger;

/// Footer shown under the help overview.
pub const HELP_FOOTER: &str = "use the `-help` flag on a command for detailed help";

/// Reply to `help -help`.
pub const HELPCEPTION: &str = "helpception :thinking:";

/// Options for the `help` command.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HelpFlags {
    pub help: bool,
}

impl Options for HelpFlags {
    fn declare(flags: &mut FlagSet) {
        flags.bool("help", false, "helpception");
    }

    fn from_flags(flags: &FlagSet) -> Result<Self, FlagError> {
        Ok(Self {
            help: flags.get_bool("help")?,
        })
    }
}

/// The `help` command descriptor.
pub fn help_command() -> Command {
    Command::new("help", "help", run_help)
        .description("a help menu")
        .options::<HelpFlags>()
}

async fn run_help(t: Trigger) -> anyhow::Result<()> {
    if t.flags::<HelpFlags>()?.help {
        t.send(Reply::text(HELPCEPTION)).await?;
        return Ok(());
    }

    if !t.args.is_empty() {
        for name in &t.args {
            let reply = match t.router.registry().lookup(name) {
                Some(command) => render_usage(&command, ""),
                None => Reply::text(format!("command `{name}` not known")),
            };
            // Each name stands alone; a failed send doesn't stop the rest.
            if let Err(e) = t.send(reply).await {
                tracing::warn!(command = %name, error = %e, "send usage");
            }
        }
        return Ok(());
    }

    let display_name = t.display_name().await;
    let overview = render_overview(t.router.registry(), &display_name, &t.prefix.clean, false);
    t.send(overview).await?;
    Ok(())
}

/// Lists every command grouped by category.
pub fn render_overview(
    registry: &Registry,
    display_name: &str,
    prefix: &str,
    include_hidden: bool,
) -> Reply {
    let index = registry.by_category(include_hidden);
    let mut embed = Embed::new(format!("{display_name} Help"))
        .description(format!("prefix: `{prefix}`"))
        .footer(HELP_FOOTER);

    for (category, names) in &index.categories {
        let lines = names
            .iter()
            .filter_map(|name| registry.lookup(name))
            .map(|command| format!("`{prefix}{}`: *{}*", command.name(), command.summary()))
            .collect::<Vec<_>>();

        if lines.is_empty() {
            continue;
        }
        embed = embed.field(category.clone(), lines.join("\n"));
    }

    Reply::embed(embed)
}

/// Lists a command's flags with their usage and defaults.
///
/// `output` becomes the reply content when non-empty (e.g. a parse error).
pub fn render_usage(command: &Command, output: &str) -> Reply {
    let flags = command.schema().flag_set(command.name());
    let mut embed = Embed::new(format!("`{}` usage", command.name())).description(command.desc());

    for flag in flags.visit_all() {
        embed = embed.field(
            format!("flag `-{}`", flag.name),
            format!("{}\ndefault: `{}`", flag.usage, flag.default),
        );
    }

    Reply::embed(embed).with_content(output)
}
