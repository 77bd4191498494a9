//! chatroute - Prefix-driven command dispatch for chat bots.
//!
//! Reads chat lines from stdin and dispatches them as if they were posted to
//! a single channel; replies go to stdout.

use std::sync::Arc;

use chatroute::cli::Cli;
use chatroute::commands::handlers;
use chatroute::config::Config;
use chatroute::error::Result;
use chatroute::logging;
use chatroute::model::Message;
use chatroute::transport::ConsoleTransport;
use chatroute::Router;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{error, info, warn};

#[tokio::main]
async fn main() {
    let cli = Cli::parse_args();

    if cli.log_file {
        logging::init_file_logging();
    } else {
        logging::init_stderr_logging();
    }

    if let Err(e) = run(cli).await {
        error!("{}: {}", e.category(), e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config_path = cli.config_path();
    info!("Loading config from: {}", config_path.display());
    let mut config = Config::load_from_file(&config_path)?;
    cli.apply(&mut config);

    let settings = config.settings(config_path.parent())?;
    let transport = ConsoleTransport::new(config.bot.user(), config.bot.nick.clone());

    let mut router = Router::new(Arc::new(transport), Arc::new(settings));
    if let Some(timeout) = config.dispatch.handler_timeout() {
        router = router.with_handler_timeout(timeout);
    }
    for command in handlers::all() {
        if let Err(e) = router.register(command) {
            warn!(error = %e, "register command");
        }
    }
    let router = Arc::new(router);

    let guild = cli.guild;
    let channel = cli.channel;
    let author = cli.author();
    info!(%guild, %channel, prefix = %config.prefix.default, "reading messages from stdin");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(e) => {
                warn!(error = %e, "read stdin");
                break;
            }
        };

        let message = Message::new(guild, channel, author.clone(), line);
        router.handle(&message).await;
    }

    info!("stdin closed, exiting");
    Ok(())
}
