//! Command-line argument parsing for chatroute.
//!
//! Uses clap to parse the console binary's arguments.

use crate::config::Config;
use crate::model::{ChannelId, GuildId, User, UserId};
use clap::Parser;
use std::path::PathBuf;

/// Prefix-driven command dispatch on stdin.
#[derive(Parser, Debug)]
#[command(name = "chatroute")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Config file path
    #[arg(long, value_name = "PATH", env = "CHATROUTE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Default prefix (overrides the config file)
    #[arg(short = 'p', long, value_name = "PREFIX")]
    pub prefix: Option<String>,

    /// Guild the console messages come from (0 for direct messages)
    #[arg(short = 'g', long, value_name = "ID", default_value = "0")]
    pub guild: GuildId,

    /// Channel the console messages come from
    #[arg(short = 'c', long, value_name = "ID", default_value = "1")]
    pub channel: ChannelId,

    /// Name of the user typing
    #[arg(short = 'u', long, value_name = "NAME", default_value = "console")]
    pub user: String,

    /// Id of the user typing
    #[arg(long, value_name = "ID", default_value = "2")]
    pub user_id: UserId,

    /// Write logs to the state directory instead of stderr
    #[arg(long)]
    pub log_file: bool,
}

impl Cli {
    /// Parses command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Returns the config file path to use.
    ///
    /// Uses the --config argument if provided, otherwise the default path.
    pub fn config_path(&self) -> PathBuf {
        self.config.clone().unwrap_or_else(Config::default_path)
    }

    /// Applies CLI overrides to a loaded config.
    pub fn apply(&self, config: &mut Config) {
        if let Some(prefix) = &self.prefix {
            config.prefix.default = prefix.clone();
        }
    }

    /// The user typing into the console.
    pub fn author(&self) -> User {
        User::new(self.user_id, self.user.clone())
    }
}
