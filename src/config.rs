//! Configuration management for chatroute.
//!
//! Handles loading configuration from TOML files: the bot's identity, the
//! default and per-guild prefixes, and dispatch limits.

use crate::error::{Result, RouteError};
use crate::model::{GuildId, User};
use crate::settings::{load_prefix_file, MemorySettings};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Main configuration structure for chatroute.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    /// The bot's own identity.
    #[serde(default)]
    pub bot: BotConfig,

    /// Command prefixes.
    #[serde(default)]
    pub prefix: PrefixConfig,

    /// Dispatch limits.
    #[serde(default)]
    pub dispatch: DispatchConfig,
}

/// Bot identity configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BotConfig {
    #[serde(default = "default_bot_id")]
    pub id: u64,

    #[serde(default = "default_bot_name")]
    pub name: String,

    /// Member nickname in guilds.
    pub nick: Option<String>,
}

fn default_bot_id() -> u64 {
    1
}

fn default_bot_name() -> String {
    "chatroute".to_string()
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            id: default_bot_id(),
            name: default_bot_name(),
            nick: None,
        }
    }
}

impl BotConfig {
    /// The bot as a chat user.
    pub fn user(&self) -> User {
        User::new(self.id, self.name.clone()).bot()
    }
}

/// Prefix configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PrefixConfig {
    /// Prefix for guilds without their own.
    #[serde(default = "default_prefix")]
    pub default: String,

    /// JSON file of guild id to prefix.
    pub file: Option<PathBuf>,

    /// Guild id to prefix; overrides entries from `file`.
    #[serde(default)]
    pub guilds: BTreeMap<String, String>,
}

fn default_prefix() -> String {
    "!".to_string()
}

impl Default for PrefixConfig {
    fn default() -> Self {
        Self {
            default: default_prefix(),
            file: None,
            guilds: BTreeMap::new(),
        }
    }
}

/// Dispatch configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct DispatchConfig {
    /// Upper bound on a single handler run, in seconds.
    pub handler_timeout_secs: Option<u64>,
}

impl DispatchConfig {
    pub fn handler_timeout(&self) -> Option<Duration> {
        self.handler_timeout_secs
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
    }
}

impl Config {
    /// Returns the default config file path for the current platform.
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("chatroute")
            .join("config.toml")
    }

    /// Loads configuration from a TOML file.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .map_err(|e| RouteError::config(format!("Failed to read config file: {e}")))?;

        Self::parse_toml(&content, path)
    }

    /// Parses configuration from a TOML string.
    fn parse_toml(content: &str, path: &Path) -> Result<Self> {
        toml::from_str(content).map_err(|e| {
            RouteError::config(format!(
                "Configuration error in {}:\n  {}",
                path.display(),
                e
            ))
        })
    }

    /// Every configured prefix keyed by guild.
    ///
    /// The prefix file is read first, then inline guild entries, then the
    /// default under [`GuildId::BASE`]. A relative file path is resolved
    /// against `base_dir`.
    pub fn guild_prefixes(&self, base_dir: Option<&Path>) -> Result<HashMap<GuildId, String>> {
        let mut prefixes = HashMap::new();

        if let Some(file) = &self.prefix.file {
            let path = match base_dir {
                Some(dir) if file.is_relative() => dir.join(file),
                _ => file.clone(),
            };
            prefixes.extend(load_prefix_file(&path)?);
        }

        for (guild, prefix) in &self.prefix.guilds {
            prefixes.insert(guild.parse()?, prefix.clone());
        }

        if !self.prefix.default.is_empty() {
            prefixes.insert(GuildId::BASE, self.prefix.default.clone());
        }

        Ok(prefixes)
    }

    /// A settings store seeded with every configured prefix.
    pub fn settings(&self, base_dir: Option<&Path>) -> Result<MemorySettings> {
        let settings = MemorySettings::new();
        settings.import(self.guild_prefixes(base_dir)?);
        Ok(settings)
    }
}
