//! Guild-scoped settings.
//!
//! The dispatch pipeline only reads the prefix out of these; storage is owned
//! by whatever implements [`SettingsStore`].

use std::collections::HashMap;
use std::path::Path;
use std::sync::{PoisonError, RwLock};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::{Result, RouteError};
use crate::model::GuildId;

/// Per-guild configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuildSettings {
    /// Command prefix; empty means unset.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub prefix: String,
}

impl GuildSettings {
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }
}

/// Key-value lookup for guild settings.
///
/// Implementations should be concurrent-safe. [`GuildId::BASE`] holds the
/// global defaults.
#[async_trait]
pub trait SettingsStore: Send + Sync {
    /// Loads settings for a guild, or `None` if the guild has no entry.
    async fn load(&self, guild: GuildId) -> Result<Option<GuildSettings>>;

    /// Stores settings for a guild.
    async fn save(&self, guild: GuildId, settings: GuildSettings) -> Result<()>;
}

/// In-memory settings store.
#[derive(Debug, Default)]
pub struct MemorySettings {
    guilds: RwLock<HashMap<GuildId, GuildSettings>>,
}

impl MemorySettings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`MemorySettings::set`] for a prefix.
    pub fn with_prefix(self, guild: GuildId, prefix: impl Into<String>) -> Self {
        self.set(guild, GuildSettings::with_prefix(prefix));
        self
    }

    pub fn get(&self, guild: GuildId) -> Option<GuildSettings> {
        let guilds = self.guilds.read().unwrap_or_else(PoisonError::into_inner);
        guilds.get(&guild).cloned()
    }

    pub fn set(&self, guild: GuildId, settings: GuildSettings) {
        let mut guilds = self.guilds.write().unwrap_or_else(PoisonError::into_inner);
        guilds.insert(guild, settings);
    }

    /// Bulk import of guild prefixes, replacing existing entries.
    pub fn import(&self, prefixes: HashMap<GuildId, String>) {
        let mut guilds = self.guilds.write().unwrap_or_else(PoisonError::into_inner);
        for (guild, prefix) in prefixes {
            guilds.insert(guild, GuildSettings::with_prefix(prefix));
        }
    }

    /// Snapshot of every stored guild.
    pub fn export(&self) -> HashMap<GuildId, GuildSettings> {
        self.guilds
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[async_trait]
impl SettingsStore for MemorySettings {
    async fn load(&self, guild: GuildId) -> Result<Option<GuildSettings>> {
        Ok(self.get(guild))
    }

    async fn save(&self, guild: GuildId, settings: GuildSettings) -> Result<()> {
        self.set(guild, settings);
        Ok(())
    }
}

/// Reads a JSON object of guild id to prefix, e.g. `{"0": "!", "42": "//"}`.
pub fn load_prefix_file(path: &Path) -> Result<HashMap<GuildId, String>> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        RouteError::settings(format!("read prefix file {}: {e}", path.display()))
    })?;

    let raw: HashMap<String, String> = serde_json::from_str(&content).map_err(|e| {
        RouteError::settings(format!("parse prefix file {}: {e}", path.display()))
    })?;

    raw.into_iter()
        .map(|(guild, prefix)| -> Result<(GuildId, String)> { Ok((guild.parse()?, prefix)) })
        .collect()
}
