//! Prefix resolution.
//!
//! A line addresses the bot when it starts with one of, in order:
//! 1. the guild's configured prefix, or the base guild's prefix when the
//!    guild has none
//! 2. the bot's member mention in the guild (displayed with its nickname)
//! 3. the bot's user mention

use std::sync::Arc;

use tracing::{debug, warn};

use crate::model::{GuildId, Member, User};
use crate::settings::SettingsStore;

/// A resolved command prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prefix {
    /// Literal text the line starts with.
    pub value: String,
    /// Human-friendly form for help output.
    pub clean: String,
}

impl Prefix {
    pub fn new(value: impl Into<String>, clean: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            clean: clean.into(),
        }
    }

    /// A prefix displayed exactly as it is typed.
    pub fn literal(value: impl Into<String>) -> Self {
        let value = value.into();
        Self {
            clean: value.clone(),
            value,
        }
    }

    /// Prefix for mentioning the bot user.
    pub fn user(me: &User) -> Self {
        Self::new(me.mention(), format!("@{}", me.name))
    }

    /// Prefix for mentioning the bot's guild member.
    pub fn member(member: &Member) -> Self {
        Self::new(member.mention(), format!("@{}", member.display_name()))
    }

    /// Returns true if the trimmed line starts with this prefix.
    pub fn matches(&self, line: &str) -> bool {
        !self.value.is_empty() && line.trim().starts_with(&self.value)
    }

    /// The trimmed line with this prefix removed.
    pub fn strip<'a>(&self, line: &'a str) -> &'a str {
        let line = line.trim();
        line.strip_prefix(self.value.as_str()).unwrap_or(line).trim()
    }
}

/// Finds the prefix a line starts with.
#[derive(Clone)]
pub struct PrefixResolver {
    settings: Arc<dyn SettingsStore>,
}

impl PrefixResolver {
    pub fn new(settings: Arc<dyn SettingsStore>) -> Self {
        Self { settings }
    }

    /// Configured prefix for a guild, if set.
    ///
    /// Lookup failures count as "unset".
    async fn stored_prefix(&self, guild: GuildId) -> Option<Prefix> {
        match self.settings.load(guild).await {
            Ok(Some(settings)) if !settings.prefix.is_empty() => {
                Some(Prefix::literal(settings.prefix))
            }
            Ok(_) => None,
            Err(e) => {
                warn!(%guild, error = %e, "load guild settings");
                None
            }
        }
    }

    /// The guild's prefix, falling back to the base guild's.
    ///
    /// A guild entry whose prefix is empty counts as unset and falls back too.
    pub async fn guild_prefix(&self, guild: GuildId) -> Option<Prefix> {
        if let Some(prefix) = self.stored_prefix(guild).await {
            return Some(prefix);
        }
        if guild.is_base() {
            return None;
        }
        self.stored_prefix(GuildId::BASE).await
    }

    /// Every prefix candidate, in precedence order.
    pub async fn candidates(
        &self,
        guild: GuildId,
        me: &User,
        member: Option<&Member>,
    ) -> Vec<Prefix> {
        let mut candidates = Vec::with_capacity(3);
        if let Some(prefix) = self.guild_prefix(guild).await {
            candidates.push(prefix);
        }
        if let Some(member) = member {
            candidates.push(Prefix::member(member));
        }
        candidates.push(Prefix::user(me));
        candidates
    }

    /// The first candidate the line starts with.
    pub async fn resolve(
        &self,
        guild: GuildId,
        me: &User,
        member: Option<&Member>,
        line: &str,
    ) -> Option<Prefix> {
        let prefix = self
            .candidates(guild, me, member)
            .await
            .into_iter()
            .find(|prefix| prefix.matches(line));

        debug!(%guild, line, prefix = ?prefix.as_ref().map(|p| &p.clean), "resolve prefix");
        prefix
    }
}
