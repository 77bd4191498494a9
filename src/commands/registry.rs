//! Concurrent-safe command store.
//!
//! Registration usually happens once at startup while lookups happen on
//! every dispatched line, so the store sits behind a readers-writer lock.

use std::collections::{BTreeMap, HashMap};
use std::sync::{PoisonError, RwLock};

use tracing::warn;

use super::command::Command;
use crate::error::{Result, RouteError};

/// Non-hidden (or all) command names grouped by category.
///
/// Categories and the names within each are sorted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryIndex {
    pub categories: BTreeMap<String, Vec<String>>,
}

impl CategoryIndex {
    /// Sorted category names.
    pub fn names(&self) -> Vec<&str> {
        self.categories.keys().map(String::as_str).collect()
    }

    pub fn get(&self, category: &str) -> Option<&[String]> {
        self.categories.get(category).map(Vec::as_slice)
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}

/// Store of named commands.
#[derive(Debug, Default)]
pub struct Registry {
    commands: RwLock<HashMap<String, Command>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a command.
    ///
    /// Invalid descriptors and duplicate names are rejected; the existing
    /// command is never replaced.
    pub fn register(&self, command: Command) -> Result<()> {
        command.validate()?;

        let mut commands = self
            .commands
            .write()
            .unwrap_or_else(PoisonError::into_inner);

        if commands.contains_key(command.name()) {
            warn!(command = command.name(), "command already registered, skipping");
            return Err(RouteError::DuplicateCommand(command.name().to_string()));
        }

        commands.insert(command.name().to_string(), command);
        Ok(())
    }

    /// Finds a command by name.
    pub fn lookup(&self, name: &str) -> Option<Command> {
        self.commands
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(name)
            .cloned()
    }

    /// Removes a command, returning it if it was registered.
    pub fn remove(&self, name: &str) -> Option<Command> {
        self.commands
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(name)
    }

    /// Groups command names by category.
    pub fn by_category(&self, include_hidden: bool) -> CategoryIndex {
        let mut categories: BTreeMap<String, Vec<String>> = BTreeMap::new();

        {
            let commands = self.commands.read().unwrap_or_else(PoisonError::into_inner);
            for command in commands.values() {
                if command.is_hidden() && !include_hidden {
                    continue;
                }
                categories
                    .entry(command.category().to_string())
                    .or_default()
                    .push(command.name().to_string());
            }
        }

        for names in categories.values_mut() {
            names.sort();
        }

        CategoryIndex { categories }
    }

    /// Sorted names of every registered command.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<_> = self
            .commands
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .cloned()
            .collect();
        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        self.commands
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
