//! Command descriptors.
//!
//! A [`Command`] bundles a name, a help category, a description, the handler,
//! and the command's options schema. Descriptors are cheap to clone; the
//! handler and schema are shared.

use std::fmt;
use std::future::Future;
use std::sync::Arc;

use futures::future::BoxFuture;
use futures::FutureExt;

use super::flags::{self, Options, Schema};
use super::trigger::Trigger;
use crate::error::{Result, RouteError};

/// Shown in place of an empty description.
pub const NO_DESCRIPTION: &str = "*no description*";

/// Future returned by a command handler.
pub type HandlerFuture = BoxFuture<'static, anyhow::Result<()>>;

/// The logic of a command.
pub type Handler = Arc<dyn Fn(Trigger) -> HandlerFuture + Send + Sync>;

/// A dispatchable command.
#[derive(Clone)]
pub struct Command {
    name: String,
    category: String,
    description: String,
    /// Tidies up help menus; secure commands should still check permissions.
    hidden: bool,
    handler: Handler,
    schema: Arc<dyn Schema>,
}

impl Command {
    /// Creates a command without options.
    pub fn new<F, Fut>(name: impl Into<String>, category: impl Into<String>, handler: F) -> Self
    where
        F: Fn(Trigger) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = anyhow::Result<()>> + Send + 'static,
    {
        Self {
            name: name.into(),
            category: category.into(),
            description: NO_DESCRIPTION.to_string(),
            hidden: false,
            handler: Arc::new(move |t| handler(t).boxed()),
            schema: flags::schema::<()>(),
        }
    }

    /// Sets the description; an empty one becomes [`NO_DESCRIPTION`].
    pub fn description(mut self, description: impl Into<String>) -> Self {
        let description = description.into();
        self.description = if description.trim().is_empty() {
            NO_DESCRIPTION.to_string()
        } else {
            description
        };
        self
    }

    pub fn hidden(mut self, hidden: bool) -> Self {
        self.hidden = hidden;
        self
    }

    /// Declares the command's options type.
    pub fn options<T: Options>(mut self) -> Self {
        self.schema = flags::schema::<T>();
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn desc(&self) -> &str {
        &self.description
    }

    /// First line of the description.
    pub fn summary(&self) -> &str {
        self.description.lines().next().unwrap_or(NO_DESCRIPTION)
    }

    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    pub fn schema(&self) -> &dyn Schema {
        self.schema.as_ref()
    }

    /// Runs the handler.
    pub fn run(&self, trigger: Trigger) -> HandlerFuture {
        (self.handler)(trigger)
    }

    /// Checks the descriptor before registration.
    ///
    /// Names must be non-empty lowercase ASCII letters and digits; they are
    /// never rewritten to fit.
    pub fn validate(&self) -> Result<()> {
        if self.name.is_empty() {
            return Err(RouteError::InvalidCommand("empty name".to_string()));
        }
        if let Some(bad) = self
            .name
            .chars()
            .find(|c| !(c.is_ascii_lowercase() || c.is_ascii_digit()))
        {
            return Err(RouteError::InvalidCommand(format!(
                "name {:?} contains {:?}; use lowercase letters and digits",
                self.name, bad
            )));
        }
        if self.category.trim().is_empty() {
            return Err(RouteError::InvalidCommand(format!(
                "command {:?} has no category",
                self.name
            )));
        }
        Ok(())
    }
}

impl fmt::Debug for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Command")
            .field("name", &self.name)
            .field("category", &self.category)
            .field("description", &self.description)
            .field("hidden", &self.hidden)
            .finish_non_exhaustive()
    }
}
