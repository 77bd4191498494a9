//! Error types for chatroute.
//!
//! Defines the main error enum used throughout the dispatch pipeline.

use thiserror::Error;

use crate::commands::flags::FlagError;

/// Main error type for chatroute operations.
#[derive(Error, Debug)]
pub enum RouteError {
    /// The line held a prefix but nothing after it.
    #[error("no command")]
    NoCommand,

    /// The first token does not name a registered command.
    #[error("command not found: {0}")]
    CommandNotFound(String),

    /// Flag binding failed for a command (includes `-help` requests).
    #[error("flags for {command}: {source}")]
    Flags {
        command: String,
        #[source]
        source: FlagError,
    },

    /// The command's handler returned an error or timed out.
    #[error("run {command}: {error:#}")]
    Handler {
        command: String,
        error: anyhow::Error,
    },

    /// Command descriptor failed validation at registration.
    #[error("invalid command: {0}")]
    InvalidCommand(String),

    /// A command with the same name is already registered.
    #[error("command {0:?} already registered")]
    DuplicateCommand(String),

    /// Chat platform errors (identity lookup, reply delivery, etc.)
    #[error("transport error: {0}")]
    Transport(String),

    /// Guild settings lookup or storage errors.
    #[error("settings error: {0}")]
    Settings(String),

    /// Configuration errors (invalid config file, bad guild ids, etc.)
    #[error("configuration error: {0}")]
    Config(String),

    /// Internal errors (unexpected states, bugs, etc.)
    #[error("internal error: {0}")]
    Internal(String),
}

impl RouteError {
    /// Creates a flag error for the given command.
    pub fn flags(command: impl Into<String>, source: FlagError) -> Self {
        Self::Flags {
            command: command.into(),
            source,
        }
    }

    /// Creates a handler error for the given command.
    pub fn handler(command: impl Into<String>, error: anyhow::Error) -> Self {
        Self::Handler {
            command: command.into(),
            error,
        }
    }

    /// Creates a transport error with the given message.
    pub fn transport(msg: impl Into<String>) -> Self {
        Self::Transport(msg.into())
    }

    /// Creates a settings error with the given message.
    pub fn settings(msg: impl Into<String>) -> Self {
        Self::Settings(msg.into())
    }

    /// Creates a configuration error with the given message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Creates an internal error with the given message.
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Returns true if this error is a `-help` request rather than a failure.
    pub fn is_help_request(&self) -> bool {
        matches!(
            self,
            Self::Flags {
                source: FlagError::Help,
                ..
            }
        )
    }

    /// Returns the error category as a string for display purposes.
    pub fn category(&self) -> &'static str {
        match self {
            Self::NoCommand => "No Command",
            Self::CommandNotFound(_) => "Command Not Found",
            Self::Flags { .. } => "Flag Error",
            Self::Handler { .. } => "Handler Error",
            Self::InvalidCommand(_) | Self::DuplicateCommand(_) => "Registration Error",
            Self::Transport(_) => "Transport Error",
            Self::Settings(_) => "Settings Error",
            Self::Config(_) => "Configuration Error",
            Self::Internal(_) => "Internal Error",
        }
    }
}

/// Result type alias using RouteError.
pub type Result<T> = std::result::Result<T, RouteError>;
