//! chatroute - Prefix-driven command dispatch for chat bots.
//!
//! This library exposes the dispatch pipeline for the console binary and for
//! integration tests.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod logging;
pub mod model;
pub mod settings;
pub mod transport;

pub use commands::{Command, Reply, Router, Trigger};
pub use error::{Result, RouteError};
