//! Built-in demo commands for the console binary.
//!
//! Each handler takes its [`Trigger`](crate::commands::Trigger) and replies
//! through it.

pub mod admin;
pub mod fun;

use super::command::Command;

/// Every demo command, ready to register.
pub fn all() -> Vec<Command> {
    vec![fun::echo_command(), fun::ping_command(), admin::prefix_command()]
}
