//! Command parsing and dispatch.
//!
//! A chat line flows through the pipeline in this order: prefix resolution,
//! tokenization, registry lookup, flag binding, then the command's handler.
//! Each stage lives in its own module so it can be tested without a chat
//! platform.

pub mod command;
pub mod flags;
pub mod handlers;
pub mod help;
pub mod output;
pub mod prefix;
pub mod registry;
pub mod router;
pub mod tokenizer;
pub mod trigger;

pub use command::{Command, Handler, HandlerFuture, NO_DESCRIPTION};
pub use flags::{FlagError, FlagSet, FlagValue, Options};
pub use output::{Embed, EmbedField, Reply};
pub use prefix::{Prefix, PrefixResolver};
pub use registry::{CategoryIndex, Registry};
pub use router::Router;
pub use trigger::Trigger;
