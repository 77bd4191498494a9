//! Shared fixtures for the integration tests.

use std::sync::{Arc, Mutex};

use chatroute::commands::flags::{FlagError, FlagSet, Options};
use chatroute::commands::handlers;
use chatroute::model::{ChannelId, GuildId, Member, Message, User};
use chatroute::settings::MemorySettings;
use chatroute::transport::MockTransport;
use chatroute::{Command, Router, Trigger};

pub const GUILD: GuildId = GuildId(1234567890);
pub const CHANNEL: ChannelId = ChannelId(55);

pub fn me() -> User {
    User::new(1234567890, "User").bot()
}

pub fn someone() -> User {
    User::new(42, "someone")
}

pub fn message(content: &str) -> Message {
    Message::new(GUILD, CHANNEL, someone(), content)
}

/// Options for the `cmd` test command.
#[derive(Debug, Clone, PartialEq)]
pub struct RunFlags {
    pub run: String,
}

impl Options for RunFlags {
    fn declare(flags: &mut FlagSet) {
        flags.string("run", "run", "run string");
    }

    fn from_flags(flags: &FlagSet) -> Result<Self, FlagError> {
        Ok(Self {
            run: flags.get_string("run")?,
        })
    }
}

/// What `cmd` saw on each run: its `-run` value and positional args.
pub type Runs = Arc<Mutex<Vec<(String, Vec<String>)>>>;

pub struct Harness {
    pub router: Arc<Router>,
    pub transport: Arc<MockTransport>,
    pub settings: Arc<MemorySettings>,
    pub runs: Runs,
}

impl Harness {
    /// `//` in GUILD, `!` by default, the bot is a member of GUILD, and the
    /// demo commands plus a recording `cmd` are registered.
    pub fn new() -> Self {
        Self::with_transport(MockTransport::new(me()).with_member(GUILD, Member::new(me())))
    }

    pub fn with_transport(transport: MockTransport) -> Self {
        let transport = Arc::new(transport);
        let settings = Arc::new(
            MemorySettings::new()
                .with_prefix(GuildId::BASE, "!")
                .with_prefix(GUILD, "//"),
        );
        let router = Router::new(transport.clone(), settings.clone());

        for command in handlers::all() {
            router.register(command).unwrap();
        }

        let runs: Runs = Arc::new(Mutex::new(Vec::new()));
        let seen = Arc::clone(&runs);
        router
            .register(
                Command::new("cmd", "test", move |t: Trigger| {
                    let seen = Arc::clone(&seen);
                    async move {
                        let run = t.flags::<RunFlags>()?.run.clone();
                        seen.lock().unwrap().push((run, t.args.clone()));
                        Ok(())
                    }
                })
                .description("lots of fun stuff")
                .options::<RunFlags>(),
            )
            .unwrap();

        Self {
            router: Arc::new(router),
            transport,
            settings,
            runs,
        }
    }

    pub async fn say(&self, content: &str) {
        self.router.handle(&message(content)).await;
    }

    pub fn runs(&self) -> Vec<(String, Vec<String>)> {
        self.runs.lock().unwrap().clone()
    }

    /// Text content of every reply sent so far.
    pub fn contents(&self) -> Vec<String> {
        self.transport
            .replies()
            .into_iter()
            .map(|r| r.content)
            .collect()
    }
}
