//! Prefix precedence tests.

use chatroute::model::{GuildId, Member, Message};
use chatroute::settings::GuildSettings;
use chatroute::transport::MockTransport;
use pretty_assertions::assert_eq;

use super::common::{me, someone, Harness, CHANNEL, GUILD};

fn ran(h: &Harness) -> usize {
    h.runs().len()
}

#[tokio::test]
async fn test_guild_prefix() {
    let h = Harness::new();
    h.say("//cmd").await;
    assert_eq!(ran(&h), 1);
}

#[tokio::test]
async fn test_default_prefix_not_used_when_guild_has_one() {
    let h = Harness::new();
    h.say("!cmd").await;
    assert_eq!(ran(&h), 0);
}

#[tokio::test]
async fn test_default_prefix_in_other_guilds() {
    let h = Harness::new();
    h.router
        .handle(&Message::new(GuildId(5), CHANNEL, someone(), "!cmd"))
        .await;
    assert_eq!(ran(&h), 1);
}

#[tokio::test]
async fn test_member_mention() {
    let h = Harness::new();
    h.say(&format!("{} cmd -run=m", Member::new(me()).mention()))
        .await;
    assert_eq!(h.runs()[0].0, "m");
}

#[tokio::test]
async fn test_user_mention() {
    let h = Harness::new();
    h.say(&format!("{} cmd -run=u", me().mention())).await;
    assert_eq!(h.runs()[0].0, "u");
}

#[tokio::test]
async fn test_user_mention_without_membership() {
    let h = Harness::with_transport(MockTransport::new(me()));
    h.say(&format!("{}cmd", me().mention())).await;
    assert_eq!(ran(&h), 1);
}

#[tokio::test]
async fn test_surrounding_whitespace() {
    let h = Harness::new();
    h.say("   //cmd -run=w   ").await;
    assert_eq!(h.runs()[0].0, "w");
}

#[tokio::test]
async fn test_changed_prefix_applies_to_next_message() {
    let h = Harness::new();
    h.settings.set(GUILD, GuildSettings::with_prefix("$"));

    h.say("//cmd").await;
    assert_eq!(ran(&h), 0);

    h.say("$cmd").await;
    assert_eq!(ran(&h), 1);
}
