//! Demo command tests.

use chatroute::model::{GuildId, Message};
use pretty_assertions::assert_eq;

use super::common::{someone, Harness, CHANNEL, GUILD};

#[tokio::test]
async fn test_echo() {
    let h = Harness::new();
    h.say("//echo hello   there").await;
    assert_eq!(h.contents(), vec!["hello there".to_string()]);
}

#[tokio::test]
async fn test_echo_flags() {
    let h = Harness::new();
    h.say("//echo -upper -repeat 2 `hi you`").await;
    assert_eq!(h.contents(), vec!["HI YOU\nHI YOU".to_string()]);
}

#[tokio::test]
async fn test_echo_nothing_shows_usage() {
    let h = Harness::new();
    h.say("//echo").await;

    let replies = h.transport.replies();
    assert_eq!(replies[0].content, "nothing to echo");
    assert_eq!(replies[0].embed.as_ref().unwrap().title, "`echo` usage");
}

#[tokio::test]
async fn test_echo_bad_repeat() {
    let h = Harness::new();
    h.say("//echo -repeat=lots hi").await;
    assert_eq!(
        h.contents(),
        vec!["invalid value \"lots\" for flag -repeat: parse error".to_string()]
    );
}

#[tokio::test]
async fn test_ping() {
    let h = Harness::new();
    h.say("//ping").await;
    assert_eq!(h.contents(), vec!["pong".to_string()]);
}

#[tokio::test]
async fn test_prefix_show() {
    let h = Harness::new();
    h.say("//prefix").await;
    h.say("//prefix -global").await;
    assert_eq!(
        h.contents(),
        vec!["prefix: `//`".to_string(), "prefix: `!`".to_string()]
    );
}

#[tokio::test]
async fn test_prefix_set() {
    let h = Harness::new();
    h.say("//prefix -set=?").await;

    assert_eq!(h.contents(), vec!["prefix set to `?`".to_string()]);
    assert_eq!(h.settings.get(GUILD).unwrap().prefix, "?");

    h.say("?cmd").await;
    assert_eq!(h.runs().len(), 1);
}

#[tokio::test]
async fn test_prefix_set_global() {
    let h = Harness::new();
    h.say("//prefix -global -set ~").await;
    assert_eq!(h.settings.get(GuildId::BASE).unwrap().prefix, "~");

    h.router
        .handle(&Message::new(GuildId(8), CHANNEL, someone(), "~cmd"))
        .await;
    assert_eq!(h.runs().len(), 1);
}

#[tokio::test]
async fn test_echo_repeat_over_limit_shows_usage() {
    let h = Harness::new();
    h.say("//echo -repeat=18446744073709551615 hi\n//ping").await;

    let replies = h.transport.replies();
    assert_eq!(replies.len(), 2);
    assert_eq!(
        replies[0].content,
        "invalid value \"18446744073709551615\" for flag -repeat: parse error"
    );
    assert_eq!(replies[0].embed.as_ref().unwrap().title, "`echo` usage");
    assert_eq!(replies[1].content, "pong");
}
