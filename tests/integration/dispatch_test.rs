//! End-to-end dispatch tests.

use std::time::Duration;

use chatroute::commands::Prefix;
use chatroute::model::{GuildId, Message, User};
use chatroute::transport::MockTransport;
use chatroute::{Command, RouteError};
use pretty_assertions::assert_eq;

use super::common::{me, message, Harness, CHANNEL, GUILD};

#[tokio::test]
async fn test_flag_binding() {
    let h = Harness::new();
    h.say("//cmd -run=foo").await;
    assert_eq!(h.runs(), vec![("foo".to_string(), vec![])]);
}

#[tokio::test]
async fn test_backtick_quoted_flag() {
    let h = Harness::new();
    h.say("//cmd `-run=foo bar` rest").await;
    assert_eq!(
        h.runs(),
        vec![("foo bar".to_string(), vec!["rest".to_string()])]
    );
}

#[tokio::test]
async fn test_flag_defaults_and_positional_args() {
    let h = Harness::new();
    h.say("//cmd one two").await;
    assert_eq!(
        h.runs(),
        vec![(
            "run".to_string(),
            vec!["one".to_string(), "two".to_string()]
        )]
    );
}

#[tokio::test]
async fn test_prefix_only_is_no_command() {
    let h = Harness::new();
    let msg = message("//");
    let err = h
        .router
        .dispatch(&msg, &me(), None, &msg.content)
        .await
        .unwrap_err();

    assert!(matches!(err, RouteError::NoCommand));
    assert!(h.transport.sent().is_empty());
}

#[tokio::test]
async fn test_unknown_command() {
    let h = Harness::new();
    let msg = message("//unknown");
    let err = h
        .router
        .dispatch(&msg, &me(), None, &msg.content)
        .await
        .unwrap_err();

    assert!(matches!(err, RouteError::CommandNotFound(ref name) if name == "unknown"));
    assert_eq!(h.contents(), vec!["command `unknown` not found".to_string()]);
}

#[tokio::test]
async fn test_help_flag_skips_handler() {
    let h = Harness::new();
    h.say("//cmd -help").await;

    assert!(h.runs().is_empty());
    let replies = h.transport.replies();
    assert_eq!(replies.len(), 1);
    assert_eq!(replies[0].embed.as_ref().unwrap().title, "`cmd` usage");
}

#[tokio::test]
async fn test_undefined_flag_reports_error() {
    let h = Harness::new();
    h.say("//cmd -walk").await;

    assert!(h.runs().is_empty());
    assert_eq!(
        h.contents(),
        vec!["flag provided but not defined: -walk".to_string()]
    );
}

#[tokio::test]
async fn test_multi_line_message() {
    let h = Harness::new();
    h.say("//cmd -run=a\nnot for us\n//cmd -run=b\n").await;

    let runs: Vec<_> = h.runs().into_iter().map(|(run, _)| run).collect();
    assert_eq!(runs, vec!["a".to_string(), "b".to_string()]);
}

#[tokio::test]
async fn test_failing_line_does_not_stop_others() {
    let h = Harness::new();
    h.router
        .register(Command::new("boom", "test", |_t| async {
            Err(anyhow::anyhow!("kaboom"))
        }))
        .unwrap();

    h.say("//boom\n//cmd -run=after").await;
    assert_eq!(h.runs(), vec![("after".to_string(), vec![])]);
}

#[tokio::test]
async fn test_ignores_self() {
    let h = Harness::new();
    h.router
        .handle(&Message::new(GUILD, CHANNEL, me(), "//cmd"))
        .await;
    assert!(h.runs().is_empty());
}

#[tokio::test]
async fn test_ignores_other_bots() {
    let h = Harness::new();
    h.router
        .handle(&Message::new(
            GUILD,
            CHANNEL,
            User::new(7, "otherbot").bot(),
            "//cmd",
        ))
        .await;
    assert!(h.runs().is_empty());
    assert!(h.transport.sent().is_empty());
}

#[tokio::test]
async fn test_unreachable_platform_drops_message() {
    let h = Harness::with_transport(MockTransport::without_me());
    h.say("//cmd").await;
    assert!(h.runs().is_empty());
}

#[tokio::test]
async fn test_replies_go_to_message_channel() {
    let h = Harness::new();
    h.say("//echo hi").await;

    let sent = h.transport.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].0, CHANNEL);
}

#[tokio::test]
async fn test_trigger_carries_prefix() {
    let h = Harness::new();
    let msg = message("//cmd -run=x y");
    let trigger = h
        .router
        .trigger(Prefix::literal("//"), &msg, &msg.content)
        .unwrap();

    assert_eq!(trigger.command.name(), "cmd");
    assert_eq!(trigger.prefix.clean, "//");
    assert_eq!(trigger.args, vec!["y".to_string()]);
    assert_eq!(trigger.message, msg);
}

#[tokio::test]
async fn test_handler_timeout() {
    let h = Harness::new();
    let router = chatroute::Router::new(h.transport.clone(), h.settings.clone())
        .with_handler_timeout(Duration::from_millis(20));
    router
        .register(Command::new("slow", "test", |_t| async {
            tokio::time::sleep(Duration::from_secs(10)).await;
            Ok(())
        }))
        .unwrap();
    let router = std::sync::Arc::new(router);

    let msg = Message::new(GuildId(9), CHANNEL, User::new(3, "x"), "!slow");
    let err = router
        .dispatch(&msg, &me(), None, &msg.content)
        .await
        .unwrap_err();
    assert!(matches!(err, RouteError::Handler { ref command, .. } if command == "slow"));
}
