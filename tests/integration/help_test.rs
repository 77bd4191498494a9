//! Help command tests.

use chatroute::commands::help::{HELPCEPTION, HELP_FOOTER};
use chatroute::commands::EmbedField;
use chatroute::model::{Member, Message};
use chatroute::transport::MockTransport;
use pretty_assertions::assert_eq;

use super::common::{me, someone, Harness, CHANNEL, GUILD};

#[tokio::test]
async fn test_overview() {
    let h = Harness::with_transport(
        MockTransport::new(me()).with_member(GUILD, Member::new(me()).with_nick("Nick")),
    );
    h.say("//help").await;

    let replies = h.transport.replies();
    assert_eq!(replies.len(), 1);
    let embed = replies[0].embed.clone().unwrap();

    assert_eq!(embed.title, "Nick Help");
    assert_eq!(embed.description, "prefix: `//`");
    assert_eq!(embed.footer.as_deref(), Some(HELP_FOOTER));
    assert_eq!(
        embed.fields,
        vec![
            EmbedField {
                name: "admin".to_string(),
                value: "`//prefix`: *shows or changes the command prefix*".to_string(),
                inline: false,
            },
            EmbedField {
                name: "fun".to_string(),
                value: "`//echo`: *repeats what you say*".to_string(),
                inline: false,
            },
            EmbedField {
                name: "help".to_string(),
                value: "`//help`: *a help menu*".to_string(),
                inline: false,
            },
            EmbedField {
                name: "test".to_string(),
                value: "`//cmd`: *lots of fun stuff*".to_string(),
                inline: false,
            },
        ]
    );
}

#[tokio::test]
async fn test_overview_hides_hidden_commands() {
    let h = Harness::new();
    h.say("//help").await;

    let embed = h.transport.replies()[0].embed.clone().unwrap();
    assert!(embed.fields.iter().all(|f| !f.value.contains("ping")));
}

#[tokio::test]
async fn test_overview_uses_clean_mention_prefix() {
    let h = Harness::new();
    h.say(&format!("{} help", Member::new(me()).mention())).await;

    let embed = h.transport.replies()[0].embed.clone().unwrap();
    assert_eq!(embed.title, "User Help");
    assert_eq!(embed.description, "prefix: `@User`");
}

#[tokio::test]
async fn test_overview_in_direct_messages() {
    let h = Harness::new();
    h.router
        .handle(&Message::new(0, CHANNEL, someone(), "!help"))
        .await;

    let embed = h.transport.replies()[0].embed.clone().unwrap();
    assert_eq!(embed.title, "User Help");
    assert_eq!(embed.description, "prefix: `!`");
}

#[tokio::test]
async fn test_help_for_named_commands() {
    let h = Harness::new();
    h.say("//help cmd nope").await;

    let replies = h.transport.replies();
    assert_eq!(replies.len(), 2);

    let usage = replies[0].embed.clone().unwrap();
    assert_eq!(usage.title, "`cmd` usage");
    assert_eq!(usage.description, "lots of fun stuff");
    assert_eq!(
        usage.fields,
        vec![EmbedField {
            name: "flag `-run`".to_string(),
            value: "run string\ndefault: `run`".to_string(),
            inline: false,
        }]
    );

    assert_eq!(replies[1].content, "command `nope` not known");
    assert!(replies[1].embed.is_none());
}

#[tokio::test]
async fn test_helpception() {
    let h = Harness::new();
    h.say("//help -help").await;
    assert_eq!(h.contents(), vec![HELPCEPTION.to_string()]);
}
