//! Transport-agnostic reply types.
//!
//! Commands build these and hand them to the [`Transport`](crate::transport::Transport),
//! which converts them to whatever the chat platform expects.

use std::fmt;

use serde::Serialize;

/// A reply to send to a channel.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Reply {
    /// Plain message text.
    pub content: String,
    /// Optional structured block.
    pub embed: Option<Embed>,
}

/// A structured reply block with titled fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Embed {
    pub title: String,
    pub description: String,
    pub fields: Vec<EmbedField>,
    pub footer: Option<String>,
}

/// A named section of an [`Embed`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmbedField {
    pub name: String,
    pub value: String,
    pub inline: bool,
}

impl Reply {
    /// Creates a text-only reply.
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            embed: None,
        }
    }

    /// Creates a reply carrying only an embed.
    pub fn embed(embed: Embed) -> Self {
        Self {
            content: String::new(),
            embed: Some(embed),
        }
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = content.into();
        self
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty() && self.embed.is_none()
    }
}

impl Embed {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Appends a non-inline field.
    pub fn field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.push(EmbedField {
            name: name.into(),
            value: value.into(),
            inline: false,
        });
        self
    }

    pub fn footer(mut self, footer: impl Into<String>) -> Self {
        self.footer = Some(footer.into());
        self
    }
}

impl fmt::Display for Reply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.content.is_empty() {
            writeln!(f, "{}", self.content)?;
        }
        if let Some(embed) = &self.embed {
            write!(f, "{embed}")?;
        }
        Ok(())
    }
}

impl fmt::Display for Embed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "== {} ==", self.title)?;
        if !self.description.is_empty() {
            writeln!(f, "{}", self.description)?;
        }
        for field in &self.fields {
            writeln!(f, "\n{}:", field.name)?;
            for line in field.value.lines() {
                writeln!(f, "  {line}")?;
            }
        }
        if let Some(footer) = &self.footer {
            writeln!(f, "\n-- {footer}")?;
        }
        Ok(())
    }
}
