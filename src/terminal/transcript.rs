//! Transcript lines and their inline styling
//!
//! Styling is semantic: a line is a list of spans tagged with a tone, and the
//! renderer decides what each tone looks like.

use serde::Serialize;
use std::fmt;

/// Semantic emphasis for a span of text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    Plain,
    /// Command names and theme names
    Command,
    /// Headings
    Gold,
    /// Greetings and the visitor highlight
    Saffron,
    /// The prompt marker in echoed input
    Prompt,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Span {
    pub tone: Tone,
    pub text: String,
}

/// Styled text made of spans
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Content {
    spans: Vec<Span>,
}

impl Content {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(mut self, tone: Tone, text: impl Into<String>) -> Self {
        self.spans.push(Span {
            tone,
            text: text.into(),
        });
        self
    }

    pub fn plain(self, text: impl Into<String>) -> Self {
        self.push(Tone::Plain, text)
    }

    pub fn command(self, text: impl Into<String>) -> Self {
        self.push(Tone::Command, text)
    }

    pub fn gold(self, text: impl Into<String>) -> Self {
        self.push(Tone::Gold, text)
    }

    pub fn saffron(self, text: impl Into<String>) -> Self {
        self.push(Tone::Saffron, text)
    }

    pub fn prompt(self, text: impl Into<String>) -> Self {
        self.push(Tone::Prompt, text)
    }

    pub fn spans(&self) -> &[Span] {
        &self.spans
    }

    /// Text with all styling dropped
    pub fn plain_text(&self) -> String {
        self.spans.iter().map(|s| s.text.as_str()).collect()
    }
}

impl From<&str> for Content {
    fn from(text: &str) -> Self {
        Content::new().plain(text)
    }
}

impl From<String> for Content {
    fn from(text: String) -> Self {
        Content::new().plain(text)
    }
}

impl fmt::Display for Content {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for span in &self.spans {
            f.write_str(&span.text)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum LineKind {
    EchoedInput,
    Response,
    Error,
    SystemNotice,
}

/// One rendered row of terminal output
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TranscriptLine {
    pub kind: LineKind,
    pub content: Content,
}

impl TranscriptLine {
    pub fn echoed(prompt: &str, input: &str) -> Self {
        Self {
            kind: LineKind::EchoedInput,
            content: Content::new().prompt(prompt).plain(" ").command(input),
        }
    }

    pub fn response(content: Content) -> Self {
        Self {
            kind: LineKind::Response,
            content,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: LineKind::Error,
            content: Content::from(message.into()),
        }
    }

    pub fn notice(message: impl Into<String>) -> Self {
        Self {
            kind: LineKind::SystemNotice,
            content: Content::from(message.into()),
        }
    }
}
