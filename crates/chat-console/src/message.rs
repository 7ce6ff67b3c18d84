//! Messages and the output sink they are delivered to
//!
//! The console never decides colors or fonts. It stamps every message with a
//! [`Severity`], a label and a size hint, and the sink renders them.

use chrono::{DateTime, Local};

/// Abstract urgency of a message, resolved to a color by the sink
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, strum_macros::Display)]
#[strum(serialize_all = "snake_case")]
pub enum Severity {
    #[default]
    Info,
    Warning,
    Error,
}

impl From<Severity> for miette::Severity {
    fn from(severity: Severity) -> Self {
        match severity {
            Severity::Info => miette::Severity::Advice,
            Severity::Warning => miette::Severity::Warning,
            Severity::Error => miette::Severity::Error,
        }
    }
}

/// A single formatted record handed to the output sink
#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    pub text: String,
    pub label: String,
    pub severity: Severity,
    /// Font size hint for the presentation layer
    pub size: u32,
    pub timestamp: DateTime<Local>,
}

impl Message {
    /// Create an info message stamped with the current time
    pub fn new(text: impl Into<String>, label: impl Into<String>, size: u32) -> Self {
        Self {
            text: text.into(),
            label: label.into(),
            severity: Severity::Info,
            size,
            timestamp: Local::now(),
        }
    }

    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    pub fn with_timestamp(mut self, timestamp: DateTime<Local>) -> Self {
        self.timestamp = timestamp;
        self
    }
}

/// Destination for everything the console has to say
pub trait OutputSink {
    /// Deliver one message
    fn emit(&mut self, message: Message);

    /// Drop all previously delivered messages
    fn clear(&mut self);
}

/// In-memory sink that keeps every message in order
#[derive(Debug, Clone, Default)]
pub struct MessageLog {
    messages: Vec<Message>,
}

impl MessageLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Take all buffered messages, leaving the log empty
    pub fn drain(&mut self) -> Vec<Message> {
        std::mem::take(&mut self.messages)
    }
}

impl OutputSink for MessageLog {
    fn emit(&mut self, message: Message) {
        self.messages.push(message);
    }

    fn clear(&mut self) {
        self.messages.clear();
    }
}
