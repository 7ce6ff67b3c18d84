//! Terminal output sink
//!
//! Prints each message as `//// dd/mm/YYYY hh:mm:ss AM [Label]: text`, colored
//! by severity when the terminal supports it.

use std::io::{self, Write};

use chat_console::{Message, OutputSink, Severity};
use crossterm::{
    cursor::MoveTo,
    execute,
    terminal::{Clear, ClearType},
};
use log::warn;
use nu_ansi_term::Color;

const TIMESTAMP_FORMAT: &str = "%d/%m/%Y %I:%M:%S %p";

/// Sink that writes messages to stdout
#[derive(Debug, Clone, Copy)]
pub struct TerminalSink {
    color: bool,
}

impl TerminalSink {
    pub fn new(color: bool) -> Self {
        Self { color }
    }
}

impl Default for TerminalSink {
    fn default() -> Self {
        Self::new(true)
    }
}

/// Render one message line, with ANSI colors if `color` is set
pub fn format_message(message: &Message, color: bool) -> String {
    let line = format!(
        "//// {} [{}]: {}",
        message.timestamp.format(TIMESTAMP_FORMAT),
        message.label,
        message.text
    );
    if !color {
        return line;
    }

    match message.severity {
        Severity::Info => line,
        Severity::Warning => Color::Yellow.paint(line).to_string(),
        Severity::Error => Color::Red.paint(line).to_string(),
    }
}

impl OutputSink for TerminalSink {
    fn emit(&mut self, message: Message) {
        println!("{}", format_message(&message, self.color));
    }

    fn clear(&mut self) {
        let mut stdout = io::stdout();
        if let Err(e) = execute!(stdout, Clear(ClearType::All), MoveTo(0, 0)) {
            warn!("failed to clear the terminal: {}", e);
        }
        stdout.flush().ok();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Local, TimeZone};
    use pretty_assertions::assert_eq;

    fn message(severity: Severity) -> Message {
        let timestamp = Local
            .with_ymd_and_hms(2024, 3, 7, 14, 5, 9)
            .single()
            .expect("unambiguous local time");
        Message::new("Spawned", "Give Item", 32)
            .with_severity(severity)
            .with_timestamp(timestamp)
    }

    #[test]
    fn test_format_plain() {
        assert_eq!(
            format_message(&message(Severity::Info), false),
            "//// 07/03/2024 02:05:09 PM [Give Item]: Spawned"
        );
    }

    #[test]
    fn test_format_colored() {
        let plain = format_message(&message(Severity::Warning), false);
        assert_eq!(format_message(&message(Severity::Info), true), plain);
        assert_eq!(
            format_message(&message(Severity::Warning), true),
            Color::Yellow.paint(plain.as_str()).to_string()
        );
        assert!(format_message(&message(Severity::Error), true).starts_with("\u{1b}["));
    }
}
