//! Reedline Completer integration
//!
//! Tab replaces the whole input with the closest command name, the way the
//! console's own Tab handling does.

use chat_console::Autocomplete;
use reedline::{Completer, Span, Suggestion};

use super::caret;

pub struct TabCompleter {
    autocomplete: Autocomplete,
}

impl TabCompleter {
    pub fn new(autocomplete: Autocomplete) -> Self {
        Self { autocomplete }
    }
}

impl Completer for TabCompleter {
    fn complete(&mut self, line: &str, pos: usize) -> Vec<Suggestion> {
        let Some(name) = self.autocomplete.tab_complete(line, caret(line, pos)) else {
            return Vec::new();
        };

        let description = self
            .autocomplete
            .signatures()
            .iter()
            .find(|signature| signature.name == name)
            .and_then(|signature| signature.description.clone());

        vec![Suggestion {
            value: name,
            description,
            span: Span::new(0, line.len()),
            append_whitespace: false,
            ..Default::default()
        }]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chat_console::Command;

    fn completer() -> TabCompleter {
        let commands = [
            Command::new("help", |_| Ok(())).description("Shows a list of commands"),
            Command::new("hello", |_| Ok(())),
        ];
        TabCompleter::new(Autocomplete::new(
            commands.iter().map(|c| c.signature().clone()).collect(),
        ))
    }

    #[test]
    fn test_tab_replaces_whole_line() {
        let mut completer = completer();
        let suggestions = completer.complete("hel", 3);
        assert_eq!(suggestions.len(), 1);
        assert_eq!(suggestions[0].value, "help");
        assert_eq!(suggestions[0].span, Span::new(0, 3));
        assert_eq!(suggestions[0].description.as_deref(), Some("Shows a list of commands"));
    }

    #[test]
    fn test_no_suggestion_once_name_typed() {
        let mut completer = completer();
        assert!(completer.complete("help", 4).is_empty());
        assert!(completer.complete("xyz", 3).is_empty());
    }
}
