//! Ghost-text hinter
//!
//! Shows what is left to type after the cursor: the rest of the command name
//! followed by the parameter placeholders not yet supplied.

use chat_console::Autocomplete;
use nu_ansi_term::{Color, Style};
use reedline::{Hinter, History};

use super::caret;

pub struct GhostHinter {
    autocomplete: Autocomplete,
    style: Style,
    hint: String,
    name_rest: String,
}

impl GhostHinter {
    pub fn new(autocomplete: Autocomplete) -> Self {
        Self {
            autocomplete,
            style: Style::new().fg(Color::DarkGray),
            hint: String::new(),
            name_rest: String::new(),
        }
    }

    pub fn with_style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    /// Ghost text past the typed input, empty if nothing matches
    pub fn ghost(&self, line: &str, pos: usize) -> String {
        self.autocomplete
            .suggest(line, caret(line, pos))
            .and_then(|full| full.strip_prefix(line).map(str::to_string))
            .unwrap_or_default()
    }

    /// Remaining characters of the command name being typed
    fn rest_of_name(&self, line: &str, pos: usize) -> String {
        let Some(first) = line.split_whitespace().next() else {
            return String::new();
        };
        if line.trim_start().len() != first.len() {
            return String::new();
        }
        self.autocomplete
            .closest(line, caret(line, pos))
            .and_then(|signature| signature.name.strip_prefix(first))
            .map(str::to_string)
            .unwrap_or_default()
    }
}

impl Hinter for GhostHinter {
    fn handle(
        &mut self,
        line: &str,
        pos: usize,
        _history: &dyn History,
        use_ansi_coloring: bool,
        _cwd: &str,
    ) -> String {
        // only hint with the cursor at the end of the line
        if pos != line.len() {
            self.hint.clear();
            self.name_rest.clear();
            return String::new();
        }

        self.hint = self.ghost(line, pos);
        self.name_rest = self.rest_of_name(line, pos);

        if use_ansi_coloring && !self.hint.is_empty() {
            self.style.paint(&self.hint).to_string()
        } else {
            self.hint.clone()
        }
    }

    /// Accepting a hint only completes the command name; placeholders are not input
    fn complete_hint(&self) -> String {
        self.name_rest.clone()
    }

    fn next_hint_token(&self) -> String {
        self.name_rest.clone()
    }
}
