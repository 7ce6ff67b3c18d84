use chat_console::{Console, Severity};
use miette::Result;
use reedline::{
    default_emacs_keybindings, ColumnarMenu, DefaultPrompt, DefaultPromptSegment, Emacs, KeyCode,
    KeyModifiers, MenuBuilder, Reedline, ReedlineEvent, ReedlineMenu, Signal,
};

use crate::completions::hint::GhostHinter;
use crate::completions::reedline::TabCompleter;
use crate::sink::TerminalSink;

const COMPLETION_MENU: &str = "completion_menu";

/// Read-Eval-Print Loop driving a console from the terminal
pub struct Repl {
    console: Console<TerminalSink>,
    line_editor: Reedline,
}

impl Repl {
    /// Create a REPL around an already started console
    pub fn new(console: Console<TerminalSink>) -> Self {
        let autocomplete = console.autocomplete().clone();
        let mut line_editor =
            Reedline::create().with_hinter(Box::new(GhostHinter::new(autocomplete.clone())));

        if console.config().tab_completion {
            let mut keybindings = default_emacs_keybindings();
            keybindings.add_binding(
                KeyModifiers::NONE,
                KeyCode::Tab,
                ReedlineEvent::UntilFound(vec![
                    ReedlineEvent::Menu(COMPLETION_MENU.to_string()),
                    ReedlineEvent::MenuNext,
                ]),
            );
            let menu = ColumnarMenu::default().with_name(COMPLETION_MENU);
            line_editor = line_editor
                .with_completer(Box::new(TabCompleter::new(autocomplete)))
                .with_menu(ReedlineMenu::EngineCompleter(Box::new(menu)))
                .with_quick_completions(true)
                .with_edit_mode(Box::new(Emacs::new(keybindings)));
        }

        Self { console, line_editor }
    }

    pub fn console(&self) -> &Console<TerminalSink> {
        &self.console
    }

    /// Run the REPL loop
    pub fn run(&mut self) -> Result<()> {
        let prompt = DefaultPrompt::new(DefaultPromptSegment::Empty, DefaultPromptSegment::Empty);

        loop {
            match self.line_editor.read_line(&prompt) {
                Ok(Signal::Success(line)) => {
                    let line = line.trim();
                    if line == "exit" || line == "quit" {
                        println!("Goodbye!");
                        break;
                    }
                    self.console.execute(line);
                }
                Ok(Signal::CtrlD) => {
                    println!();
                    println!("Goodbye!");
                    break;
                }
                Ok(_) => {
                    // Ctrl+C, just show a new prompt
                    continue;
                }
                Err(err) => {
                    self.console
                        .message(format!("Terminal error: {}", err), Severity::Error);
                }
            }
        }

        Ok(())
    }
}
