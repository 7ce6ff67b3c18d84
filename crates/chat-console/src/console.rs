//! Console startup and dispatch
//!
//! [`ConsoleBuilder`] collects everything needed for the one registration
//! phase. [`ConsoleBuilder::build`] runs it and hands back a [`Console`],
//! which only dispatches and completes; nothing can be registered afterwards.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use log::{debug, error, info, warn};

use crate::args::{bind, Arguments};
use crate::builtins;
use crate::command::CommandContext;
use crate::complete::Autocomplete;
use crate::config::ConsoleConfig;
use crate::error::{report_severity, ConsoleError};
use crate::message::{Message, OutputSink, Severity};
use crate::parser::ParserRegistry;
use crate::plugin::{HostPlugin, PluginDescriptor, PluginSet};
use crate::registry::CommandRegistry;
use crate::util::simplify_name;

/// Registration callback run once at startup
pub type RegisterFn = Box<dyn FnOnce() -> PluginDescriptor>;

/// Outcome of executing one input line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    /// The line held no tokens
    Empty,
    /// The handler ran and returned successfully
    Completed,
    /// Something was reported to the sink instead
    Failed(Severity),
}

/// Collects host components, registration callbacks and settings
pub struct ConsoleBuilder<S> {
    sink: S,
    config: ConsoleConfig,
    host: Vec<HostPlugin>,
    callbacks: Vec<RegisterFn>,
}

impl<S: OutputSink> ConsoleBuilder<S> {
    pub fn new(sink: S) -> Self {
        Self {
            sink,
            config: ConsoleConfig::default(),
            host: Vec::new(),
            callbacks: Vec::new(),
        }
    }

    pub fn config(mut self, config: ConsoleConfig) -> Self {
        self.config = config;
        self
    }

    /// Declare a component the host has loaded
    pub fn host_plugin(mut self, plugin: HostPlugin) -> Self {
        self.host.push(plugin);
        self
    }

    pub fn host_plugins(mut self, plugins: impl IntoIterator<Item = HostPlugin>) -> Self {
        self.host.extend(plugins);
        self
    }

    /// Queue a registration callback; callbacks run in the order given
    pub fn on_register<F>(mut self, callback: F) -> Self
    where
        F: FnOnce() -> PluginDescriptor + 'static,
    {
        self.callbacks.push(Box::new(callback));
        self
    }

    /// Run the registration phase and return the ready console
    pub fn build(self) -> Console<S> {
        let mut console = Console {
            commands: CommandRegistry::new(),
            parsers: ParserRegistry::new(),
            plugins: PluginSet::new(self.host),
            config: self.config,
            sink: self.sink,
            autocomplete: Autocomplete::default(),
        };

        for command in builtins::commands() {
            console.commands.register(command, None);
        }
        for callback in self.callbacks {
            console.accept(callback());
        }

        console.autocomplete = Autocomplete::new(console.commands.signatures());
        info!(
            "console ready: {} commands, {} parsers, {} plugins",
            console.commands.len(),
            console.parsers.len(),
            console.plugins.registered().len()
        );
        console
    }
}

/// A started console: resolves lines to commands and runs them
pub struct Console<S> {
    commands: CommandRegistry,
    parsers: ParserRegistry,
    plugins: PluginSet,
    config: ConsoleConfig,
    sink: S,
    autocomplete: Autocomplete,
}

impl<S: OutputSink> Console<S> {
    pub fn builder(sink: S) -> ConsoleBuilder<S> {
        ConsoleBuilder::new(sink)
    }

    /// Accept or reject one plugin descriptor as a whole
    fn accept(&mut self, descriptor: PluginDescriptor) {
        if let Err(reason) = self.plugins.check(&descriptor) {
            let err = ConsoleError::PluginRejected {
                id: descriptor.guid().to_string(),
                reason,
            };
            warn!("{}", err);
            let label = self.config.default_label.clone();
            self.report(&err, label);
            return;
        }

        let (guid, commands, parsers) = descriptor.into_parts();
        debug!("accepting plugin '{}'", guid);
        for command in commands {
            self.commands.register(command, Some(&guid));
        }
        for parser in parsers {
            self.parsers.register(parser, Some(&guid));
        }
        self.plugins.mark_registered(guid);
    }

    /// Execute one input line
    ///
    /// Every failure ends up as a message in the sink; nothing propagates.
    pub fn execute(&mut self, line: &str) -> Dispatch {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        let Some((&name, rest)) = tokens.split_first() else {
            return Dispatch::Empty;
        };

        let Some(entry) = self.commands.lookup(name) else {
            let err = ConsoleError::UnknownCommand { name: name.to_string() };
            let label = self.config.default_label.clone();
            return self.report(&err, label);
        };

        let label = simplify_name(entry.name());
        let signature = entry.signature();
        if !signature.is_valid() {
            let err = ConsoleError::Validation {
                command: entry.name().to_string(),
            };
            return self.report(&err, label);
        }

        let bound = match bind(signature.parameters(), rest) {
            Ok(bound) => bound,
            Err(err) => return self.report(&err, label),
        };

        debug!("dispatching '{}' with {} argument(s)", entry.name(), bound.len());
        let outcome = {
            let mut ctx = CommandContext {
                name: entry.name(),
                args: Arguments::new(bound, &self.parsers),
                commands: &self.commands,
                parsers: &self.parsers,
                plugins: &self.plugins,
                config: &self.config,
                sink: &mut self.sink,
            };
            let command = entry.command();
            panic::catch_unwind(AssertUnwindSafe(|| command.invoke(&mut ctx)))
        };

        let (text, severity) = match outcome {
            Ok(Ok(())) => return Dispatch::Completed,
            Ok(Err(report)) => (report.to_string(), report_severity(&report)),
            Err(payload) => {
                let text = panic_message(payload.as_ref());
                error!("command '{}' panicked: {}", name, text);
                (text, Severity::Error)
            }
        };
        let message = Message::new(text, label, self.config.message_size).with_severity(severity);
        self.sink.emit(message);
        Dispatch::Failed(severity)
    }

    fn report(&mut self, err: &ConsoleError, label: String) -> Dispatch {
        let severity = err.severity();
        let message = Message::new(err.to_string(), label, self.config.message_size).with_severity(severity);
        self.sink.emit(message);
        Dispatch::Failed(severity)
    }

    /// Emit a message from the host itself, under the default label
    pub fn message(&mut self, text: impl Into<String>, severity: Severity) {
        let message = Message::new(text, self.config.default_label.clone(), self.config.message_size)
            .with_severity(severity);
        self.sink.emit(message);
    }

    /// Ghost text for the current input, see [`Autocomplete::suggest`]
    pub fn suggest(&self, input: &str, caret: usize) -> Option<String> {
        self.autocomplete.suggest(input, caret)
    }

    /// Replacement input for a Tab press, if Tab completion is enabled
    pub fn tab_complete(&self, input: &str, caret: usize) -> Option<String> {
        if !self.config.tab_completion {
            return None;
        }
        self.autocomplete.tab_complete(input, caret)
    }

    /// Snapshot of the registered signatures for a line editor
    pub fn autocomplete(&self) -> &Autocomplete {
        &self.autocomplete
    }

    pub fn commands(&self) -> &CommandRegistry {
        &self.commands
    }

    pub fn parsers(&self) -> &ParserRegistry {
        &self.parsers
    }

    pub fn plugins(&self) -> &PluginSet {
        &self.plugins
    }

    pub fn config(&self) -> &ConsoleConfig {
        &self.config
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(text) = payload.downcast_ref::<&str>() {
        text.to_string()
    } else if let Some(text) = payload.downcast_ref::<String>() {
        text.clone()
    } else {
        "Something went wrong".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::Command;
    use crate::message::MessageLog;
    use crate::param::Parameter;

    fn console() -> Console<MessageLog> {
        Console::builder(MessageLog::new())
            .host_plugin(HostPlugin::new("tools", "Tools", "1.0.0"))
            .on_register(|| {
                PluginDescriptor::new("tools").command(
                    Command::new("double", |ctx| {
                        let n = ctx.args().value::<i64>(0)?.unwrap_or_default();
                        ctx.reply((n * 2).to_string());
                        Ok(())
                    })
                    .parameter(Parameter::new::<i64>("n")),
                )
            })
            .build()
    }

    #[test]
    fn test_empty_line_is_noop() {
        let mut console = console();
        assert_eq!(console.execute("   "), Dispatch::Empty);
        assert!(console.sink().is_empty());
    }

    #[test]
    fn test_dispatch_plugin_command() {
        let mut console = console();
        assert_eq!(console.execute("double 21"), Dispatch::Completed);
        let last = console.sink().last().expect("a reply");
        assert_eq!(last.text, "42");
        assert_eq!(last.label, "Double");
        assert_eq!(last.size, 32);
    }

    #[test]
    fn test_count_error_reported() {
        let mut console = console();
        assert_eq!(console.execute("double"), Dispatch::Failed(Severity::Info));
        let last = console.sink().last().expect("an error message");
        assert_eq!(last.text, "Requires at least 1 argument(s)");
        assert_eq!(last.label, "Double");
    }

    #[test]
    fn test_parse_error_reported() {
        let mut console = console();
        assert_eq!(console.execute("double two"), Dispatch::Failed(Severity::Error));
        let last = console.sink().last().expect("an error message");
        assert!(last.text.starts_with("Error parsing argument 1:"));
    }

    #[test]
    fn test_panic_is_contained() {
        let mut console = Console::builder(MessageLog::new())
            .host_plugin(HostPlugin::new("tools", "Tools", "1.0.0"))
            .on_register(|| {
                PluginDescriptor::new("tools").command(Command::new("boom", |_| panic!("kaboom")))
            })
            .build();
        assert_eq!(console.execute("boom"), Dispatch::Failed(Severity::Error));
        assert_eq!(console.sink().last().map(|m| m.text.as_str()), Some("kaboom"));
        assert_eq!(console.execute("help boom"), Dispatch::Completed);
    }

    #[test]
    fn test_tab_completion_respects_config() {
        let console = Console::builder(MessageLog::new())
            .config(ConsoleConfig::default().with_tab_completion(false))
            .build();
        assert_eq!(console.tab_complete("he", 1), None);
        assert_eq!(console.autocomplete().tab_complete("he", 1).as_deref(), Some("help"));
    }
}
