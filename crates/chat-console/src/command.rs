//! Commands, their signatures and the context handlers run in

use std::fmt;

use miette::Result;

use crate::args::Arguments;
use crate::config::ConsoleConfig;
use crate::message::{Message, OutputSink, Severity};
use crate::param::{render_signature, validate, Parameter};
use crate::parser::ParserRegistry;
use crate::plugin::PluginSet;
use crate::registry::CommandRegistry;
use crate::util::{normalize_name, simplify_name};

/// Handler invoked when a command is dispatched
pub type Handler = Box<dyn Fn(&mut CommandContext<'_>) -> Result<()>>;

/// Name, description and parameter list of a command
#[derive(Debug, Clone, PartialEq)]
pub struct Signature {
    pub name: String,
    pub description: Option<String>,
    pub parameters: Option<Vec<Parameter>>,
}

impl Signature {
    pub fn new(name: &str) -> Self {
        Self {
            name: normalize_name(name),
            description: None,
            parameters: None,
        }
    }

    pub fn parameters(&self) -> Option<&[Parameter]> {
        self.parameters.as_deref()
    }

    /// Whether the parameter schema can be dispatched
    pub fn is_valid(&self) -> bool {
        validate(self.parameters())
    }

    /// Parameters rendered in annotation syntax, `None` without parameters
    pub fn render(&self) -> Option<String> {
        render_signature(self.parameters())
    }

    /// Whether the last parameter is linked
    pub fn ends_linked(&self) -> bool {
        self.parameters()
            .and_then(|params| params.last())
            .is_some_and(Parameter::is_linked)
    }
}

/// A named command with an optional parameter list and a handler
pub struct Command {
    signature: Signature,
    handler: Handler,
}

impl Command {
    /// Create a command without parameters
    ///
    /// The name is normalized: spaces become underscores, letters lower-case.
    pub fn new<F>(name: &str, handler: F) -> Self
    where
        F: Fn(&mut CommandContext<'_>) -> Result<()> + 'static,
    {
        Self {
            signature: Signature::new(name),
            handler: Box::new(handler),
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.signature.description = Some(description.into());
        self
    }

    /// Set the full parameter list; an empty list makes the command invalid
    pub fn parameters(mut self, parameters: Vec<Parameter>) -> Self {
        self.signature.parameters = Some(parameters);
        self
    }

    /// Append one parameter
    pub fn parameter(mut self, parameter: Parameter) -> Self {
        self.signature
            .parameters
            .get_or_insert_with(Vec::new)
            .push(parameter);
        self
    }

    pub fn name(&self) -> &str {
        &self.signature.name
    }

    pub fn signature(&self) -> &Signature {
        &self.signature
    }

    pub(crate) fn rename(&mut self, name: String) {
        self.signature.name = name;
    }

    pub(crate) fn invoke(&self, ctx: &mut CommandContext<'_>) -> Result<()> {
        (self.handler)(ctx)
    }
}

impl fmt::Debug for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Command")
            .field("signature", &self.signature)
            .finish_non_exhaustive()
    }
}

/// Everything a handler may look at or talk to while it runs
pub struct CommandContext<'a> {
    pub(crate) name: &'a str,
    pub(crate) args: Arguments<'a>,
    pub(crate) commands: &'a CommandRegistry,
    pub(crate) parsers: &'a ParserRegistry,
    pub(crate) plugins: &'a PluginSet,
    pub(crate) config: &'a ConsoleConfig,
    pub(crate) sink: &'a mut dyn OutputSink,
}

impl<'a> CommandContext<'a> {
    /// Name the command was dispatched under
    pub fn name(&self) -> &str {
        self.name
    }

    pub fn args(&self) -> &Arguments<'a> {
        &self.args
    }

    pub fn commands(&self) -> &'a CommandRegistry {
        self.commands
    }

    pub fn parsers(&self) -> &'a ParserRegistry {
        self.parsers
    }

    pub fn plugins(&self) -> &'a PluginSet {
        self.plugins
    }

    pub fn config(&self) -> &'a ConsoleConfig {
        self.config
    }

    /// Label messages from this command carry, e.g. `Give Item`
    pub fn label(&self) -> String {
        simplify_name(self.name)
    }

    /// Emit an info message labelled with the command name
    pub fn reply(&mut self, text: impl Into<String>) {
        self.reply_with(text, Severity::Info);
    }

    pub fn reply_with(&mut self, text: impl Into<String>, severity: Severity) {
        let message = Message::new(text, self.label(), self.config.message_size).with_severity(severity);
        self.sink.emit(message);
    }

    /// Emit a fully built message as-is
    pub fn emit(&mut self, message: Message) {
        self.sink.emit(message);
    }

    /// Ask the output sink to drop its history
    pub fn clear_output(&mut self) {
        self.sink.clear();
    }
}
