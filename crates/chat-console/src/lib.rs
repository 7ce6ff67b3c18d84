//! Chat Console - the command core of an in-application console
//!
//! This library resolves a typed line to a registered command, binds the
//! trailing tokens to the command's parameters, coerces them into typed values
//! and runs the handler. Plugins contribute commands and custom argument
//! parsers once, during startup.
//!
//! Rendering and input handling belong to the host: the console only talks to
//! an [`OutputSink`] and is driven by whoever feeds it lines and keystrokes.

pub mod args;
pub mod builtins;
pub mod command;
pub mod complete;
pub mod config;
pub mod console;
pub mod error;
pub mod message;
pub mod param;
pub mod parser;
pub mod plugin;
pub mod registry;
pub mod util;

pub use args::{bind, Argument, Arguments};
pub use command::{Command, CommandContext, Handler, Signature};
pub use complete::Autocomplete;
pub use config::ConsoleConfig;
pub use console::{Console, ConsoleBuilder, Dispatch};
pub use error::{ArgumentError, ConsoleError, Mismatch, RejectReason};
pub use message::{Message, MessageLog, OutputSink, Severity};
pub use param::{Parameter, ValueType};
pub use parser::{AnyParser, ParserInfo, ParserRegistry, TypeParser};
pub use plugin::{HostPlugin, PluginDescriptor, PluginSet};
pub use registry::{CommandRegistry, RegisteredCommand};
