//! Plugin descriptors and the set of host components allowed to register

use crate::command::Command;
use crate::error::RejectReason;
use crate::parser::{AnyParser, TypeParser};

/// A component loaded by the host application
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostPlugin {
    pub guid: String,
    pub name: String,
    pub version: String,
}

impl HostPlugin {
    pub fn new(guid: impl Into<String>, name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            guid: guid.into(),
            name: name.into(),
            version: version.into(),
        }
    }
}

/// Commands and parsers one component offers to the console
///
/// A descriptor is accepted or rejected as a whole.
pub struct PluginDescriptor {
    guid: String,
    commands: Vec<Command>,
    parsers: Vec<Box<dyn AnyParser>>,
}

impl PluginDescriptor {
    pub fn new(guid: impl Into<String>) -> Self {
        Self {
            guid: guid.into(),
            commands: Vec::new(),
            parsers: Vec::new(),
        }
    }

    pub fn command(mut self, command: Command) -> Self {
        self.commands.push(command);
        self
    }

    pub fn commands(mut self, commands: impl IntoIterator<Item = Command>) -> Self {
        self.commands.extend(commands);
        self
    }

    /// Contribute a parser for values of type `T`
    pub fn parser<T: 'static>(mut self, parser: TypeParser<T>) -> Self {
        self.parsers.push(Box::new(parser));
        self
    }

    pub fn guid(&self) -> &str {
        &self.guid
    }

    pub(crate) fn into_parts(self) -> (String, Vec<Command>, Vec<Box<dyn AnyParser>>) {
        (self.guid, self.commands, self.parsers)
    }
}

impl std::fmt::Debug for PluginDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PluginDescriptor")
            .field("guid", &self.guid)
            .field("commands", &self.commands)
            .field("parsers", &self.parsers.len())
            .finish()
    }
}

/// Host components plus the ids that registered a descriptor
#[derive(Debug, Clone, Default)]
pub struct PluginSet {
    host: Vec<HostPlugin>,
    registered: Vec<String>,
}

impl PluginSet {
    pub fn new(host: Vec<HostPlugin>) -> Self {
        Self {
            host,
            registered: Vec::new(),
        }
    }

    /// Components the host reports as loaded
    pub fn host(&self) -> &[HostPlugin] {
        &self.host
    }

    /// Ids of accepted descriptors, in acceptance order
    pub fn registered(&self) -> &[String] {
        &self.registered
    }

    pub fn is_known(&self, guid: &str) -> bool {
        self.host.iter().any(|p| p.guid == guid)
    }

    pub fn is_registered(&self, guid: &str) -> bool {
        self.registered.iter().any(|g| g == guid)
    }

    /// Run the acceptance checks for a descriptor
    pub fn check(&self, descriptor: &PluginDescriptor) -> Result<(), RejectReason> {
        if !self.is_known(&descriptor.guid) {
            return Err(RejectReason::UnknownOwner);
        }
        if self.is_registered(&descriptor.guid) {
            return Err(RejectReason::AlreadyRegistered);
        }
        if descriptor.commands.is_empty() {
            return Err(RejectReason::NoCommands);
        }
        Ok(())
    }

    pub(crate) fn mark_registered(&mut self, guid: String) {
        self.registered.push(guid);
    }
}
