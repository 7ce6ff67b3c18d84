use indexmap::IndexMap;
use log::{debug, warn};

use crate::command::{Command, Signature};

/// A command together with the plugin that registered it
#[derive(Debug)]
pub struct RegisteredCommand {
    command: Command,
    owner: Option<String>,
}

impl RegisteredCommand {
    pub fn name(&self) -> &str {
        self.command.name()
    }

    pub fn signature(&self) -> &Signature {
        self.command.signature()
    }

    /// Plugin id of the owner, `None` for built-ins
    pub fn owner(&self) -> Option<&str> {
        self.owner.as_deref()
    }

    pub fn command(&self) -> &Command {
        &self.command
    }
}

/// Registry of commands, unique by name, in registration order
///
/// Colliding names are renamed to `base_1`, `base_2`, ... where `base` is the
/// original name, even when the colliding name is itself a generated alias.
#[derive(Debug, Default)]
pub struct CommandRegistry {
    commands: IndexMap<String, RegisteredCommand>,
    aliases: IndexMap<String, Vec<String>>,
}

impl CommandRegistry {
    /// Create an empty command registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a command, renaming it if its name is taken
    ///
    /// Returns the name the command ended up with.
    pub fn register(&mut self, mut command: Command, owner: Option<&str>) -> String {
        let requested = command.name().to_string();
        let name = self.resolve_name(&requested);
        if name != requested {
            warn!(
                "command '{}' from {} is already taken, registered as '{}'",
                requested,
                owner.unwrap_or("the console"),
                name
            );
            command.rename(name.clone());
        } else {
            debug!("registered command '{}'", name);
        }

        self.commands.insert(
            name.clone(),
            RegisteredCommand {
                command,
                owner: owner.map(str::to_string),
            },
        );
        name
    }

    /// Pick a free name for `name`, recording a new alias on collision
    fn resolve_name(&mut self, name: &str) -> String {
        if !self.commands.contains_key(name) {
            return name.to_string();
        }

        let base = self.base_of(name).unwrap_or(name).to_string();
        let taken = self.aliases.get(&base).map_or(0, Vec::len);
        let mut suffix = taken + 1;
        let mut alias = format!("{}_{}", base, suffix);
        while self.commands.contains_key(&alias) {
            suffix += 1;
            alias = format!("{}_{}", base, suffix);
        }

        self.aliases.entry(base).or_default().push(alias.clone());
        alias
    }

    /// The original name a generated alias was derived from
    pub fn base_of(&self, alias: &str) -> Option<&str> {
        self.aliases
            .iter()
            .find(|(_, aliases)| aliases.iter().any(|a| a == alias))
            .map(|(base, _)| base.as_str())
    }

    /// Aliases generated so far for an original name, oldest first
    pub fn aliases_of(&self, base: &str) -> &[String] {
        self.aliases.get(base).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Get a registered command by name
    pub fn lookup(&self, name: &str) -> Option<&RegisteredCommand> {
        self.commands.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.commands.contains_key(name)
    }

    /// All commands in registration order
    pub fn all(&self) -> impl Iterator<Item = &RegisteredCommand> {
        self.commands.values()
    }

    /// Signatures of all commands, in registration order
    pub fn signatures(&self) -> Vec<Signature> {
        self.all().map(|c| c.signature().clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}
