//! Top-level command registry and its load-phase builder.

use std::collections::BTreeMap;

use super::{ApplicationCommandSchema, Command, Group, LookupError, RegistryError};
use crate::interaction::domain::SubmittedOption;

/// A top-level registry entry.
#[derive(Debug, Clone)]
pub enum RegistryEntry {
    /// A root command.
    Command(Command),
    /// A root group.
    Group(Group),
}

impl RegistryEntry {
    /// Returns the entry name.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Command(command) => command.name(),
            Self::Group(group) => group.name(),
        }
    }

    /// Returns the wire-format schema for this entry.
    #[must_use]
    pub fn schema(&self) -> ApplicationCommandSchema {
        match self {
            Self::Command(command) => command.schema(),
            Self::Group(group) => group.schema(),
        }
    }
}

/// A command resolved from an inbound interaction.
#[derive(Debug, Clone, Copy)]
pub struct ResolvedCommand<'a> {
    /// Target command.
    pub command: &'a Command,
    /// Options submitted for the target command.
    pub options: &'a [SubmittedOption],
}

/// Declarations contributed by one loaded module.
///
/// Modules return their commands and groups as values instead of writing
/// into shared state, so the load order does not matter.
#[derive(Debug, Clone, Default)]
pub struct CommandModule {
    name: String,
    commands: Vec<Command>,
    groups: Vec<Group>,
}

impl CommandModule {
    /// Creates an empty module.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            commands: Vec::new(),
            groups: Vec::new(),
        }
    }

    /// Adds a top-level command.
    #[must_use]
    pub fn with_command(mut self, command: Command) -> Self {
        self.commands.push(command);
        self
    }

    /// Adds a top-level group.
    #[must_use]
    pub fn with_group(mut self, group: Group) -> Self {
        self.groups.push(group);
        self
    }

    /// Returns the module name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the declared top-level commands.
    #[must_use]
    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    /// Returns the declared top-level groups.
    #[must_use]
    pub fn groups(&self) -> &[Group] {
        &self.groups
    }
}

/// Collects declarations during the load phase.
#[derive(Debug, Clone, Default)]
pub struct RegistryBuilder {
    entries: Vec<RegistryEntry>,
}

impl RegistryBuilder {
    /// Creates an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a top-level command.
    #[must_use]
    pub fn command(mut self, command: Command) -> Self {
        self.entries.push(RegistryEntry::Command(command));
        self
    }

    /// Adds a top-level group.
    #[must_use]
    pub fn group(mut self, group: Group) -> Self {
        self.entries.push(RegistryEntry::Group(group));
        self
    }

    /// Adds every declaration of a module.
    #[must_use]
    pub fn module(mut self, module: CommandModule) -> Self {
        self.entries
            .extend(module.commands.into_iter().map(RegistryEntry::Command));
        self.entries
            .extend(module.groups.into_iter().map(RegistryEntry::Group));
        self
    }

    /// Builds the registry.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::DuplicateName`] when two top-level entries
    /// share a name, or [`RegistryError::EmptyGroup`] when a top-level group
    /// holds no commands.
    pub fn build(self) -> Result<CommandRegistry, RegistryError> {
        let mut entries = BTreeMap::new();
        for entry in self.entries {
            let name = entry.name().to_owned();
            if entries.contains_key(&name) {
                return Err(RegistryError::DuplicateName {
                    scope: "registry".to_owned(),
                    name,
                });
            }
            if let RegistryEntry::Group(group) = &entry {
                group.ensure_populated()?;
            }
            entries.insert(name, entry);
        }
        Ok(CommandRegistry { entries })
    }
}

/// Read-only mapping from top-level names to commands and groups.
#[derive(Debug, Clone, Default)]
pub struct CommandRegistry {
    entries: BTreeMap<String, RegistryEntry>,
}

impl CommandRegistry {
    /// Returns a builder for a new registry.
    #[must_use]
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::new()
    }

    /// Returns the top-level entry with the given name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&RegistryEntry> {
        self.entries.get(name)
    }

    /// Returns the number of top-level entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` when nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Resolves an invoked name and its submitted options to a command.
    ///
    /// A root command is returned with the top-level options unchanged; a
    /// root group resolves through [`Group::lookup`].
    ///
    /// # Errors
    ///
    /// Returns [`LookupError::UnknownTarget`] when nothing is registered under
    /// `name`, or the group lookup error.
    pub fn resolve<'a>(
        &'a self,
        name: &str,
        options: &'a [SubmittedOption],
    ) -> Result<ResolvedCommand<'a>, LookupError> {
        match self.entries.get(name) {
            Some(RegistryEntry::Command(command)) => Ok(ResolvedCommand { command, options }),
            Some(RegistryEntry::Group(group)) => {
                let (command, submitted) = group.lookup(options)?;
                Ok(ResolvedCommand {
                    command,
                    options: submitted,
                })
            }
            None => Err(LookupError::UnknownTarget(name.to_owned())),
        }
    }

    /// Returns every command in the tree, roots first.
    #[must_use]
    pub fn all_commands(&self) -> Vec<&Command> {
        let mut commands = Vec::new();
        for entry in self.entries.values() {
            if let RegistryEntry::Command(command) = entry {
                commands.push(command);
            }
        }
        for entry in self.entries.values() {
            if let RegistryEntry::Group(group) = entry {
                group.collect_commands(&mut commands);
            }
        }
        commands
    }

    /// Returns every group in the tree, parents before children.
    #[must_use]
    pub fn all_groups(&self) -> Vec<&Group> {
        let mut groups = Vec::new();
        for entry in self.entries.values() {
            if let RegistryEntry::Group(group) = entry {
                group.collect_groups(&mut groups);
            }
        }
        groups
    }

    /// Returns the wire-format schema of every top-level entry.
    #[must_use]
    pub fn schemas(&self) -> Vec<ApplicationCommandSchema> {
        self.entries.values().map(RegistryEntry::schema).collect()
    }
}
