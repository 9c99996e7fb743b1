//! Command groups.
//!
//! A group is an internal node of the command tree. The platform allows one
//! level of nesting: a top-level group may contain child groups, and those
//! children may contain only commands.

use std::collections::BTreeMap;

use super::name::{validate_description, validate_name};
use super::{
    ApplicationCommandSchema, Command, CommandOption, LookupError, OptionKind, RegistryError,
    SchemaCompileError,
};
use crate::interaction::domain::SubmittedOption;

/// A named group of commands and child groups.
#[derive(Debug, Clone)]
pub struct Group {
    name: String,
    description: String,
    commands: BTreeMap<String, Command>,
    children: BTreeMap<String, Self>,
}

impl Group {
    /// Creates an empty group.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaCompileError`] when the name or description is invalid.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> Result<Self, SchemaCompileError> {
        let group_name = name.into();
        let group_description = description.into();
        validate_name(&group_name)?;
        validate_description(&group_name, &group_description)?;
        Ok(Self {
            name: group_name,
            description: group_description,
            commands: BTreeMap::new(),
            children: BTreeMap::new(),
        })
    }

    /// Adds a command, consuming and returning the group.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::DuplicateName`] when a sibling already uses
    /// the name.
    pub fn with_command(mut self, command: Command) -> Result<Self, RegistryError> {
        self.add_command(command)?;
        Ok(self)
    }

    /// Adds a child group, consuming and returning the group.
    ///
    /// # Errors
    ///
    /// Fails like [`Group::add_group`].
    pub fn with_group(mut self, group: Self) -> Result<Self, RegistryError> {
        self.add_group(group)?;
        Ok(self)
    }

    /// Adds a command.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::DuplicateName`] when a sibling already uses
    /// the name.
    pub fn add_command(&mut self, command: Command) -> Result<(), RegistryError> {
        self.ensure_free(command.name())?;
        self.commands.insert(command.name().to_owned(), command);
        Ok(())
    }

    /// Adds a child group.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::DuplicateName`] when a sibling already uses
    /// the name, [`RegistryError::GroupTooDeep`] when the child contains
    /// groups of its own, or [`RegistryError::EmptyGroup`] when the child
    /// holds no commands.
    pub fn add_group(&mut self, group: Self) -> Result<(), RegistryError> {
        if !group.children.is_empty() {
            return Err(RegistryError::GroupTooDeep {
                parent: self.name.clone(),
                child: group.name,
            });
        }
        self.ensure_free(&group.name)?;
        group.ensure_populated()?;
        self.children.insert(group.name.clone(), group);
        Ok(())
    }

    /// Fails when the group holds neither commands nor child groups.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::EmptyGroup`] naming the group.
    pub fn ensure_populated(&self) -> Result<(), RegistryError> {
        if self.is_empty() {
            return Err(RegistryError::EmptyGroup(self.name.clone()));
        }
        Ok(())
    }

    /// Returns `true` when the group holds neither commands nor child groups.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty() && self.children.is_empty()
    }

    fn ensure_free(&self, name: &str) -> Result<(), RegistryError> {
        if self.commands.contains_key(name) || self.children.contains_key(name) {
            return Err(RegistryError::DuplicateName {
                scope: format!("group '{}'", self.name),
                name: name.to_owned(),
            });
        }
        Ok(())
    }

    /// Returns the group name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the group description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the commands directly inside this group.
    #[must_use]
    pub const fn commands(&self) -> &BTreeMap<String, Command> {
        &self.commands
    }

    /// Returns the child groups.
    #[must_use]
    pub const fn children(&self) -> &BTreeMap<String, Self> {
        &self.children
    }

    /// Resolves the submitted option tree to a command.
    ///
    /// Each level must carry exactly one selected option. A selected command
    /// is returned together with its own submitted options; a selected child
    /// group is searched recursively.
    ///
    /// # Errors
    ///
    /// Returns [`LookupError::SelectionCount`] when a level does not hold
    /// exactly one option, or [`LookupError::NotFound`] when the selected name
    /// is neither a command nor a child group.
    pub fn lookup<'a>(
        &'a self,
        options: &'a [SubmittedOption],
    ) -> Result<(&'a Command, &'a [SubmittedOption]), LookupError> {
        let [selected] = options else {
            return Err(LookupError::SelectionCount {
                group: self.name.clone(),
                count: options.len(),
            });
        };

        if let Some(command) = self.commands.get(&selected.name) {
            return Ok((command, &selected.options));
        }
        if let Some(child) = self.children.get(&selected.name) {
            return child.lookup(&selected.options);
        }
        Err(LookupError::NotFound {
            group: self.name.clone(),
            name: selected.name.clone(),
        })
    }

    /// Returns the schema registered for this group at top level.
    #[must_use]
    pub fn schema(&self) -> ApplicationCommandSchema {
        ApplicationCommandSchema::new(&self.name, &self.description, self.child_options())
    }

    /// Returns the sub-command group option used when nested in a parent.
    #[must_use]
    pub fn as_sub_command_group(&self) -> CommandOption {
        CommandOption::new(
            OptionKind::SubCommandGroup,
            &self.name,
            &self.description,
            false,
        )
        .with_children(self.child_options())
    }

    fn child_options(&self) -> Vec<CommandOption> {
        self.children
            .values()
            .map(Self::as_sub_command_group)
            .chain(self.commands.values().map(Command::as_sub_command))
            .collect()
    }

    /// Visits every command in this group and its children.
    pub(crate) fn collect_commands<'a>(&'a self, out: &mut Vec<&'a Command>) {
        out.extend(self.commands.values());
        for child in self.children.values() {
            child.collect_commands(out);
        }
    }

    /// Visits this group and every child group.
    pub(crate) fn collect_groups<'a>(&'a self, out: &mut Vec<&'a Self>) {
        out.push(self);
        for child in self.children.values() {
            child.collect_groups(out);
        }
    }
}
