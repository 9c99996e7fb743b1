//! Leaf commands.

use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use super::name::{validate_description, validate_name};
use super::{
    ApplicationCommandSchema, CommandOption, ContextKind, OptionKind, SchemaCompileError,
    compile_signature,
};
use crate::command::ports::CommandHandler;

/// An invocable command compiled from a handler declaration.
///
/// Commands are immutable once built.
#[derive(Clone)]
pub struct Command {
    name: String,
    description: String,
    options: Vec<CommandOption>,
    context: ContextKind,
    defaults: BTreeMap<String, Value>,
    handler: Arc<dyn CommandHandler>,
}

impl Command {
    /// Compiles a command from its handler's declared signature.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaCompileError`] when the name or description is invalid
    /// or the handler signature does not compile.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        handler: Arc<dyn CommandHandler>,
    ) -> Result<Self, SchemaCompileError> {
        let command_name = name.into();
        let command_description = description.into();
        validate_name(&command_name)?;
        validate_description(&command_name, &command_description)?;

        let (context, options, defaults) =
            compile_signature(&command_name, &handler.signature())?.into_parts();

        Ok(Self {
            name: command_name,
            description: command_description,
            options,
            context,
            defaults,
            handler,
        })
    }

    /// Returns the command name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the command description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the compiled options in declaration order.
    #[must_use]
    pub fn options(&self) -> &[CommandOption] {
        &self.options
    }

    /// Finds a declared option by name.
    #[must_use]
    pub fn option(&self, name: &str) -> Option<&CommandOption> {
        self.options.iter().find(|option| option.name == name)
    }

    /// Returns the default value for an optional option.
    #[must_use]
    pub fn default_for(&self, name: &str) -> Option<&Value> {
        self.defaults.get(name)
    }

    /// Returns the declared context kind.
    #[must_use]
    pub const fn context(&self) -> ContextKind {
        self.context
    }

    /// Returns `true` when the command replies through the deferred flow.
    #[must_use]
    pub const fn is_deferred(&self) -> bool {
        matches!(self.context, ContextKind::Deferred)
    }

    /// Returns the handler.
    #[must_use]
    pub const fn handler(&self) -> &Arc<dyn CommandHandler> {
        &self.handler
    }

    /// Returns the schema registered when this is a top-level command.
    #[must_use]
    pub fn schema(&self) -> ApplicationCommandSchema {
        ApplicationCommandSchema::new(&self.name, &self.description, self.options.clone())
    }

    /// Returns the sub-command option used when nested in a group.
    #[must_use]
    pub fn as_sub_command(&self) -> CommandOption {
        CommandOption::new(OptionKind::SubCommand, &self.name, &self.description, false)
            .with_children(self.options.clone())
    }
}

impl fmt::Debug for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Command")
            .field("name", &self.name)
            .field("description", &self.description)
            .field("options", &self.options)
            .field("context", &self.context)
            .field("defaults", &self.defaults)
            .finish_non_exhaustive()
    }
}
