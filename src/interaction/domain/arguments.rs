//! Typed arguments rebuilt from submitted options.

use serde_json::Value;
use std::collections::BTreeMap;
use thiserror::Error;

use super::{Channel, ResolvedData, SubmittedOption, User};
use crate::command::domain::{Command, OptionKind};

/// One argument value handed to a handler.
#[derive(Debug, Clone, PartialEq)]
pub enum ArgumentValue {
    /// A user resolved from the payload's side table.
    User(User),
    /// A channel resolved from the payload's side table.
    Channel(Channel),
    /// Any other value, passed through unchanged.
    Value(Value),
}

/// Errors raised when a handler reads an argument.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ArgumentError {
    /// No argument with this name was extracted.
    #[error("argument '{name}' is missing")]
    Missing {
        /// Argument name.
        name: String,
    },

    /// The argument holds a different type.
    #[error("argument '{name}' is not a {expected}")]
    TypeMismatch {
        /// Argument name.
        name: String,
        /// Expected type description.
        expected: &'static str,
    },
}

/// Errors raised when submitted options cannot be matched to a command.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractionError {
    /// A user or channel ID has no entry in the resolved side table.
    #[error("option '{option}' references unresolved entity '{id}'")]
    UnresolvedEntity {
        /// Option name.
        option: String,
        /// Referenced ID.
        id: String,
    },

    /// A required option was not submitted.
    #[error("required option '{option}' was not submitted")]
    MissingRequired {
        /// Option name.
        option: String,
    },
}

/// Arguments extracted for one invocation, keyed by option name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CommandArguments {
    values: BTreeMap<String, ArgumentValue>,
}

impl CommandArguments {
    /// Creates an empty argument set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an argument.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: ArgumentValue) -> Self {
        self.values.insert(name.into(), value);
        self
    }

    /// Returns the raw argument value.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&ArgumentValue> {
        self.values.get(name)
    }

    /// Returns `true` when an argument with this name exists.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// Returns the number of arguments.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` when no arguments were extracted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterates over the arguments in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ArgumentValue)> {
        self.values.iter().map(|(name, value)| (name.as_str(), value))
    }

    /// Reads a string argument.
    ///
    /// # Errors
    ///
    /// Returns [`ArgumentError`] when the argument is absent or not a string.
    pub fn string(&self, name: &str) -> Result<&str, ArgumentError> {
        self.raw(name)?
            .as_str()
            .ok_or_else(|| mismatch(name, "string"))
    }

    /// Reads an integer argument.
    ///
    /// # Errors
    ///
    /// Returns [`ArgumentError`] when the argument is absent or not an integer.
    pub fn integer(&self, name: &str) -> Result<i64, ArgumentError> {
        self.raw(name)?
            .as_i64()
            .ok_or_else(|| mismatch(name, "integer"))
    }

    /// Reads a boolean argument.
    ///
    /// # Errors
    ///
    /// Returns [`ArgumentError`] when the argument is absent or not a boolean.
    pub fn boolean(&self, name: &str) -> Result<bool, ArgumentError> {
        self.raw(name)?
            .as_bool()
            .ok_or_else(|| mismatch(name, "boolean"))
    }

    /// Reads a user argument.
    ///
    /// # Errors
    ///
    /// Returns [`ArgumentError`] when the argument is absent or not a user.
    pub fn user(&self, name: &str) -> Result<&User, ArgumentError> {
        match self.lookup(name)? {
            ArgumentValue::User(user) => Ok(user),
            _ => Err(mismatch(name, "user")),
        }
    }

    /// Reads a channel argument.
    ///
    /// # Errors
    ///
    /// Returns [`ArgumentError`] when the argument is absent or not a channel.
    pub fn channel(&self, name: &str) -> Result<&Channel, ArgumentError> {
        match self.lookup(name)? {
            ArgumentValue::Channel(channel) => Ok(channel),
            _ => Err(mismatch(name, "channel")),
        }
    }

    /// Reads the ID carried by a role, mentionable, user or channel argument.
    ///
    /// # Errors
    ///
    /// Returns [`ArgumentError`] when the argument is absent or carries no ID.
    pub fn snowflake(&self, name: &str) -> Result<&str, ArgumentError> {
        match self.lookup(name)? {
            ArgumentValue::User(user) => Ok(&user.id),
            ArgumentValue::Channel(channel) => Ok(&channel.id),
            ArgumentValue::Value(value) => value.as_str().ok_or_else(|| mismatch(name, "snowflake")),
        }
    }

    fn lookup(&self, name: &str) -> Result<&ArgumentValue, ArgumentError> {
        self.values.get(name).ok_or_else(|| ArgumentError::Missing {
            name: name.to_owned(),
        })
    }

    fn raw(&self, name: &str) -> Result<&Value, ArgumentError> {
        match self.lookup(name)? {
            ArgumentValue::Value(value) => Ok(value),
            _ => Err(mismatch(name, "plain value")),
        }
    }
}

fn mismatch(name: &str, expected: &'static str) -> ArgumentError {
    ArgumentError::TypeMismatch {
        name: name.to_owned(),
        expected,
    }
}

/// Rebuilds the handler arguments for `command` from the submitted options.
///
/// User and channel options are replaced with their entries from `resolved`.
/// Submitted names the command does not declare are ignored, and declared
/// options that were not submitted take their default value.
///
/// # Errors
///
/// Returns [`ExtractionError::UnresolvedEntity`] when a user or channel ID is
/// missing from `resolved`, or [`ExtractionError::MissingRequired`] when a
/// required option was not submitted.
pub fn extract_arguments(
    command: &Command,
    submitted: &[SubmittedOption],
    resolved: &ResolvedData,
) -> Result<CommandArguments, ExtractionError> {
    let mut arguments = CommandArguments::new();

    for option in submitted {
        let Some(declared) = command.option(&option.name) else {
            continue;
        };
        let value = option.value.clone().unwrap_or(Value::Null);
        let argument = match declared.kind {
            OptionKind::User => ArgumentValue::User(
                resolve_entity(&option.name, &value, &resolved.users)?.clone(),
            ),
            OptionKind::Channel => ArgumentValue::Channel(
                resolve_entity(&option.name, &value, &resolved.channels)?.clone(),
            ),
            _ => ArgumentValue::Value(value),
        };
        arguments.values.insert(option.name.clone(), argument);
    }

    for declared in command.options() {
        if arguments.contains(&declared.name) {
            continue;
        }
        let Some(default) = command.default_for(&declared.name) else {
            return Err(ExtractionError::MissingRequired {
                option: declared.name.clone(),
            });
        };
        arguments
            .values
            .insert(declared.name.clone(), ArgumentValue::Value(default.clone()));
    }

    Ok(arguments)
}

fn resolve_entity<'a, T>(
    option: &str,
    value: &Value,
    table: &'a BTreeMap<String, T>,
) -> Result<&'a T, ExtractionError> {
    let id = match value {
        Value::String(id) => id.clone(),
        other => other.to_string(),
    };
    table
        .get(&id)
        .ok_or_else(|| ExtractionError::UnresolvedEntity {
            option: option.to_owned(),
            id,
        })
}
