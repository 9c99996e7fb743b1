//! Wire-format option descriptors.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Kind of a command option, serialized as the platform's integer code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum OptionKind {
    /// Nested sub-command selector.
    SubCommand,
    /// Nested sub-command group selector.
    SubCommandGroup,
    /// Free-form or choice-restricted string.
    String,
    /// Free-form or choice-restricted integer.
    Integer,
    /// Boolean flag.
    Boolean,
    /// Reference to a user, resolved by the platform.
    User,
    /// Reference to a channel, resolved by the platform.
    Channel,
    /// Reference to a role.
    Role,
    /// Reference to a user or role.
    Mentionable,
}

impl OptionKind {
    /// Returns the platform integer code for this kind.
    #[must_use]
    pub const fn code(self) -> u8 {
        match self {
            Self::SubCommand => 1,
            Self::SubCommandGroup => 2,
            Self::String => 3,
            Self::Integer => 4,
            Self::Boolean => 5,
            Self::User => 6,
            Self::Channel => 7,
            Self::Role => 8,
            Self::Mentionable => 9,
        }
    }

    /// Returns `true` for the kinds that carry nested options.
    #[must_use]
    pub const fn is_nested(self) -> bool {
        matches!(self, Self::SubCommand | Self::SubCommandGroup)
    }

    /// Returns `true` for the kinds whose values the platform resolves into
    /// full objects.
    #[must_use]
    pub const fn is_resolved(self) -> bool {
        matches!(self, Self::User | Self::Channel)
    }
}

impl From<OptionKind> for u8 {
    fn from(kind: OptionKind) -> Self {
        kind.code()
    }
}

impl TryFrom<u8> for OptionKind {
    type Error = ParseOptionKindError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            1 => Ok(Self::SubCommand),
            2 => Ok(Self::SubCommandGroup),
            3 => Ok(Self::String),
            4 => Ok(Self::Integer),
            5 => Ok(Self::Boolean),
            6 => Ok(Self::User),
            7 => Ok(Self::Channel),
            8 => Ok(Self::Role),
            9 => Ok(Self::Mentionable),
            other => Err(ParseOptionKindError(other)),
        }
    }
}

impl fmt::Display for OptionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::SubCommand => "sub_command",
            Self::SubCommandGroup => "sub_command_group",
            Self::String => "string",
            Self::Integer => "integer",
            Self::Boolean => "boolean",
            Self::User => "user",
            Self::Channel => "channel",
            Self::Role => "role",
            Self::Mentionable => "mentionable",
        };
        f.write_str(label)
    }
}

/// Error returned when an option kind code is not recognised.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown option kind code: {0}")]
pub struct ParseOptionKindError(pub u8);

/// Value attached to a choice.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ChoiceValue {
    /// Integer choice value.
    Integer(i64),
    /// String choice value.
    String(String),
}

impl ChoiceValue {
    /// Returns the option kind this value is compatible with.
    #[must_use]
    pub const fn kind(&self) -> OptionKind {
        match self {
            Self::Integer(_) => OptionKind::Integer,
            Self::String(_) => OptionKind::String,
        }
    }
}

impl From<i64> for ChoiceValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<i32> for ChoiceValue {
    fn from(value: i32) -> Self {
        Self::Integer(i64::from(value))
    }
}

impl From<&str> for ChoiceValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_owned())
    }
}

impl From<String> for ChoiceValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

/// A labelled choice offered for an option.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionChoice {
    /// Label shown to the invoking user.
    pub name: String,
    /// Value submitted when the choice is picked.
    pub value: ChoiceValue,
}

impl OptionChoice {
    /// Creates a choice.
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<ChoiceValue>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// A single option of a command as registered with the platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandOption {
    /// Option kind.
    #[serde(rename = "type")]
    pub kind: OptionKind,
    /// Option name, unique within its scope.
    pub name: String,
    /// Human-readable description.
    pub description: String,
    /// Whether the option must be supplied.
    #[serde(default)]
    pub required: bool,
    /// Ordered choices; empty for free-form input.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub choices: Vec<OptionChoice>,
    /// Nested options for sub-commands and sub-command groups.
    #[serde(default, rename = "options", skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Self>,
}

impl CommandOption {
    /// Creates a leaf option without choices.
    #[must_use]
    pub fn new(
        kind: OptionKind,
        name: impl Into<String>,
        description: impl Into<String>,
        required: bool,
    ) -> Self {
        Self {
            kind,
            name: name.into(),
            description: description.into(),
            required,
            choices: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Attaches ordered choices.
    #[must_use]
    pub fn with_choices(mut self, choices: Vec<OptionChoice>) -> Self {
        self.choices = choices;
        self
    }

    /// Attaches nested options.
    #[must_use]
    pub fn with_children(mut self, children: Vec<Self>) -> Self {
        self.children = children;
        self
    }
}
