//! Wire-format command descriptions exchanged with the platform.

use serde::{Deserialize, Serialize};

use super::CommandOption;

/// Description of a top-level command as sent to the platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationCommandSchema {
    /// Command or group name.
    pub name: String,
    /// Human-readable description.
    pub description: String,
    /// Options, or sub-commands and sub-command groups for a group.
    #[serde(default)]
    pub options: Vec<CommandOption>,
    /// Whether the command is enabled for everyone by default.
    #[serde(default = "default_permission")]
    pub default_permission: bool,
}

impl ApplicationCommandSchema {
    /// Creates a schema enabled for everyone by default.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        options: Vec<CommandOption>,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            options,
            default_permission: true,
        }
    }
}

const fn default_permission() -> bool {
    true
}

/// A global command as reported back by the platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisteredCommand {
    /// Platform-assigned command identifier.
    pub id: String,
    /// Owning application identifier.
    #[serde(default)]
    pub application_id: String,
    /// Command name.
    pub name: String,
    /// Command description.
    #[serde(default)]
    pub description: String,
    /// Registered options.
    #[serde(default)]
    pub options: Vec<CommandOption>,
}
