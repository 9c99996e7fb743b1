//! Inbound interaction payloads.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

use crate::command::domain::{ArgumentType, DeclaredType, OptionKind};

/// Type of an inbound interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "u64", into = "u64")]
pub enum InteractionType {
    /// Endpoint liveness check.
    Ping,
    /// A command invocation.
    ApplicationCommand,
    /// A message component interaction; not handled.
    MessageComponent,
    /// Any other type code.
    Unknown(u64),
}

impl From<u64> for InteractionType {
    fn from(code: u64) -> Self {
        match code {
            1 => Self::Ping,
            2 => Self::ApplicationCommand,
            3 => Self::MessageComponent,
            other => Self::Unknown(other),
        }
    }
}

impl From<InteractionType> for u64 {
    fn from(kind: InteractionType) -> Self {
        match kind {
            InteractionType::Ping => 1,
            InteractionType::ApplicationCommand => 2,
            InteractionType::MessageComponent => 3,
            InteractionType::Unknown(code) => code,
        }
    }
}

/// One inbound interaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Interaction {
    /// Interaction identifier.
    #[serde(default)]
    pub id: String,
    /// Interaction type.
    #[serde(rename = "type")]
    pub kind: InteractionType,
    /// Type-specific payload, left raw until the type is known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    /// Application the interaction targets.
    #[serde(default)]
    pub application_id: String,
    /// Continuation token used for follow-up calls.
    #[serde(default)]
    pub token: String,
    /// Guild the interaction was sent from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guild_id: Option<String>,
    /// Channel the interaction was sent from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel_id: Option<String>,
    /// Invoking guild member, raw.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub member: Option<Value>,
    /// Invoking user for interactions outside a guild.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
}

impl Interaction {
    /// Decodes the command payload of an application command interaction.
    ///
    /// Returns `None` when the interaction carries no `data` object.
    ///
    /// # Errors
    ///
    /// Returns the decoding error when `data` is not a command payload.
    #[must_use]
    pub fn command_data(&self) -> Option<Result<ApplicationCommandData, serde_json::Error>> {
        self.data.as_ref().map(ApplicationCommandData::deserialize)
    }
}

/// Payload of an application command interaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplicationCommandData {
    /// Registered command identifier.
    #[serde(default)]
    pub id: String,
    /// Invoked top-level command or group name.
    pub name: String,
    /// Submitted option tree.
    #[serde(default)]
    pub options: Vec<SubmittedOption>,
    /// Entities referenced by the options.
    #[serde(default)]
    pub resolved: ResolvedData,
}

/// One submitted option, possibly holding nested options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmittedOption {
    /// Option name.
    pub name: String,
    /// Option kind, when the platform sends it.
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<OptionKind>,
    /// Scalar value; absent for sub-commands and groups.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
    /// Nested options for sub-commands and groups.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<Self>,
}

impl SubmittedOption {
    /// Creates a scalar option.
    #[must_use]
    pub fn value(name: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            name: name.into(),
            kind: None,
            value: Some(value.into()),
            options: Vec::new(),
        }
    }

    /// Creates a selector option wrapping nested options.
    #[must_use]
    pub fn nested(name: impl Into<String>, options: Vec<Self>) -> Self {
        Self {
            name: name.into(),
            kind: None,
            value: None,
            options,
        }
    }
}

/// Side table of entities referenced by submitted options.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResolvedData {
    /// Users keyed by ID.
    #[serde(default)]
    pub users: BTreeMap<String, User>,
    /// Channels keyed by ID.
    #[serde(default)]
    pub channels: BTreeMap<String, Channel>,
    /// Roles keyed by ID, raw.
    #[serde(default)]
    pub roles: BTreeMap<String, Value>,
    /// Guild members keyed by user ID, raw.
    #[serde(default)]
    pub members: BTreeMap<String, Value>,
}

/// A platform user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// User identifier.
    pub id: String,
    /// Username.
    pub username: String,
    /// Legacy four-digit discriminator.
    #[serde(default)]
    pub discriminator: String,
    /// Public account flags.
    #[serde(default)]
    pub public_flags: u64,
    /// Whether the user is a bot.
    #[serde(default)]
    pub bot: bool,
    /// Avatar hash.
    #[serde(default)]
    pub avatar: Option<String>,
}

impl User {
    /// Returns the mention markup for this user.
    #[must_use]
    pub fn mention(&self) -> String {
        format!("<@{}>", self.id)
    }
}

impl ArgumentType for User {
    fn declared_type() -> DeclaredType {
        DeclaredType::User
    }
}

/// Kind of a platform channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "u8", into = "u8")]
pub enum ChannelType {
    /// Guild text channel.
    GuildText,
    /// Direct message.
    Dm,
    /// Guild voice channel.
    GuildVoice,
    /// Group direct message.
    GroupDm,
    /// Guild category.
    GuildCategory,
    /// Guild announcement channel.
    GuildNews,
    /// Guild store channel.
    GuildStore,
    /// Thread in an announcement channel.
    GuildNewsThread,
    /// Public thread.
    GuildPublicThread,
    /// Private thread.
    GuildPrivateThread,
    /// Stage voice channel.
    GuildStageVoice,
    /// Any other type code.
    Unknown(u8),
}

impl From<u8> for ChannelType {
    fn from(code: u8) -> Self {
        match code {
            0 => Self::GuildText,
            1 => Self::Dm,
            2 => Self::GuildVoice,
            3 => Self::GroupDm,
            4 => Self::GuildCategory,
            5 => Self::GuildNews,
            6 => Self::GuildStore,
            10 => Self::GuildNewsThread,
            11 => Self::GuildPublicThread,
            12 => Self::GuildPrivateThread,
            13 => Self::GuildStageVoice,
            other => Self::Unknown(other),
        }
    }
}

impl From<ChannelType> for u8 {
    fn from(kind: ChannelType) -> Self {
        match kind {
            ChannelType::GuildText => 0,
            ChannelType::Dm => 1,
            ChannelType::GuildVoice => 2,
            ChannelType::GroupDm => 3,
            ChannelType::GuildCategory => 4,
            ChannelType::GuildNews => 5,
            ChannelType::GuildStore => 6,
            ChannelType::GuildNewsThread => 10,
            ChannelType::GuildPublicThread => 11,
            ChannelType::GuildPrivateThread => 12,
            ChannelType::GuildStageVoice => 13,
            ChannelType::Unknown(code) => code,
        }
    }
}

/// A platform channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Channel {
    /// Channel identifier.
    pub id: String,
    /// Channel name.
    #[serde(default)]
    pub name: String,
    /// Permission bitset of the invoking member, as a decimal string.
    #[serde(default)]
    pub permissions: String,
    /// Channel kind.
    #[serde(rename = "type")]
    pub kind: ChannelType,
}

impl ArgumentType for Channel {
    fn declared_type() -> DeclaredType {
        DeclaredType::Channel
    }
}

/// Marker for role parameters; values arrive as role IDs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Role;

impl ArgumentType for Role {
    fn declared_type() -> DeclaredType {
        DeclaredType::Role
    }
}

/// Marker for user-or-role parameters; values arrive as IDs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Mentionable;

impl ArgumentType for Mentionable {
    fn declared_type() -> DeclaredType {
        DeclaredType::Mentionable
    }
}
