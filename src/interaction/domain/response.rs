//! Outbound interaction responses and follow-up bodies.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::Embed;

/// Callback type of an interaction response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "u8", into = "u8")]
pub enum InteractionResponseType {
    /// Acknowledges a ping.
    Pong,
    /// Replies with a message.
    ChannelMessageWithSource,
    /// Acknowledges now; the reply is edited in later.
    DeferredChannelMessageWithSource,
    /// Acknowledges a component interaction without a message.
    DeferredUpdateMessage,
    /// Edits the message a component is attached to.
    UpdateMessage,
    /// Any other type code.
    Unknown(u8),
}

impl From<u8> for InteractionResponseType {
    fn from(code: u8) -> Self {
        match code {
            1 => Self::Pong,
            4 => Self::ChannelMessageWithSource,
            5 => Self::DeferredChannelMessageWithSource,
            6 => Self::DeferredUpdateMessage,
            7 => Self::UpdateMessage,
            other => Self::Unknown(other),
        }
    }
}

impl From<InteractionResponseType> for u8 {
    fn from(kind: InteractionResponseType) -> Self {
        match kind {
            InteractionResponseType::Pong => 1,
            InteractionResponseType::ChannelMessageWithSource => 4,
            InteractionResponseType::DeferredChannelMessageWithSource => 5,
            InteractionResponseType::DeferredUpdateMessage => 6,
            InteractionResponseType::UpdateMessage => 7,
            InteractionResponseType::Unknown(code) => code,
        }
    }
}

/// Body returned synchronously to the platform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InteractionResponse {
    /// Callback type.
    #[serde(rename = "type")]
    pub kind: InteractionResponseType,
    /// Message payload, when the callback type carries one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<MessagePayload>,
}

impl InteractionResponse {
    /// Answer to a ping.
    #[must_use]
    pub const fn pong() -> Self {
        Self {
            kind: InteractionResponseType::Pong,
            data: None,
        }
    }

    /// Acknowledgement sent before a deferred handler runs.
    #[must_use]
    pub const fn deferred_ack() -> Self {
        Self {
            kind: InteractionResponseType::DeferredChannelMessageWithSource,
            data: None,
        }
    }

    /// Replies with a message payload.
    #[must_use]
    pub const fn message(payload: MessagePayload) -> Self {
        Self {
            kind: InteractionResponseType::ChannelMessageWithSource,
            data: Some(payload),
        }
    }
}

/// Message content carried by a reply.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MessagePayload {
    /// Whether the message is read aloud.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tts: Option<bool>,
    /// Plain text content.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// Rich embeds.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub embeds: Vec<Embed>,
    /// Mention policy.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allowed_mentions: Option<AllowedMentions>,
    /// Message flags bitset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flags: Option<u64>,
    /// Message components, raw.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub components: Vec<Value>,
}

impl MessagePayload {
    /// Creates a text-only payload.
    #[must_use]
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
            ..Self::default()
        }
    }

    /// Creates a payload holding one embed.
    #[must_use]
    pub fn embed(embed: Embed) -> Self {
        Self {
            embeds: vec![embed],
            ..Self::default()
        }
    }

    /// Sets the mention policy.
    #[must_use]
    pub fn with_allowed_mentions(mut self, allowed_mentions: AllowedMentions) -> Self {
        self.allowed_mentions = Some(allowed_mentions);
        self
    }

    /// Sets the message flags.
    #[must_use]
    pub const fn with_flags(mut self, flags: u64) -> Self {
        self.flags = Some(flags);
        self
    }
}

/// Body of an edit to the original deferred response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebhookEditBody {
    /// Replacement text content.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// Replacement embeds.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub embeds: Vec<Embed>,
    /// Mention policy.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allowed_mentions: Option<AllowedMentions>,
}

impl WebhookEditBody {
    /// Creates a text-only edit.
    #[must_use]
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
            ..Self::default()
        }
    }

    /// Creates an edit holding one embed.
    #[must_use]
    pub fn embed(embed: Embed) -> Self {
        Self {
            embeds: vec![embed],
            ..Self::default()
        }
    }
}

/// Which mentions in a message may notify their targets.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllowedMentions {
    /// Mention kinds parsed from content: `roles`, `users` or `everyone`.
    #[serde(default)]
    pub parse: Vec<String>,
    /// Role IDs that may be mentioned.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub roles: Vec<String>,
    /// User IDs that may be mentioned.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub users: Vec<String>,
    /// Whether the replied-to author is mentioned.
    #[serde(default)]
    pub replied_user: bool,
}

impl AllowedMentions {
    /// Suppresses every mention.
    #[must_use]
    pub fn none() -> Self {
        Self::default()
    }
}

/// Terminal success of a dispatched request.
#[derive(Debug, Clone, PartialEq)]
pub enum InteractionReply {
    /// A typed response body.
    Response(InteractionResponse),
    /// The empty object returned for unhandled interaction types.
    Empty,
}

impl InteractionReply {
    /// Renders the reply as the JSON body sent to the platform.
    ///
    /// # Errors
    ///
    /// Returns the serialization error, which only occurs for payloads that
    /// hold non-string map keys in raw components.
    pub fn to_json(&self) -> Result<Value, serde_json::Error> {
        match self {
            Self::Response(response) => serde_json::to_value(response),
            Self::Empty => Ok(Value::Object(serde_json::Map::new())),
        }
    }
}
