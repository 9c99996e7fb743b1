//! Contexts handed to command handlers.

use std::fmt;
use std::sync::Arc;

use super::{Interaction, InteractionResponse, MessagePayload, WebhookEditBody};
use crate::interaction::ports::{InteractionRestClient, RestResult};

/// Context passed to a handler, matching its declared context kind.
#[derive(Debug, Clone)]
pub enum InteractionContext {
    /// Context of a command that replies in the webhook response.
    Immediate(ImmediateContext),
    /// Context of a command that replies through follow-up edits.
    Deferred(DeferredContext),
}

impl InteractionContext {
    /// Returns the originating interaction.
    #[must_use]
    pub fn interaction(&self) -> &Interaction {
        match self {
            Self::Immediate(context) => context.interaction(),
            Self::Deferred(context) => context.interaction(),
        }
    }
}

/// Context for handlers whose return value is the webhook response.
#[derive(Debug, Clone)]
pub struct ImmediateContext {
    interaction: Arc<Interaction>,
}

impl ImmediateContext {
    /// Wraps the originating interaction.
    #[must_use]
    pub const fn new(interaction: Arc<Interaction>) -> Self {
        Self { interaction }
    }

    /// Returns the originating interaction.
    #[must_use]
    pub fn interaction(&self) -> &Interaction {
        &self.interaction
    }

    /// Builds a text reply.
    #[must_use]
    pub fn reply(&self, content: impl Into<String>) -> InteractionResponse {
        InteractionResponse::message(MessagePayload::text(content))
    }

    /// Builds a reply from a full message payload.
    #[must_use]
    pub const fn reply_with(&self, payload: MessagePayload) -> InteractionResponse {
        InteractionResponse::message(payload)
    }
}

/// Context for handlers that were acknowledged and reply later.
///
/// The context owns the continuation token; it can edit the original
/// response any number of times until the platform expires the token.
#[derive(Clone)]
pub struct DeferredContext {
    interaction: Arc<Interaction>,
    rest: Arc<dyn InteractionRestClient>,
}

impl DeferredContext {
    /// Wraps the originating interaction and the REST client used for edits.
    #[must_use]
    pub fn new(interaction: Arc<Interaction>, rest: Arc<dyn InteractionRestClient>) -> Self {
        Self { interaction, rest }
    }

    /// Returns the originating interaction.
    #[must_use]
    pub fn interaction(&self) -> &Interaction {
        &self.interaction
    }

    /// Returns the application the interaction targets.
    #[must_use]
    pub fn application_id(&self) -> &str {
        &self.interaction.application_id
    }

    /// Returns the continuation token.
    #[must_use]
    pub fn token(&self) -> &str {
        &self.interaction.token
    }

    /// Replaces the original response.
    ///
    /// # Errors
    ///
    /// Returns the REST client's error when the edit is rejected.
    pub async fn update(&self, body: &WebhookEditBody) -> RestResult<()> {
        self.rest
            .edit_original_response(self.application_id(), self.token(), body)
            .await
    }

    /// Replaces the original response with plain text.
    ///
    /// # Errors
    ///
    /// Returns the REST client's error when the edit is rejected.
    pub async fn update_content(&self, content: impl Into<String> + Send) -> RestResult<()> {
        self.update(&WebhookEditBody::text(content)).await
    }
}

impl fmt::Debug for DeferredContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeferredContext")
            .field("interaction", &self.interaction)
            .finish_non_exhaustive()
    }
}
