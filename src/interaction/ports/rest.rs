//! Outbound REST port for the interaction platform.

use async_trait::async_trait;
use thiserror::Error;

use crate::command::domain::{ApplicationCommandSchema, RegisteredCommand};
use crate::interaction::domain::WebhookEditBody;

/// Result type for REST client operations.
pub type RestResult<T> = Result<T, RestError>;

/// Calls made back into the platform's REST API.
#[async_trait]
pub trait InteractionRestClient: Send + Sync {
    /// Creates or overwrites a global command.
    async fn create_global_command(
        &self,
        application_id: &str,
        schema: &ApplicationCommandSchema,
    ) -> RestResult<RegisteredCommand>;

    /// Deletes a global command by ID.
    async fn delete_global_command(&self, application_id: &str, command_id: &str)
    -> RestResult<()>;

    /// Lists the application's global commands.
    async fn list_global_commands(&self, application_id: &str)
    -> RestResult<Vec<RegisteredCommand>>;

    /// Replaces the original response of a deferred interaction.
    async fn edit_original_response(
        &self,
        application_id: &str,
        token: &str,
        body: &WebhookEditBody,
    ) -> RestResult<()>;
}

/// Errors returned by REST client adapters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RestError {
    /// The request could not be sent or the response not read.
    #[error("REST transport error: {0}")]
    Transport(String),

    /// The platform answered with a non-success status.
    #[error("REST call failed with status {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body text.
        body: String,
    },

    /// The response body did not decode.
    #[error("REST response did not decode: {0}")]
    Decode(String),
}

impl RestError {
    /// Wraps a transport failure.
    pub fn transport(err: impl std::error::Error) -> Self {
        Self::Transport(err.to_string())
    }

    /// Wraps a decoding failure.
    pub fn decode(err: impl std::error::Error) -> Self {
        Self::Decode(err.to_string())
    }
}
