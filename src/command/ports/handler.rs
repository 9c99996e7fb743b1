//! Handler port invoked by the interaction dispatcher.

use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

use crate::command::domain::{ContextKind, HandlerSignature};
use crate::interaction::domain::{
    ArgumentError, CommandArguments, InteractionContext, InteractionResponse,
};
use crate::interaction::ports::RestError;

/// Result type for command handlers.
pub type HandlerResult<T> = Result<T, HandlerError>;

/// Code that runs when a command is invoked.
///
/// The declared signature decides the command's options and whether it is
/// deferred. Immediate handlers return `Some` reply; deferred handlers
/// report through [`crate::interaction::domain::DeferredContext::update`]
/// and return `None`.
#[async_trait]
pub trait CommandHandler: Send + Sync {
    /// Returns the declared parameter list, context parameter first.
    fn signature(&self) -> HandlerSignature;

    /// Runs the handler.
    async fn handle(
        &self,
        context: InteractionContext,
        arguments: CommandArguments,
    ) -> HandlerResult<Option<InteractionResponse>>;
}

/// Errors raised by command handlers.
#[derive(Debug, Clone, Error)]
pub enum HandlerError {
    /// An argument was missing or had an unexpected type.
    #[error(transparent)]
    Argument(#[from] ArgumentError),

    /// A follow-up REST call failed.
    #[error(transparent)]
    Rest(#[from] RestError),

    /// An immediate handler finished without producing a reply.
    #[error("immediate handler produced no reply")]
    MissingReply,

    /// The handler was given a context it was not declared for.
    #[error("handler expected a {expected:?} context")]
    ContextMismatch {
        /// Context kind the handler declared.
        expected: ContextKind,
    },

    /// The handler failed for a reason of its own.
    #[error("{0}")]
    Failed(String),

    /// Wrapped error from handler code.
    #[error("handler error: {0}")]
    Other(Arc<dyn std::error::Error + Send + Sync>),
}

impl HandlerError {
    /// Creates a failure with a plain message.
    pub fn failed(message: impl Into<String>) -> Self {
        Self::Failed(message.into())
    }

    /// Wraps an arbitrary error raised by handler code.
    pub fn other(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Other(Arc::new(err))
    }
}
