//! Per-request interaction state machine.
//!
//! A request is authenticated, decoded and classified. Command interactions
//! are resolved against the registry, their arguments rebuilt, and the
//! handler run either inline or as a detached deferred task.

use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, warn};

use super::spawn_deferred;
use crate::command::domain::CommandRegistry;
use crate::command::ports::HandlerError;
use crate::interaction::domain::{
    DeferredContext, ExtractionError, ImmediateContext, Interaction, InteractionContext,
    InteractionReply, InteractionResponse, InteractionType, SignatureVerifier, extract_arguments,
};
use crate::interaction::ports::InteractionRestClient;

/// Header carrying the hex request signature.
pub const SIGNATURE_HEADER: &str = "X-Signature-Ed25519";

/// Header carrying the signed timestamp.
pub const TIMESTAMP_HEADER: &str = "X-Signature-Timestamp";

/// The parts of an inbound webhook request the dispatcher reads.
#[derive(Debug, Clone, Copy)]
pub struct InboundRequest<'a> {
    /// Value of the signature header, if present.
    pub signature: Option<&'a str>,
    /// Value of the timestamp header, if present.
    pub timestamp: Option<&'a str>,
    /// Raw request body.
    pub body: &'a [u8],
}

impl<'a> InboundRequest<'a> {
    /// Creates a request with both signature headers present.
    #[must_use]
    pub const fn signed(signature: &'a str, timestamp: &'a str, body: &'a [u8]) -> Self {
        Self {
            signature: Some(signature),
            timestamp: Some(timestamp),
            body,
        }
    }
}

/// Rejections produced by the dispatcher.
#[derive(Debug, Clone, Error)]
pub enum DispatchError {
    /// Signature headers were missing or the signature did not verify.
    #[error("request signature rejected")]
    AuthenticationFailure,

    /// The body was not a decodable interaction.
    #[error("malformed interaction: {0}")]
    MalformedRequest(String),

    /// No registered command matches the invocation.
    #[error("unknown command '{0}'")]
    UnknownTarget(String),

    /// The submitted options disagree with the command or the resolved table.
    #[error(transparent)]
    ResolutionInconsistency(#[from] ExtractionError),

    /// An immediate handler failed.
    #[error("command '{command}' failed: {source}")]
    HandlerFailure {
        /// Invoked command name.
        command: String,
        /// Handler error.
        #[source]
        source: HandlerError,
    },
}

impl DispatchError {
    /// Returns the HTTP status sent for this rejection.
    #[must_use]
    pub const fn status(&self) -> u16 {
        match self {
            Self::HandlerFailure { .. } => 500,
            Self::AuthenticationFailure
            | Self::MalformedRequest(_)
            | Self::UnknownTarget(_)
            | Self::ResolutionInconsistency(_) => 400,
        }
    }

    /// Returns the reason text sent to the caller.
    ///
    /// Internal detail stays in the logs.
    #[must_use]
    pub const fn public_reason(&self) -> &'static str {
        match self {
            Self::AuthenticationFailure => "bad signature",
            Self::MalformedRequest(_) => "malformed interaction",
            Self::UnknownTarget(_) => "unknown command",
            Self::ResolutionInconsistency(_) => "unresolvable options",
            Self::HandlerFailure { .. } => "command failed",
        }
    }
}

/// Routes verified interactions to registered command handlers.
#[derive(Clone)]
pub struct InteractionDispatcher {
    registry: Arc<CommandRegistry>,
    verifier: SignatureVerifier,
    rest: Arc<dyn InteractionRestClient>,
}

impl InteractionDispatcher {
    /// Creates a dispatcher over a built registry.
    #[must_use]
    pub fn new(
        registry: Arc<CommandRegistry>,
        verifier: SignatureVerifier,
        rest: Arc<dyn InteractionRestClient>,
    ) -> Self {
        Self {
            registry,
            verifier,
            rest,
        }
    }

    /// Returns the registry consulted at dispatch time.
    #[must_use]
    pub const fn registry(&self) -> &Arc<CommandRegistry> {
        &self.registry
    }

    /// Handles one inbound request.
    ///
    /// Deferred commands are acknowledged at once; their handler runs in a
    /// detached task that is spawned before this returns.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError`] when the request is rejected.
    pub async fn dispatch(
        &self,
        request: InboundRequest<'_>,
    ) -> Result<InteractionReply, DispatchError> {
        self.process(request).await.inspect_err(|err| {
            warn!(
                status = err.status(),
                reason = err.public_reason(),
                error = %err,
                "interaction rejected"
            );
        })
    }

    async fn process(&self, request: InboundRequest<'_>) -> Result<InteractionReply, DispatchError> {
        self.authenticate(&request)?;

        let interaction: Interaction = serde_json::from_slice(request.body)
            .map_err(|err| DispatchError::MalformedRequest(err.to_string()))?;
        debug!(
            interaction_id = %interaction.id,
            application_id = %interaction.application_id,
            kind = ?interaction.kind,
            "interaction classified"
        );

        match interaction.kind {
            InteractionType::Ping => Ok(InteractionReply::Response(InteractionResponse::pong())),
            InteractionType::ApplicationCommand => self.run_command(interaction).await,
            InteractionType::MessageComponent | InteractionType::Unknown(_) => {
                Ok(InteractionReply::Empty)
            }
        }
    }

    fn authenticate(&self, request: &InboundRequest<'_>) -> Result<(), DispatchError> {
        let (Some(signature), Some(timestamp)) = (request.signature, request.timestamp) else {
            return Err(DispatchError::AuthenticationFailure);
        };
        self.verifier
            .verify(request.body, timestamp, signature)
            .map_err(|_| DispatchError::AuthenticationFailure)
    }

    async fn run_command(&self, interaction: Interaction) -> Result<InteractionReply, DispatchError> {
        let data = interaction
            .command_data()
            .ok_or_else(|| DispatchError::MalformedRequest("missing command data".to_owned()))?
            .map_err(|err| DispatchError::MalformedRequest(err.to_string()))?;

        let resolved = self
            .registry
            .resolve(&data.name, &data.options)
            .map_err(|err| {
                debug!(command = %data.name, error = %err, "command lookup failed");
                DispatchError::UnknownTarget(data.name.clone())
            })?;
        let command = resolved.command;
        let arguments = extract_arguments(command, resolved.options, &data.resolved)?;
        let shared = Arc::new(interaction);

        if command.is_deferred() {
            debug!(command = command.name(), interaction_id = %shared.id, "deferring command");
            let context = DeferredContext::new(Arc::clone(&shared), Arc::clone(&self.rest));
            spawn_deferred(
                command.name(),
                Arc::clone(command.handler()),
                context,
                arguments,
            );
            return Ok(InteractionReply::Response(InteractionResponse::deferred_ack()));
        }

        debug!(command = command.name(), interaction_id = %shared.id, "running command");
        let context = InteractionContext::Immediate(ImmediateContext::new(shared));
        let failure = |source| DispatchError::HandlerFailure {
            command: command.name().to_owned(),
            source,
        };
        command
            .handler()
            .handle(context, arguments)
            .await
            .map_err(failure)?
            .map(InteractionReply::Response)
            .ok_or_else(|| failure(HandlerError::MissingReply))
    }
}
