//! Detached execution of deferred command handlers.

use std::sync::Arc;
use tracing::{Instrument, debug, error, info_span, warn};

use crate::command::ports::CommandHandler;
use crate::interaction::domain::{CommandArguments, DeferredContext, InteractionContext};

/// Runs a deferred handler on a detached tokio task.
///
/// The task has no result channel: failures are logged and dropped, and
/// the caller is expected to have acknowledged the interaction already.
/// Must be called from within a tokio runtime.
pub fn spawn_deferred(
    command: &str,
    handler: Arc<dyn CommandHandler>,
    context: DeferredContext,
    arguments: CommandArguments,
) {
    let span = info_span!(
        "deferred_command",
        command,
        interaction_id = %context.interaction().id,
        application_id = context.application_id(),
    );
    tokio::spawn(
        async move {
            match handler
                .handle(InteractionContext::Deferred(context), arguments)
                .await
            {
                Ok(None) => debug!("deferred command finished"),
                Ok(Some(_)) => warn!("deferred command returned a reply; it was discarded"),
                Err(err) => error!(error = %err, "deferred command failed"),
            }
        }
        .instrument(span),
    );
}
