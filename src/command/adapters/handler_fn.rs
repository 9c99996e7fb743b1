//! Closure-backed command handlers.

use async_trait::async_trait;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use crate::command::domain::{ContextKind, HandlerSignature, ParameterDeclaration};
use crate::command::ports::{CommandHandler, HandlerError, HandlerResult};
use crate::interaction::domain::{
    CommandArguments, DeferredContext, ImmediateContext, InteractionContext, InteractionResponse,
};

type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

type HandlerFuture = BoxFuture<'static, HandlerResult<Option<InteractionResponse>>>;

type ErasedCall = dyn Fn(InteractionContext, CommandArguments) -> HandlerFuture + Send + Sync;

/// A [`CommandHandler`] built from an async closure and a parameter list.
pub struct FnHandler {
    signature: HandlerSignature,
    call: Box<ErasedCall>,
}

#[async_trait]
impl CommandHandler for FnHandler {
    fn signature(&self) -> HandlerSignature {
        self.signature.clone()
    }

    async fn handle(
        &self,
        context: InteractionContext,
        arguments: CommandArguments,
    ) -> HandlerResult<Option<InteractionResponse>> {
        (self.call)(context, arguments).await
    }
}

/// Builds a handler that replies immediately.
///
/// `parameters` lists the options after the implicit immediate context.
pub fn immediate_handler<F, Fut>(
    parameters: impl IntoIterator<Item = ParameterDeclaration>,
    handler: F,
) -> Arc<dyn CommandHandler>
where
    F: Fn(ImmediateContext, CommandArguments) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = HandlerResult<InteractionResponse>> + Send + 'static,
{
    let signature = parameters
        .into_iter()
        .fold(HandlerSignature::immediate(), HandlerSignature::parameter);
    let call = move |context: InteractionContext, arguments: CommandArguments| -> HandlerFuture {
        match context {
            InteractionContext::Immediate(immediate) => {
                let reply = handler(immediate, arguments);
                Box::pin(async move { reply.await.map(Some) })
            }
            InteractionContext::Deferred(_) => Box::pin(async {
                Err(HandlerError::ContextMismatch {
                    expected: ContextKind::Immediate,
                })
            }),
        }
    };
    Arc::new(FnHandler {
        signature,
        call: Box::new(call),
    })
}

/// Builds a handler that is acknowledged first and updates its reply later.
///
/// `parameters` lists the options after the implicit deferred context.
pub fn deferred_handler<F, Fut>(
    parameters: impl IntoIterator<Item = ParameterDeclaration>,
    handler: F,
) -> Arc<dyn CommandHandler>
where
    F: Fn(DeferredContext, CommandArguments) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = HandlerResult<()>> + Send + 'static,
{
    let signature = parameters
        .into_iter()
        .fold(HandlerSignature::deferred(), HandlerSignature::parameter);
    let call = move |context: InteractionContext, arguments: CommandArguments| -> HandlerFuture {
        match context {
            InteractionContext::Deferred(deferred) => {
                let work = handler(deferred, arguments);
                Box::pin(async move { work.await.map(|()| None) })
            }
            InteractionContext::Immediate(_) => Box::pin(async {
                Err(HandlerError::ContextMismatch {
                    expected: ContextKind::Deferred,
                })
            }),
        }
    };
    Arc::new(FnHandler {
        signature,
        call: Box::new(call),
    })
}
