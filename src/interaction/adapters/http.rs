//! Axum webhook endpoint.
//!
//! Exposes `POST /interactions`, hands the raw body and signature headers to
//! the dispatcher, and renders its outcome as JSON or a plain-text rejection.

use std::future::Future;
use std::io;
use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use thiserror::Error;
use tracing::{error, info};

use crate::interaction::services::{
    InboundRequest, InteractionDispatcher, SIGNATURE_HEADER, TIMESTAMP_HEADER,
};

/// Path the platform posts interactions to.
pub const INTERACTIONS_PATH: &str = "/interactions";

/// Errors raised while running the webhook server.
#[derive(Debug, Error)]
pub enum ServeError {
    /// The listener could not be bound.
    #[error("failed to bind {addr}: {source}")]
    Bind {
        /// Requested address.
        addr: String,
        /// I/O failure.
        #[source]
        source: io::Error,
    },

    /// The server stopped with an I/O error.
    #[error("webhook server error: {0}")]
    Serve(#[source] io::Error),
}

/// Builds the webhook router.
#[must_use]
pub fn router(dispatcher: Arc<InteractionDispatcher>) -> Router {
    Router::new()
        .route(INTERACTIONS_PATH, post(interactions_handler))
        .with_state(dispatcher)
}

/// Binds `host:port` and serves `app` until `shutdown` resolves.
///
/// # Errors
///
/// Returns [`ServeError`] when binding fails or the server stops with an
/// I/O error.
pub async fn serve(
    host: &str,
    port: u16,
    app: Router,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> Result<(), ServeError> {
    let addr = format!("{host}:{port}");
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|source| ServeError::Bind {
            addr: addr.clone(),
            source,
        })?;

    info!(addr = %addr, "serving interactions webhook");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(ServeError::Serve)
}

async fn interactions_handler(
    State(dispatcher): State<Arc<InteractionDispatcher>>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let request = InboundRequest {
        signature: header_value(&headers, SIGNATURE_HEADER),
        timestamp: header_value(&headers, TIMESTAMP_HEADER),
        body: &body,
    };

    match dispatcher.dispatch(request).await {
        Ok(reply) => match reply.to_json() {
            Ok(json) => (StatusCode::OK, Json(json)).into_response(),
            Err(err) => {
                error!(error = %err, "failed to render interaction reply");
                (StatusCode::INTERNAL_SERVER_ERROR, "command failed").into_response()
            }
        },
        Err(err) => {
            let status =
                StatusCode::from_u16(err.status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
            (status, err.public_reason()).into_response()
        }
    }
}

fn header_value<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|value| value.to_str().ok())
}
