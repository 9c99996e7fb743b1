//! Runs the slash command webhook server.
//!
//! Usage:
//!
//! ```text
//! slashhook --token <bot-token> --application-id <id> --public-key <hex> \
//!     [--host localhost] [--port 8689] [--sync-commands] [--log-format json]
//! ```
//!
//! Every flag can also be supplied through its `SLASHHOOK_*` environment
//! variable. The server registers the built-in demo commands and, with
//! `--sync-commands`, pushes their schemas to the platform before serving.

mod demo;

use std::sync::Arc;

use clap::Parser;
use slashhook::command::domain::{CommandRegistry, RegistryError};
use slashhook::command::services::{CommandSynchronizer, SyncError};
use slashhook::config::{Cli, ConfigError, ServerConfig};
use slashhook::interaction::adapters::{DiscordRestClient, ServeError, router, serve};
use slashhook::interaction::ports::{InteractionRestClient, RestError};
use slashhook::interaction::services::InteractionDispatcher;
use slashhook::telemetry;
use thiserror::Error;
use tracing::{info, warn};
use tracing_subscriber::util::TryInitError;

/// Errors that abort the server.
#[derive(Debug, Error)]
enum AppError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("failed to initialise logging: {0}")]
    Telemetry(#[from] TryInitError),
    #[error("failed to load commands: {0}")]
    Registry(#[from] RegistryError),
    #[error("failed to build REST client: {0}")]
    Rest(#[from] RestError),
    #[error(transparent)]
    Sync(#[from] SyncError),
    #[error(transparent)]
    Serve(#[from] ServeError),
}

#[tokio::main]
async fn main() -> Result<(), AppError> {
    let cli = Cli::parse();
    telemetry::init(cli.log_format)?;
    let config = ServerConfig::try_from(cli)?;

    let registry = Arc::new(CommandRegistry::builder().module(demo::module()?).build()?);
    info!(
        commands = registry.all_commands().len(),
        groups = registry.all_groups().len(),
        "command registry loaded"
    );

    let rest: Arc<dyn InteractionRestClient> = Arc::new(DiscordRestClient::with_base_url(
        config.token.as_str(),
        config.api_base.as_str(),
    )?);

    if config.sync_commands {
        let report = CommandSynchronizer::new(Arc::clone(&registry), Arc::clone(&rest))
            .sync(&config.application_id)
            .await?;
        info!(
            created = ?report.created,
            deleted = ?report.deleted,
            "command sync complete"
        );
    }

    let dispatcher = Arc::new(InteractionDispatcher::new(registry, config.verifier, rest));
    serve(
        &config.host,
        config.port,
        router(dispatcher),
        shutdown_signal(),
    )
    .await?;
    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("shutdown requested");
}
