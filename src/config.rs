//! Process configuration.
//!
//! Every flag falls back to an environment variable so the server can run
//! from a unit file or container without a command line.

use clap::Parser;
use thiserror::Error;

use crate::interaction::adapters::DEFAULT_API_BASE;
use crate::interaction::domain::{PublicKeyError, SignatureVerifier};
use crate::telemetry::LogFormat;

/// Default listen host.
pub const DEFAULT_HOST: &str = "localhost";

/// Default listen port.
pub const DEFAULT_PORT: u16 = 8689;

/// Command line of the webhook server.
#[derive(Debug, Clone, Parser)]
#[command(name = "slashhook", version, about = "Slash command webhook server")]
pub struct Cli {
    /// Bot token used for REST calls.
    #[arg(long, env = "SLASHHOOK_DISCORD_TOKEN", hide_env_values = true)]
    pub token: String,

    /// Application identifier.
    #[arg(long, env = "SLASHHOOK_APPLICATION_ID")]
    pub application_id: String,

    /// Hex-encoded application public key.
    #[arg(long, env = "SLASHHOOK_PUBLIC_KEY")]
    pub public_key: String,

    /// Host to listen on.
    #[arg(long, env = "SLASHHOOK_HOST", default_value = DEFAULT_HOST)]
    pub host: String,

    /// Port to listen on.
    #[arg(long, env = "SLASHHOOK_PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Register the declared commands globally before serving.
    #[arg(long, env = "SLASHHOOK_SYNC_COMMANDS")]
    pub sync_commands: bool,

    /// Log output format.
    #[arg(long, env = "SLASHHOOK_LOG_FORMAT", value_enum, default_value_t = LogFormat::Pretty)]
    pub log_format: LogFormat,

    /// REST API base URL.
    #[arg(long, env = "SLASHHOOK_API_BASE", default_value = DEFAULT_API_BASE)]
    pub api_base: String,
}

/// Errors raised while validating the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// A required value was blank.
    #[error("--{flag} must not be empty")]
    Empty {
        /// Flag name.
        flag: &'static str,
    },

    /// The public key did not load.
    #[error(transparent)]
    PublicKey(#[from] PublicKeyError),
}

/// Validated server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bot token used for REST calls.
    pub token: String,
    /// Application identifier.
    pub application_id: String,
    /// Verifier built from the application public key.
    pub verifier: SignatureVerifier,
    /// Host to listen on.
    pub host: String,
    /// Port to listen on.
    pub port: u16,
    /// Whether to register commands before serving.
    pub sync_commands: bool,
    /// REST API base URL.
    pub api_base: String,
}

impl TryFrom<Cli> for ServerConfig {
    type Error = ConfigError;

    fn try_from(cli: Cli) -> Result<Self, Self::Error> {
        let token = non_empty("token", &cli.token)?;
        let application_id = non_empty("application-id", &cli.application_id)?;
        let verifier = SignatureVerifier::from_hex(&cli.public_key)?;
        Ok(Self {
            token,
            application_id,
            verifier,
            host: cli.host,
            port: cli.port,
            sync_commands: cli.sync_commands,
            api_base: cli.api_base,
        })
    }
}

fn non_empty(flag: &'static str, value: &str) -> Result<String, ConfigError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ConfigError::Empty { flag });
    }
    Ok(trimmed.to_owned())
}
