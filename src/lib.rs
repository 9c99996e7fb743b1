//! Slashhook: slash command webhooks for interaction platforms.
//!
//! Handlers declare typed parameters; the crate compiles them into command
//! schemas, registers them with the platform, and serves the signed webhook
//! the platform calls when a user invokes a command.
//!
//! # Architecture
//!
//! Slashhook follows hexagonal architecture principles:
//!
//! - **Domain**: Schema compilation, command lookup and wire payloads
//! - **Ports**: Handler and REST client traits
//! - **Adapters**: Axum endpoint, reqwest client and in-memory test doubles
//!
//! # Modules
//!
//! - [`command`]: Command schemas, handlers and the registry
//! - [`interaction`]: Signature checks, dispatch and deferred replies
//! - [`config`]: Command line and environment configuration
//! - [`telemetry`]: Tracing subscriber setup

pub mod command;
pub mod config;
pub mod interaction;
pub mod telemetry;
