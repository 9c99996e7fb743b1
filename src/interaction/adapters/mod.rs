//! Adapter implementations for the interaction ports and the webhook server.

pub mod http;
pub mod memory;
pub mod rest;

pub use http::{INTERACTIONS_PATH, ServeError, router, serve};
pub use memory::{RecordedEdit, RecordingRestClient};
pub use rest::{DEFAULT_API_BASE, DiscordRestClient};
