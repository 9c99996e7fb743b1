//! Inbound interaction handling.
//!
//! - Wire payloads, contexts and signature checks in [`domain`]
//! - The outbound REST port in [`ports`]
//! - The axum endpoint and REST clients in [`adapters`]
//! - The dispatcher and deferred task runner in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
