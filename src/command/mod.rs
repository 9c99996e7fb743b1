//! Command schemas, handlers and the command registry.
//!
//! The module follows the same hexagonal layout as the rest of the crate:
//!
//! - Domain types and the schema compiler in [`domain`]
//! - The handler port in [`ports`]
//! - Closure-backed handlers in [`adapters`]
//! - Remote registration in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
