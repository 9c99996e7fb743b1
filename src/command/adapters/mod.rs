//! Adapter implementations for the command handler port.

mod handler_fn;

pub use handler_fn::{FnHandler, deferred_handler, immediate_handler};
