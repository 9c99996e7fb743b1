//! Port contracts for calls back into the interaction platform.

mod rest;

pub use rest::{InteractionRestClient, RestError, RestResult};
