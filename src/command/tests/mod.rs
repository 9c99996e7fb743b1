//! Unit tests for the command module.
//!
//! Covers schema compilation, group lookup, registry construction and
//! remote command synchronization.

mod support;
