//! Unit tests for the interaction module.
//!
//! Covers request signatures, wire decoding, argument extraction and the
//! dispatcher state machine including deferred replies.

mod arguments_tests;
mod dispatcher_tests;
mod signature_tests;
mod support;
